//! Desktop inspector for airnode device manifests.
//!
//! Loads a device profile exactly as the firmware does at startup, logs every
//! section, and exits with status 1 when the manifest fails validation.
//!
//! # Usage
//!
//! ```text
//! airnode-inspect [reader|sender] [--provision <blob>]
//! airnode-inspect --write-provision <blob>
//! ```
//!
//! | Argument                  | Effect                                                     |
//! |---------------------------|------------------------------------------------------------|
//! | `reader`/`sender`         | Profile to load; both when omitted                         |
//! | `--provision <blob>`      | Sender credentials from a postcard blob, not the build env |
//! | `--write-provision <blob>`| Encode `AIRNODE_*` credentials from the environment        |
//!
//! Bad arguments exit with status 2. Log verbosity follows `RUST_LOG` (default
//! `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgMatches, Command};
use log::{error, info};

use airnode_core::config::{Bme280Interface, SerialConfig};
use airnode_core::{
    CredentialField, Credentials, DeviceProfile, Manifest, ReaderManifest, SenderManifest,
};

const CREDENTIAL_FIELDS: [CredentialField; 3] = [
    CredentialField::WifiSsid,
    CredentialField::WifiPassword,
    CredentialField::UbidotsToken,
];

fn parse_profile(s: &str) -> Result<DeviceProfile, String> {
    s.parse::<DeviceProfile>().map_err(|e| e.to_string())
}

fn cli() -> Command {
    Command::new("airnode-inspect")
        .about("Load airnode device manifests the way the firmware does at startup.")
        .arg(
            clap::arg!([PROFILE]... "Profiles to load, `reader` or `sender`; both when omitted")
                .value_parser(parse_profile)
                .conflicts_with("write-provision"),
        )
        .arg(
            clap::arg!(--provision <BLOB> "Read sender credentials from a provisioning blob")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("write-provision"),
        )
        .arg(
            clap::arg!(--"write-provision" <BLOB> "Encode AIRNODE_* credentials from the environment into a blob")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn profiles(matches: &ArgMatches) -> Vec<DeviceProfile> {
    match matches.get_many::<DeviceProfile>("PROFILE") {
        Some(profiles) => profiles.copied().collect(),
        None => DeviceProfile::ALL.to_vec(),
    }
}

/// Encode credentials taken from the runtime environment into `path`.
fn write_provision(path: &Path) -> Result<(), String> {
    let values: Vec<(CredentialField, String)> = CREDENTIAL_FIELDS
        .iter()
        .filter_map(|&field| std::env::var(field.env_key()).ok().map(|v| (field, v)))
        .collect();

    let credentials = Credentials::from_lookup(|field| {
        values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    })
    .map_err(|e| e.to_string())?;

    let blob = credentials.to_provisioning_blob().map_err(|e| e.to_string())?;
    std::fs::write(path, &blob).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    info!("Wrote {} byte provisioning blob to {}", blob.len(), path.display());
    Ok(())
}

fn load(profile: DeviceProfile, provision: Option<&Path>) -> Result<Manifest, String> {
    let manifest = match (profile, provision) {
        (DeviceProfile::Sender, Some(path)) => {
            let blob = std::fs::read(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            let credentials =
                Credentials::from_provisioning_blob(&blob).map_err(|e| e.to_string())?;
            Manifest::load_with(profile, credentials)
        }
        _ => Manifest::load(profile),
    };
    manifest.map_err(|e| e.to_string())
}

fn log_serial(serial: &SerialConfig) {
    info!(
        "  serial: {} baud, tx {}, rx {}",
        serial.baud_rate, serial.tx, serial.rx
    );
}

fn log_reader(m: &ReaderManifest) {
    log_serial(&m.serial);
    match m.pressure.local {
        Some(local) => info!(
            "  pressure: sea level {} hPa, {} {} hPa",
            m.pressure.sea_level_hpa, local.label, local.hpa
        ),
        None => info!("  pressure: sea level {} hPa", m.pressure.sea_level_hpa),
    }
    info!(
        "  mq2: analog {}, digital {}, threshold {}",
        m.mq2.analog, m.mq2.digital, m.mq2.threshold
    );
    match m.bme280.interface {
        Bme280Interface::I2c => info!(
            "  bme280: i2c at {}, chip id {:#04x}",
            m.bme280.address, m.bme280.chip_id
        ),
        Bme280Interface::Spi(spi) => info!(
            "  bme280: spi sck {}, sdo {}, sda {}, csb {}, chip id {:#04x}",
            spi.sck, spi.sdo, spi.sda, spi.csb, m.bme280.chip_id
        ),
    }
    info!(
        "  buzzer: {} Hz for {} ms on {}",
        m.buzzer.frequency_hz,
        m.buzzer.duration.as_millis(),
        m.buzzer.pin
    );
}

fn log_sender(m: &SenderManifest) {
    log_serial(&m.serial);
    info!(
        "  oled: {}x{}, in {}, out {}",
        m.oled.resolution.width, m.oled.resolution.height, m.oled.input, m.oled.output
    );
    info!("  publish: every {} s", m.publish.interval.as_secs());
    info!("  wifi: {:?}", m.credentials);
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    if let Some(path) = matches.get_one::<PathBuf>("write-provision") {
        return match write_provision(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let provision = matches.get_one::<PathBuf>("provision");
    let mut failed = false;
    for profile in profiles(&matches) {
        match load(profile, provision.map(PathBuf::as_path)) {
            Ok(manifest) => {
                info!("{} on {}:", profile, profile.board());
                match &manifest {
                    Manifest::Reader(m) => log_reader(m),
                    Manifest::Sender(m) => log_sender(m),
                }
            }
            Err(e) => {
                error!("{profile}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
