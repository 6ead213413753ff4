//! Device profiles
//!
//! The two sketches of the kit each own a manifest. They do not share values,
//! only structure: both are a list of [`Validate`] sections checked against
//! one [`PinClaims`] registry for their board.

mod reader;
mod sender;

pub use reader::*;
pub use sender::*;

use core::fmt;
use core::str::FromStr;

use log::error;
use thiserror_no_std::Error;

use crate::config::Validate;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::pins::{Board, PinClaims};

/// Role a device plays in the kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    /// Arduino reading the MQ-2 and BME280, forwarding over serial.
    Reader,
    /// NodeMCU receiving readings, showing them on the OLED and
    /// publishing them to Ubidots.
    Sender,
}

impl DeviceProfile {
    pub const ALL: [DeviceProfile; 2] = [DeviceProfile::Reader, DeviceProfile::Sender];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reader => "sensor-reader",
            Self::Sender => "sensor-ubidots-sender",
        }
    }

    pub const fn board(self) -> Board {
        match self {
            Self::Reader => ReaderManifest::BOARD,
            Self::Sender => SenderManifest::BOARD,
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "reader" | "sensor-reader" => Ok(Self::Reader),
            "sender" | "sensor-ubidots-sender" => Ok(Self::Sender),
            _ => Err(UnknownProfile),
        }
    }
}

/// Returned when a profile name matches neither device.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected `reader` or `sender`")]
pub struct UnknownProfile;

/// A loaded, validated manifest for either device.
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    Reader(ReaderManifest),
    Sender(SenderManifest),
}

impl Manifest {
    /// Load the literal manifest of `profile`.
    ///
    /// Sender credentials come from the build environment.
    pub fn load(profile: DeviceProfile) -> Result<Self> {
        match profile {
            DeviceProfile::Reader => ReaderManifest::load().map(Self::Reader),
            DeviceProfile::Sender => SenderManifest::load().map(Self::Sender),
        }
    }

    /// Load `profile`, using `credentials` for the sender instead of the
    /// build environment. The reader ignores them.
    pub fn load_with(profile: DeviceProfile, credentials: Credentials) -> Result<Self> {
        match profile {
            DeviceProfile::Reader => ReaderManifest::load().map(Self::Reader),
            DeviceProfile::Sender => SenderManifest::load_with(credentials).map(Self::Sender),
        }
    }

    pub fn profile(&self) -> DeviceProfile {
        match self {
            Self::Reader(_) => DeviceProfile::Reader,
            Self::Sender(_) => DeviceProfile::Sender,
        }
    }

    /// Re-run the shared validation on this manifest.
    pub fn validate(&self) -> Result<PinClaims> {
        match self {
            Self::Reader(m) => m.validate(),
            Self::Sender(m) => m.validate(),
        }
    }
}

/// Check every section of a manifest against a fresh pin registry for the
/// profile's board.
pub(crate) fn validate_sections(
    profile: DeviceProfile,
    sections: &[&dyn Validate],
) -> Result<PinClaims> {
    let mut pins = PinClaims::new(profile.board());
    for section in sections {
        if let Err(e) = section.validate(&mut pins) {
            error!("{} manifest rejected: {}", profile, e);
            return Err(e);
        }
    }
    Ok(pins)
}
