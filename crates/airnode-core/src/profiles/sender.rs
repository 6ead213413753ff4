use alloc::vec::Vec;

use embassy_time::Duration;
use embedded_graphics::geometry::Size;
use log::info;

use crate::config::{OledConfig, PublishConfig, SerialConfig, Validate};
use crate::credentials::Credentials;
use crate::error::Result;
use crate::pins::{Board, Pin, PinClaims};

use super::{DeviceProfile, validate_sections};

// ============================================================================
// Serial
// ============================================================================

const SERIAL_SPEED: u32 = 9600;
const SERIAL_TX_PIN: Pin = Pin::NodeMcu(7);
const SERIAL_RX_PIN: Pin = Pin::NodeMcu(6);

// ============================================================================
// Ubidots
// ============================================================================

const HTTP_REQUEST_INTERVAL_SECS: u64 = 2;

// ============================================================================
// OLED
// ============================================================================

const OLED_PIN_INPUT: Pin = Pin::NodeMcu(2);
const OLED_PIN_OUTPUT: Pin = Pin::NodeMcu(1);
const OLED_H_RESOLUTION: u32 = 128;
const OLED_V_RESOLUTION: u32 = 64;

/// Manifest of the sensor-ubidots-sender (NodeMCU).
#[derive(Debug, Clone, PartialEq)]
pub struct SenderManifest {
    pub serial: SerialConfig,
    pub publish: PublishConfig,
    pub oled: OledConfig,
    pub credentials: Credentials,
}

impl SenderManifest {
    pub const BOARD: Board = Board::NodeMcu;

    /// Build and validate the sender's manifest with the credentials
    /// injected at build time.
    pub fn load() -> Result<Self> {
        Self::load_with(Credentials::from_build_env()?)
    }

    /// Build and validate the sender's manifest with `credentials`.
    pub fn load_with(credentials: Credentials) -> Result<Self> {
        let manifest = Self {
            serial: SerialConfig {
                baud_rate: SERIAL_SPEED,
                tx: SERIAL_TX_PIN,
                rx: SERIAL_RX_PIN,
            },
            publish: PublishConfig {
                interval: Duration::from_secs(HTTP_REQUEST_INTERVAL_SECS),
            },
            oled: OledConfig {
                input: OLED_PIN_INPUT,
                output: OLED_PIN_OUTPUT,
                resolution: Size::new(OLED_H_RESOLUTION, OLED_V_RESOLUTION),
            },
            credentials,
        };

        let pins = manifest.validate()?;
        info!(
            "{} manifest loaded: {} pins on {}, WiFi SSID {:?}, publishing every {} s",
            DeviceProfile::Sender,
            pins.len(),
            Self::BOARD,
            manifest.credentials.wifi_ssid(),
            manifest.publish.interval.as_secs(),
        );
        Ok(manifest)
    }

    /// Every pin field the record holds, labelled by function.
    pub fn pin_fields(&self) -> Vec<(&'static str, Pin)> {
        Vec::from([
            ("serial tx", self.serial.tx),
            ("serial rx", self.serial.rx),
            ("oled input", self.oled.input),
            ("oled output", self.oled.output),
        ])
    }

    /// Check every section, credentials included, and return the pins the
    /// manifest claims.
    pub fn validate(&self) -> Result<PinClaims> {
        let sections: [&dyn Validate; 4] =
            [&self.serial, &self.publish, &self.oled, &self.credentials];
        validate_sections(DeviceProfile::Sender, &sections)
    }
}
