//! Configuration errors raised while loading a device manifest

use thiserror_no_std::Error;

use crate::pins::{Board, Pin};

/// Which credential a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    WifiSsid,
    WifiPassword,
    UbidotsToken,
}

impl CredentialField {
    /// Name of the build-time variable that supplies this credential.
    pub const fn env_key(self) -> &'static str {
        match self {
            Self::WifiSsid => "AIRNODE_WIFI_SSID",
            Self::WifiPassword => "AIRNODE_WIFI_PASSWORD",
            Self::UbidotsToken => "AIRNODE_UBIDOTS_TOKEN",
        }
    }
}

impl core::fmt::Display for CredentialField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::WifiSsid => "WiFi SSID",
            Self::WifiPassword => "WiFi password",
            Self::UbidotsToken => "Ubidots token",
        };
        f.write_str(name)
    }
}

/// A manifest violated one of its static invariants.
///
/// Every variant is fatal: the device must not bring up any peripheral with a
/// manifest that failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("pin {pin} (GPIO {physical}) assigned to both {first} and {second}")]
    DuplicatePin {
        first: &'static str,
        second: &'static str,
        pin: Pin,
        physical: u8,
    },
    #[error("pin {pin} used by {function} does not exist on {board}")]
    UnknownPin {
        function: &'static str,
        pin: Pin,
        board: Board,
    },
    #[error("BME280 bus address {0:#04x} is not 0x76 or 0x77")]
    InvalidBusAddress(u8),
    #[error("BME280 chip id {0:#04x} is not a known BMP280/BME280 id")]
    UnknownChipId(u8),
    #[error("serial baud rate must be non-zero")]
    ZeroBaudRate,
    #[error("{name} pressure {hpa} hPa is outside 300..=1100 hPa")]
    PressureOutOfRange { name: &'static str, hpa: f32 },
    #[error("MQ-2 threshold {0} is outside the 0..=1023 ADC scale")]
    ThresholdOutOfRange(f32),
    #[error("buzzer frequency must be non-zero")]
    ZeroBuzzerFrequency,
    #[error("buzzer duration must be non-zero")]
    ZeroBuzzerDuration,
    #[error("display resolution {width}x{height} has a zero axis")]
    ZeroResolution { width: u32, height: u32 },
    #[error("publish interval must be non-zero")]
    ZeroPublishInterval,
    #[error("{0} was not provided")]
    MissingCredential(CredentialField),
    #[error("{field} is malformed: {reason}")]
    MalformedCredential {
        field: CredentialField,
        reason: &'static str,
    },
    #[error("{0} still holds the placeholder value")]
    PlaceholderCredential(CredentialField),
    #[error("provisioning blob could not be decoded")]
    Provisioning,
}

pub type Result<T, E = ValidationError> = core::result::Result<T, E>;
