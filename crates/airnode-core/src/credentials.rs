//! WiFi and Ubidots credentials for the sender
//!
//! Secrets never live in source. They are injected at build time by the
//! crate's build script (from the environment or a `.env` file) or decoded
//! from a provisioning blob written to the device out of band.

use alloc::vec::Vec;
use core::fmt;

use heapless::String;
use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::error::{CredentialField, Result, ValidationError};
use crate::pins::PinClaims;

/// Longest SSID allowed by 802.11.
pub const MAX_SSID_LEN: usize = 32;
/// WPA2-PSK passphrase bounds.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 63;
/// Longest Ubidots token accepted.
pub const MAX_TOKEN_LEN: usize = 64;

/// Placeholder values shipped in the sketch templates. A device flashed with
/// any of these was never provisioned.
const PLACEHOLDERS: [(CredentialField, &str); 3] = [
    (CredentialField::WifiSsid, "SSID_DA_REDE"),
    (CredentialField::WifiPassword, "SENHA_DA_REDE"),
    (CredentialField::UbidotsToken, "COLOQUE_O_SEU_TOKEN_AQUI"),
];

/// Validated sender credentials.
///
/// Every way of obtaining one, decoding included, goes through the checks of
/// [`Credentials::new`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    wifi_ssid: String<MAX_SSID_LEN>,
    wifi_password: String<MAX_PASSWORD_LEN>,
    ubidots_token: String<MAX_TOKEN_LEN>,
}

/// Wire form of [`Credentials`] before validation.
#[derive(Deserialize)]
struct RawCredentials {
    wifi_ssid: String<MAX_SSID_LEN>,
    wifi_password: String<MAX_PASSWORD_LEN>,
    ubidots_token: String<MAX_TOKEN_LEN>,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = ValidationError;

    fn try_from(raw: RawCredentials) -> Result<Self> {
        Self::new(&raw.wifi_ssid, &raw.wifi_password, &raw.ubidots_token)
    }
}

impl Credentials {
    /// Validate and store a set of credentials.
    pub fn new(wifi_ssid: &str, wifi_password: &str, ubidots_token: &str) -> Result<Self> {
        check_ssid(wifi_ssid)?;
        check_password(wifi_password)?;
        check_token(ubidots_token)?;

        Ok(Self {
            wifi_ssid: bounded(CredentialField::WifiSsid, wifi_ssid)?,
            wifi_password: bounded(CredentialField::WifiPassword, wifi_password)?,
            ubidots_token: bounded(CredentialField::UbidotsToken, ubidots_token)?,
        })
    }

    /// Credentials injected by the build script.
    pub fn from_build_env() -> Result<Self> {
        Self::from_lookup(|field| match field {
            CredentialField::WifiSsid => option_env!("AIRNODE_WIFI_SSID"),
            CredentialField::WifiPassword => option_env!("AIRNODE_WIFI_PASSWORD"),
            CredentialField::UbidotsToken => option_env!("AIRNODE_UBIDOTS_TOKEN"),
        })
    }

    /// Credentials resolved through `lookup`, one field at a time.
    pub fn from_lookup<'a, F>(lookup: F) -> Result<Self>
    where
        F: Fn(CredentialField) -> Option<&'a str>,
    {
        let fetch = |field: CredentialField| {
            lookup(field).ok_or_else(|| {
                warn!("{} not set; define {} before building", field, field.env_key());
                ValidationError::MissingCredential(field)
            })
        };

        Self::new(
            fetch(CredentialField::WifiSsid)?,
            fetch(CredentialField::WifiPassword)?,
            fetch(CredentialField::UbidotsToken)?,
        )
    }

    /// Decode credentials from a `postcard` provisioning blob.
    ///
    /// The decoded values go through the same checks as [`Credentials::new`].
    pub fn from_provisioning_blob(blob: &[u8]) -> Result<Self> {
        let raw: RawCredentials = postcard::from_bytes(blob).map_err(|e| {
            error!("Provisioning blob decode failed: {:?}", e);
            ValidationError::Provisioning
        })?;

        Self::try_from(raw)
    }

    /// Encode these credentials as a provisioning blob.
    pub fn to_provisioning_blob(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|e| {
            error!("Provisioning blob encode failed: {:?}", e);
            ValidationError::Provisioning
        })
    }

    pub fn wifi_ssid(&self) -> &str {
        &self.wifi_ssid
    }

    pub fn wifi_password(&self) -> &str {
        &self.wifi_password
    }

    pub fn ubidots_token(&self) -> &str {
        &self.ubidots_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("wifi_ssid", &self.wifi_ssid.as_str())
            .finish_non_exhaustive()
    }
}

impl Validate for Credentials {
    fn validate(&self, _pins: &mut PinClaims) -> Result<()> {
        check_ssid(&self.wifi_ssid)?;
        check_password(&self.wifi_password)?;
        check_token(&self.ubidots_token)
    }
}

fn bounded<const N: usize>(field: CredentialField, value: &str) -> Result<String<N>> {
    String::try_from(value).map_err(|_| ValidationError::MalformedCredential {
        field,
        reason: "too long",
    })
}

fn check_common(field: CredentialField, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::MissingCredential(field));
    }
    if PLACEHOLDERS.iter().any(|&(f, p)| f == field && p == value) {
        return Err(ValidationError::PlaceholderCredential(field));
    }
    Ok(())
}

fn check_ssid(ssid: &str) -> Result<()> {
    let field = CredentialField::WifiSsid;
    check_common(field, ssid)?;
    if ssid.len() > MAX_SSID_LEN {
        return Err(ValidationError::MalformedCredential {
            field,
            reason: "longer than 32 bytes",
        });
    }
    Ok(())
}

fn check_password(password: &str) -> Result<()> {
    let field = CredentialField::WifiPassword;
    check_common(field, password)?;
    if !password.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(ValidationError::MalformedCredential {
            field,
            reason: "must be printable ASCII",
        });
    }
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len()) {
        return Err(ValidationError::MalformedCredential {
            field,
            reason: "must be 8 to 63 characters",
        });
    }
    Ok(())
}

fn check_token(token: &str) -> Result<()> {
    let field = CredentialField::UbidotsToken;
    check_common(field, token)?;
    if token.len() > MAX_TOKEN_LEN {
        return Err(ValidationError::MalformedCredential {
            field,
            reason: "longer than 64 bytes",
        });
    }
    if !token
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(ValidationError::MalformedCredential {
            field,
            reason: "must be letters, digits, '-' or '_'",
        });
    }
    Ok(())
}
