use embassy_time::Duration;

use crate::error::{Result, ValidationError};
use crate::pins::PinClaims;

use super::Validate;

/// Ubidots publishing cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishConfig {
    /// Delay between two HTTP requests.
    pub interval: Duration,
}

impl Validate for PublishConfig {
    fn validate(&self, _pins: &mut PinClaims) -> Result<()> {
        if self.interval.as_ticks() == 0 {
            return Err(ValidationError::ZeroPublishInterval);
        }
        Ok(())
    }
}
