use embassy_time::Duration;

use crate::error::{Result, ValidationError};
use crate::pins::{Pin, PinClaims};

use super::Validate;

/// Piezo buzzer driven with `tone()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuzzerConfig {
    pub frequency_hz: u32,
    pub duration: Duration,
    pub pin: Pin,
}

impl Validate for BuzzerConfig {
    fn validate(&self, pins: &mut PinClaims) -> Result<()> {
        if self.frequency_hz == 0 {
            return Err(ValidationError::ZeroBuzzerFrequency);
        }
        if self.duration.as_ticks() == 0 {
            return Err(ValidationError::ZeroBuzzerDuration);
        }
        pins.claim("buzzer", self.pin)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    #[test]
    fn test_zero_tone_rejected() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        let silent = BuzzerConfig {
            frequency_hz: 0,
            duration: Duration::from_millis(1000),
            pin: Pin::Digital(10),
        };
        assert_eq!(
            silent.validate(&mut pins),
            Err(ValidationError::ZeroBuzzerFrequency)
        );

        let instant = BuzzerConfig {
            frequency_hz: 440,
            duration: Duration::from_millis(0),
            ..silent
        };
        assert_eq!(
            instant.validate(&mut pins),
            Err(ValidationError::ZeroBuzzerDuration)
        );
        assert!(pins.is_empty());
    }
}
