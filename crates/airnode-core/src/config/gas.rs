use crate::error::{Result, ValidationError};
use crate::pins::{Pin, PinClaims};

use super::Validate;

/// Full scale of the 10-bit ADC on both boards.
pub const ADC_FULL_SCALE: f32 = 1023.0;

/// MQ-2 combustible gas / smoke sensor module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mq2Config {
    /// Analog output (AO) of the module.
    pub analog: Pin,
    /// Comparator output (DO) of the module.
    pub digital: Pin,
    /// Raw ADC reading above which gas is reported.
    pub threshold: f32,
}

impl Validate for Mq2Config {
    fn validate(&self, pins: &mut PinClaims) -> Result<()> {
        if !(0.0..=ADC_FULL_SCALE).contains(&self.threshold) {
            return Err(ValidationError::ThresholdOutOfRange(self.threshold));
        }
        pins.claim("mq2 analog", self.analog)?;
        pins.claim("mq2 digital", self.digital)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    fn mq2(threshold: f32) -> Mq2Config {
        Mq2Config {
            analog: Pin::Analog(0),
            digital: Pin::Digital(7),
            threshold,
        }
    }

    #[test]
    fn test_threshold_bounds() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        assert!(mq2(1023.0).validate(&mut pins).is_ok());

        for bad in [-1.0, 1024.0, f32::NAN] {
            let mut pins = PinClaims::new(Board::ArduinoUno);
            assert!(matches!(
                mq2(bad).validate(&mut pins),
                Err(ValidationError::ThresholdOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_analog_pin_must_exist() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        let config = Mq2Config {
            analog: Pin::Analog(7),
            ..mq2(550.0)
        };
        assert!(matches!(
            config.validate(&mut pins),
            Err(ValidationError::UnknownPin {
                function: "mq2 analog",
                ..
            })
        ));
    }
}
