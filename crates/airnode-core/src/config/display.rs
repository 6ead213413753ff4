use embedded_graphics::geometry::Size;

use crate::error::{Result, ValidationError};
use crate::pins::{Pin, PinClaims};

use super::Validate;

/// SSD1306-class OLED on the sender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OledConfig {
    /// Data line into the display (SDA).
    pub input: Pin,
    /// Clock line from the MCU (SCL).
    pub output: Pin,
    pub resolution: Size,
}

impl Validate for OledConfig {
    fn validate(&self, pins: &mut PinClaims) -> Result<()> {
        let Size { width, height } = self.resolution;
        if width == 0 || height == 0 {
            return Err(ValidationError::ZeroResolution { width, height });
        }
        pins.claim("oled input", self.input)?;
        pins.claim("oled output", self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    #[test]
    fn test_zero_axis_rejected() {
        let mut pins = PinClaims::new(Board::NodeMcu);
        let oled = OledConfig {
            input: Pin::NodeMcu(2),
            output: Pin::NodeMcu(1),
            resolution: Size::new(128, 0),
        };
        assert_eq!(
            oled.validate(&mut pins),
            Err(ValidationError::ZeroResolution {
                width: 128,
                height: 0
            })
        );
    }
}
