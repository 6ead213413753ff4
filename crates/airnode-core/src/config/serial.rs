use crate::error::{Result, ValidationError};
use crate::pins::{Pin, PinClaims};

use super::Validate;

/// Software serial link between the reader and the sender.
///
/// Both ends run `SoftwareSerial` on ordinary GPIOs so the hardware UART stays
/// free for the USB console.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialConfig {
    /// Line speed in bits per second.
    pub baud_rate: u32,
    pub tx: Pin,
    pub rx: Pin,
}

impl Validate for SerialConfig {
    fn validate(&self, pins: &mut PinClaims) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(ValidationError::ZeroBaudRate);
        }
        pins.claim("serial tx", self.tx)?;
        pins.claim("serial rx", self.rx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    #[test]
    fn test_zero_baud_rejected() {
        let serial = SerialConfig {
            baud_rate: 0,
            tx: Pin::Digital(8),
            rx: Pin::Digital(9),
        };
        let mut pins = PinClaims::new(Board::ArduinoUno);
        assert_eq!(serial.validate(&mut pins), Err(ValidationError::ZeroBaudRate));
    }

    #[test]
    fn test_tx_and_rx_must_differ() {
        let serial = SerialConfig {
            baud_rate: 9600,
            tx: Pin::Digital(8),
            rx: Pin::Digital(8),
        };
        let mut pins = PinClaims::new(Board::ArduinoUno);
        assert!(matches!(
            serial.validate(&mut pins),
            Err(ValidationError::DuplicatePin {
                first: "serial tx",
                second: "serial rx",
                ..
            })
        ));
    }
}
