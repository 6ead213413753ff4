use core::fmt;

use crate::error::{Result, ValidationError};
use crate::pins::{Pin, PinClaims};

use super::Validate;

/// Chip ids reported by register 0xD0 of the Bosch pressure sensors.
///
/// BMP280 samples report 0x56/0x57, mass production 0x58. The BME280 (with
/// humidity) reports 0x60.
pub const KNOWN_CHIP_IDS: [u8; 4] = [0x56, 0x57, 0x58, 0x60];

/// I2C address of the sensor, selected by the SDO strap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bme280Address {
    /// SDO tied to GND.
    Primary,
    /// SDO tied to VDDIO.
    Secondary,
}

impl Bme280Address {
    pub const fn value(self) -> u8 {
        match self {
            Self::Primary => 0x76,
            Self::Secondary => 0x77,
        }
    }
}

impl TryFrom<u8> for Bme280Address {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x76 => Ok(Self::Primary),
            0x77 => Ok(Self::Secondary),
            other => Err(ValidationError::InvalidBusAddress(other)),
        }
    }
}

impl fmt::Display for Bme280Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.value())
    }
}

/// How the sensor is wired to the MCU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bme280Interface {
    /// Hardware I2C; the SPI lines are left unconnected.
    I2c,
    /// 4-wire SPI.
    Spi(Bme280SpiPins),
}

impl Bme280Interface {
    /// SPI lines in use, `None` over I2C.
    pub fn spi_pins(&self) -> Option<&Bme280SpiPins> {
        match self {
            Self::I2c => None,
            Self::Spi(pins) => Some(pins),
        }
    }
}

/// SPI wiring of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bme280SpiPins {
    /// SCL/SCK, serial clock.
    pub sck: Pin,
    /// SDO, sensor data out.
    pub sdo: Pin,
    /// SDA/SDI, sensor data in.
    pub sda: Pin,
    /// CSB, chip select.
    pub csb: Pin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bme280Config {
    pub address: Bme280Address,
    /// Id the driver expects to read back before trusting the chip.
    pub chip_id: u8,
    pub interface: Bme280Interface,
}

impl Bme280Config {
    /// Whether the expected chip has a humidity channel.
    pub fn has_humidity(&self) -> bool {
        self.chip_id == 0x60
    }
}

impl Validate for Bme280Config {
    fn validate(&self, pins: &mut PinClaims) -> Result<()> {
        if !KNOWN_CHIP_IDS.contains(&self.chip_id) {
            return Err(ValidationError::UnknownChipId(self.chip_id));
        }

        if let Bme280Interface::Spi(spi) = self.interface {
            pins.claim("bme280 sck", spi.sck)?;
            pins.claim("bme280 sdo", spi.sdo)?;
            pins.claim("bme280 sda", spi.sda)?;
            pins.claim("bme280 csb", spi.csb)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    const SPI: Bme280SpiPins = Bme280SpiPins {
        sck: Pin::Digital(13),
        sdo: Pin::Digital(12),
        sda: Pin::Digital(11),
        csb: Pin::Digital(10),
    };

    fn config(interface: Bme280Interface) -> Bme280Config {
        Bme280Config {
            address: Bme280Address::Primary,
            chip_id: 0x58,
            interface,
        }
    }

    #[test]
    fn test_address_accepts_only_two_values() {
        assert_eq!(Bme280Address::try_from(0x76), Ok(Bme280Address::Primary));
        assert_eq!(Bme280Address::try_from(0x77), Ok(Bme280Address::Secondary));
        for bad in [0x00, 0x75, 0x78, 0xEC] {
            assert_eq!(
                Bme280Address::try_from(bad),
                Err(ValidationError::InvalidBusAddress(bad))
            );
        }
    }

    #[test]
    fn test_address_value_round_trips() {
        for address in [Bme280Address::Primary, Bme280Address::Secondary] {
            assert_eq!(Bme280Address::try_from(address.value()), Ok(address));
        }
    }

    #[test]
    fn test_spi_lines_claimed_only_for_spi() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        config(Bme280Interface::I2c).validate(&mut pins).unwrap();
        assert!(pins.is_empty());

        let mut pins = PinClaims::new(Board::ArduinoUno);
        config(Bme280Interface::Spi(SPI)).validate(&mut pins).unwrap();
        assert_eq!(pins.len(), 4);
    }

    #[test]
    fn test_spi_pins_only_exist_over_spi() {
        assert_eq!(Bme280Interface::I2c.spi_pins(), None);
        assert_eq!(Bme280Interface::Spi(SPI).spi_pins(), Some(&SPI));
    }

    #[test]
    fn test_unknown_chip_id_rejected() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        let bad = Bme280Config {
            chip_id: 0x61,
            ..config(Bme280Interface::I2c)
        };
        assert_eq!(
            bad.validate(&mut pins),
            Err(ValidationError::UnknownChipId(0x61))
        );
    }

    #[test]
    fn test_humidity_only_on_bme280() {
        assert!(!config(Bme280Interface::I2c).has_humidity());
        let bme = Bme280Config {
            chip_id: 0x60,
            ..config(Bme280Interface::I2c)
        };
        assert!(bme.has_humidity());
    }
}
