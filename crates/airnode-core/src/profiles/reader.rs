use alloc::vec::Vec;

use embassy_time::Duration;
use log::info;

use crate::config::{
    Bme280Address, Bme280Config, Bme280Interface, Bme280SpiPins, BuzzerConfig, LocalPressure,
    Mq2Config, PressureReference, SerialConfig, STANDARD_SEA_LEVEL_HPA, Validate,
};
use crate::error::Result;
use crate::pins::{Board, Pin, PinClaims};

use super::{DeviceProfile, validate_sections};

// ============================================================================
// Serial
// ============================================================================

const SERIAL_SPEED: u32 = 9600;
const SERIAL_TX_PIN: Pin = Pin::Digital(8);
const SERIAL_RX_PIN: Pin = Pin::Digital(9);

// ============================================================================
// Reference values
// ============================================================================

/// Sea-level pressure reported for São Paulo on 2024-02-14, in hPa.
const PRESSURE_LEVEL_SP20240214: LocalPressure = LocalPressure {
    label: "São Paulo 2024-02-14",
    hpa: 1021.0,
};

// ============================================================================
// MQ-2
// ============================================================================

const MQ2_SENSOR_A0_PIN: Pin = Pin::Analog(0);
const MQ2_SENSOR_D0_PIN: Pin = Pin::Digital(7);
const MQ2_SENSOR_THRESHOLD: f32 = 550.0;

// ============================================================================
// BME280
// ============================================================================

const BME280_CHIP_ADDRESS: u8 = 0x76;
const BME280_SENSOR_CHIP_ID: u8 = 0x58;
const BME280_INTERFACE: Bme280Interface = Bme280Interface::I2c;

// ============================================================================
// Buzzer
// ============================================================================

const BUZZER_FREQUENCY_HZ: u32 = 440;
const BUZZER_DURATION_MS: u64 = 1000;
const BUZZER_GPIO_PIN: Pin = Pin::Digital(10);

/// Manifest of the sensor-reader (Arduino Uno).
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderManifest {
    pub serial: SerialConfig,
    pub pressure: PressureReference,
    pub mq2: Mq2Config,
    pub bme280: Bme280Config,
    pub buzzer: BuzzerConfig,
}

impl ReaderManifest {
    pub const BOARD: Board = Board::ArduinoUno;

    /// SPI wiring of the BME280 on the reader's shield. Chip select shares
    /// pin 10 with the buzzer, so the buzzer has to move before switching the
    /// sensor to SPI.
    pub const BME280_SPI_WIRING: Bme280SpiPins = Bme280SpiPins {
        sck: Pin::Digital(13),
        sdo: Pin::Digital(12),
        sda: Pin::Digital(11),
        csb: Pin::Digital(10),
    };

    /// Build and validate the reader's manifest.
    pub fn load() -> Result<Self> {
        let manifest = Self {
            serial: SerialConfig {
                baud_rate: SERIAL_SPEED,
                tx: SERIAL_TX_PIN,
                rx: SERIAL_RX_PIN,
            },
            pressure: PressureReference {
                sea_level_hpa: STANDARD_SEA_LEVEL_HPA,
                local: Some(PRESSURE_LEVEL_SP20240214),
            },
            mq2: Mq2Config {
                analog: MQ2_SENSOR_A0_PIN,
                digital: MQ2_SENSOR_D0_PIN,
                threshold: MQ2_SENSOR_THRESHOLD,
            },
            bme280: Bme280Config {
                address: Bme280Address::try_from(BME280_CHIP_ADDRESS)?,
                chip_id: BME280_SENSOR_CHIP_ID,
                interface: BME280_INTERFACE,
            },
            buzzer: BuzzerConfig {
                frequency_hz: BUZZER_FREQUENCY_HZ,
                duration: Duration::from_millis(BUZZER_DURATION_MS),
                pin: BUZZER_GPIO_PIN,
            },
        };

        let pins = manifest.validate()?;
        info!(
            "{} manifest loaded: {} pins on {}, {} baud, BME280 at {}",
            DeviceProfile::Reader,
            pins.len(),
            Self::BOARD,
            manifest.serial.baud_rate,
            manifest.bme280.address,
        );
        Ok(manifest)
    }

    /// Every pin field the record holds, labelled by function.
    pub fn pin_fields(&self) -> Vec<(&'static str, Pin)> {
        let mut fields = Vec::from([
            ("serial tx", self.serial.tx),
            ("serial rx", self.serial.rx),
            ("mq2 analog", self.mq2.analog),
            ("mq2 digital", self.mq2.digital),
            ("buzzer", self.buzzer.pin),
        ]);
        if let Some(spi) = self.bme280.interface.spi_pins() {
            fields.extend([
                ("bme280 sck", spi.sck),
                ("bme280 sdo", spi.sdo),
                ("bme280 sda", spi.sda),
                ("bme280 csb", spi.csb),
            ]);
        }
        fields
    }

    /// Check every section and return the pins the manifest claims.
    pub fn validate(&self) -> Result<PinClaims> {
        let sections: [&dyn Validate; 5] = [
            &self.serial,
            &self.pressure,
            &self.mq2,
            &self.bme280,
            &self.buzzer,
        ];
        validate_sections(DeviceProfile::Reader, &sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::pins::PhysicalPin;

    #[test]
    fn test_literal_values() {
        let m = ReaderManifest::load().unwrap();

        assert_eq!(m.serial.baud_rate, 9600);
        assert_eq!(m.serial.tx, Pin::Digital(8));
        assert_eq!(m.serial.rx, Pin::Digital(9));
        assert_eq!(m.mq2.threshold, 550.0);
        assert_eq!(m.mq2.analog, Pin::Analog(0));
        assert_eq!(m.mq2.digital, Pin::Digital(7));
        assert_eq!(m.bme280.address.value(), 0x76);
        assert_eq!(m.bme280.chip_id, 0x58);
        assert_eq!(m.pressure.sea_level_hpa, 1013.25);
        assert_eq!(m.pressure.effective_hpa(), 1021.0);
        assert_eq!(m.buzzer.frequency_hz, 440);
        assert_eq!(m.buzzer.duration, Duration::from_millis(1000));
        assert_eq!(m.buzzer.pin, Pin::Digital(10));
    }

    #[test]
    fn test_literal_pins_are_unique() {
        let m = ReaderManifest::load().unwrap();
        let pins = m.validate().unwrap();

        // serial tx/rx, mq2 analog/digital, buzzer; SPI lines unused over I2C
        assert_eq!(pins.len(), 5);
        assert_eq!(pins.physical_for("mq2 analog"), Some(PhysicalPin(14)));
    }

    #[test]
    fn test_loaded_record_has_no_shared_pins() {
        let m = ReaderManifest::load().unwrap();
        assert_eq!(m.bme280.interface.spi_pins(), None);

        let fields = m.pin_fields();
        assert_eq!(fields.len(), 5);
        let physical: Vec<_> = fields
            .iter()
            .map(|&(function, pin)| ReaderManifest::BOARD.resolve(function, pin).unwrap())
            .collect();
        for (i, a) in physical.iter().enumerate() {
            for (j, b) in physical.iter().enumerate().skip(i + 1) {
                assert_ne!(a, b, "{} and {} share a pin", fields[i].0, fields[j].0);
            }
        }
    }

    #[test]
    fn test_buzzer_collides_with_spi_chip_select() {
        let mut m = ReaderManifest::load().unwrap();
        m.bme280.interface = Bme280Interface::Spi(ReaderManifest::BME280_SPI_WIRING);

        assert_eq!(
            m.validate().unwrap_err(),
            ValidationError::DuplicatePin {
                first: "bme280 csb",
                second: "buzzer",
                pin: Pin::Digital(10),
                physical: 10,
            }
        );
    }

    #[test]
    fn test_spi_wiring_with_free_buzzer_pin() {
        let mut m = ReaderManifest::load().unwrap();
        m.bme280.interface = Bme280Interface::Spi(ReaderManifest::BME280_SPI_WIRING);
        m.buzzer.pin = Pin::Digital(6);

        assert_eq!(m.validate().unwrap().len(), 9);
        assert_eq!(m.pin_fields().len(), 9);
    }

    #[test]
    fn test_analog_alias_collision() {
        // A0 is digital 14 on the Uno
        let mut m = ReaderManifest::load().unwrap();
        m.buzzer.pin = Pin::Digital(14);
        assert_eq!(
            m.validate().unwrap_err(),
            ValidationError::DuplicatePin {
                first: "mq2 analog",
                second: "buzzer",
                pin: Pin::Digital(14),
                physical: 14,
            }
        );
    }

    #[test]
    fn test_load_is_idempotent() {
        let a = ReaderManifest::load().unwrap();
        let b = ReaderManifest::load().unwrap();

        assert_eq!(a, b);
        assert_eq!(a.mq2.threshold.to_bits(), b.mq2.threshold.to_bits());
        assert_eq!(
            a.pressure.effective_hpa().to_bits(),
            b.pressure.effective_hpa().to_bits()
        );
    }
}
