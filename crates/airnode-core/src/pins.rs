//! Board pin naming and conflict detection
//!
//! Manifests name pins the way the board silkscreen does (`8`, `A0`, `D7`).
//! Two different names can land on the same physical contact (on a NodeMCU
//! `D7` and `13` are both GPIO13), so uniqueness is checked after each name
//! has been resolved against its [`Board`].

use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::error::{Result, ValidationError};

/// Number of analog channels broken out on the Arduino Uno (`A0`..=`A5`).
const UNO_ANALOG_CHANNELS: u8 = 6;

/// Highest digital pin number on the Arduino Uno header.
const UNO_MAX_DIGITAL: u8 = 13;

/// Analog channels double as digital pins 14..=19 on the Uno.
const UNO_MAX_PIN: u8 = UNO_MAX_DIGITAL + UNO_ANALOG_CHANNELS;

/// Highest GPIO number on the ESP8266.
const ESP8266_MAX_GPIO: u8 = 16;

/// GPIO6..=GPIO11 drive the SPI flash on ESP-12 modules and are not broken
/// out for general use.
const ESP8266_FLASH_GPIO: core::ops::RangeInclusive<u8> = 6..=11;

/// Identifier given to the ESP8266 ADC input. It sits outside the GPIO range
/// so it never collides with a digital pin.
const ESP8266_ADC_PIN: u8 = 17;

/// NodeMCU `Dn` label to ESP8266 GPIO number.
const NODEMCU_LABELS: [u8; 9] = [16, 5, 4, 0, 2, 14, 12, 13, 15];

/// A pin as written in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin {
    /// Raw digital pin / GPIO number.
    Digital(u8),
    /// Analog input channel, `A<n>`.
    Analog(u8),
    /// NodeMCU silkscreen label, `D<n>`.
    NodeMcu(u8),
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digital(n) => write!(f, "{n}"),
            Self::Analog(n) => write!(f, "A{n}"),
            Self::NodeMcu(n) => write!(f, "D{n}"),
        }
    }
}

/// A resolved physical pin (the MCU's own GPIO numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysicalPin(pub u8);

/// Board a manifest targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    /// ATmega328P based Arduino Uno (sensor-reader).
    ArduinoUno,
    /// ESP8266 NodeMCU devkit (sensor-ubidots-sender).
    NodeMcu,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArduinoUno => f.write_str("Arduino Uno"),
            Self::NodeMcu => f.write_str("NodeMCU (ESP8266)"),
        }
    }
}

impl Board {
    /// Resolve a manifest pin to the physical pin it drives.
    ///
    /// `function` only labels the error.
    pub fn resolve(self, function: &'static str, pin: Pin) -> Result<PhysicalPin> {
        let physical = match (self, pin) {
            (Self::ArduinoUno, Pin::Digital(n)) if n <= UNO_MAX_PIN => Some(n),
            (Self::ArduinoUno, Pin::Analog(n)) if n < UNO_ANALOG_CHANNELS => {
                Some(UNO_MAX_DIGITAL + 1 + n)
            }
            (Self::NodeMcu, Pin::Digital(n))
                if n <= ESP8266_MAX_GPIO && !ESP8266_FLASH_GPIO.contains(&n) =>
            {
                Some(n)
            }
            (Self::NodeMcu, Pin::Analog(0)) => Some(ESP8266_ADC_PIN),
            (Self::NodeMcu, Pin::NodeMcu(n)) => NODEMCU_LABELS.get(usize::from(n)).copied(),
            _ => None,
        };

        physical.map(PhysicalPin).ok_or(ValidationError::UnknownPin {
            function,
            pin,
            board: self,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Claim {
    function: &'static str,
    physical: PhysicalPin,
}

/// Registry of the pins a manifest uses.
///
/// Each section of a manifest claims its pins here; the second claim on a
/// physical pin fails with [`ValidationError::DuplicatePin`].
#[derive(Debug)]
pub struct PinClaims {
    board: Board,
    claims: Vec<Claim>,
}

impl PinClaims {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            claims: Vec::new(),
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Claim `pin` for `function`.
    pub fn claim(&mut self, function: &'static str, pin: Pin) -> Result<PhysicalPin> {
        let physical = self.board.resolve(function, pin)?;

        if let Some(existing) = self.claims.iter().find(|c| c.physical == physical) {
            return Err(ValidationError::DuplicatePin {
                first: existing.function,
                second: function,
                pin,
                physical: physical.0,
            });
        }

        debug!("{}: {} claimed pin {} (GPIO {})", self.board, function, pin, physical.0);
        self.claims.push(Claim { function, physical });
        Ok(physical)
    }

    /// Number of pins claimed so far.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Physical pin claimed by `function`, if any.
    pub fn physical_for(&self, function: &str) -> Option<PhysicalPin> {
        self.claims
            .iter()
            .find(|c| c.function == function)
            .map(|c| c.physical)
    }
}
