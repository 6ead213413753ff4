use crate::error::{Result, ValidationError};
use crate::pins::PinClaims;

use super::Validate;

/// Standard atmosphere at mean sea level, in hPa.
pub const STANDARD_SEA_LEVEL_HPA: f32 = 1013.25;

/// BME280 operating range, in hPa.
const MIN_PRESSURE_HPA: f32 = 300.0;
const MAX_PRESSURE_HPA: f32 = 1100.0;

/// A sea-level pressure measured for a given place and day.
///
/// Altitude estimates drift with the weather, so the reference has to be
/// refreshed from a local forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPressure {
    /// Where and when the value was taken.
    pub label: &'static str,
    pub hpa: f32,
}

/// Pressure references used to turn barometric readings into altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReference {
    pub sea_level_hpa: f32,
    pub local: Option<LocalPressure>,
}

impl PressureReference {
    /// The reference to compute altitude against: the local override when
    /// one is set, the sea-level default otherwise.
    pub fn effective_hpa(&self) -> f32 {
        self.local.map_or(self.sea_level_hpa, |l| l.hpa)
    }
}

fn check_range(name: &'static str, hpa: f32) -> Result<()> {
    // NaN fails the range check as well
    if (MIN_PRESSURE_HPA..=MAX_PRESSURE_HPA).contains(&hpa) {
        Ok(())
    } else {
        Err(ValidationError::PressureOutOfRange { name, hpa })
    }
}

impl Validate for PressureReference {
    fn validate(&self, _pins: &mut PinClaims) -> Result<()> {
        check_range("sea-level", self.sea_level_hpa)?;
        if let Some(local) = self.local {
            check_range(local.label, local.hpa)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::Board;

    #[test]
    fn test_effective_prefers_local() {
        let mut reference = PressureReference {
            sea_level_hpa: STANDARD_SEA_LEVEL_HPA,
            local: None,
        };
        assert_eq!(reference.effective_hpa(), 1013.25);

        reference.local = Some(LocalPressure {
            label: "test site",
            hpa: 1021.0,
        });
        assert_eq!(reference.effective_hpa(), 1021.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut pins = PinClaims::new(Board::ArduinoUno);
        let reference = PressureReference {
            sea_level_hpa: 101_325.0,
            local: None,
        };
        assert!(matches!(
            reference.validate(&mut pins),
            Err(ValidationError::PressureOutOfRange { name: "sea-level", .. })
        ));

        let reference = PressureReference {
            sea_level_hpa: STANDARD_SEA_LEVEL_HPA,
            local: Some(LocalPressure {
                label: "broken",
                hpa: f32::NAN,
            }),
        };
        assert!(matches!(
            reference.validate(&mut pins),
            Err(ValidationError::PressureOutOfRange { name: "broken", .. })
        ));
    }
}
