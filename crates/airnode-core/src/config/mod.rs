//! Manifest sections
//!
//! Each section groups the constants of one concern (serial link, gas sensor,
//! display, ...). Sections are plain data; [`Validate`] is the shared routine
//! both device profiles run over their sections at load time.

mod bme280;
mod buzzer;
mod display;
mod gas;
mod pressure;
mod publish;
mod serial;

pub use bme280::*;
pub use buzzer::*;
pub use display::*;
pub use gas::*;
pub use pressure::*;
pub use publish::*;
pub use serial::*;

use crate::error::Result;
use crate::pins::PinClaims;

/// Static checks for one manifest section.
pub trait Validate {
    /// Check the section's own invariants and claim the pins it uses.
    fn validate(&self, pins: &mut PinClaims) -> Result<()>;
}
