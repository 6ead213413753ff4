//! Configuration manifests for the airnode sensor kit
//!
//! The kit is two devices: an Arduino that reads an MQ-2 gas sensor and a
//! BME280 and forwards the readings over serial, and a NodeMCU that shows them
//! on an OLED and publishes them to Ubidots. This crate holds every pin,
//! calibration constant and credential those devices consume, validated once
//! at startup and handed out by reference afterwards.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for `airnode-inspect` and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod credentials;
pub mod error;
pub mod pins;
pub mod profiles;

pub use credentials::Credentials;
pub use error::{CredentialField, ValidationError};
pub use profiles::{DeviceProfile, Manifest, ReaderManifest, SenderManifest};
