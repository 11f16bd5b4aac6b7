//! AD56x0 Rust Driver
//!
//! `no_std` driver for the Analog Devices AD5620 (12-bit), AD5640 (14-bit) and
//! AD5660 (16-bit) single-channel DACs. Frames go out over an `embedded-hal`
//! SPI bus or bit-banged on two output pins; the chip-select line is always
//! driven by the driver.

#![no_std]

mod fmt;

pub mod bus;
pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use bus::{Backend, NoPin, NoSpi, SpiSettings};
pub use data_types::{BackendKind, PowerDownMode};
pub use driver::{Ad56x0, BitBangAd56x0, HardwareAd56x0};
pub use error::Error;
pub use registers::ChipProfile;

/// Crate version, reported by diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
