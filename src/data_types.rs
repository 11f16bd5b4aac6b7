//! Data types for AD56x0 driver.

use crate::registers::PowerDownBits;

/// Output state selected by the PD1:PD0 control bits.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PowerDownMode {
    /// Normal operation, output buffer driving.
    #[default]
    Normal,
    /// Powered down, output tied to GND through 1 kOhm.
    Pulldown1k,
    /// Powered down, output tied to GND through 100 kOhm.
    Pulldown100k,
    /// Powered down, output three-stated.
    ThreeState,
}

impl PowerDownMode {
    /// Decode the raw 2-bit value (0..=3). Anything else is rejected.
    pub fn from_bits(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(PowerDownMode::Normal),
            1 => Some(PowerDownMode::Pulldown1k),
            2 => Some(PowerDownMode::Pulldown100k),
            3 => Some(PowerDownMode::ThreeState),
            _ => None,
        }
    }

    /// PD1:PD0 field for this mode.
    pub fn field(self) -> PowerDownBits {
        match self {
            PowerDownMode::Normal => PowerDownBits::empty(),
            PowerDownMode::Pulldown1k => PowerDownBits::PD0,
            PowerDownMode::Pulldown100k => PowerDownBits::PD1,
            PowerDownMode::ThreeState => PowerDownBits::PD0 | PowerDownBits::PD1,
        }
    }

    /// Raw 2-bit value, inverse of [`PowerDownMode::from_bits`].
    pub fn bits(self) -> u8 {
        self.field().bits()
    }

    /// True for every mode except [`PowerDownMode::Normal`].
    pub fn is_powered_down(self) -> bool {
        !matches!(self, PowerDownMode::Normal)
    }
}

/// Which transfer path a driver instance was built with.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendKind {
    /// SPI peripheral.
    Hardware,
    /// Clock and data lines toggled by the driver.
    BitBang,
}
