//! Error definitions for AD56x0 driver.

use embedded_hal::digital::ErrorKind as PinErrorKind;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiError> {
    /// Underlying SPI transfer failed (hardware backend).
    Spi(SpiError),
    /// A select/clock/data line could not be driven.
    Pin(PinErrorKind),
    /// Code, percentage, power-down mode or speed outside the legal domain.
    OutOfRange,
    /// Operation not supported by the active chip profile or backend.
    InvalidConfig,
}

impl<SpiError> Error<SpiError> {
    pub(crate) fn pin<E: embedded_hal::digital::Error>(err: E) -> Self {
        Error::Pin(err.kind())
    }
}

impl<SpiError: core::fmt::Debug> core::fmt::Display for Error<SpiError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI error: {:?}", e),
            Error::Pin(kind) => write!(f, "pin error: {:?}", kind),
            Error::OutOfRange => write!(f, "parameter out of range"),
            Error::InvalidConfig => write!(f, "unsupported for this chip profile or backend"),
        }
    }
}
