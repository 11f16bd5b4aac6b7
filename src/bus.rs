//! Transfer backends: SPI peripheral or bit-banged clock/data lines.

use core::convert::Infallible;

use embedded_hal::digital::{Error as _, ErrorKind as PinErrorKind, ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{ErrorType as SpiErrorType, Mode, SpiBus, MODE_0};

use crate::data_types::BackendKind;
use crate::error::Error;
use crate::registers::{frame_to_bytes, ChipProfile, DEFAULT_SPI_SPEED_HZ};

/// Clock configuration recorded for the hardware backend. Bit order is always MSB first.
///
/// `embedded-hal` buses carry no per-transaction clock settings, so the board
/// code applies these to its peripheral (see [`crate::Ad56x0::spi_settings`]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpiSettings {
    pub frequency_hz: u32,
    pub mode: Mode,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_SPI_SPEED_HZ,
            mode: MODE_0,
        }
    }
}

/// Transfer path, fixed at construction.
#[derive(Debug)]
pub enum Backend<SPI, CLK, DAT> {
    Hardware { spi: SPI, settings: SpiSettings },
    BitBang { clock: CLK, data: DAT },
}

impl<SPI, CLK, DAT> Backend<SPI, CLK, DAT> {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Hardware { .. } => BackendKind::Hardware,
            Backend::BitBang { .. } => BackendKind::BitBang,
        }
    }
}

impl<SPI, CLK, DAT> Backend<SPI, CLK, DAT>
where
    SPI: SpiBus,
    CLK: OutputPin,
    DAT: OutputPin,
{
    /// Drive idle levels: clock and data low in bit-bang mode, nothing for hardware.
    pub(crate) fn idle(&mut self) -> Result<(), Error<SPI::Error>> {
        match self {
            Backend::Hardware { .. } => Ok(()),
            Backend::BitBang { clock, data } => data
                .set_low()
                .map_err(|e| e.kind())
                .and_then(|()| clock.set_low().map_err(|e| e.kind()))
                .map_err(Error::Pin),
        }
    }

    /// Clock out one frame, MSB first. Select is handled by the caller.
    /// In bit-bang mode a failed pin write leaves the clock driven low when possible.
    pub(crate) fn shift_out(&mut self, profile: &ChipProfile, frame: u32) -> Result<(), Error<SPI::Error>> {
        match self {
            Backend::Hardware { spi, .. } => {
                let (buf, len) = frame_to_bytes(profile, frame);
                spi.write(&buf[..len]).map_err(Error::Spi)?;
                spi.flush().map_err(Error::Spi)
            }
            Backend::BitBang { clock, data } => {
                clock_out(clock, data, frame, profile.frame_bits()).map_err(Error::Pin)
            }
        }
    }
}

/// Set data, then pulse clock high-low, for each of the low `bits` of `frame`, MSB first.
/// On a pin error the clock is driven back low (best effort) before the error is returned.
fn clock_out<CLK: OutputPin, DAT: OutputPin>(
    clock: &mut CLK,
    data: &mut DAT,
    frame: u32,
    bits: u8,
) -> Result<(), PinErrorKind> {
    let res = shift_bits(clock, data, frame, bits);
    if res.is_err() {
        // SCLK idles low; the first error wins.
        let _ = clock.set_low();
    }
    res
}

fn shift_bits<CLK: OutputPin, DAT: OutputPin>(
    clock: &mut CLK,
    data: &mut DAT,
    frame: u32,
    bits: u8,
) -> Result<(), PinErrorKind> {
    for bit in (0..bits).rev() {
        if frame & (1u32 << bit) != 0 {
            data.set_high().map_err(|e| e.kind())?;
        } else {
            data.set_low().map_err(|e| e.kind())?;
        }
        clock.set_high().map_err(|e| e.kind())?;
        clock.set_low().map_err(|e| e.kind())?;
    }
    Ok(())
}

/// Stand-in SPI type for bit-banged drivers. Never used for a transfer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpi;

impl SpiErrorType for NoSpi {
    type Error = Infallible;
}

impl SpiBus for NoSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Stand-in clock/data pin for hardware-SPI drivers. Never driven.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin;

impl PinErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}
