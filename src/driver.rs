//! Blocking driver for AD5620/AD5640/AD5660 single-channel DACs.
//! One instance owns its select line and either an SPI bus or a clock/data pin pair.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::bus::{Backend, NoPin, NoSpi, SpiSettings};
use crate::data_types::{BackendKind, PowerDownMode};
use crate::error::Error;
use crate::registers::{code_to_percent, percent_to_code, ChipProfile};

/// AD56x0 driver.
///
/// Build it with [`Ad56x0::new_hardware`] or [`Ad56x0::new_bitbang`], then call
/// [`init`](Self::init) once before any write.
#[derive(Debug)]
pub struct Ad56x0<SPI, CLK, DAT, CS> {
    profile: ChipProfile,
    backend: Backend<SPI, CLK, DAT>,
    select: CS,
    value: u16,
    power_down: PowerDownMode,
}

/// Driver wired to an SPI peripheral.
pub type HardwareAd56x0<SPI, CS> = Ad56x0<SPI, NoPin, NoPin, CS>;
/// Driver toggling clock and data lines directly.
pub type BitBangAd56x0<CLK, DAT, CS> = Ad56x0<NoSpi, CLK, DAT, CS>;

impl<SPI, CS> Ad56x0<SPI, NoPin, NoPin, CS> {
    /// Create a driver using an SPI bus with default [`SpiSettings`] (16 MHz, mode 0).
    pub fn new_hardware(profile: ChipProfile, spi: SPI, select: CS) -> Self {
        Self::with_settings(profile, spi, select, SpiSettings::default())
    }

    /// Create a driver using an SPI bus with explicit clock settings.
    pub fn with_settings(profile: ChipProfile, spi: SPI, select: CS, settings: SpiSettings) -> Self {
        Self {
            profile,
            backend: Backend::Hardware { spi, settings },
            select,
            value: 0,
            power_down: PowerDownMode::Normal,
        }
    }
}

impl<CLK, DAT, CS> Ad56x0<NoSpi, CLK, DAT, CS> {
    /// Create a driver that bit-bangs the frame on `clock` and `data`.
    pub fn new_bitbang(profile: ChipProfile, clock: CLK, data: DAT, select: CS) -> Self {
        Self {
            profile,
            backend: Backend::BitBang { clock, data },
            select,
            value: 0,
            power_down: PowerDownMode::Normal,
        }
    }
}

impl<SPI, CLK, DAT, CS> Ad56x0<SPI, CLK, DAT, CS> {
    /// Chip profile chosen at construction.
    pub fn profile(&self) -> &ChipProfile {
        &self.profile
    }

    /// Resolution in bits (12, 14 or 16 for the built-in profiles).
    pub fn resolution_bits(&self) -> u8 {
        self.profile.resolution_bits()
    }

    /// Largest accepted code, `2^resolution - 1`.
    pub fn max_value(&self) -> u16 {
        self.profile.max_code()
    }

    /// Last committed code. Does not touch the bus.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Last committed code as percent of full scale.
    pub fn percentage(&self) -> f32 {
        code_to_percent(self.value, self.profile.max_code())
    }

    /// Last committed power-down mode, [`PowerDownMode::Normal`] after construction.
    pub fn power_down_mode(&self) -> PowerDownMode {
        self.power_down
    }

    /// Transfer path chosen at construction.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// True when frames go out over the SPI peripheral.
    pub fn uses_hardware_spi(&self) -> bool {
        self.backend_kind() == BackendKind::Hardware
    }

    /// Recorded SPI clock settings; `None` in bit-bang mode.
    pub fn spi_settings(&self) -> Option<SpiSettings> {
        match &self.backend {
            Backend::Hardware { settings, .. } => Some(*settings),
            Backend::BitBang { .. } => None,
        }
    }

    /// Recorded SCLK frequency in Hz; `None` in bit-bang mode.
    pub fn spi_speed(&self) -> Option<u32> {
        self.spi_settings().map(|s| s.frequency_hz)
    }

    /// Release the backend and select line.
    pub fn free(self) -> (Backend<SPI, CLK, DAT>, CS) {
        (self.backend, self.select)
    }
}

impl<SPI, CLK, DAT, CS> Ad56x0<SPI, CLK, DAT, CS>
where
    SPI: SpiBus,
    CLK: OutputPin,
    DAT: OutputPin,
    CS: OutputPin,
{
    /// Drive select high (idle) and, in bit-bang mode, clock and data low.
    pub fn init(&mut self) -> Result<(), Error<SPI::Error>> {
        debug!("ad56x0: init, {} bit", self.profile.resolution_bits());
        self.drive_select(true)?;
        self.backend.idle()
    }

    /// Write a code in `0..=max_value()`. Larger codes are rejected without a transfer.
    pub fn set_value(&mut self, code: u16) -> Result<(), Error<SPI::Error>> {
        if code > self.profile.max_code() {
            warn!("ad56x0: code {} above max {}", code, self.profile.max_code());
            return Err(Error::OutOfRange);
        }
        self.commit(code, self.power_down)?;
        self.value = code;
        Ok(())
    }

    /// Write `pct` percent of full scale, rounded to the nearest code.
    pub fn set_percentage(&mut self, pct: f32) -> Result<(), Error<SPI::Error>> {
        let Some(code) = percent_to_code(pct, self.profile.max_code()) else {
            warn!("ad56x0: percentage outside 0..=100");
            return Err(Error::OutOfRange);
        };
        self.set_value(code)
    }

    /// Select a power-down mode and resend the current code with it.
    pub fn set_power_down_mode(&mut self, mode: PowerDownMode) -> Result<(), Error<SPI::Error>> {
        if !self.profile.supports_power_down() && mode.is_powered_down() {
            return Err(Error::InvalidConfig);
        }
        self.commit(self.value, mode)?;
        self.power_down = mode;
        Ok(())
    }

    /// Same as [`set_power_down_mode`](Self::set_power_down_mode) from the raw
    /// PD1:PD0 value. Values above 3 are rejected and the stored mode is kept.
    pub fn set_power_down_mode_bits(&mut self, raw: u8) -> Result<(), Error<SPI::Error>> {
        match PowerDownMode::from_bits(raw) {
            Some(mode) => self.set_power_down_mode(mode),
            None => {
                warn!("ad56x0: power-down mode {} not supported", raw);
                Err(Error::OutOfRange)
            }
        }
    }

    /// Change the recorded SCLK frequency. Takes effect on the next transfer
    /// once the board code applies [`spi_settings`](Self::spi_settings).
    pub fn set_spi_speed(&mut self, frequency_hz: u32) -> Result<(), Error<SPI::Error>> {
        if frequency_hz == 0 {
            return Err(Error::OutOfRange);
        }
        match &mut self.backend {
            Backend::Hardware { settings, .. } => {
                settings.frequency_hz = frequency_hz;
                Ok(())
            }
            Backend::BitBang { .. } => Err(Error::InvalidConfig),
        }
    }

    /// Send one frame bracketed by select low/high. Select is released even if
    /// the transfer fails.
    fn commit(&mut self, code: u16, mode: PowerDownMode) -> Result<(), Error<SPI::Error>> {
        let frame = self.profile.encode_frame(code, mode);
        trace!("ad56x0: frame {:x}", frame);
        self.drive_select(false)?;
        let sent = self.backend.shift_out(&self.profile, frame);
        let released = self.drive_select(true);
        sent?;
        released
    }

    /// Select is active low; `true` releases it.
    fn drive_select(&mut self, high: bool) -> Result<(), Error<SPI::Error>> {
        let res = if high {
            self.select.set_high()
        } else {
            self.select.set_low()
        };
        res.map_err(Error::pin)
    }
}
