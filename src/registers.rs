//! Chip profiles, input shift register layout and conversion helpers.
//! Layouts follow the AD5620/AD5640/AD5660 datasheets.

use crate::data_types::PowerDownMode;

/// Default SCLK for the hardware backend. Parts are rated to 30 MHz.
pub const DEFAULT_SPI_SPEED_HZ: u32 = 16_000_000;

/// Width of the power-down control field.
pub const POWER_DOWN_FIELD_BITS: u8 = 2;

bitflags::bitflags! {
    /// PD1:PD0 control field, right-aligned. Shifted into place by the profile.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct PowerDownBits: u8 {
        const PD0 = 1 << 0;
        const PD1 = 1 << 1;
    }
}

/// Resolution and frame layout of one chip variant.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChipProfile {
    name: &'static str,
    resolution_bits: u8,
    frame_bits: u8,
    data_shift: u8,
    power_down_shift: Option<u8>,
}

impl ChipProfile {
    /// 12-bit, 16-bit frame: PD1 PD0 D11..D0 X X.
    pub const AD5620: ChipProfile = ChipProfile {
        name: "AD5620",
        resolution_bits: 12,
        frame_bits: 16,
        data_shift: 2,
        power_down_shift: Some(14),
    };

    /// 14-bit, 16-bit frame: PD1 PD0 D13..D0.
    pub const AD5640: ChipProfile = ChipProfile {
        name: "AD5640",
        resolution_bits: 14,
        frame_bits: 16,
        data_shift: 0,
        power_down_shift: Some(14),
    };

    /// 16-bit, 24-bit frame: six don't-care bits, PD1 PD0, D15..D0.
    pub const AD5660: ChipProfile = ChipProfile {
        name: "AD5660",
        resolution_bits: 16,
        frame_bits: 24,
        data_shift: 0,
        power_down_shift: Some(16),
    };

    /// Describe a custom layout. Returns `None` if the fields do not fit in the
    /// frame, overlap, or the frame is not a whole number of bytes (8..=32 bits).
    pub fn new(
        name: &'static str,
        resolution_bits: u8,
        frame_bits: u8,
        data_shift: u8,
        power_down_shift: Option<u8>,
    ) -> Option<Self> {
        if !(1..=16).contains(&resolution_bits) {
            return None;
        }
        if !matches!(frame_bits, 8 | 16 | 24 | 32) {
            return None;
        }
        let data_end = data_shift.checked_add(resolution_bits)?;
        if data_end > frame_bits {
            return None;
        }
        if let Some(pd) = power_down_shift {
            let pd_end = pd.checked_add(POWER_DOWN_FIELD_BITS)?;
            if pd_end > frame_bits {
                return None;
            }
            // Fields must not overlap.
            if pd < data_end && data_shift < pd_end {
                return None;
            }
        }
        Some(Self {
            name,
            resolution_bits,
            frame_bits,
            data_shift,
            power_down_shift,
        })
    }

    /// Part name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of significant data bits.
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// Largest accepted code, `2^resolution - 1`.
    pub fn max_code(&self) -> u16 {
        ((1u32 << self.resolution_bits) - 1) as u16
    }

    /// Width of one transfer frame in bits.
    pub fn frame_bits(&self) -> u8 {
        self.frame_bits
    }

    /// Bytes clocked out per update on the hardware backend.
    pub fn frame_bytes(&self) -> usize {
        usize::from(self.frame_bits / 8)
    }

    /// Bit position of the code's LSB within the frame.
    pub fn data_shift(&self) -> u8 {
        self.data_shift
    }

    /// Bit position of PD0, if the part has a power-down field.
    pub fn power_down_shift(&self) -> Option<u8> {
        self.power_down_shift
    }

    /// True if PD1:PD0 are part of the frame.
    pub fn supports_power_down(&self) -> bool {
        self.power_down_shift.is_some()
    }

    /// Build the input shift register word. The code is clamped to
    /// [`max_code`](Self::max_code); the mode is dropped if the profile has no
    /// power-down field.
    pub fn encode_frame(&self, code: u16, mode: PowerDownMode) -> u32 {
        let code = code.min(self.max_code());
        let mut frame = u32::from(code) << self.data_shift;
        if let Some(shift) = self.power_down_shift {
            frame |= u32::from(mode.field().bits()) << shift;
        }
        frame & self.frame_mask()
    }

    fn frame_mask(&self) -> u32 {
        if self.frame_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.frame_bits) - 1
        }
    }
}

/// Split a frame into the bytes sent on the wire, MSB first.
/// Only the first [`ChipProfile::frame_bytes`] entries are meaningful.
pub fn frame_to_bytes(profile: &ChipProfile, frame: u32) -> ([u8; 4], usize) {
    let len = profile.frame_bytes();
    let mut out = [0u8; 4];
    let be = frame.to_be_bytes();
    out[..len].copy_from_slice(&be[4 - len..]);
    (out, len)
}

/// Convert percent of full scale to a code. `None` if `pct` is outside
/// `0.0..=100.0` (NaN included).
pub fn percent_to_code(pct: f32, max_code: u16) -> Option<u16> {
    if !(0.0..=100.0).contains(&pct) {
        return None;
    }
    // pct >= 0, so adding one half rounds to nearest.
    let code = (pct * f32::from(max_code) / 100.0 + 0.5) as u32;
    Some(code.min(u32::from(max_code)) as u16)
}

/// Convert a code to percent of full scale.
pub fn code_to_percent(code: u16, max_code: u16) -> f32 {
    if max_code == 0 {
        return 0.0;
    }
    f32::from(code.min(max_code)) * 100.0 / f32::from(max_code)
}
