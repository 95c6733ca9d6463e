//! The color block test pattern. Each active line is split into eight equal
//! blocks counting through the primaries and their mixes. Every 64 lines the
//! top bit of each lit channel is dropped, which makes a swapped or reversed
//! color bus easy to spot on a real monitor.

use bytemuck::{Pod, Zeroable};

use crate::error::{Channel, ConfigError};

/// Number of color blocks in the active part of a line. A block index of
/// `BLOCKS` means the scan is past the active pixels.
pub const BLOCKS: u16 = 8;

/// Which channels are lit for each block, as (R, G, B).
const BLOCK_COLORS: [(bool, bool, bool); BLOCKS as usize] = [
    (true, false, false),
    (false, true, false),
    (false, false, true),
    (false, false, false),
    (true, true, false),
    (true, false, true),
    (false, true, true),
    (true, true, true),
];

/// A pixel sample at the configured channel widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }

    /// Rescale every channel to 8 bits, full scale to full scale.
    pub fn to_rgb8(self, widths: ChannelWidths) -> Rgb8 {
        Rgb8 {
            r: rescale(self.r, widths.r),
            g: rescale(self.g, widths.g),
            b: rescale(self.b, widths.b),
        }
    }
}

/// Packed 8-bit pixel, laid out for direct use as image bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

fn rescale(value: u16, width: u8) -> u8 {
    let max = full_scale(width);
    if max == 0 {
        return 0;
    }
    (u32::from(value.min(max)) * 255 / u32::from(max)) as u8
}

fn full_scale(width: u8) -> u16 {
    ((1_u32 << width.min(16)) - 1) as u16
}

/// Bit widths of the three color outputs, as provided by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelWidths {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for ChannelWidths {
    fn default() -> Self {
        Self::uniform(8)
    }
}

impl ChannelWidths {
    pub const fn uniform(bits: u8) -> Self {
        Self {
            r: bits,
            g: bits,
            b: bits,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (channel, width) in [
            (Channel::Red, self.r),
            (Channel::Green, self.g),
            (Channel::Blue, self.b),
        ] {
            if !(1..=16).contains(&width) {
                return Err(ConfigError::InvalidChannelWidth { channel, width });
            }
        }
        Ok(())
    }
}

/// Value of a lit channel. All ones, unless `half_brightness` is set, in
/// which case the most significant bit is cleared. `width` must already be
/// validated.
pub(crate) fn on_value(width: u8, half_brightness: bool) -> u16 {
    let on = full_scale(width);
    if half_brightness {
        on >> 1
    } else {
        on
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColorBlockPattern {
    widths: ChannelWidths,
}

impl ColorBlockPattern {
    pub fn new(widths: ChannelWidths) -> Result<Self, ConfigError> {
        widths.validate()?;
        Ok(Self { widths })
    }

    pub fn widths(&self) -> ChannelWidths {
        self.widths
    }

    /// Sample for one pixel. Pure: depends only on the arguments.
    pub fn sample(&self, vertical_blanking: bool, half_brightness: bool, block: u8) -> Rgb {
        if vertical_blanking {
            return Rgb::BLACK;
        }
        let Some(&(r, g, b)) = BLOCK_COLORS.get(block as usize) else {
            // Past the active pixels
            return Rgb::BLACK;
        };
        let lit = |on: bool, width: u8| {
            if on {
                on_value(width, half_brightness)
            } else {
                0
            }
        };
        Rgb {
            r: lit(r, self.widths.r),
            g: lit(g, self.widths.g),
            b: lit(b, self.widths.b),
        }
    }
}
