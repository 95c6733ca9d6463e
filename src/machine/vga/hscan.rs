use crate::error::{Axis, ConfigError};
use crate::machine::generic::timing::AxisTiming;
use crate::machine::vga::pattern::BLOCKS;

/// What the horizontal scanner drives during the current pixel clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HorizontalOutputs {
    pub pixel: u16,
    /// Color block under the beam, `BLOCKS` once past the active pixels.
    pub block: u8,
    pub blanking: bool,
    pub sync: bool,
    /// Next pixel is the first of a new line.
    pub new_line: bool,
}

/// Pixel counter for one scan line. Pixel 0 is the first active pixel.
#[derive(Clone, Debug)]
pub struct HorizontalScanner {
    t: AxisTiming,
    block_cycles: u16,
    pixel: u16, // 0..Htot-1
}

impl HorizontalScanner {
    pub fn new(t: AxisTiming) -> Result<Self, ConfigError> {
        t.validate(Axis::Horizontal)?;
        if t.active % BLOCKS != 0 {
            return Err(ConfigError::InvalidTiming {
                axis: Axis::Horizontal,
                reason: "active width is not a multiple of 8",
            });
        }
        Ok(Self {
            t,
            block_cycles: t.active / BLOCKS,
            pixel: 0,
        })
    }

    /// Width of one color block in pixel clocks.
    pub fn block_cycles(&self) -> u16 {
        self.block_cycles
    }

    pub fn pixel(&self) -> u16 {
        self.pixel
    }

    pub fn new_line(&self) -> bool {
        self.pixel == self.t.total() - 1
    }

    pub fn block(&self) -> u8 {
        (self.pixel / self.block_cycles).min(BLOCKS) as u8
    }

    pub fn outputs(&self) -> HorizontalOutputs {
        HorizontalOutputs {
            pixel: self.pixel,
            block: self.block(),
            blanking: self.t.in_blanking(self.pixel),
            sync: self.t.in_sync(self.pixel),
            new_line: self.new_line(),
        }
    }

    /// Advance by one pixel clock.
    pub fn clock(&mut self) {
        self.pixel = if self.new_line() { 0 } else { self.pixel + 1 };
    }
}
