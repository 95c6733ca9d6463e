//! A pretend display. It only sees the five output lines and locks on to the
//! picture the way a CRT would: position is recovered from the trailing
//! edges of the (active low) sync pulses plus the back porch of the expected
//! mode. Anything that goes wrong with sync polarity or porch lengths shows
//! up as a shifted or missing picture.

use tracing::trace;

use crate::error::ConfigError;
use crate::host::binding::{OutputLine, VgaOutput};
use crate::machine::generic::timing::Timing;
use crate::machine::vga::pattern::{ChannelWidths, Rgb, Rgb8};

#[derive(Debug)]
pub struct Monitor {
    mode: Timing,
    widths: ChannelWidths,

    // Levels driven during the current cycle
    rgb: Rgb,
    hs: bool,
    vs: bool,

    last_hs: bool,
    last_vs: bool,

    /// Clocks since hsync ended, once seen
    x: Option<u16>,
    /// Lines since vsync ended, once seen
    y: Option<u16>,

    frame: Vec<Rgb>,
    frames_completed: u64,
    hsync_pulses: u64,
    vsync_pulses: u64,
}

impl Monitor {
    pub fn new(mode: Timing, widths: ChannelWidths) -> Result<Self, ConfigError> {
        widths.validate()?;
        let pixels = usize::from(mode.h.active) * usize::from(mode.v.active);
        Ok(Self {
            mode,
            widths,
            rgb: Rgb::BLACK,
            hs: true,
            vs: true,
            last_hs: true,
            last_vs: true,
            x: None,
            y: None,
            frame: vec![Rgb::BLACK; pixels],
            frames_completed: 0,
            hsync_pulses: 0,
            vsync_pulses: 0,
        })
    }

    pub fn width(&self) -> u16 {
        self.mode.h.active
    }

    pub fn height(&self) -> u16 {
        self.mode.v.active
    }

    /// Number of pictures fully drawn since power-on. The first frame after
    /// power-on is lost while the monitor locks on.
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    pub fn hsync_pulses(&self) -> u64 {
        self.hsync_pulses
    }

    pub fn vsync_pulses(&self) -> u64 {
        self.vsync_pulses
    }

    /// The picture, row-major. Rows that have not been drawn yet keep their
    /// previous contents.
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    /// Captured pixel at (`x`, `y`), `None` outside the picture.
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.frame
            .get(usize::from(y) * usize::from(self.width()) + usize::from(x))
            .copied()
    }

    pub fn frame_rgb8(&self) -> Vec<Rgb8> {
        self.frame
            .iter()
            .map(|px| px.to_rgb8(self.widths))
            .collect()
    }

    fn capture(&mut self) {
        let (Some(x), Some(y)) = (self.x, self.y) else {
            return;
        };
        let (Some(col), Some(row)) = (x.checked_sub(self.mode.h.bp), y.checked_sub(self.mode.v.bp))
        else {
            return;
        };
        if col >= self.width() || row >= self.height() {
            return;
        }
        let index = usize::from(row) * usize::from(self.width()) + usize::from(col);
        self.frame[index] = self.rgb;
        if col == self.width() - 1 && row == self.height() - 1 {
            self.frames_completed += 1;
            trace!("Monitor: frame {} complete", self.frames_completed);
        }
    }
}

impl VgaOutput for Monitor {
    fn widths(&self) -> ChannelWidths {
        self.widths
    }

    fn drive(&mut self, line: OutputLine, value: u16) {
        match line {
            OutputLine::Red => self.rgb.r = value,
            OutputLine::Green => self.rgb.g = value,
            OutputLine::Blue => self.rgb.b = value,
            OutputLine::HSync => self.hs = value != 0,
            OutputLine::VSync => self.vs = value != 0,
        }
    }

    fn clock(&mut self) {
        if self.last_hs && !self.hs {
            self.hsync_pulses += 1;
        }
        if self.last_vs && !self.vs {
            self.vsync_pulses += 1;
        }

        if !self.last_hs && self.hs {
            // End of hsync: the beam flies back and starts the next line
            self.x = Some(0);
            self.y = self.y.map(|y| y.saturating_add(1));
        } else {
            self.x = self.x.map(|x| x.saturating_add(1));
        }
        if !self.last_vs && self.vs {
            trace!("Monitor: vsync ended");
            self.y = Some(0);
        }

        self.capture();

        self.last_hs = self.hs;
        self.last_vs = self.vs;
    }
}
