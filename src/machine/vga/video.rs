//! Standard 640x480@60Hz VGA timing (see tinyvga.com/vga-timing/640x480@60Hz)
//! and its stretched variants for pixel clocks faster than 25.2 MHz. Only the
//! horizontal axis is stretched: the line rate stays the same, so the number
//! of lines per frame does not depend on the pixel clock.

use tracing::debug;

use crate::error::ConfigError;
use crate::machine::generic::timing::{AxisTiming, Timing};
use crate::machine::vga::pattern::BLOCKS;

/// Pixel clock of the standard mode.
pub const REFERENCE_CLOCK_HZ: f64 = 25.2e6;

pub const H_640: AxisTiming = AxisTiming {
    active: 640,
    fp: 16,
    sync: 96,
    bp: 48, // Htot = 800
};

pub const V_480: AxisTiming = AxisTiming {
    active: 480,
    fp: 10,
    sync: 2,
    bp: 33, // Vtot = 525
};

pub const TIMING_640X480_60HZ: Timing = Timing { h: H_640, v: V_480 };

/// Below this ratio the standard timing is close enough to use as is.
const STRETCH_THRESHOLD: f64 = 1.01;

/// Pixel clock divided by the reference clock, rounded to four decimals.
/// Never below 1.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ClockRatio(f64);

impl ClockRatio {
    pub fn from_clock_hz(clock_hz: f64) -> Result<Self, ConfigError> {
        if !clock_hz.is_finite() || clock_hz <= 0.0 {
            return Err(ConfigError::InvalidClock { clock_hz });
        }
        let ratio = (clock_hz / REFERENCE_CLOCK_HZ * 10_000.0).round() / 10_000.0;
        if ratio < 1.0 {
            return Err(ConfigError::ClockTooSlow { clock_hz, ratio });
        }
        Ok(Self(ratio))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Horizontal timing for the given ratio. Sync, back porch, block width and
/// line length are scaled and rounded; the front porch takes up whatever is
/// left so that the parts add up to the scaled line length exactly.
pub fn stretch_horizontal(ratio: ClockRatio) -> Option<AxisTiming> {
    let r = ratio.get();
    if r < STRETCH_THRESHOLD {
        return Some(H_640);
    }
    let scale = |v: u16| {
        let scaled = (r * f64::from(v)).round();
        (scaled <= f64::from(u16::MAX)).then_some(scaled as u16)
    };
    let sync = scale(H_640.sync)?;
    let bp = scale(H_640.bp)?;
    let block_cycles = scale(H_640.active / BLOCKS)?;
    let total = scale(H_640.total())?;
    let active = block_cycles.checked_mul(BLOCKS)?;
    let fp = total.checked_sub(active.checked_add(sync)?.checked_add(bp)?)?;
    Some(AxisTiming {
        active,
        fp,
        sync,
        bp,
    })
}

/// Full raster timing for a pixel clock of `clock_hz`.
pub fn timing_for_clock(clock_hz: f64) -> Result<Timing, ConfigError> {
    let ratio = ClockRatio::from_clock_hz(clock_hz)?;
    let h = stretch_horizontal(ratio).ok_or(ConfigError::TimingOutOfRange { clock_hz })?;
    let timing = Timing::new(h, V_480)?;
    debug!(
        "Pixel clock {clock_hz} Hz, ratio {}: {:?}",
        ratio.get(),
        timing
    );
    Ok(timing)
}
