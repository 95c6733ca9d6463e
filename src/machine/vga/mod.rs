//! 640x480 VGA test pattern. Generates a row of blocks in the primary colors
//! and their mixes, with every other band of 64 lines at half brightness to
//! check the bit order of the color outputs.
//!
//! The pixel clock may be faster than the standard 25.2 MHz; pixels are then
//! stretched so that the monitor still sees 640x480@60Hz.

pub mod hscan;
pub mod pattern;
pub mod video;
pub mod vscan;

use tracing::{debug, trace};

use crate::config::{Config, ResourceId};
use crate::error::ConfigError;
use crate::host::binding::{OutputLine, Platform, VgaOutput};
use crate::machine::generic::timing::Timing;

use self::hscan::{HorizontalOutputs, HorizontalScanner};
use self::pattern::{ChannelWidths, ColorBlockPattern, Rgb};
use self::vscan::{VerticalOutputs, VerticalScanner};

/// Everything computed during one pixel clock, before the counters move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signals {
    pub h: HorizontalOutputs,
    pub v: VerticalOutputs,
    pub rgb: Rgb,
}

impl Signals {
    /// Level of the hsync pin. The pulse is active low.
    pub fn hs_pin(&self) -> bool {
        !self.h.sync
    }

    /// Level of the vsync pin. The pulse is active low.
    pub fn vs_pin(&self) -> bool {
        !self.v.sync
    }
}

#[derive(Debug)]
pub struct TimingGenerator {
    resource: ResourceId,
    timing: Timing,
    hscan: HorizontalScanner,
    vscan: VerticalScanner,
    pattern: ColorBlockPattern,
}

impl TimingGenerator {
    /// Generator for `config.clock_hz` with the given output widths.
    pub fn new(config: &Config, widths: ChannelWidths) -> Result<Self, ConfigError> {
        let timing = video::timing_for_clock(config.clock_hz)?;
        Self::with_timing(config.resource.clone(), timing, widths)
    }

    /// Generator for an explicit raster timing.
    pub fn with_timing(
        resource: ResourceId,
        timing: Timing,
        widths: ChannelWidths,
    ) -> Result<Self, ConfigError> {
        let hscan = HorizontalScanner::new(timing.h)?;
        let vscan = VerticalScanner::new(timing.v)?;
        let pattern = ColorBlockPattern::new(widths)?;
        debug!(
            "VGA pattern on {resource}: {}x{} total, {} clocks per block",
            timing.htot(),
            timing.vtot(),
            hscan.block_cycles()
        );
        Ok(Self {
            resource,
            timing,
            hscan,
            vscan,
            pattern,
        })
    }

    /// Derive the timing, request the configured resource from `platform`
    /// and build a generator matching its channel widths.
    pub fn build<P: Platform>(
        config: &Config,
        platform: &mut P,
    ) -> Result<(Self, P::Output), ConfigError> {
        let timing = video::timing_for_clock(config.clock_hz)?;
        let output = platform.request(&config.resource, &timing)?;
        let generator = Self::with_timing(config.resource.clone(), timing, output.widths())?;
        Ok((generator, output))
    }

    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn widths(&self) -> ChannelWidths {
        self.pattern.widths()
    }

    pub fn pixel(&self) -> u16 {
        self.hscan.pixel()
    }

    pub fn line(&self) -> u16 {
        self.vscan.line()
    }

    /// The combinational outputs for the current counter values.
    pub fn signals(&self) -> Signals {
        let h = self.hscan.outputs();
        let v = self.vscan.outputs(h.new_line);
        let rgb = self.pattern.sample(v.blanking, v.half_brightness, h.block);
        Signals { h, v, rgb }
    }

    /// One pixel clock: drive `out` with this cycle's outputs, then move both
    /// counters on the same edge.
    pub fn tick(&mut self, out: &mut impl VgaOutput) -> Signals {
        let signals = self.signals();

        out.drive(OutputLine::Red, signals.rgb.r);
        out.drive(OutputLine::Green, signals.rgb.g);
        out.drive(OutputLine::Blue, signals.rgb.b);
        out.drive(OutputLine::HSync, u16::from(signals.hs_pin()));
        out.drive(OutputLine::VSync, u16::from(signals.vs_pin()));
        out.clock();

        // The vertical scanner sees the new-line pulse from before the
        // horizontal counter wraps.
        self.vscan.clock(signals.h.new_line);
        self.hscan.clock();

        if signals.v.new_frame {
            trace!("VGA: frame complete");
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::binding::HeadlessPlatform;
    use crate::machine::vga::video::{H_640, TIMING_640X480_60HZ, V_480};

    /// Records everything driven onto the lines.
    #[derive(Default)]
    struct Recorder {
        levels: Vec<(OutputLine, u16)>,
        clocks: usize,
    }

    impl VgaOutput for Recorder {
        fn widths(&self) -> ChannelWidths {
            ChannelWidths::default()
        }

        fn drive(&mut self, line: OutputLine, value: u16) {
            self.levels.push((line, value));
        }

        fn clock(&mut self) {
            self.clocks += 1;
        }
    }

    fn generator() -> TimingGenerator {
        TimingGenerator::new(&Config::default(), ChannelWidths::default()).unwrap()
    }

    #[test]
    fn test_reference_timing() {
        let generator = generator();
        assert_eq!(generator.timing().h, H_640);
        assert_eq!(generator.timing().v, V_480);
        assert_eq!(*generator.timing(), TIMING_640X480_60HZ);
    }

    #[test]
    fn test_slow_clock_rejected() {
        let config = Config {
            clock_hz: 12.6e6,
            ..Config::default()
        };
        let err = TimingGenerator::new(&config, ChannelWidths::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ClockTooSlow { ratio, .. } if ratio == 0.5));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_drives_every_line_once_per_clock() {
        let mut generator = generator();
        let mut recorder = Recorder::default();
        generator.tick(&mut recorder);
        assert_eq!(recorder.clocks, 1);
        assert_eq!(
            recorder.levels,
            [
                (OutputLine::Red, 0xff),
                (OutputLine::Green, 0),
                (OutputLine::Blue, 0),
                (OutputLine::HSync, 1),
                (OutputLine::VSync, 1),
            ]
        );
    }

    #[test]
    fn test_sync_pins_are_inverted() {
        let mut generator = generator();
        let mut recorder = Recorder::default();
        for _ in 0..H_640.total() {
            let signals = generator.tick(&mut recorder);
            assert_eq!(signals.hs_pin(), !signals.h.sync);
            let hs = recorder.levels[recorder.levels.len() - 2];
            assert_eq!(hs, (OutputLine::HSync, u16::from(!signals.h.sync)));
        }
    }

    #[test]
    fn test_line_advances_on_same_edge_as_wrap() {
        let mut generator = generator();
        let mut recorder = Recorder::default();
        for _ in 0..H_640.total() - 1 {
            generator.tick(&mut recorder);
            assert_eq!(generator.line(), 0);
        }
        assert_eq!(generator.pixel(), 799);
        let signals = generator.tick(&mut recorder);
        assert!(signals.h.new_line);
        assert_eq!(generator.pixel(), 0);
        assert_eq!(generator.line(), 1);
    }

    #[test]
    fn test_vsync_lines() {
        let mut generator = generator();
        let mut recorder = Recorder::default();
        let mut vsync_clocks = 0;
        let mut first_vsync = None;
        for cycle in 0..TIMING_640X480_60HZ.pixel_tot() {
            let signals = generator.tick(&mut recorder);
            recorder.levels.clear();
            if signals.v.sync {
                vsync_clocks += 1;
                first_vsync.get_or_insert(cycle);
            }
        }
        assert_eq!(vsync_clocks, 2 * 800);
        assert_eq!(first_vsync, Some(490 * 800));
    }

    #[test]
    fn test_build_uses_resource_widths() {
        let mut platform =
            HeadlessPlatform::new().with_vga("vga", 0, ChannelWidths { r: 6, g: 6, b: 5 });
        let (generator, monitor) = TimingGenerator::build(&Config::default(), &mut platform).unwrap();
        assert_eq!(generator.widths(), ChannelWidths { r: 6, g: 6, b: 5 });
        assert_eq!(monitor.widths(), generator.widths());
        assert_eq!(generator.resource(), &ResourceId::new("vga", 0));
        assert_eq!(generator.signals().rgb, Rgb { r: 0x3f, g: 0, b: 0 });
    }

    #[test]
    fn test_build_unknown_resource() {
        let mut platform = HeadlessPlatform::new();
        let err = TimingGenerator::build(&Config::default(), &mut platform).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownResource { .. }));
    }
}
