use crate::error::{Axis, ConfigError};
use crate::machine::generic::timing::AxisTiming;

/// Line counter bit that selects half brightness, toggling every 64 lines.
const HALF_BRIGHT_BIT: u16 = 6;

/// What the vertical scanner drives during the current pixel clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalOutputs {
    pub line: u16,
    pub blanking: bool,
    pub sync: bool,
    pub half_brightness: bool,
    /// Next pixel is the first of a new frame.
    pub new_frame: bool,
}

/// Line counter, advanced by the horizontal scanner's new-line pulse. Line
/// 0 is the first active line.
#[derive(Clone, Debug)]
pub struct VerticalScanner {
    t: AxisTiming,
    line: u16, // 0..Vtot-1
}

impl VerticalScanner {
    pub fn new(t: AxisTiming) -> Result<Self, ConfigError> {
        t.validate(Axis::Vertical)?;
        Ok(Self { t, line: 0 })
    }

    pub fn line(&self) -> u16 {
        self.line
    }

    fn last_line(&self) -> bool {
        self.line == self.t.total() - 1
    }

    pub fn outputs(&self, new_line: bool) -> VerticalOutputs {
        VerticalOutputs {
            line: self.line,
            blanking: self.t.in_blanking(self.line),
            sync: self.t.in_sync(self.line),
            half_brightness: (self.line >> HALF_BRIGHT_BIT) & 1 != 0,
            new_frame: self.last_line() && new_line,
        }
    }

    /// Clock edge. The line only moves when `new_line` is asserted.
    pub fn clock(&mut self, new_line: bool) {
        if new_line {
            self.line = if self.last_line() { 0 } else { self.line + 1 };
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::machine::vga::video::V_480;

    #[test]
    fn test_holds_without_new_line() {
        let mut scan = VerticalScanner::new(V_480).unwrap();
        for _ in 0..1000 {
            scan.clock(false);
        }
        assert_eq!(scan.line(), 0);
        scan.clock(true);
        assert_eq!(scan.line(), 1);
    }

    #[test]
    fn test_frame_regions() {
        let mut scan = VerticalScanner::new(V_480).unwrap();
        let mut sync_lines = Vec::new();
        let mut blank_lines = 0;
        let mut new_frames = 0;
        for _ in 0..V_480.total() {
            let out = scan.outputs(true);
            if out.sync {
                sync_lines.push(out.line);
            }
            if out.blanking {
                blank_lines += 1;
            }
            if out.new_frame {
                assert_eq!(out.line, 524);
                new_frames += 1;
            }
            scan.clock(true);
        }
        assert_eq!(sync_lines, [490, 491]);
        assert_eq!(blank_lines, 45);
        assert_eq!(new_frames, 1);
        assert_eq!(scan.line(), 0);
    }

    #[test]
    fn test_new_frame_needs_new_line() {
        let mut scan = VerticalScanner::new(V_480).unwrap();
        for _ in 0..524 {
            scan.clock(true);
        }
        assert!(!scan.outputs(false).new_frame);
        assert!(scan.outputs(true).new_frame);
    }

    #[test]
    fn test_half_brightness_every_64_lines() {
        let mut scan = VerticalScanner::new(V_480).unwrap();
        for line in 0..V_480.total() {
            assert_eq!(scan.outputs(false).half_brightness, (line / 64) % 2 == 1);
            scan.clock(true);
        }
    }

    proptest! {
        #[test]
        fn prop_line_follows_new_line(pulses in prop::collection::vec(any::<bool>(), 1..3000)) {
            let mut scan = VerticalScanner::new(V_480).unwrap();
            for new_line in pulses {
                let before = scan.line();
                scan.clock(new_line);
                if new_line {
                    prop_assert_eq!(scan.line(), (before + 1) % V_480.total());
                } else {
                    prop_assert_eq!(scan.line(), before);
                }
            }
        }
    }
}
