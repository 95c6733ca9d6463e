use tracing::debug;

use crate::host::binding::VgaOutput;
use crate::machine::vga::TimingGenerator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub cycles: u64,
    pub frames: u64,
    /// Sync pulses started during the run
    pub hsync_pulses: u64,
    pub vsync_pulses: u64,
}

/// Clock the generator until it has produced `frames` complete frames.
pub fn run(generator: &mut TimingGenerator, output: &mut impl VgaOutput, frames: u64) -> RunStats {
    let mut stats = RunStats::default();
    let (mut last_hs, mut last_vs) = (false, false);
    while stats.frames < frames {
        let signals = generator.tick(output);
        stats.cycles += 1;
        if signals.h.sync && !last_hs {
            stats.hsync_pulses += 1;
        }
        if signals.v.sync && !last_vs {
            stats.vsync_pulses += 1;
        }
        (last_hs, last_vs) = (signals.h.sync, signals.v.sync);
        if signals.v.new_frame {
            stats.frames += 1;
            debug!("Frame {} done after {} cycles", stats.frames, stats.cycles);
        }
    }
    stats
}
