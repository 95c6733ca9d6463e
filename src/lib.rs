//! Cycle-accurate VGA timing and color test pattern generator.
//!
//! [`TimingGenerator`] is clocked one pixel at a time and drives any
//! [`VgaOutput`]. Outputs are obtained from a [`Platform`] by resource name,
//! which keeps board wiring out of the timing logic.

pub mod config;
pub mod error;
pub mod host;
pub mod machine;

pub use config::{Config, ResourceId};
pub use error::ConfigError;
pub use host::binding::{HeadlessPlatform, OutputLine, Platform, VgaOutput};
pub use host::monitor::Monitor;
pub use machine::generic::timing::{AxisTiming, Timing};
pub use machine::vga::pattern::{ChannelWidths, Rgb};
pub use machine::vga::{Signals, TimingGenerator};
