use std::fmt;

use thiserror::Error;

/// Which raster axis a timing complaint refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// One of the three color outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Red => f.write_str("red"),
            Channel::Green => f.write_str("green"),
            Channel::Blue => f.write_str("blue"),
        }
    }
}

/// Everything that can go wrong while building a generator. Once built,
/// nothing can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "invalid configuration: pixel clock {clock_hz} Hz gives ratio {ratio}, \
         the test pattern needs at least 25.2 MHz"
    )]
    ClockTooSlow { clock_hz: f64, ratio: f64 },

    #[error("invalid configuration: pixel clock {clock_hz} Hz is not a usable frequency")]
    InvalidClock { clock_hz: f64 },

    #[error("invalid configuration: pixel clock {clock_hz} Hz needs a line longer than the pixel counter")]
    TimingOutOfRange { clock_hz: f64 },

    #[error("invalid configuration: {axis} timing {reason}")]
    InvalidTiming { axis: Axis, reason: &'static str },

    #[error("invalid configuration: {channel} channel width {width} is outside 1..=16 bits")]
    InvalidChannelWidth { channel: Channel, width: u8 },

    #[error("invalid configuration: no resource {name}#{index}")]
    UnknownResource { name: String, index: u32 },
}
