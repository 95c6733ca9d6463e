//! The boundary between the pattern logic and whatever the signals are
//! wired to. The logic only ever drives lines; pin mapping, electrical
//! attributes and bit ordering on the board all live behind these traits.

use tracing::debug;

use crate::config::ResourceId;
use crate::error::ConfigError;
use crate::host::monitor::Monitor;
use crate::machine::generic::timing::Timing;
use crate::machine::vga::pattern::ChannelWidths;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputLine {
    Red,
    Green,
    Blue,
    /// Horizontal sync pin, active low
    HSync,
    /// Vertical sync pin, active low
    VSync,
}

/// A set of VGA output lines.
pub trait VgaOutput {
    fn widths(&self) -> ChannelWidths;

    /// Set `line` to `value`. Sync lines take 0 or 1.
    fn drive(&mut self, line: OutputLine, value: u16);

    /// End of one pixel clock; every line has been driven for this cycle.
    fn clock(&mut self) {}
}

/// Something that hands out VGA outputs by resource name and index.
pub trait Platform {
    type Output: VgaOutput;

    /// Look up `resource`. `timing` is the mode the output will be driven
    /// with.
    fn request(&mut self, resource: &ResourceId, timing: &Timing)
    -> Result<Self::Output, ConfigError>;
}

/// A platform without hardware: every registered resource is a [`Monitor`].
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    resources: Vec<(ResourceId, ChannelWidths)>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vga(mut self, name: impl Into<String>, index: u32, widths: ChannelWidths) -> Self {
        self.resources.push((ResourceId::new(name, index), widths));
        self
    }
}

impl Platform for HeadlessPlatform {
    type Output = Monitor;

    fn request(
        &mut self,
        resource: &ResourceId,
        timing: &Timing,
    ) -> Result<Self::Output, ConfigError> {
        let Some((_, widths)) = self.resources.iter().find(|(id, _)| id == resource) else {
            return Err(ConfigError::UnknownResource {
                name: resource.name.clone(),
                index: resource.index,
            });
        };
        widths.validate()?;
        debug!("Binding {resource} to a headless monitor, {widths:?}");
        Monitor::new(*timing, *widths)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::Channel;
    use crate::machine::vga::video::TIMING_640X480_60HZ;

    #[test]
    fn test_request_known_resource() {
        let mut platform = HeadlessPlatform::new()
            .with_vga("vga", 0, ChannelWidths::uniform(4))
            .with_vga("vga", 1, ChannelWidths::uniform(6));
        let monitor = platform
            .request(&ResourceId::new("vga", 1), &TIMING_640X480_60HZ)
            .unwrap();
        assert_eq!(monitor.widths(), ChannelWidths::uniform(6));
    }

    #[test]
    fn test_request_unknown_resource() {
        let mut platform = HeadlessPlatform::new().with_vga("vga", 0, ChannelWidths::default());
        let err = platform
            .request(&ResourceId::new("vga", 2), &TIMING_640X480_60HZ)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownResource {
                name: "vga".into(),
                index: 2
            }
        );
        assert_eq!(err.to_string(), "invalid configuration: no resource vga#2");
    }

    #[rstest]
    #[case(ChannelWidths { r: 0, g: 8, b: 8 }, Channel::Red, 0)]
    #[case(ChannelWidths { r: 8, g: 17, b: 8 }, Channel::Green, 17)]
    fn test_request_rejects_bad_widths(
        #[case] widths: ChannelWidths,
        #[case] channel: Channel,
        #[case] width: u8,
    ) {
        let mut platform = HeadlessPlatform::new().with_vga("vga", 0, widths);
        let err = platform
            .request(&ResourceId::new("vga", 0), &TIMING_640X480_60HZ)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidChannelWidth { channel, width });
    }
}
