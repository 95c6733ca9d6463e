use std::fmt;

use crate::machine::vga::video::REFERENCE_CLOCK_HZ;

/// Names the physical output group the pattern is bound to. Opaque to the
/// timing logic; only the platform interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub name: String,
    pub index: u32,
}

impl ResourceId {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new("vga", 0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}

/// Construction-time settings for the pattern generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub resource: ResourceId,
    /// Frequency of the clock driving the generator. At least 25.2 MHz.
    pub clock_hz: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource: ResourceId::default(),
            clock_hz: REFERENCE_CLOCK_HZ,
        }
    }
}

impl Config {
    /// Build a config from optional command-line values, falling back to
    /// the defaults for anything not given.
    pub fn from_args(resource: Option<String>, index: Option<u32>, clock_hz: Option<f64>) -> Self {
        let default = Self::default();
        Self {
            resource: ResourceId {
                name: resource.unwrap_or(default.resource.name),
                index: index.unwrap_or(default.resource.index),
            },
            clock_hz: clock_hz.unwrap_or(default.clock_hz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resource.to_string(), "vga#0");
        assert_eq!(config.clock_hz, 25.2e6);
        assert_eq!(Config::from_args(None, None, None), config);
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_args(Some("vga_pmod".into()), Some(1), Some(50e6));
        assert_eq!(config.resource, ResourceId::new("vga_pmod", 1));
        assert_eq!(config.clock_hz, 50e6);
    }
}
