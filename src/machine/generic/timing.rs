use crate::error::{Axis, ConfigError};

/// One axis of a raster: the active region, followed by the front porch,
/// the sync pulse and the back porch. Counter value 0 is the first active
/// pixel (or line).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisTiming {
    pub active: u16,
    pub fp: u16,
    pub sync: u16,
    pub bp: u16, // active + fp + sync + bp = total
}

impl AxisTiming {
    pub const fn total(&self) -> u16 {
        self.active + self.fp + self.sync + self.bp
    }

    pub const fn sync_start(&self) -> u16 {
        self.active + self.fp
    }

    pub const fn sync_end(&self) -> u16 {
        self.sync_start() + self.sync
    }

    pub fn in_sync(&self, pos: u16) -> bool {
        pos >= self.sync_start() && pos < self.sync_end()
    }

    pub fn in_blanking(&self, pos: u16) -> bool {
        pos >= self.active
    }

    pub(crate) fn validate(&self, axis: Axis) -> Result<(), ConfigError> {
        if self.active == 0 || self.fp == 0 || self.sync == 0 || self.bp == 0 {
            return Err(ConfigError::InvalidTiming {
                axis,
                reason: "has a zero-length region",
            });
        }
        self.active
            .checked_add(self.fp)
            .and_then(|v| v.checked_add(self.sync))
            .and_then(|v| v.checked_add(self.bp))
            .ok_or(ConfigError::InvalidTiming {
                axis,
                reason: "does not fit a 16-bit counter",
            })?;
        Ok(())
    }
}

/// Raster timing for both axes. Horizontal values are in pixel clocks,
/// vertical values in lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub h: AxisTiming,
    pub v: AxisTiming,
}

impl Timing {
    pub fn new(h: AxisTiming, v: AxisTiming) -> Result<Self, ConfigError> {
        h.validate(Axis::Horizontal)?;
        v.validate(Axis::Vertical)?;
        Ok(Self { h, v })
    }

    pub const fn htot(&self) -> u16 {
        self.h.total()
    }

    pub const fn vtot(&self) -> u16 {
        self.v.total()
    }

    /// Pixel clocks in one full frame.
    pub fn pixel_tot(&self) -> u32 {
        u32::from(self.htot()) * u32::from(self.vtot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: AxisTiming = AxisTiming {
        active: 20,
        fp: 2,
        sync: 6,
        bp: 4,
    };

    #[test]
    fn test_regions() {
        assert_eq!(SMALL.total(), 32);
        assert_eq!(SMALL.sync_start(), 22);
        assert_eq!(SMALL.sync_end(), 28);
        let sync: Vec<u16> = (0..SMALL.total()).filter(|&p| SMALL.in_sync(p)).collect();
        assert_eq!(sync, (22..28).collect::<Vec<_>>());
        assert!(!SMALL.in_blanking(19));
        assert!(SMALL.in_blanking(20));
    }

    #[test]
    fn test_zero_region_rejected() {
        let h = AxisTiming { fp: 0, ..SMALL };
        assert_eq!(
            Timing::new(h, SMALL),
            Err(ConfigError::InvalidTiming {
                axis: Axis::Horizontal,
                reason: "has a zero-length region",
            })
        );
    }

    #[test]
    fn test_counter_overflow_rejected() {
        let v = AxisTiming {
            active: u16::MAX - 4,
            ..SMALL
        };
        assert!(matches!(
            Timing::new(SMALL, v),
            Err(ConfigError::InvalidTiming {
                axis: Axis::Vertical,
                ..
            })
        ));
    }

    #[test]
    fn test_pixel_tot() {
        let t = Timing::new(SMALL, SMALL).unwrap();
        assert_eq!(t.pixel_tot(), 32 * 32);
    }
}
