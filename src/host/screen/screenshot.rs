use std::path::Path;

use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{ImageResult, RgbImage};

use crate::host::monitor::Monitor;

/// The monitor's current picture as an 8-bit RGB image.
pub fn frame_to_image(monitor: &Monitor) -> ImageResult<RgbImage> {
    let pixels = monitor.frame_rgb8();
    let bytes: &[u8] = bytemuck::cast_slice(&pixels);
    RgbImage::from_raw(
        u32::from(monitor.width()),
        u32::from(monitor.height()),
        bytes.to_vec(),
    )
    .ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

/// Save the monitor's current picture as a PNG.
pub fn save_png(monitor: &Monitor, path: &Path) -> ImageResult<()> {
    frame_to_image(monitor)?.save(path)
}
