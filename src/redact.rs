use image::{RgbaImage, imageops};
use imageproc::filter::gaussian_blur_f32;
use log::debug;

use crate::{constants::DEFAULT_BLUR_KERNEL, geometry::BoundingBox};

/// Blurs the pixels of a region so the original text can no longer be read.
#[derive(Debug, Clone, Copy)]
pub struct Redactor {
    kernel: u32,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_KERNEL)
    }
}

impl Redactor {
    /// Even kernel sizes are bumped to the next odd value.
    pub fn new(kernel: u32) -> Self {
        let kernel = if kernel % 2 == 0 { kernel + 1 } else { kernel };
        Self { kernel }
    }

    pub fn kernel(&self) -> u32 {
        self.kernel
    }

    /// Gaussian sigma for the kernel, derived the same way OpenCV does when
    /// it is handed a zero sigma.
    pub fn sigma(&self) -> f32 {
        let sigma = 0.3 * ((self.kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8;
        sigma.max(0.1)
    }

    /// Blurs `region` in place. Pixels outside it are never touched.
    ///
    /// Returns `false` when the region degenerates to zero area once clamped
    /// to the canvas.
    pub fn apply(&self, canvas: &mut RgbaImage, region: BoundingBox) -> bool {
        let (width, height) = canvas.dimensions();
        let region = region.clamp(width, height);
        if !region.is_valid() {
            debug!("redaction skipped for degenerate region {:?}", region);
            return false;
        }

        let (x, y) = (region.x1 as u32, region.y1 as u32);
        let roi = imageops::crop_imm(&*canvas, x, y, region.width(), region.height()).to_image();
        let blurred = gaussian_blur_f32(&roi, self.sigma());
        imageops::replace(canvas, &blurred, x as i64, y as i64);
        true
    }
}
