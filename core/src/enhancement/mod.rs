//! Image enhancement collaborator
//!
//! Border cropping, burned-in text removal, CLAHE contrast enhancement and
//! the orientation probe, all on 8-bit grayscale images. Each step borrows
//! its input and returns a freshly owned image.

mod clahe;
mod crop;
mod morphology;

pub use clahe::Clahe;
pub use crop::{crop_borders, probe_blank_side, CropReport};
pub use morphology::{
    apply_mask, apply_mask_above, dilate_square, erode_square, MaskRecipe, MorphOp,
};

use crate::error::Result;
use crate::types::{CropPolicy, EnhancementFlag, Side};
use image::imageops::FilterType;
use image::GrayImage;
use imageproc::stats::histogram;

/// Fraction of the width (from the left) inspected by the orientation probe
pub const ORIENTATION_PROBE_FRACTION: f64 = 0.1;

/// Tile grid used by every CLAHE pass
pub const CLAHE_GRID: (u32, u32) = (10, 10);

/// Breast mask used to blank out burned-in labels
pub const TEXT_MASK: MaskRecipe = MaskRecipe {
    threshold: 15,
    ops: &[
        MorphOp::Open(30),
        MorphOp::Erode(550),
        MorphOp::Dilate(800),
        MorphOp::Erode(220),
        MorphOp::Dilate(600),
    ],
};

/// Cleanup after a single CLAHE pass
pub const SINGLE_PASS_CLEANUP: MaskRecipe = MaskRecipe {
    threshold: 20,
    ops: &[
        MorphOp::Open(30),
        MorphOp::Erode(50),
        MorphOp::Dilate(120),
        MorphOp::Dilate(120),
    ],
};

/// Cleanup after two CLAHE passes
pub const DOUBLE_PASS_CLEANUP: MaskRecipe = MaskRecipe {
    threshold: 40,
    ops: &[
        MorphOp::Open(30),
        MorphOp::Erode(50),
        MorphOp::Dilate(120),
        MorphOp::Dilate(120),
        MorphOp::Dilate(120),
    ],
};

/// Image-side operations the preprocessing pipeline depends on
///
/// Implementations must not mutate their input.
pub trait ImageEnhancer {
    /// Removes scanner borders, reporting how much was cut from each side
    fn crop(&self, image: &GrayImage) -> Result<(GrayImage, CropReport)>;

    /// Blanks burned-in text outside the breast region
    fn remove_text(&self, image: &GrayImage) -> Result<GrayImage>;

    /// Contrast-enhances the breast tissue
    fn enhance(&self, image: &GrayImage, flag: EnhancementFlag) -> Result<GrayImage>;

    /// Finds the side holding the blank margin of an enhanced image
    fn detect_orientation(&self, image: &GrayImage) -> Side;
}

/// Default enhancer built on thresholding, square-element morphology and CLAHE
#[derive(Debug, Clone, Default)]
pub struct MorphologyEnhancer {
    pub crop_policy: CropPolicy,
}

impl MorphologyEnhancer {
    /// Creates an enhancer with the given crop policy
    pub fn new(crop_policy: CropPolicy) -> Self {
        Self { crop_policy }
    }
}

impl ImageEnhancer for MorphologyEnhancer {
    fn crop(&self, image: &GrayImage) -> Result<(GrayImage, CropReport)> {
        crop_borders(image, &self.crop_policy)
    }

    fn remove_text(&self, image: &GrayImage) -> Result<GrayImage> {
        let mask = TEXT_MASK.build(image);
        Ok(apply_mask(image, &mask))
    }

    fn enhance(&self, image: &GrayImage, flag: EnhancementFlag) -> Result<GrayImage> {
        let (equalized, cleanup) = match flag {
            EnhancementFlag::SinglePass => {
                (Clahe::new(2.0, CLAHE_GRID).apply(image), SINGLE_PASS_CLEANUP)
            }
            EnhancementFlag::DoublePass => {
                let first = Clahe::new(2.0, CLAHE_GRID).apply(image);
                (Clahe::new(1.0, CLAHE_GRID).apply(&first), DOUBLE_PASS_CLEANUP)
            }
        };
        let mask = cleanup.build(&equalized);
        Ok(apply_mask_above(&equalized, &mask, cleanup.threshold))
    }

    fn detect_orientation(&self, image: &GrayImage) -> Side {
        detect_blank_side(image)
    }
}

/// Judges the blank side of an enhanced image
///
/// Binarizes at zero and inspects the leftmost tenth of the columns: when
/// black pixels are at least as common as non-black ones, the margin is on
/// the left.
pub fn detect_blank_side(image: &GrayImage) -> Side {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Side::Right;
    }
    let strip = ((width as f64 * ORIENTATION_PROBE_FRACTION) as u32).clamp(1, width);

    let probe = image::imageops::crop_imm(image, 0, 0, strip, height).to_image();
    let black = u64::from(histogram(&probe).channels[0][0]);
    let other = u64::from(strip) * u64::from(height) - black;

    if black >= other {
        Side::Left
    } else {
        Side::Right
    }
}

/// Resamples to `width` x `height`
pub fn resize(image: &GrayImage, width: u32, height: u32) -> GrayImage {
    image::imageops::resize(image, width, height, FilterType::Triangle)
}

/// Mirrors an image across its vertical axis
pub fn mirror(image: &GrayImage) -> GrayImage {
    image::imageops::flip_horizontal(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn half_dark(width: u32, height: u32, dark_left: bool) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            let left = x < width / 2;
            if left == dark_left {
                Luma([0])
            } else {
                Luma([150])
            }
        })
    }

    #[test]
    fn test_detect_blank_side() {
        assert_eq!(detect_blank_side(&half_dark(100, 50, true)), Side::Left);
        assert_eq!(detect_blank_side(&half_dark(100, 50, false)), Side::Right);
    }

    #[test]
    fn test_detect_ties_go_left() {
        // Strip is 10 columns: 5 black, 5 non-black
        let image = GrayImage::from_fn(100, 10, |x, _| Luma([if x < 5 { 0 } else { 1 }]));
        assert_eq!(detect_blank_side(&image), Side::Left);
    }

    #[test]
    fn test_mirror_and_resize() {
        let image = GrayImage::from_fn(4, 2, |x, _| Luma([x as u8 * 10]));
        let flipped = mirror(&image);
        assert_eq!(flipped.get_pixel(0, 0)[0], 30);
        assert_eq!(flipped.get_pixel(3, 1)[0], 0);

        let resized = resize(&GrayImage::new(40, 80), 10, 20);
        assert_eq!(resized.dimensions(), (10, 20));
    }

    #[test]
    fn test_remove_text_keeps_large_tissue() {
        // No background pixel anywhere: every erosion is the identity
        let tissue = GrayImage::from_pixel(60, 60, Luma([120]));
        let enhancer = MorphologyEnhancer::default();
        assert_eq!(enhancer.remove_text(&tissue).unwrap(), tissue);

        let blank = GrayImage::new(60, 60);
        assert_eq!(enhancer.remove_text(&blank).unwrap(), blank);
    }

    #[test]
    fn test_remove_text_drops_isolated_label() {
        // A bright 4x4 label on black is smaller than the 30px opening
        let mut image = GrayImage::new(80, 80);
        for y in 5..9 {
            for x in 5..9 {
                image.put_pixel(x, y, Luma([255]));
            }
        }
        let cleaned = MorphologyEnhancer::default().remove_text(&image).unwrap();
        assert!(cleaned.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_text_mask_on_small_images() {
        let full = GrayImage::from_pixel(90, 110, Luma([200]));
        assert!(TEXT_MASK.build(&full).pixels().all(|p| p[0] == 255));

        let mut speck = GrayImage::new(90, 110);
        speck.put_pixel(40, 40, Luma([255]));
        assert!(TEXT_MASK.build(&speck).pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_enhance_keeps_dimensions() {
        let image = GrayImage::from_fn(64, 48, |x, y| Luma([((x * 3 + y) % 200) as u8 + 30]));
        let enhancer = MorphologyEnhancer::default();
        for flag in [EnhancementFlag::SinglePass, EnhancementFlag::DoublePass] {
            let out = enhancer.enhance(&image, flag).unwrap();
            assert_eq!(out.dimensions(), image.dimensions());
        }
    }

    #[test]
    fn test_enhance_blank_stays_blank() {
        // Clipping lifts black a few levels, which the cleanup threshold removes
        let image = GrayImage::new(200, 200);
        let out = MorphologyEnhancer::default()
            .enhance(&image, EnhancementFlag::SinglePass)
            .unwrap();
        assert!(out.pixels().all(|p| p[0] == 0));
    }
}
