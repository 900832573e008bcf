use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

/// Largest radius applied in a single distance-transform pass
///
/// Distances saturate at 255, so one pass is exact only below that.
const MAX_PASS_RADIUS: u32 = 254;

/// Binary morphology step with a square structuring element of the given side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    Open(u32),
    Erode(u32),
    Dilate(u32),
}

/// Threshold followed by a sequence of morphology steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRecipe {
    /// Pixels strictly above this value are foreground
    pub threshold: u8,
    pub ops: &'static [MorphOp],
}

impl MaskRecipe {
    /// Thresholds `image` and runs every step in order, returning a 0/255 mask
    pub fn build(&self, image: &GrayImage) -> GrayImage {
        let binary = imageproc::contrast::threshold(image, self.threshold);
        self.ops.iter().fold(binary, |mask, op| match *op {
            MorphOp::Open(side) => dilate_square(&erode_square(&mask, side), side),
            MorphOp::Erode(side) => erode_square(&mask, side),
            MorphOp::Dilate(side) => dilate_square(&mask, side),
        })
    }
}

/// Dilates with a `side` x `side` square
///
/// A square of radius a + b equals a square of radius a dilated by radius b,
/// so large elements run as several passes.
pub fn dilate_square(image: &GrayImage, side: u32) -> GrayImage {
    square_passes(image, side, Pass::Dilate)
}

/// Erodes with a `side` x `side` square
pub fn erode_square(image: &GrayImage, side: u32) -> GrayImage {
    square_passes(image, side, Pass::Erode)
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Dilate,
    Erode,
}

impl Pass {
    /// Whether the pass can no longer change `mask`
    ///
    /// imageproc reports a missing seed as the saturated distance
    /// `min(width + height, 255)`, which a large radius would treat as in
    /// reach. Dilating a mask without foreground, or eroding one without
    /// background, is the identity.
    fn is_settled(self, mask: &GrayImage) -> bool {
        match self {
            Pass::Dilate => mask.pixels().all(|p| p[0] == 0),
            Pass::Erode => mask.pixels().all(|p| p[0] > 0),
        }
    }

    fn run(self, mask: &GrayImage, radius: u8) -> GrayImage {
        match self {
            Pass::Dilate => dilate(mask, Norm::LInf, radius),
            Pass::Erode => erode(mask, Norm::LInf, radius),
        }
    }
}

fn square_passes(image: &GrayImage, side: u32, pass: Pass) -> GrayImage {
    // A radius of the longer side already reaches every pixel
    let reach = image.width().max(image.height());
    let mut radius = (side / 2).min(reach);
    let mut out = image.clone();
    while radius > 0 && !pass.is_settled(&out) {
        let step = radius.min(MAX_PASS_RADIUS);
        out = pass.run(&out, step as u8);
        radius -= step;
    }
    out
}

/// Keeps `image` pixels where `mask` is non-zero, zeroes the rest
pub fn apply_mask(image: &GrayImage, mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel(x, y)[0] > 0 {
            *image.get_pixel(x, y)
        } else {
            Luma([0])
        }
    })
}

/// Keeps `image` pixels that are above `threshold` and under the mask
pub fn apply_mask_above(image: &GrayImage, mask: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = image.get_pixel(x, y)[0];
        if value > threshold && mask.get_pixel(x, y)[0] > 0 {
            Luma([value])
        } else {
            Luma([0])
        }
    })
}
