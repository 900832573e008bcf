use crate::error::{MammoprepError, Result};
use crate::geometry::CropMargins;
use crate::types::{CropPolicy, GridSize, Side};
use image::GrayImage;
use imageproc::stats::histogram;

/// What a border crop removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CropReport {
    /// Side judged to hold the blank scanner margin
    pub blank_side: Side,
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
    /// Size of the cropped image
    pub size: GridSize,
}

impl CropReport {
    /// Margins that precede a chain code's anchor (left columns, top rows)
    pub fn anchor_margins(&self) -> CropMargins {
        CropMargins::new(self.left, self.top)
    }
}

/// Judges which side holds the blank margin from a strip on the left edge
///
/// Counts the darkest and the brightest value inside the strip. The margin is
/// on the left when the darkest value outnumbers the brightest by more than
/// `policy.blank_dominance` of the strip's pixels.
///
/// A strip holding a single value has no surplus at all, so the plain count
/// comparison would always answer Right, even for an all-black strip. Such a
/// strip is instead judged blank when its value is below mid-gray.
pub fn probe_blank_side(image: &GrayImage, policy: &CropPolicy) -> Side {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Side::Right;
    }
    let strip = ((width as f64 * policy.probe_fraction) as u32).clamp(1, width);

    let probe = image::imageops::crop_imm(image, 0, 0, strip, height).to_image();
    let counts = histogram(&probe).channels[0];

    let darkest = counts.iter().position(|&c| c > 0).unwrap_or(0);
    let brightest = counts.iter().rposition(|&c| c > 0).unwrap_or(0);
    if darkest == brightest {
        return if darkest < 128 { Side::Left } else { Side::Right };
    }
    let surplus = counts[darkest] as f64 - counts[brightest] as f64;
    let threshold = policy.blank_dominance * (strip as u64 * height as u64) as f64;

    if surplus > threshold {
        Side::Left
    } else {
        Side::Right
    }
}

/// Removes scanner borders
///
/// Columns: `blank_side_fraction` of the width from the blank side and
/// `breast_side_fraction` from the other. Rows: `row_fraction` of the height
/// from top and bottom, then `secondary_row_fraction` of what is left.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the crop would leave no pixels
pub fn crop_borders(image: &GrayImage, policy: &CropPolicy) -> Result<(GrayImage, CropReport)> {
    let (width, height) = image.dimensions();
    let blank_side = probe_blank_side(image, policy);

    let blank = (width as f64 * policy.blank_side_fraction) as u32;
    let breast = (width as f64 * policy.breast_side_fraction) as u32;
    let (left, right) = match blank_side {
        Side::Left => (blank, breast),
        Side::Right => (breast, blank),
    };

    let rows = (height as f64 * policy.row_fraction) as u32;
    let remaining = height.saturating_sub(2 * rows);
    let secondary = (remaining as f64 * policy.secondary_row_fraction) as u32;

    let top = rows + secondary;
    let bottom = top;

    if left + right >= width || 2 * top >= height {
        return Err(MammoprepError::InvalidConfiguration(format!(
            "crop of {} columns and {} rows leaves nothing of a {}x{} image",
            left + right,
            top + bottom,
            width,
            height
        )));
    }

    let size = GridSize::new(width - left - right, height - top - bottom);
    let cropped = image::imageops::crop_imm(image, left, top, size.width, size.height).to_image();

    Ok((
        cropped,
        CropReport {
            blank_side,
            left,
            right,
            top,
            bottom,
            size,
        },
    ))
}
