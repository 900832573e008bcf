use crate::error::{MammoprepError, Result};
use crate::types::{ChainCode, Point};

/// Pixels removed ahead of a chain code's anchor by a crop
///
/// `column` counts columns removed from the left edge, `row` counts rows
/// removed from the top edge. Margins on the right and bottom do not move
/// the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct CropMargins {
    pub column: u32,
    pub row: u32,
}

impl CropMargins {
    /// Creates new CropMargins
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Re-anchors a chain code to a cropped grid
///
/// Cropping is a pure translation: the anchor moves by the margins and the
/// direction steps are kept.
///
/// # Errors
///
/// Returns `AnchorOutOfRange` if the shifted anchor would be negative, which
/// means the margins and the chain code do not describe the same image.
///
/// # Example
///
/// ```
/// use mammoprep_core::geometry::{adjust_for_crop, CropMargins};
/// use mammoprep_core::ChainCode;
///
/// let code: ChainCode = "120 300 2 4".parse().unwrap();
/// let adjusted = adjust_for_crop(&code, CropMargins::new(20, 50)).unwrap();
/// assert_eq!(adjusted.to_string(), "100 250 2 4");
/// ```
pub fn adjust_for_crop(code: &ChainCode, margins: CropMargins) -> Result<ChainCode> {
    let anchor = code.anchor();
    let shifted = Point::new(
        anchor.column - i64::from(margins.column),
        anchor.row - i64::from(margins.row),
    );

    if shifted.column < 0 || shifted.row < 0 {
        return Err(MammoprepError::anchor(
            shifted.column,
            shifted.row,
            format!(
                "anchor {} lies inside the cropped margins ({} columns, {} rows)",
                anchor, margins.column, margins.row
            ),
        ));
    }

    Ok(ChainCode::new(shifted, code.directions().to_vec()))
}
