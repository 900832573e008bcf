use crate::error::{MammoprepError, Result};
use crate::types::{BoundingExtent, GridSize, ScaledBoundingBox};

/// Maps a bounding extent into a resized grid
///
/// Columns scale by `target.width / source.width` and rows by
/// `target.height / source.height`. Each coordinate is rounded to the nearest
/// integer with halves rounded away from zero. The result is not clipped to
/// the target grid.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if either grid has a zero dimension
///
/// # Example
///
/// ```
/// use mammoprep_core::geometry::{bounding_extent, scale_bounding_extent};
/// use mammoprep_core::{ChainCode, GridSize};
///
/// let extent = bounding_extent(&"10 20 2 2 4".parse::<ChainCode>().unwrap());
/// let scaled = scale_bounding_extent(
///     &extent,
///     GridSize::new(100, 200),
///     GridSize::new(256, 512),
/// )
/// .unwrap();
/// assert_eq!(scaled.as_tuple(), (26, 51, 31, 54));
/// ```
pub fn scale_bounding_extent(
    extent: &BoundingExtent,
    source: GridSize,
    target: GridSize,
) -> Result<ScaledBoundingBox> {
    if source.is_empty() || target.is_empty() {
        return Err(MammoprepError::InvalidConfiguration(format!(
            "cannot scale from {} to {}",
            source, target
        )));
    }

    let column_scale = f64::from(target.width) / f64::from(source.width);
    let row_scale = f64::from(target.height) / f64::from(source.height);

    Ok(ScaledBoundingBox {
        min_column: scale_coordinate(extent.min_column(), column_scale),
        min_row: scale_coordinate(extent.min_row(), row_scale),
        max_column: scale_coordinate(extent.max_column(), column_scale),
        max_row: scale_coordinate(extent.max_row(), row_scale),
    })
}

fn scale_coordinate(value: i64, scale: f64) -> i64 {
    // f64::round rounds halfway cases away from zero
    (value as f64 * scale).round() as i64
}
