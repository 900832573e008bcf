use super::Point;
use std::fmt;

/// Width and height of an image grid in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Creates a new GridSize
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reads the grid size of an image
    pub fn of<I: image::GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// Whether either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Smallest axis-aligned box holding every point of a traced chain code
///
/// Only produced by tracing (see [`crate::geometry::bounding_extent`]), and
/// only valid in the grid the chain code was traced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BoundingExtent {
    min_column: i64,
    min_row: i64,
    max_column: i64,
    max_row: i64,
}

impl BoundingExtent {
    /// Degenerate extent covering a single point
    pub(crate) fn at(point: Point) -> Self {
        Self {
            min_column: point.column,
            min_row: point.row,
            max_column: point.column,
            max_row: point.row,
        }
    }

    /// Grows the extent to cover `point`
    pub(crate) fn include(&mut self, point: Point) {
        self.min_column = self.min_column.min(point.column);
        self.min_row = self.min_row.min(point.row);
        self.max_column = self.max_column.max(point.column);
        self.max_row = self.max_row.max(point.row);
    }

    pub fn min_column(&self) -> i64 {
        self.min_column
    }

    pub fn min_row(&self) -> i64 {
        self.min_row
    }

    pub fn max_column(&self) -> i64 {
        self.max_column
    }

    pub fn max_row(&self) -> i64 {
        self.max_row
    }

    /// Returns `(min_column, min_row, max_column, max_row)`
    pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.min_column, self.min_row, self.max_column, self.max_row)
    }
}

impl fmt::Display for BoundingExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.min_column, self.min_row, self.max_column, self.max_row
        )
    }
}

/// Bounding extent mapped into a resized output grid
///
/// Not clipped: coordinates may fall outside the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ScaledBoundingBox {
    pub min_column: i64,
    pub min_row: i64,
    pub max_column: i64,
    pub max_row: i64,
}

impl ScaledBoundingBox {
    /// Returns `(min_column, min_row, max_column, max_row)`
    pub fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.min_column, self.min_row, self.max_column, self.max_row)
    }
}

impl fmt::Display for ScaledBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.min_column, self.min_row, self.max_column, self.max_row
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_grows() {
        let mut extent = BoundingExtent::at(Point::new(5, 5));
        assert_eq!(extent.as_tuple(), (5, 5, 5, 5));

        extent.include(Point::new(7, 3));
        extent.include(Point::new(-2, 4));
        assert_eq!(extent.as_tuple(), (-2, 3, 7, 5));
        assert_eq!(extent.to_string(), "(-2, 3) - (7, 5)");
    }

    #[test]
    fn test_grid_size() {
        let image = image::GrayImage::new(30, 40);
        let size = GridSize::of(&image);
        assert_eq!(size, GridSize::new(30, 40));
        assert!(!size.is_empty());
        assert!(GridSize::new(0, 4).is_empty());
        assert_eq!(size.to_string(), "30x40");
    }
}
