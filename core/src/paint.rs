//! Overlay drawing
//!
//! Both painters work on a copy and clip every write to the canvas.

use crate::geometry::trace_iter;
use crate::types::{ChainCode, ScaledBoundingBox};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Default vertical brush length for chain-code overlays
pub const DEFAULT_BRUSH: u32 = 5;

/// Default rectangle outline thickness
pub const DEFAULT_THICKNESS: u32 = 3;

/// Paints a traced chain code onto a copy of `image`
///
/// The anchor is painted as a single pixel; every following point is painted
/// with a brush running `brush` pixels downward from it.
pub fn paint_chain_code(image: &GrayImage, code: &ChainCode, value: u8, brush: u32) -> GrayImage {
    let mut out = image.clone();
    let mut points = trace_iter(code);

    if let Some(anchor) = points.next() {
        put_clipped(&mut out, anchor.column, anchor.row, value);
    }
    for point in points {
        for w in 0..i64::from(brush) {
            put_clipped(&mut out, point.column, point.row + w, value);
        }
    }
    out
}

/// Draws a hollow rectangle onto a copy of `image`
///
/// Thickness grows inward from the box edges. Parts outside the canvas are
/// dropped; a box entirely off-canvas leaves the copy unchanged.
pub fn draw_bounding_box(
    image: &GrayImage,
    bbox: &ScaledBoundingBox,
    value: u8,
    thickness: u32,
) -> GrayImage {
    let mut out = image.clone();
    let (x0, y0) = (bbox.min_column.min(bbox.max_column), bbox.min_row.min(bbox.max_row));
    let (x1, y1) = (bbox.min_column.max(bbox.max_column), bbox.min_row.max(bbox.max_row));

    for inset in 0..i64::from(thickness) {
        let (left, top, right, bottom) = (x0 + inset, y0 + inset, x1 - inset, y1 - inset);
        if left > right || top > bottom {
            break;
        }
        let (Ok(x), Ok(y)) = (i32::try_from(left), i32::try_from(top)) else {
            break;
        };
        let (Ok(w), Ok(h)) = (
            u32::try_from(right - left + 1),
            u32::try_from(bottom - top + 1),
        ) else {
            break;
        };
        draw_hollow_rect_mut(&mut out, Rect::at(x, y).of_size(w, h), Luma([value]));
    }
    out
}

fn put_clipped(image: &mut GrayImage, column: i64, row: i64, value: u8) {
    let inside = (0..i64::from(image.width())).contains(&column)
        && (0..i64::from(image.height())).contains(&row);
    if inside {
        image.put_pixel(column as u32, row as u32, Luma([value]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p[0] > 0).count()
    }

    #[test]
    fn test_paint_chain_code_brush() {
        let canvas = GrayImage::new(20, 20);
        let code: ChainCode = "5 5 2".parse().unwrap();
        let out = paint_chain_code(&canvas, &code, 255, 5);

        assert_eq!(out.get_pixel(5, 5)[0], 255);
        for row in 5..10 {
            assert_eq!(out.get_pixel(6, row)[0], 255);
        }
        assert_eq!(out.get_pixel(6, 10)[0], 0);
        assert_eq!(painted(&out), 6);
        // Source image untouched
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_paint_chain_code_clips() {
        let canvas = GrayImage::new(10, 10);
        let code: ChainCode = "9 8 2 2 6 6 6".parse().unwrap();
        let out = paint_chain_code(&canvas, &code, 200, 5);
        // Only the anchor and the points back inside column 9 and below land
        assert!(painted(&out) > 0);
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 200));
    }

    #[test]
    fn test_draw_bounding_box() {
        let canvas = GrayImage::new(20, 20);
        let bbox = ScaledBoundingBox {
            min_column: 2,
            min_row: 3,
            max_column: 10,
            max_row: 12,
        };
        let out = draw_bounding_box(&canvas, &bbox, 255, 1);
        assert_eq!(out.get_pixel(2, 3)[0], 255);
        assert_eq!(out.get_pixel(10, 12)[0], 255);
        assert_eq!(out.get_pixel(6, 7)[0], 0);
        // Perimeter of a 9x10 box
        assert_eq!(painted(&out), 2 * 9 + 2 * 10 - 4);
    }

    #[test]
    fn test_draw_thick_box() {
        let canvas = GrayImage::new(20, 20);
        let bbox = ScaledBoundingBox {
            min_column: 0,
            min_row: 0,
            max_column: 9,
            max_row: 9,
        };
        let out = draw_bounding_box(&canvas, &bbox, 255, 3);
        assert_eq!(out.get_pixel(2, 2)[0], 255);
        assert_eq!(out.get_pixel(3, 3)[0], 0);
        assert_eq!(painted(&out), 100 - 16);
    }

    #[test]
    fn test_draw_off_canvas_is_noop() {
        let canvas = GrayImage::new(20, 20);
        let bbox = ScaledBoundingBox {
            min_column: 40,
            min_row: 40,
            max_column: 50,
            max_row: 50,
        };
        assert_eq!(draw_bounding_box(&canvas, &bbox, 255, 3), canvas);
    }
}
