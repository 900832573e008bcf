//! Chain-code geometry
//!
//! Keeps an annotated contour consistent with its image as the image is
//! cropped, mirrored and resized:
//! - [`trace`] / [`bounding_extent`]: decode a chain code into absolute points
//! - [`adjust_for_crop`]: re-anchor after border cropping
//! - [`normalize_orientation`] / [`mirror_chain_code`]: reflect across the vertical axis
//! - [`scale_bounding_extent`]: map an extent into a resized grid
//!
//! Every operation takes its input by reference and returns a new value.

mod adjust;
mod decode;
mod orientation;
mod scale;

pub use adjust::{adjust_for_crop, CropMargins};
pub use decode::{bounding_extent, trace, trace_iter};
pub use orientation::{mirror_chain_code, mirror_direction, normalize_orientation, MIRROR_TABLE};
pub use scale::scale_bounding_extent;
