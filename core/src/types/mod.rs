//! Core type definitions for mammogram preprocessing
//!
//! This module provides the value types passed between pipeline stages:
//! - [`ChainCode`]: Anchor point plus 8-connected direction steps
//! - [`Direction`] / [`Point`]: Single steps and absolute grid positions
//! - [`BoundingExtent`]: Min/max box of a traced chain code
//! - [`ScaledBoundingBox`]: Bounding extent mapped into the resized grid
//! - [`GridSize`]: Image dimensions
//! - [`Side`] / [`OrientationDecision`]: Blank-margin side and the mirror decision
//! - [`EnhancementFlag`]: Single or double CLAHE
//! - [`PreprocessConfig`] / [`CropPolicy`]: Run configuration

mod chain_code;
mod config;
mod enums;
mod extent;

pub use chain_code::{ChainCode, Direction, Point, DIRECTION_OFFSETS};
pub use config::{CropPolicy, PreprocessConfig, DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH};
pub use enums::{EnhancementFlag, OrientationDecision, Side};
pub use extent::{BoundingExtent, GridSize, ScaledBoundingBox};
