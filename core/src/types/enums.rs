use crate::error::{MammoprepError, Result};
use std::fmt;

/// Side of the image holding a blank scanner margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Returns the other side
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Whether an image and its chain code must be mirrored
///
/// Derived from the blank-margin side of the enhanced image. Breast tissue is
/// normalized to the left of the frame, so a blank margin on the left means the
/// breast currently sits on the right and the pair must be flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum OrientationDecision {
    Mirror,
    NoMirror,
}

impl OrientationDecision {
    /// Decides from the side that holds the blank margin
    pub fn from_blank_side(blank_side: Side) -> Self {
        match blank_side {
            Side::Left => OrientationDecision::Mirror,
            Side::Right => OrientationDecision::NoMirror,
        }
    }

    /// Returns whether a mirror is required
    pub fn is_mirror(&self) -> bool {
        matches!(self, OrientationDecision::Mirror)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            OrientationDecision::Mirror => "mirror",
            OrientationDecision::NoMirror => "no-mirror",
        }
    }
}

impl fmt::Display for OrientationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Contrast enhancement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum EnhancementFlag {
    /// One CLAHE pass followed by the light side-effect cleanup
    SinglePass,

    /// Two CLAHE passes followed by the stronger side-effect cleanup
    #[default]
    DoublePass,
}

impl EnhancementFlag {
    /// Returns the numeric flag used on the command line (1 or 2)
    pub fn value(&self) -> u8 {
        match self {
            EnhancementFlag::SinglePass => 1,
            EnhancementFlag::DoublePass => 2,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            EnhancementFlag::SinglePass => "single-pass",
            EnhancementFlag::DoublePass => "double-pass",
        }
    }
}

impl TryFrom<u8> for EnhancementFlag {
    type Error = MammoprepError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(EnhancementFlag::SinglePass),
            2 => Ok(EnhancementFlag::DoublePass),
            other => Err(MammoprepError::InvalidConfiguration(format!(
                "unsupported enhancement flag {}: use 1 for single CLAHE, 2 for double CLAHE",
                other
            ))),
        }
    }
}

impl fmt::Display for EnhancementFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_blank_side() {
        assert_eq!(
            OrientationDecision::from_blank_side(Side::Left),
            OrientationDecision::Mirror
        );
        assert_eq!(
            OrientationDecision::from_blank_side(Side::Right),
            OrientationDecision::NoMirror
        );
        assert!(OrientationDecision::Mirror.is_mirror());
        assert!(!OrientationDecision::NoMirror.is_mirror());
    }

    #[test]
    fn test_flag_conversion() {
        assert_eq!(
            EnhancementFlag::try_from(1).unwrap(),
            EnhancementFlag::SinglePass
        );
        assert_eq!(
            EnhancementFlag::try_from(2).unwrap(),
            EnhancementFlag::DoublePass
        );
        assert!(matches!(
            EnhancementFlag::try_from(3),
            Err(MammoprepError::InvalidConfiguration(_))
        ));
        assert!(EnhancementFlag::try_from(0).is_err());
        assert_eq!(EnhancementFlag::default().value(), 2);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(OrientationDecision::NoMirror.to_string(), "no-mirror");
    }
}
