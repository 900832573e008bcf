use super::{EnhancementFlag, GridSize};
use crate::error::{MammoprepError, Result};

/// Default output width in pixels
pub const DEFAULT_TARGET_WIDTH: u32 = 256;

/// Default output height in pixels
pub const DEFAULT_TARGET_HEIGHT: u32 = 512;

/// Border-cropping constants
///
/// Column fractions are taken of the image width, row fractions of the height
/// at the time each pass runs. The blank side is chosen by comparing pixel
/// counts in a strip on the left edge: when the darkest value outnumbers the
/// brightest value by more than `blank_dominance` of the strip's pixels, the
/// blank margin is on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct CropPolicy {
    /// Fraction of the width removed from the blank side
    pub blank_side_fraction: f64,

    /// Fraction of the width removed from the breast side
    pub breast_side_fraction: f64,

    /// Fraction of the height removed from top and bottom in the first pass
    pub row_fraction: f64,

    /// Fraction of the remaining height removed from top and bottom in the second pass
    pub secondary_row_fraction: f64,

    /// Fraction of the width (from the left edge) probed for the blank side
    pub probe_fraction: f64,

    /// Required surplus of dark over bright pixels, as a fraction of the probe strip
    pub blank_dominance: f64,
}

impl Default for CropPolicy {
    fn default() -> Self {
        Self {
            blank_side_fraction: 0.09,
            breast_side_fraction: 0.025,
            row_fraction: 0.03,
            secondary_row_fraction: 0.015,
            probe_fraction: 0.09,
            blank_dominance: 0.10,
        }
    }
}

impl CropPolicy {
    /// Checks that every fraction lies in `[0, 1)` and the side crops leave pixels
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("blank_side_fraction", self.blank_side_fraction),
            ("breast_side_fraction", self.breast_side_fraction),
            ("row_fraction", self.row_fraction),
            ("secondary_row_fraction", self.secondary_row_fraction),
            ("probe_fraction", self.probe_fraction),
            ("blank_dominance", self.blank_dominance),
        ];
        for (name, value) in fractions {
            if !(0.0..1.0).contains(&value) {
                return Err(MammoprepError::InvalidConfiguration(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }
        if self.blank_side_fraction + self.breast_side_fraction >= 1.0 {
            return Err(MammoprepError::InvalidConfiguration(
                "side crops remove the whole width".to_string(),
            ));
        }
        if self.row_fraction >= 0.5 || self.secondary_row_fraction >= 0.5 {
            return Err(MammoprepError::InvalidConfiguration(
                "row crops remove the whole height".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for a preprocessing run
///
/// # Example
///
/// ```
/// use mammoprep_core::{EnhancementFlag, PreprocessConfig};
///
/// let config = PreprocessConfig::default()
///     .with_flag(EnhancementFlag::SinglePass)
///     .with_target_size(128, 256);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.target_size().width, 128);
/// assert_eq!(config.target_size().height, 256);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct PreprocessConfig {
    /// Contrast enhancement mode
    pub flag: EnhancementFlag,

    /// Output image width
    pub target_width: u32,

    /// Output image height
    pub target_height: u32,

    /// Border-cropping constants
    pub crop: CropPolicy,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            flag: EnhancementFlag::default(),
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            crop: CropPolicy::default(),
        }
    }
}

impl PreprocessConfig {
    /// Builder: Set enhancement flag
    pub fn with_flag(mut self, flag: EnhancementFlag) -> Self {
        self.flag = flag;
        self
    }

    /// Builder: Set output size
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Builder: Set crop policy
    pub fn with_crop_policy(mut self, crop: CropPolicy) -> Self {
        self.crop = crop;
        self
    }

    /// Output grid size
    pub fn target_size(&self) -> GridSize {
        GridSize::new(self.target_width, self.target_height)
    }

    /// Rejects configurations that cannot run
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero target dimension or an
    /// unusable crop policy
    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(MammoprepError::InvalidConfiguration(format!(
                "target dimensions must be positive, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        self.crop.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PreprocessConfig::default();
        assert_eq!(config.flag, EnhancementFlag::DoublePass);
        assert_eq!(config.target_size(), GridSize::new(256, 512));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_target_rejected() {
        let config = PreprocessConfig::default().with_target_size(0, 512);
        assert!(matches!(
            config.validate(),
            Err(MammoprepError::InvalidConfiguration(_))
        ));
        let config = PreprocessConfig::default().with_target_size(256, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_crop_policy_bounds() {
        let policy = CropPolicy {
            blank_side_fraction: 1.2,
            ..CropPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = CropPolicy {
            blank_side_fraction: 0.6,
            breast_side_fraction: 0.5,
            ..CropPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = CropPolicy {
            row_fraction: 0.5,
            ..CropPolicy::default()
        };
        assert!(PreprocessConfig::default()
            .with_crop_policy(policy)
            .validate()
            .is_err());
    }
}
