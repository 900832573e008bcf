use crate::enhancement::{mirror, resize, CropReport, ImageEnhancer, MorphologyEnhancer};
use crate::error::{MammoprepError, Result};
use crate::geometry::{
    adjust_for_crop, bounding_extent, normalize_orientation, scale_bounding_extent,
};
use crate::paint::{draw_bounding_box, DEFAULT_THICKNESS};
use crate::types::{
    BoundingExtent, ChainCode, GridSize, OrientationDecision, PreprocessConfig, ScaledBoundingBox,
    Side,
};
use image::GrayImage;
use log::{debug, info};

/// Mammogram preprocessing pipeline
///
/// Crops scanner borders, removes burned-in text, contrast-enhances the
/// tissue and normalizes orientation, while carrying the abnormality chain
/// code through the same crop and mirror so its bounding box can be mapped
/// into the resized output.
///
/// Each call is independent: the preprocessor holds only configuration.
///
/// # Example
///
/// ```
/// use image::{GrayImage, Luma};
/// use mammoprep_core::{ChainCode, MammogramPreprocessor, PreprocessConfig};
///
/// let image = GrayImage::from_fn(200, 160, |x, _| {
///     if x < 40 { Luma([0]) } else { Luma([140]) }
/// });
/// let code: ChainCode = "120 80 2 2 4 4 6 6 0 0".parse().unwrap();
///
/// let config = PreprocessConfig::default().with_target_size(50, 40);
/// let preprocessor = MammogramPreprocessor::new(config).unwrap();
/// let output = preprocessor.preprocess(&image, &code).unwrap();
///
/// assert_eq!(output.image.dimensions(), (50, 40));
/// ```
#[derive(Debug, Clone)]
pub struct MammogramPreprocessor<E = MorphologyEnhancer> {
    config: PreprocessConfig,
    enhancer: E,
}

impl MammogramPreprocessor<MorphologyEnhancer> {
    /// Creates a preprocessor using the default morphology enhancer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the configuration cannot run
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        let enhancer = MorphologyEnhancer::new(config.crop);
        Self::with_enhancer(config, enhancer)
    }
}

impl<E: ImageEnhancer> MammogramPreprocessor<E> {
    /// Creates a preprocessor around a custom enhancer
    pub fn with_enhancer(config: PreprocessConfig, enhancer: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, enhancer })
    }

    /// Returns the configuration
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Runs the full pipeline on one image and its chain code
    ///
    /// Neither input is modified.
    ///
    /// # Errors
    ///
    /// - `AnchorOutOfRange` if the chain code does not fit the image before
    ///   or after cropping
    /// - `InvalidConfiguration` if cropping, text removal or enhancement fails
    pub fn preprocess(
        &self,
        image: &GrayImage,
        chain_code: &ChainCode,
    ) -> Result<PreprocessOutput> {
        let raw_size = GridSize::of(image);
        chain_code.ensure_anchor_within(raw_size.width, raw_size.height)?;
        info!(
            "Preprocessing {} image (flag {}, {}), chain code anchor {} with {} steps",
            raw_size,
            self.config.flag.value(),
            self.config.flag,
            chain_code.anchor(),
            chain_code.len()
        );

        let (cropped, crop) = self.enhancer.crop(image).map_err(|e| stage_error("crop", e))?;
        debug!(
            "Cropped to {}: blank side {}, margins left {} right {} top {} bottom {}",
            crop.size, crop.blank_side, crop.left, crop.right, crop.top, crop.bottom
        );

        let cleaned = self
            .enhancer
            .remove_text(&cropped)
            .map_err(|e| stage_error("text removal", e))?;
        debug!("Removed text");

        let enhanced = self
            .enhancer
            .enhance(&cleaned, self.config.flag)
            .map_err(|e| stage_error("enhancement", e))?;
        let enhanced_size = GridSize::of(&enhanced);
        debug!("Enhanced ({})", self.config.flag);

        let blank_side = self.enhancer.detect_orientation(&enhanced);
        let adjusted = adjust_for_crop(chain_code, crop.anchor_margins())?;
        adjusted.ensure_anchor_within(enhanced_size.width, enhanced_size.height)?;

        let (oriented_code, decision) =
            normalize_orientation(&adjusted, blank_side, enhanced_size.width);
        let oriented = if decision.is_mirror() {
            mirror(&enhanced)
        } else {
            enhanced.clone()
        };
        info!(
            "Blank margin on the {}: {}, chain code anchor now {}",
            blank_side,
            decision,
            oriented_code.anchor()
        );

        let extent = bounding_extent(&oriented_code);
        let target = self.config.target_size();
        let resized = resize(&oriented, target.width, target.height);
        let bounding_box = scale_bounding_extent(&extent, GridSize::of(&oriented), target)?;
        info!(
            "Bounding extent {} in {} grid, scaled to {} in {} grid",
            extent, enhanced_size, bounding_box, target
        );

        Ok(PreprocessOutput {
            image: resized,
            bounding_box,
            extent,
            chain_code: oriented_code,
            crop,
            blank_side,
            decision,
            enhanced_size,
            stages: StageImages {
                cropped,
                cleaned,
                enhanced,
            },
        })
    }
}

fn stage_error(stage: &str, err: MammoprepError) -> MammoprepError {
    match err {
        MammoprepError::InvalidConfiguration(msg) => {
            MammoprepError::InvalidConfiguration(format!("{} failed: {}", stage, msg))
        }
        other => MammoprepError::InvalidConfiguration(format!("{} failed: {}", stage, other)),
    }
}

/// Intermediate images kept for step dumps
#[derive(Debug, Clone)]
pub struct StageImages {
    pub cropped: GrayImage,
    pub cleaned: GrayImage,
    /// Enhanced image before any mirroring
    pub enhanced: GrayImage,
}

/// Result of a preprocessing run
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    /// Enhanced, orientation-normalized and resized image
    pub image: GrayImage,

    /// Abnormality bounding box in the resized grid
    pub bounding_box: ScaledBoundingBox,

    /// Abnormality extent in the enhanced grid
    pub extent: BoundingExtent,

    /// Chain code re-anchored (and possibly mirrored) to the enhanced grid
    pub chain_code: ChainCode,

    /// What the border crop removed
    pub crop: CropReport,

    /// Blank-margin side found after enhancement
    pub blank_side: Side,

    /// Whether image and chain code were mirrored
    pub decision: OrientationDecision,

    /// Size of the enhanced grid the extent refers to
    pub enhanced_size: GridSize,

    pub stages: StageImages,
}

impl PreprocessOutput {
    /// Draws the bounding box on a copy of the output image
    pub fn painted(&self) -> GrayImage {
        draw_bounding_box(&self.image, &self.bounding_box, u8::MAX, DEFAULT_THICKNESS)
    }

    /// Image-free summary of the run
    pub fn summary(&self) -> PreprocessSummary {
        PreprocessSummary {
            output_size: GridSize::of(&self.image),
            bounding_box: self.bounding_box,
            extent: self.extent,
            enhanced_size: self.enhanced_size,
            crop: self.crop,
            blank_side: self.blank_side,
            decision: self.decision,
            anchor: self.chain_code.anchor(),
            steps: self.chain_code.len(),
        }
    }
}

/// Image-free description of a preprocessing run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PreprocessSummary {
    pub output_size: GridSize,
    pub bounding_box: ScaledBoundingBox,
    pub extent: BoundingExtent,
    pub enhanced_size: GridSize,
    pub crop: CropReport,
    pub blank_side: Side,
    pub decision: OrientationDecision,
    pub anchor: crate::types::Point,
    pub steps: usize,
}
