pub mod report;

use crate::api::PreprocessOutput;
use crate::error::Result;
use crate::paint::{paint_chain_code, DEFAULT_BRUSH};
use crate::types::{
    ChainCode, EnhancementFlag, PreprocessConfig, DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH,
};
use clap::{Parser, ValueEnum};
use image::GrayImage;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Command-line arguments for mammoprep
#[derive(Parser, Debug)]
#[command(name = "mammoprep")]
#[command(about = "Mammogram preprocessing with abnormality bounding-box tracking")]
#[command(version)]
pub struct Cli {
    /// Path to mammogram image
    #[arg(long, value_name = "FILE")]
    pub image: PathBuf,

    /// Path to chain-code overlay file
    #[arg(long, value_name = "FILE")]
    pub chaincode: PathBuf,

    /// CLAHE flag: 1 (single), 2 (double)
    #[arg(long, default_value_t = 2)]
    pub flag: u8,

    /// Target width
    #[arg(long, default_value_t = DEFAULT_TARGET_WIDTH)]
    pub width: u32,

    /// Target height
    #[arg(long, default_value_t = DEFAULT_TARGET_HEIGHT)]
    pub height: u32,

    /// Output directory
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the cropped, cleaned and enhanced stage images
    #[arg(long)]
    pub save_steps: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the preprocessing configuration from the arguments
    pub fn config(&self) -> Result<PreprocessConfig> {
        let flag = EnhancementFlag::try_from(self.flag)?;
        let config = PreprocessConfig::default()
            .with_flag(flag)
            .with_target_size(self.width, self.height);
        config.validate()?;
        Ok(config)
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Loads the image as 8-bit grayscale
pub fn load_image(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Writes the result images into `output_dir`, returning the written paths
///
/// Files are named after `stem`: `enhanced_`, `painted_` (bounding box) and
/// `original_painted_` (chain code on the raw image), plus the stage images
/// under `steps/` when `save_steps` is set.
///
/// Either every file is written or none is: a failed save removes the files
/// already written before returning the error.
pub fn write_outputs(
    output_dir: &Path,
    stem: &str,
    original: &GrayImage,
    chain_code: &ChainCode,
    output: &PreprocessOutput,
    save_steps: bool,
) -> Result<Vec<PathBuf>> {
    let mut images = vec![
        (output_dir.join(format!("enhanced_{}.png", stem)), output.image.clone()),
        (output_dir.join(format!("painted_{}.png", stem)), output.painted()),
        (
            output_dir.join(format!("original_painted_{}.png", stem)),
            paint_chain_code(original, chain_code, u8::MAX, DEFAULT_BRUSH),
        ),
    ];
    if save_steps {
        let steps = output_dir.join("steps");
        images.push((steps.join(format!("cropped_{}.png", stem)), output.stages.cropped.clone()));
        images.push((steps.join(format!("cleaned_{}.png", stem)), output.stages.cleaned.clone()));
        images.push((steps.join(format!("enhanced_{}.png", stem)), output.stages.enhanced.clone()));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(images.len());
    for (path, image) in images {
        if let Err(e) = save_png(&path, &image) {
            for done in &written {
                if let Err(remove_err) = std::fs::remove_file(done) {
                    warn!("Could not remove {}: {}", done.display(), remove_err);
                }
            }
            return Err(e);
        }
        info!("Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn save_png(path: &Path, image: &GrayImage) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MammogramPreprocessor;
    use crate::error::MammoprepError;
    use image::Luma;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Cli {
        let mut argv = vec!["mammoprep", "--image", "a.png", "--chaincode", "a.txt"];
        argv.extend_from_slice(extra);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let cli = args(&[]);
        let config = cli.config().unwrap();
        assert_eq!(config.flag, EnhancementFlag::DoublePass);
        assert_eq!((config.target_width, config.target_height), (256, 512));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(!cli.save_steps);
    }

    #[test]
    fn test_unsupported_flag() {
        let cli = args(&["--flag", "3"]);
        assert!(matches!(
            cli.config(),
            Err(MammoprepError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_width() {
        let cli = args(&["--width", "0"]);
        assert!(cli.config().is_err());
    }

    #[test]
    fn test_write_outputs() {
        let dir = TempDir::new().unwrap();
        let raw = GrayImage::from_fn(200, 160, |x, _| if x < 40 { Luma([0]) } else { Luma([140]) });
        let code: ChainCode = "120 80 2 2 4 4 6 6 0 0".parse().unwrap();
        let config = PreprocessConfig::default().with_target_size(50, 40);
        let output = MammogramPreprocessor::new(config)
            .unwrap()
            .preprocess(&raw, &code)
            .unwrap();

        let written = write_outputs(dir.path(), "case1", &raw, &code, &output, true).unwrap();
        assert_eq!(written.len(), 6);
        assert!(dir.path().join("enhanced_case1.png").is_file());
        assert!(dir.path().join("painted_case1.png").is_file());
        assert!(dir.path().join("original_painted_case1.png").is_file());
        assert!(dir.path().join("steps").join("cleaned_case1.png").is_file());

        let reloaded = load_image(&dir.path().join("enhanced_case1.png")).unwrap();
        assert_eq!(reloaded.dimensions(), (50, 40));
    }

    #[test]
    fn test_failed_write_leaves_no_files() {
        let dir = TempDir::new().unwrap();
        // A plain file where the steps directory should go
        std::fs::write(dir.path().join("steps"), b"").unwrap();

        let raw = GrayImage::from_fn(200, 160, |x, _| if x < 40 { Luma([0]) } else { Luma([140]) });
        let code: ChainCode = "120 80 2 2 4 4 6 6 0 0".parse().unwrap();
        let config = PreprocessConfig::default().with_target_size(50, 40);
        let output = MammogramPreprocessor::new(config)
            .unwrap()
            .preprocess(&raw, &code)
            .unwrap();

        assert!(write_outputs(dir.path(), "case2", &raw, &code, &output, true).is_err());
        assert!(!dir.path().join("enhanced_case2.png").exists());
        assert!(!dir.path().join("painted_case2.png").exists());
        assert!(!dir.path().join("original_painted_case2.png").exists());
    }

    #[test]
    fn test_load_missing_image() {
        let dir = TempDir::new().unwrap();
        assert!(load_image(&dir.path().join("none.png")).is_err());
    }
}
