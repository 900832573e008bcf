use crate::api::PreprocessSummary;
use std::fmt;

/// Text report formatter for a preprocessing run
pub struct TextReport<'a> {
    summary: &'a PreprocessSummary,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(summary: &'a PreprocessSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Mammogram Preprocessing")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Output Size:    {}", s.output_size)?;
        writeln!(f, "Bounding Box:   {}", s.bounding_box)?;
        writeln!(f)?;

        writeln!(f, "Geometry")?;
        writeln!(f, "--------")?;
        writeln!(f, "Crop Blank Side: {}", s.crop.blank_side)?;
        writeln!(
            f,
            "Crop Margins:   left {} right {} top {} bottom {}",
            s.crop.left, s.crop.right, s.crop.top, s.crop.bottom
        )?;
        writeln!(f, "Enhanced Size:  {}", s.enhanced_size)?;
        writeln!(f, "Blank Side:     {}", s.blank_side)?;
        writeln!(f, "Breast Side:    {}", s.blank_side.opposite())?;
        writeln!(f, "Orientation:    {}", s.decision)?;
        writeln!(f, "Anchor:         {}", s.anchor)?;
        writeln!(f, "Steps:          {}", s.steps)?;
        writeln!(f, "Extent:         {}", s.extent)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MammogramPreprocessor;
    use crate::types::{ChainCode, PreprocessConfig};
    use image::{GrayImage, Luma};

    #[test]
    fn test_text_report_format() {
        let raw = GrayImage::from_fn(200, 160, |x, _| if x < 40 { Luma([0]) } else { Luma([140]) });
        let code: ChainCode = "120 80 2 2 4".parse().unwrap();
        let config = PreprocessConfig::default().with_target_size(50, 40);
        let output = MammogramPreprocessor::new(config)
            .unwrap()
            .preprocess(&raw, &code)
            .unwrap();
        let summary = output.summary();

        let report = TextReport::new(&summary);
        let text = format!("{}", report);

        assert!(text.contains("Mammogram Preprocessing"));
        assert!(text.contains("Output Size:    50x40"));
        assert!(text.contains("Crop Blank Side: left"));
        assert!(text.contains("Enhanced Size:  177x148"));
        assert!(text.contains("Steps:          3"));
        let breast = format!("Breast Side:    {}", summary.blank_side.opposite());
        assert!(text.contains(&breast));
        assert!(text.contains(&format!("Bounding Box:   {}", summary.bounding_box)));
    }
}
