use std::collections::HashMap;
use std::fs;
use std::path::Path;

use image::DynamicImage;
use serde::Deserialize;

use super::classifier::{ClassificationResult, ClassifyError, ImageClassifier, mean_rgb};

#[derive(Debug, Deserialize)]
struct PaletteEntry {
    label: String,
    rgb: [u8; 3],
}

/// Built-in color-prototype model: the palette file maps each label to
/// a prototype RGB, and inference picks the prototype nearest the mean
/// color of the input. Stands in for the bundled black-box model;
/// anything implementing [`ImageClassifier`] can replace it.
#[derive(Debug)]
pub struct PaletteClassifier {
    entries: Vec<PaletteEntry>,
}

impl PaletteClassifier {
    /// Load the palette model file. Any failure here is a fatal
    /// startup error for the game.
    pub fn load(path: &Path) -> Result<Self, ClassifyError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            ClassifyError::ModelUnavailable(format!("{}: {err}", path.display()))
        })?;
        let entries: Vec<PaletteEntry> = serde_json::from_str(&raw).map_err(|err| {
            ClassifyError::ModelUnavailable(format!("{}: {err}", path.display()))
        })?;
        if entries.is_empty() {
            return Err(ClassifyError::ModelUnavailable(format!(
                "{}: palette has no entries",
                path.display()
            )));
        }
        Ok(Self { entries })
    }
}

impl ImageClassifier for PaletteClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError> {
        let mean = mean_rgb(image);

        let weights: Vec<(f64, &str)> = self
            .entries
            .iter()
            .map(|entry| {
                let d = entry
                    .rgb
                    .iter()
                    .zip(mean.iter())
                    .map(|(p, m)| (f64::from(*p) - m).powi(2))
                    .sum::<f64>()
                    .sqrt();
                (1.0 / (1.0 + d), entry.label.as_str())
            })
            .collect();

        let total: f64 = weights.iter().map(|(w, _)| w).sum();
        let (_, best) = weights
            .iter()
            .copied()
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .ok_or_else(|| ClassifyError::Inference("empty palette".into()))?;

        let confidences: HashMap<String, f64> = weights
            .iter()
            .map(|(w, label)| ((*label).to_string(), *w / total))
            .collect();

        Ok(ClassificationResult {
            label: best.to_string(),
            confidences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Write;

    fn palette_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_model_file_is_unavailable() {
        let err = PaletteClassifier::load(Path::new("/nonexistent/palette.json")).unwrap_err();
        assert!(matches!(err, ClassifyError::ModelUnavailable(_)));
    }

    #[test]
    fn empty_palette_is_unavailable() {
        let file = palette_file("[]");
        let err = PaletteClassifier::load(file.path()).unwrap_err();
        assert!(matches!(err, ClassifyError::ModelUnavailable(_)));
    }

    #[test]
    fn picks_the_nearest_prototype() {
        let file = palette_file(
            r#"[
                {"label": "general", "rgb": [128, 128, 128]},
                {"label": "organic", "rgb": [80, 140, 60]}
            ]"#,
        );
        let model = PaletteClassifier::load(file.path()).unwrap();

        let gray = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([128, 128, 128])));
        let result = model.classify(&gray).unwrap();
        assert_eq!(result.label, "general");
        assert!(result.confidences["general"] > result.confidences["organic"]);

        let green = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([70, 150, 50])));
        assert_eq!(model.classify(&green).unwrap().label, "organic");
    }
}
