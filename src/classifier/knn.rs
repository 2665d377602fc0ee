//! k-nearest-neighbour model over binarised glyph bitmaps.
//!
//! A model is a set of labelled feature vectors plus the bitmap size they
//! were sampled at. Features are produced by [`glyph_features`]: grayscale,
//! inverse Otsu threshold, resize to `width × height`, row-major values in
//! `0..=255`.

use crate::error::CardError;
use crate::regions::binarize;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_k() -> usize {
    5
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnnModel {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_k")]
    pub k: usize,
    pub samples: Vec<Vec<f32>>,
    pub labels: Vec<u32>,
}

impl KnnModel {
    /// Reads and validates a JSON model file.
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let text = fs::read_to_string(path)
            .map_err(|e| CardError::Model(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&text)
            .map_err(|e| CardError::Model(format!("{}: {e}", path.display())))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let model: KnnModel =
            serde_json::from_str(text).map_err(|e| format!("invalid model JSON: {e}"))?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), String> {
        let dim = self.feature_len();
        if dim == 0 {
            return Err(format!("empty feature size {}x{}", self.width, self.height));
        }
        if self.k == 0 {
            return Err("k must be at least 1".into());
        }
        if self.samples.is_empty() {
            return Err("model has no samples".into());
        }
        if self.samples.len() != self.labels.len() {
            return Err(format!(
                "{} samples but {} labels",
                self.samples.len(),
                self.labels.len()
            ));
        }
        if let Some((i, s)) = self.samples.iter().enumerate().find(|(_, s)| s.len() != dim) {
            return Err(format!("sample {i} has {} values, expected {dim}", s.len()));
        }
        Ok(())
    }

    pub fn feature_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Class index voted by the `k` nearest samples.
    ///
    /// Distances are squared Euclidean. A vote tie goes to the label whose
    /// nearest sample is closest. `None` if the feature length does not
    /// match or the model is empty.
    pub fn predict(&self, features: &[f32]) -> Option<u32> {
        if features.len() != self.feature_len() || self.samples.is_empty() {
            return None;
        }
        let mut dists: Vec<(f32, u32)> = self
            .samples
            .iter()
            .zip(self.labels.iter())
            .map(|(s, &label)| (squared_distance(s, features), label))
            .collect();
        dists.sort_by(|a, b| a.0.total_cmp(&b.0));
        dists.truncate(self.k.max(1));

        // (label, votes, rank of nearest member)
        let mut tally: Vec<(u32, usize, usize)> = Vec::new();
        for (rank, &(_, label)) in dists.iter().enumerate() {
            match tally.iter_mut().find(|t| t.0 == label) {
                Some(t) => t.1 += 1,
                None => tally.push((label, 1, rank)),
            }
        }
        tally
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
            .map(|t| t.0)
    }

    /// Extracts features for this model's bitmap size and predicts.
    pub fn classify_image(&self, image: &RgbImage) -> Option<u32> {
        let features = glyph_features(image, self.width, self.height)?;
        self.predict(&features)
    }
}

/// Binarised, resized glyph bitmap as a row-major feature vector.
/// `None` for an empty image or target size.
pub fn glyph_features(image: &RgbImage, width: u32, height: u32) -> Option<Vec<f32>> {
    if image.width() == 0 || image.height() == 0 || width == 0 || height == 0 {
        return None;
    }
    let binary = binarize(image);
    let resized = imageops::resize(&binary, width, height, FilterType::Triangle);
    Some(resized.as_raw().iter().map(|&v| f32::from(v)).collect())
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(k: usize, samples: Vec<Vec<f32>>, labels: Vec<u32>) -> KnnModel {
        KnnModel {
            width: 2,
            height: 1,
            k,
            samples,
            labels,
        }
    }

    #[test]
    fn nearest_sample_wins_with_k1() {
        let m = model(1, vec![vec![0.0, 0.0], vec![10.0, 10.0]], vec![3, 7]);
        assert_eq!(m.predict(&[1.0, 2.0]), Some(3));
        assert_eq!(m.predict(&[9.0, 8.0]), Some(7));
    }

    #[test]
    fn majority_vote_over_k_neighbours() {
        let m = model(
            3,
            vec![vec![0.0, 0.0], vec![5.0, 0.0], vec![6.0, 0.0], vec![50.0, 0.0]],
            vec![1, 2, 2, 1],
        );
        // Nearest is label 1 but labels 2 hold two of three votes.
        assert_eq!(m.predict(&[1.0, 0.0]), Some(2));
    }

    #[test]
    fn vote_tie_goes_to_closest_label() {
        let m = model(
            4,
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0], vec![4.0, 0.0]],
            vec![9, 4, 4, 9],
        );
        assert_eq!(m.predict(&[0.4, 0.0]), Some(9));
        assert_eq!(m.predict(&[1.2, 0.0]), Some(4));
    }

    #[test]
    fn wrong_feature_length_is_rejected() {
        let m = model(1, vec![vec![0.0, 0.0]], vec![1]);
        assert_eq!(m.predict(&[0.0]), None);
    }

    #[test]
    fn json_validation() {
        let ok = r#"{"width":2,"height":1,"samples":[[0,0],[1,1]],"labels":[1,2]}"#;
        let m = KnnModel::from_json(ok).unwrap();
        assert_eq!(m.k, 5);

        let mismatch = r#"{"width":2,"height":1,"samples":[[0,0]],"labels":[1,2]}"#;
        assert!(KnnModel::from_json(mismatch).is_err());
        let bad_dim = r#"{"width":3,"height":1,"samples":[[0,0]],"labels":[1]}"#;
        assert!(KnnModel::from_json(bad_dim).unwrap_err().contains("expected 3"));
        assert!(KnnModel::from_json("{").is_err());
    }

    #[test]
    fn missing_model_file_is_a_model_error() {
        let err = KnnModel::load(Path::new("/nonexistent/rank_model.json")).unwrap_err();
        assert!(matches!(err, CardError::Model(_)));
    }

    #[test]
    fn features_have_model_size() {
        let img = RgbImage::from_fn(17, 23, |x, _| {
            if x < 8 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        let f = glyph_features(&img, 30, 40).unwrap();
        assert_eq!(f.len(), 1200);
        // Ink on the left becomes foreground.
        assert_eq!(f[0], 255.0);
        assert_eq!(f[29], 0.0);
        assert!(glyph_features(&RgbImage::new(0, 0), 30, 40).is_none());
    }
}
