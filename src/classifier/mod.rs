//! Glyph classification.
//!
//! [`Classifier`] is the seam between region extraction and recognition: any
//! type that maps a glyph crop to a label can be plugged into
//! [`CardDetector::recognize`](crate::detector::CardDetector::recognize).
//! The bundled implementations are nearest-neighbour lookups over a
//! [`KnnModel`]; rank bitmaps are 30×40 and suit bitmaps 30×30.

mod knn;

pub use knn::{glyph_features, KnnModel};

use crate::error::CardError;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Maps a glyph crop to a label. `None` means "no confident answer".
pub trait Classifier: Send + Sync {
    type Label;

    fn classify(&self, image: &RgbImage) -> Option<Self::Label>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    const ORDER: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Decodes a model class index: 1 is the ace, 11..=13 the faces.
    pub fn from_class_index(index: u32) -> Option<Self> {
        let i = usize::try_from(index).ok()?.checked_sub(1)?;
        Self::ORDER.get(i).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub fn from_class_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Clubs),
            4 => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        };
        f.write_str(name)
    }
}

/// Rank recognizer over 30×40 bitmaps.
#[derive(Clone, Debug)]
pub struct RankClassifier {
    model: KnnModel,
}

impl RankClassifier {
    pub const WIDTH: u32 = 30;
    pub const HEIGHT: u32 = 40;

    pub fn new(model: KnnModel) -> Result<Self, CardError> {
        model.validate().map_err(CardError::Model)?;
        Ok(Self { model })
    }

    pub fn load(path: &Path) -> Result<Self, CardError> {
        Self::new(KnnModel::load(path)?)
    }

    pub fn model(&self) -> &KnnModel {
        &self.model
    }
}

impl Classifier for RankClassifier {
    type Label = Rank;

    fn classify(&self, image: &RgbImage) -> Option<Rank> {
        self.model
            .classify_image(image)
            .and_then(Rank::from_class_index)
    }
}

/// Suit recognizer over 30×30 bitmaps.
#[derive(Clone, Debug)]
pub struct SuitClassifier {
    model: KnnModel,
}

impl SuitClassifier {
    pub const WIDTH: u32 = 30;
    pub const HEIGHT: u32 = 30;

    pub fn new(model: KnnModel) -> Result<Self, CardError> {
        model.validate().map_err(CardError::Model)?;
        Ok(Self { model })
    }

    pub fn load(path: &Path) -> Result<Self, CardError> {
        Self::new(KnnModel::load(path)?)
    }

    pub fn model(&self) -> &KnnModel {
        &self.model
    }
}

impl Classifier for SuitClassifier {
    type Label = Suit;

    fn classify(&self, image: &RgbImage) -> Option<Suit> {
        self.model
            .classify_image(image)
            .and_then(Suit::from_class_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn rank_labels_decode() {
        assert_eq!(Rank::from_class_index(1), Some(Rank::Ace));
        assert_eq!(Rank::from_class_index(7).map(|r| r.to_string()), Some("7".into()));
        assert_eq!(Rank::from_class_index(10).map(|r| r.to_string()), Some("10".into()));
        assert_eq!(Rank::from_class_index(11), Some(Rank::Jack));
        assert_eq!(Rank::from_class_index(12), Some(Rank::Queen));
        assert_eq!(Rank::from_class_index(13), Some(Rank::King));
        assert_eq!(Rank::from_class_index(0), None);
        assert_eq!(Rank::from_class_index(14), None);
        assert_eq!(serde_json::to_string(&Rank::Queen).unwrap(), "\"Q\"");
    }

    #[test]
    fn suit_labels_decode() {
        assert_eq!(Suit::from_class_index(1), Some(Suit::Hearts));
        assert_eq!(Suit::from_class_index(2), Some(Suit::Diamonds));
        assert_eq!(Suit::from_class_index(3), Some(Suit::Clubs));
        assert_eq!(Suit::from_class_index(4), Some(Suit::Spades));
        assert_eq!(Suit::from_class_index(5), None);
        assert_eq!(Suit::Spades.to_string(), "spades");
    }

    fn bar(vertical: bool) -> RgbImage {
        RgbImage::from_fn(30, 40, |x, y| {
            let ink = if vertical {
                (12..18).contains(&x)
            } else {
                (17..23).contains(&y)
            };
            if ink {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn rank_classifier_matches_reference_bitmaps() {
        let w = RankClassifier::WIDTH;
        let h = RankClassifier::HEIGHT;
        let model = KnnModel {
            width: w,
            height: h,
            k: 1,
            samples: vec![
                glyph_features(&bar(true), w, h).unwrap(),
                glyph_features(&bar(false), w, h).unwrap(),
            ],
            labels: vec![1, 11],
        };
        let classifier = RankClassifier::new(model).unwrap();
        assert_eq!(classifier.classify(&bar(true)), Some(Rank::Ace));
        assert_eq!(classifier.classify(&bar(false)), Some(Rank::Jack));
        assert_eq!(classifier.classify(&RgbImage::new(0, 0)), None);
    }

    #[test]
    fn unknown_class_index_is_no_answer() {
        let model = KnnModel {
            width: 30,
            height: 30,
            k: 1,
            samples: vec![vec![0.0; 900]],
            labels: vec![9],
        };
        let classifier = SuitClassifier::new(model).unwrap();
        assert_eq!(classifier.classify(&bar(true)), None);
    }

    #[test]
    fn invalid_model_is_rejected() {
        let model = KnnModel {
            width: 30,
            height: 30,
            k: 1,
            samples: vec![],
            labels: vec![],
        };
        assert!(matches!(
            SuitClassifier::new(model),
            Err(CardError::Model(_))
        ));
    }
}
