//! Glyph region extraction on the rectified card.
//!
//! The rank ("num") and suit ("flag") glyphs sit in the upper part of a
//! canonical card. Extraction keeps the top two thirds, binarises with an
//! inverse Otsu threshold so ink becomes foreground, traces the outermost
//! contours and drops specks below an area floor. The survivor with the
//! smallest top edge is the rank glyph; the first survivor in reading order
//! whose area exceeds it is the suit glyph.
//!
//! A missing role is reported by its absence from the [`RegionMap`], not as
//! an error.

mod contour;
mod order;
mod rect;

pub use contour::{binarize, external_contours, otsu_inverse, ContourInfo};
pub use order::sort_reading_order;
pub use rect::{crop_rect, crop_with_margin, keep_top_fraction, Rect};

use crate::error::CardError;
use image::RgbImage;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a glyph region on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Rank glyph (A, 2..10, J, Q, K).
    Num,
    /// Suit glyph.
    Flag,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Num, Role::Flag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Num => "num",
            Role::Flag => "flag",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Located glyph rectangles, at most one per role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Rect>,
}

impl RegionMap {
    pub fn get(&self, role: Role) -> Option<Rect> {
        match role {
            Role::Num => self.num,
            Role::Flag => self.flag,
        }
    }

    /// Like [`RegionMap::get`] but a missing role is an error.
    pub fn require(&self, role: Role) -> Result<Rect, CardError> {
        self.get(role).ok_or(CardError::RegionNotFound(role))
    }

    pub fn insert(&mut self, role: Role, rect: Rect) {
        match role {
            Role::Num => self.num = Some(rect),
            Role::Flag => self.flag = Some(rect),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.num.is_none() && self.flag.is_none()
    }

    /// Present entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Rect)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(move |role| self.get(role).map(|r| (role, r)))
    }

    fn translated(&self, dx: u32, dy: u32) -> Self {
        Self {
            num: self.num.map(|r| r.translated(dx, dy)),
            flag: self.flag.map(|r| r.translated(dx, dy)),
        }
    }
}

/// Region extraction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    /// Fraction of the card height (from the top) searched for glyphs.
    pub keep_fraction: f64,
    /// Contours with a smaller area (px²) are ignored.
    pub min_area: f64,
    /// Row tolerance of the reading-order sort, relative to row height.
    pub row_tol_ratio: f64,
    /// Pixels trimmed from every card border before the search. Returned
    /// rectangles stay in card coordinates.
    pub card_margin: u32,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            keep_fraction: 2.0 / 3.0,
            min_area: 500.0,
            row_tol_ratio: 0.5,
            card_margin: 0,
        }
    }
}

/// Locates the rank and suit glyphs on a rectified card.
pub fn extract_regions(card: &RgbImage, params: &RegionParams) -> RegionMap {
    let m = params.card_margin;
    if m == 0 {
        return extract_from(card, params);
    }
    let inner = crop_with_margin(card, m, m, m, m);
    if inner.width() == 0 || inner.height() == 0 {
        debug!("regions::extract margin {m} leaves no card area");
        return RegionMap::default();
    }
    extract_from(&inner, params).translated(m, m)
}

/// Contours that pass the area floor, in tracing order.
pub fn glyph_candidates(card: &RgbImage, params: &RegionParams) -> Vec<ContourInfo> {
    let top = keep_top_fraction(card, params.keep_fraction);
    if top.width() == 0 || top.height() == 0 {
        return Vec::new();
    }
    let contours = external_contours(&binarize(&top));
    let total = contours.len();
    let kept: Vec<ContourInfo> = contours
        .into_iter()
        .filter(|c| c.area >= params.min_area)
        .collect();
    debug!(
        "regions::candidates kept {} of {} external contours (min_area={})",
        kept.len(),
        total,
        params.min_area
    );
    kept
}

fn extract_from(card: &RgbImage, params: &RegionParams) -> RegionMap {
    let candidates = glyph_candidates(card, params);
    let mut map = RegionMap::default();

    let mut num: Option<&ContourInfo> = None;
    for c in &candidates {
        if num.map_or(true, |n| c.rect.y < n.rect.y) {
            num = Some(c);
        }
    }
    let Some(num) = num else {
        return map;
    };
    map.insert(Role::Num, num.rect);

    let rects: Vec<Rect> = candidates.iter().map(|c| c.rect).collect();
    let flag = sort_reading_order(&rects, params.row_tol_ratio)
        .into_iter()
        .map(|i| &candidates[i])
        .find(|c| c.area > num.area);
    if let Some(flag) = flag {
        map.insert(Role::Flag, flag.rect);
    }
    map
}
