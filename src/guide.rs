//! Reference descriptions of skin-tone categories and undertones.

use std::collections::BTreeMap;
use serde::Serialize;

use crate::palettes::{SkinCategory, Undertone};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryGuide {
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UndertoneGuide {
    pub description: &'static str,
    pub best_colors: &'static [&'static str],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Guide {
    pub skin_tone_categories: BTreeMap<SkinCategory, CategoryGuide>,
    pub undertone_types: BTreeMap<Undertone, UndertoneGuide>,
}

impl SkinCategory {
    pub fn guide(self) -> CategoryGuide {
        use SkinCategory::*;
        match self {
            Fair => CategoryGuide {
                description: "Light skin with pink, red, or blue undertones",
                characteristics: &["Burns easily", "May have freckles",
                                   "Visible veins appear blue/purple"] },
            Light => CategoryGuide {
                description: "Light to medium skin with various undertones",
                characteristics: &["Burns moderately", "Tans gradually",
                                   "Mixed vein colors"] },
            Medium => CategoryGuide {
                description: "Medium skin with warm or cool undertones",
                characteristics: &["Tans well", "Rarely burns",
                                   "Olive or golden tones"] },
            Dark => CategoryGuide {
                description: "Deep skin with rich undertones",
                characteristics: &["Rarely burns", "Rich pigmentation",
                                   "Golden, red, or blue undertones"] },
        }
    }
}

impl Undertone {
    pub fn guide(self) -> UndertoneGuide {
        use Undertone::*;
        match self {
            Cool => UndertoneGuide {
                description: "Pink, red, or blue undertones",
                best_colors: &["Blues", "Purples", "Emerald greens", "True reds"] },
            Warm => UndertoneGuide {
                description: "Yellow, golden, or peachy undertones",
                best_colors: &["Oranges", "Yellows", "Warm reds", "Earth tones"] },
            Neutral => UndertoneGuide {
                description: "Balanced mix of warm and cool undertones",
                best_colors: &["Most colors work well",
                               "Focus on saturation and brightness"] },
        }
    }
}

/// The guide for all categories and undertones.
pub fn guide() -> Guide {
    Guide {
        skin_tone_categories: SkinCategory::ALL.iter().map(|&c| (c, c.guide()))
            .collect(),
        undertone_types: Undertone::ALL.iter().map(|&u| (u, u.guide())).collect(),
    }
}
