use std::collections::BTreeMap;
use std::fmt;
use rgb::RGB8;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::color::css_string;

/// Skin-tone category, ordered from lightest to darkest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
         Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinCategory {
    Fair,
    Light,
    Medium,
    Dark,
}

impl SkinCategory {
    pub const ALL: [SkinCategory; 4] = [SkinCategory::Fair, SkinCategory::Light,
                                        SkinCategory::Medium, SkinCategory::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            SkinCategory::Fair => "fair",
            SkinCategory::Light => "light",
            SkinCategory::Medium => "medium",
            SkinCategory::Dark => "dark",
        }
    }
}

/// The hue bias of the skin, independent of its lightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
         Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    /// Pink, red or blue bias.
    Cool,
    /// Yellow, golden or peach bias.
    Warm,
    Neutral,
}

impl Undertone {
    pub const ALL: [Undertone; 3] = [Undertone::Cool, Undertone::Warm,
                                     Undertone::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Undertone::Cool => "cool",
            Undertone::Warm => "warm",
            Undertone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SkinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub rgb: RGB8,
}

impl Swatch {
    /// Swatch of the color `0xRRGGBB`.
    pub const fn new(name: &'static str, hex: u32) -> Self {
        let rgb = RGB8 { r: (hex >> 16) as u8, g: (hex >> 8) as u8, b: hex as u8 };
        Swatch { name, rgb }
    }

    pub fn css(&self) -> String { css_string(self.rgb) }
}

impl Serialize for Swatch {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("Swatch", 2)?;
        st.serialize_field("name", self.name)?;
        st.serialize_field("hex", &self.css())?;
        st.end()
    }
}

/// A named, curated set of colors.
#[derive(Debug)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [Swatch], // Invariant: non-empty
}

/// Catalog data for one (category, undertone) pair.
#[derive(Debug)]
pub struct CatalogEntry {
    pub recommended: &'static [Swatch],
    pub avoid: &'static [Swatch],
    pub palettes: &'static [&'static Palette],
    pub tips: &'static [&'static str],
}

/// Colors to wear, colors to avoid, palettes and styling tips.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub recommended: Vec<Swatch>,
    pub avoid: Vec<Swatch>,
    pub palettes: BTreeMap<&'static str, Vec<Swatch>>,
    pub tips: Vec<&'static str>,
}

impl From<&CatalogEntry> for RecommendationSet {
    fn from(e: &CatalogEntry) -> Self {
        RecommendationSet {
            recommended: e.recommended.to_vec(),
            avoid: e.avoid.to_vec(),
            palettes: e.palettes.iter().map(|p| (p.name, p.colors.to_vec()))
                .collect(),
            tips: e.tips.to_vec(),
        }
    }
}
