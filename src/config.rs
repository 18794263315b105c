//! Tunable constants of the analysis.
//!
//! Nothing is read from the environment: build an [`AnalysisConfig`]
//! (usually from [`Default`]) and hand it to [`crate::Analyzer::new`].
//! Every field has a default, so a configuration file only needs to
//! list what it overrides.

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self { Bounds { min, max } }

    #[inline]
    pub fn contains(&self, x: f64) -> bool { self.min <= x && x <= self.max }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preprocess: PreprocessConfig,
    pub classify: ClassifyConfig,
}

/// Parameters of the image preprocessor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Longest edge of the working image; larger images are
    /// downscaled (aspect ratio preserved).
    pub max_dimension: u32,
    /// Upper bound on the number of pixels handed to the classifier.
    pub max_samples: usize,
    /// Below this fraction of skin-like pixels, the whole image is
    /// sampled instead.
    pub min_skin_fraction: f64,
    /// Skin range of the blue-difference chroma Cb.
    pub skin_cb: Bounds,
    /// Skin range of the red-difference chroma Cr.
    pub skin_cr: Bounds,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        PreprocessConfig {
            max_dimension: 512,
            max_samples: 4096,
            min_skin_fraction: 0.01,
            skin_cb: Bounds::new(77., 127.),
            skin_cr: Bounds::new(133., 173.),
        }
    }
}

/// Parameters of the tone classifier.
///
/// Lightness thresholds are CIE L* values, hues are L\*a\*b\* hue
/// angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Number of clusters (at most 5).
    pub clusters: usize,
    pub max_iterations: usize,
    /// Stop iterating once no centroid moves more than this (ΔE).
    pub convergence: f64,
    pub fair_min_lightness: f64,
    pub light_min_lightness: f64,
    pub medium_min_lightness: f64,
    /// Hue angle separating cool (below) from warm (above) undertones.
    pub warm_hue: f64,
    /// Half-width of the neutral band around `warm_hue`.
    pub neutral_band: f64,
    /// Colors less saturated than this have a neutral undertone.
    pub neutral_chroma: f64,
    /// Factor applied to the confidence when the whole image had to
    /// be sampled.
    pub fallback_penalty: f64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            clusters: 5,
            max_iterations: 20,
            convergence: 0.5,
            fair_min_lightness: 92.,
            light_min_lightness: 72.,
            medium_min_lightness: 50.,
            warm_hue: 55.,
            neutral_band: 5.,
            neutral_chroma: 4.,
            fallback_penalty: 0.6,
        }
    }
}

fn invalid(msg: impl Into<String>) -> Error { Error::InvalidConfig(msg.into()) }

impl AnalysisConfig {
    /// Check the invariants the preprocessor and classifier rely on.
    pub fn validate(&self) -> Result<()> {
        self.preprocess.validate()?;
        self.classify.validate()
    }
}

impl PreprocessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 { return Err(invalid("max_dimension is 0")) }
        if self.max_samples == 0 { return Err(invalid("max_samples is 0")) }
        if !(0. ..=1.).contains(&self.min_skin_fraction) {
            return Err(invalid("min_skin_fraction must be in [0, 1]"))
        }
        if self.skin_cb.min > self.skin_cb.max || self.skin_cr.min > self.skin_cr.max {
            return Err(invalid("empty skin chroma range"))
        }
        Ok(())
    }
}

impl ClassifyConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.clusters) {
            return Err(invalid(format!("clusters = {} not in 1..=5", self.clusters)))
        }
        if self.max_iterations == 0 { return Err(invalid("max_iterations is 0")) }
        if !(self.fair_min_lightness > self.light_min_lightness
             && self.light_min_lightness > self.medium_min_lightness) {
            return Err(invalid("lightness bands must be strictly decreasing"))
        }
        if self.neutral_band < 0. || self.neutral_chroma < 0. {
            return Err(invalid("neutral band and chroma must be non-negative"))
        }
        if !(0. ..=1.).contains(&self.fallback_penalty) {
            return Err(invalid("fallback_penalty must be in [0, 1]"))
        }
        Ok(())
    }
}

/// Limits applied to uploaded images before analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        UploadPolicy {
            max_bytes: 10 * 1024 * 1024,
            allowed_types: ["image/jpeg", "image/png", "image/webp"]
                .iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    /// Reject uploads with a media type not allowed or too many bytes.
    pub fn check(&self, content_type: &str, len: usize) -> Result<()> {
        if !self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(content_type)) {
            return Err(Error::UnsupportedMediaType(content_type.to_string()))
        }
        if len > self.max_bytes {
            return Err(Error::TooLarge { size: len, limit: self.max_bytes })
        }
        Ok(())
    }
}

/// Media type corresponding to the extension of `path`, if it is one
/// of the supported image formats.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
