//! Skin-tone analysis and color recommendations.
//!
//! The analysis runs in two stages:
//!
//! - the [`Preprocessor`] decodes an image and extracts a bounded set
//!   of [`PixelSample`]s from the region most likely to be skin;
//! - the [`Classifier`] clusters the samples and derives a
//!   [`SkinCategory`], an [`Undertone`] and a confidence score.
//!
//! The resulting [`SkinToneResult`] is then looked up in a
//! [`PaletteCatalog`] to obtain a [`RecommendationSet`].  The
//! [`Analyzer`] bundles the three steps.
//!
//! # Example
//!
//! ```
//! use skin_tone::{Analyzer, SkinCategory, Undertone};
//! let analyzer = Analyzer::standard();
//! let colors = analyzer.catalog()
//!     .recommend(SkinCategory::Medium, Undertone::Warm)?;
//! assert!(colors.recommended.iter().any(|s| s.name == "Terracotta"));
//! # Ok::<(), skin_tone::Error>(())
//! ```

use std::collections::BTreeMap;
use log::debug;
use serde::Serialize;

pub mod classify;
pub mod color;
pub mod config;
mod error;
pub mod guide;
mod palettes;
pub mod preprocess;

pub use classify::{Classifier, SkinToneResult};
pub use config::{AnalysisConfig, Bounds, ClassifyConfig, PreprocessConfig,
                 UploadPolicy};
pub use error::{Error, Result, Stage};
pub use palettes::{CatalogEntry, Palette, PaletteCatalog, RecommendationSet,
                   SkinCategory, Swatch, Undertone};
pub use preprocess::{PixelSample, Preprocessor, SampleSet};

/// Complete answer for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorReport {
    pub skin_tone: SkinToneResult,
    pub recommended_colors: Vec<Swatch>,
    pub avoid_colors: Vec<Swatch>,
    pub color_palettes: BTreeMap<&'static str, Vec<Swatch>>,
    pub styling_tips: Vec<&'static str>,
}

/// The analysis pipeline, from image bytes to recommendations.
///
/// An `Analyzer` holds no mutable state: share it between threads and
/// call it concurrently.
#[derive(Clone, Debug)]
pub struct Analyzer<'c> {
    preprocessor: Preprocessor,
    classifier: Classifier,
    catalog: &'c PaletteCatalog,
}

impl Analyzer<'static> {
    /// Analyzer with the default configuration and the built-in catalog.
    pub fn standard() -> Self {
        Analyzer {
            preprocessor: Preprocessor::default(),
            classifier: Classifier::default(),
            catalog: PaletteCatalog::standard(),
        }
    }
}

impl<'c> Analyzer<'c> {
    /// Return an analyzer using `config` and `catalog`, provided the
    /// configuration is valid.
    pub fn new(config: AnalysisConfig, catalog: &'c PaletteCatalog)
               -> Result<Self> {
        Ok(Analyzer {
            preprocessor: Preprocessor::new(config.preprocess)?,
            classifier: Classifier::new(config.classify)?,
            catalog,
        })
    }

    pub fn catalog(&self) -> &'c PaletteCatalog { self.catalog }

    /// Decode `bytes` and extract skin-color samples.
    pub fn process_image(&self, bytes: &[u8]) -> Result<SampleSet> {
        self.preprocessor.process(bytes)
    }

    /// Classify the samples returned by [`Analyzer::process_image`].
    pub fn analyze_skin_tone(&self, samples: &SampleSet) -> Result<SkinToneResult> {
        self.classifier.classify(samples)
    }

    /// Recommendations matching a classification.
    pub fn get_color_recommendations(&self, tone: &SkinToneResult)
                                     -> Result<RecommendationSet> {
        self.catalog.recommend(tone.category, tone.undertone)
    }

    /// Every palette of the catalog, by name.
    pub fn get_all_palettes(&self) -> BTreeMap<&'static str, Vec<Swatch>> {
        self.catalog.all_palettes()
    }

    /// Run the whole pipeline on an encoded image.
    pub fn analyze(&self, bytes: &[u8]) -> Result<ColorReport> {
        let samples = self.process_image(bytes)?;
        debug!("{} distinct samples (fallback: {})", samples.samples.len(),
               samples.fallback);
        let skin_tone = self.analyze_skin_tone(&samples)?;
        let r = self.get_color_recommendations(&skin_tone)?;
        Ok(ColorReport {
            skin_tone,
            recommended_colors: r.recommended,
            avoid_colors: r.avoid,
            color_palettes: r.palettes,
            styling_tips: r.tips,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.classify.fallback_penalty = 1.5;
        let r = Analyzer::new(config, PaletteCatalog::standard());
        assert!(matches!(r, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn catalog_gap_is_an_internal_error() {
        let catalog = PaletteCatalog::new();
        let analyzer = Analyzer::new(AnalysisConfig::default(), &catalog).unwrap();
        let tone = SkinToneResult {
            category: SkinCategory::Fair, undertone: Undertone::Neutral,
            dominant_colors: vec![], confidence: 1., fallback: false };
        let e = analyzer.get_color_recommendations(&tone).unwrap_err();
        assert!(!e.is_client_error());
        assert!(analyzer.get_all_palettes().is_empty());
    }

    #[test]
    fn analyzer_is_shareable() {
        fn assert_sync<T: Send + Sync>(_: &T) {}
        assert_sync(&Analyzer::standard());
    }
}
