//! Skin-tone classification of color samples.

use std::cmp::Reverse;
use log::debug;
use rgb::RGB8;
use serde::Serialize;

use crate::color::{serialize_css_seq, Lab};
use crate::config::ClassifyConfig;
use crate::error::{Error, Result};
use crate::palettes::{SkinCategory, Undertone};
use crate::preprocess::{PixelSample, SampleSet};

/// Outcome of the classification of one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkinToneResult {
    pub category: SkinCategory,
    pub undertone: Undertone,
    /// Cluster centroids, most prevalent first (at most 5).
    #[serde(serialize_with = "serialize_css_seq")]
    pub dominant_colors: Vec<RGB8>,
    /// Agreement of the samples with the classification, in \[0, 1\].
    pub confidence: f64,
    /// Whether the skin could not be located and the whole image was
    /// used.
    pub fallback: bool,
}

/// A group of samples with similar colors.
#[derive(Clone, Debug)]
struct Cluster {
    lab: Lab,
    rgb: RGB8,
    weight: u64,
}

#[derive(Clone, Debug)]
pub struct Classifier {
    config: ClassifyConfig,
}

impl Default for Classifier {
    fn default() -> Self { Classifier { config: ClassifyConfig::default() } }
}

impl Classifier {
    /// Return a classifier using `config`, provided it is valid.
    pub fn new(config: ClassifyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Classifier { config })
    }

    /// Classify the samples produced by the preprocessor.
    pub fn classify(&self, set: &SampleSet) -> Result<SkinToneResult> {
        self.classify_samples(&set.samples, set.fallback)
    }

    /// Classify `samples`.  `fallback` says whether they come from the
    /// whole image rather than a detected skin region.
    pub fn classify_samples(&self, samples: &[PixelSample], fallback: bool)
                            -> Result<SkinToneResult> {
        let samples: Vec<PixelSample> = samples.iter().copied()
            .filter(|s| s.weight > 0).collect();
        if samples.is_empty() {
            return Err(Error::InsufficientData)
        }
        let labs: Vec<Lab> = samples.iter().map(|s| Lab::from_rgb(s.rgb)).collect();
        let centroids = self.kmeans(&samples, &labs);
        let assignment = assign(&labs, &centroids);
        let clusters = summarize(&samples, &labs, &assignment, centroids.len());

        // `summarize` drops no cluster, so indices match `assignment`.
        let dominant = (0 .. clusters.len())
            .min_by_key(|&i| Reverse(clusters[i].weight))
            .ok_or(Error::InsufficientData)?;
        let category = self.category(&clusters[dominant].lab);
        let undertone = self.undertone(&clusters[dominant].lab);

        let total: u64 = clusters.iter().map(|c| c.weight).sum();
        let mut same_category = 0;
        let mut same_undertone = 0;
        for c in &clusters {
            if self.category(&c.lab) == category { same_category += c.weight }
            if self.undertone(&c.lab) == undertone { same_undertone += c.weight }
        }
        let mut confidence = (same_category + same_undertone) as f64
            / (2 * total) as f64;
        if fallback { confidence *= self.config.fallback_penalty }
        let confidence = confidence.clamp(0., 1.);

        let mut ranked: Vec<&Cluster> = clusters.iter()
            .filter(|c| c.weight > 0).collect();
        ranked.sort_by_key(|c| Reverse(c.weight));
        let dominant_colors = ranked.iter().take(5).map(|c| c.rgb).collect();
        debug!("{} clusters; L* = {:.1}, h = {:.1}°: {category}/{undertone} \
                ({confidence:.2})", ranked.len(), clusters[dominant].lab.l,
               clusters[dominant].lab.hue_degrees());
        Ok(SkinToneResult { category, undertone, dominant_colors,
                            confidence, fallback })
    }

    /// Lightness band of a color.
    pub fn category(&self, c: &Lab) -> SkinCategory {
        let cfg = &self.config;
        if c.l >= cfg.fair_min_lightness { SkinCategory::Fair }
        else if c.l >= cfg.light_min_lightness { SkinCategory::Light }
        else if c.l >= cfg.medium_min_lightness { SkinCategory::Medium }
        else { SkinCategory::Dark }
    }

    /// Undertone of a color, from its hue angle.  Hues within
    /// `neutral_band` of `warm_hue`, and nearly gray colors, are neutral.
    pub fn undertone(&self, c: &Lab) -> Undertone {
        let cfg = &self.config;
        if c.chroma() < cfg.neutral_chroma { return Undertone::Neutral }
        let h = c.hue_degrees();
        if h > cfg.warm_hue + cfg.neutral_band { Undertone::Warm }
        else if h < cfg.warm_hue - cfg.neutral_band { Undertone::Cool }
        else { Undertone::Neutral }
    }

    /// Weighted k-means.  Initial centroids are the heaviest sample
    /// followed by farthest-first picks, so the result only depends on
    /// the samples.
    fn kmeans(&self, samples: &[PixelSample], labs: &[Lab]) -> Vec<Lab> {
        let k = self.config.clusters.min(samples.len()).max(1);
        let first = (0 .. samples.len())
            .min_by_key(|&i| Reverse(samples[i].weight))
            .unwrap_or(0);
        let mut centroids = vec![labs[first]];
        while centroids.len() < k {
            let mut best = (0f64, 0);
            for (i, lab) in labs.iter().enumerate() {
                let d = nearest(lab, &centroids).1;
                if d > best.0 { best = (d, i) }
            }
            if best.0 == 0. { break } // Fewer distinct colors than `k`.
            centroids.push(labs[best.1]);
        }

        let threshold = self.config.convergence * self.config.convergence;
        for _ in 0 .. self.config.max_iterations {
            let assignment = assign(labs, &centroids);
            let mut sums = vec![(0f64, 0f64, 0f64, 0f64); centroids.len()];
            for ((s, lab), &j) in samples.iter().zip(labs).zip(&assignment) {
                let w = s.weight as f64;
                let (l, a, b, total) = &mut sums[j];
                *l += w * lab.l;
                *a += w * lab.a;
                *b += w * lab.b;
                *total += w;
            }
            let mut shift: f64 = 0.;
            let updated: Vec<Lab> = centroids.iter().zip(&sums)
                .filter(|(_, s)| s.3 > 0.)
                .map(|(old, &(l, a, b, w))| {
                    let new = Lab { l: l / w, a: a / w, b: b / w };
                    shift = shift.max(old.distance2(&new));
                    new
                })
                .collect();
            let dropped = updated.len() != centroids.len();
            centroids = updated;
            if !dropped && shift <= threshold { break }
        }
        centroids
    }
}

/// Index of the centroid nearest to `lab` (first one on ties) and the
/// squared distance to it.
fn nearest(lab: &Lab, centroids: &[Lab]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, c) in centroids.iter().enumerate() {
        let d = lab.distance2(c);
        if d < best.1 { best = (j, d) }
    }
    best
}

fn assign(labs: &[Lab], centroids: &[Lab]) -> Vec<usize> {
    labs.iter().map(|lab| nearest(lab, centroids).0).collect()
}

/// Aggregate samples into clusters (empty ones have weight 0).
fn summarize(samples: &[PixelSample], labs: &[Lab], assignment: &[usize],
             k: usize) -> Vec<Cluster> {
    let mut acc = vec![([0f64; 3], [0f64; 3], 0u64); k];
    for ((s, lab), &j) in samples.iter().zip(labs).zip(assignment) {
        let w = s.weight as f64;
        let (rgb, l, weight) = &mut acc[j];
        rgb[0] += w * s.rgb.r as f64;
        rgb[1] += w * s.rgb.g as f64;
        rgb[2] += w * s.rgb.b as f64;
        l[0] += w * lab.l;
        l[1] += w * lab.a;
        l[2] += w * lab.b;
        *weight += s.weight as u64;
    }
    acc.into_iter().map(|(rgb, l, weight)| {
        let w = (weight as f64).max(1.);
        let channel = |x: f64| (x / w).round().clamp(0., 255.) as u8;
        Cluster {
            lab: Lab { l: l[0] / w, a: l[1] / w, b: l[2] / w },
            rgb: RGB8::new(channel(rgb[0]), channel(rgb[1]), channel(rgb[2])),
            weight,
        }
    }).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier { Classifier::default() }

    fn sample(r: u8, g: u8, b: u8, weight: u32) -> PixelSample {
        PixelSample { rgb: RGB8::new(r, g, b), weight }
    }

    #[test]
    fn light_warm() {
        let t = classifier().classify_samples(&[sample(255, 224, 189, 500)], false)
            .unwrap();
        assert_eq!(t.category, SkinCategory::Light);
        assert_eq!(t.undertone, Undertone::Warm);
        assert_eq!(t.dominant_colors, vec![RGB8::new(255, 224, 189)]);
        assert!(t.confidence > 0.9, "confidence = {}", t.confidence);
    }

    #[test]
    fn extremes() {
        let c = classifier();
        let white = c.classify_samples(&[sample(255, 255, 255, 10)], true).unwrap();
        assert_eq!(white.category, SkinCategory::Fair);
        assert_eq!(white.undertone, Undertone::Neutral);
        let black = c.classify_samples(&[sample(0, 0, 0, 10)], true).unwrap();
        assert_eq!(black.category, SkinCategory::Dark);
    }

    #[test]
    fn bands() {
        let c = classifier();
        let category = |r, g, b| c.category(&Lab::from_rgb(RGB8::new(r, g, b)));
        assert_eq!(category(241, 194, 167), SkinCategory::Light);
        assert_eq!(category(198, 134, 66), SkinCategory::Medium);
        assert_eq!(category(141, 85, 36), SkinCategory::Dark);
    }

    #[test]
    fn undertones() {
        let c = classifier();
        let undertone = |r, g, b| c.undertone(&Lab::from_rgb(RGB8::new(r, g, b)));
        assert_eq!(undertone(230, 190, 190), Undertone::Cool);
        assert_eq!(undertone(224, 172, 105), Undertone::Warm);
        // Hue ≈ 54°, inside the dead zone.
        assert_eq!(undertone(241, 194, 167), Undertone::Neutral);
        assert_eq!(undertone(128, 128, 128), Undertone::Neutral);
    }

    #[test]
    fn fallback_lowers_confidence() {
        let c = classifier();
        let samples = [sample(255, 224, 189, 100)];
        let skin = c.classify_samples(&samples, false).unwrap();
        let whole = c.classify_samples(&samples, true).unwrap();
        assert!(whole.confidence < skin.confidence);
        assert!((whole.confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn mixed_samples() {
        let samples = [sample(255, 224, 189, 60), sample(254, 222, 188, 20),
                       sample(30, 60, 200, 15), sample(20, 20, 20, 5)];
        let t = classifier().classify_samples(&samples, false).unwrap();
        assert_eq!(t.category, SkinCategory::Light);
        assert_eq!(t.undertone, Undertone::Warm);
        assert_eq!(t.dominant_colors,
                   vec![RGB8::new(255, 224, 189), RGB8::new(254, 222, 188),
                        RGB8::new(30, 60, 200), RGB8::new(20, 20, 20)]);
        // The blue and black samples disagree on both counts.
        assert!((t.confidence - 0.8).abs() < 1e-12, "confidence = {}", t.confidence);
    }

    #[test]
    fn deterministic() {
        let samples: Vec<_> = (0 .. 200u32)
            .map(|i| sample((i * 7 % 256) as u8, (i * 13 % 256) as u8,
                            (i * 29 % 256) as u8, 1 + i % 5))
            .collect();
        let c = classifier();
        let t0 = c.classify_samples(&samples, false).unwrap();
        let t1 = c.classify_samples(&samples, false).unwrap();
        assert_eq!(t0, t1);
        assert_eq!(t0.confidence.to_bits(), t1.confidence.to_bits());
        assert!(t0.dominant_colors.len() <= 5);
        assert!((0. ..= 1.).contains(&t0.confidence));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClassifyConfig { clusters: 0, ..Default::default() };
        assert!(matches!(Classifier::new(config), Err(Error::InvalidConfig(_))));
        let config = ClassifyConfig { fallback_penalty: -0.1, ..Default::default() };
        assert!(Classifier::new(config).is_err());
        assert!(Classifier::new(ClassifyConfig::default()).is_ok());
    }

    #[test]
    fn no_samples() {
        let c = classifier();
        assert!(matches!(c.classify_samples(&[], false),
                         Err(Error::InsufficientData)));
        assert!(matches!(c.classify_samples(&[sample(1, 2, 3, 0)], false),
                         Err(Error::InsufficientData)));
    }

    #[test]
    fn json() {
        let t = classifier().classify_samples(&[sample(255, 224, 189, 1)], false)
            .unwrap();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["category"], "light");
        assert_eq!(v["undertone"], "warm");
        assert_eq!(v["dominant_colors"][0], "#ffe0bd");
    }
}
