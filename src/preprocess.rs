//! Extraction of representative skin-color samples from an image.
//!
//! The image is decoded, downscaled so that its longest edge is at
//! most [`PreprocessConfig::max_dimension`], and its pixels are tested
//! against a YCbCr skin-chroma box.  When too few pixels pass the test
//! the whole image is sampled instead and [`SampleSet::fallback`] is
//! set, which the classifier turns into a lower confidence.

use std::collections::BTreeMap;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use log::{debug, warn};
use rgb::RGB8;

use crate::color::ycbcr;
use crate::config::PreprocessConfig;
use crate::error::{Error, Result};

/// A color together with the number of sampled pixels having it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSample {
    pub rgb: RGB8,
    pub weight: u32,
}

/// Output of [`Preprocessor::process`].
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSet {
    /// Distinct colors, sorted by (r, g, b).
    pub samples: Vec<PixelSample>,
    /// Whether the skin detection failed and the full image was sampled.
    pub fallback: bool,
    /// Fraction of the working image classified as skin.
    pub skin_fraction: f64,
}

impl SampleSet {
    /// Total weight of the samples.
    pub fn total_weight(&self) -> u64 {
        self.samples.iter().map(|s| s.weight as u64).sum()
    }
}

#[derive(Clone, Debug)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Default for Preprocessor {
    fn default() -> Self { Preprocessor { config: PreprocessConfig::default() } }
}

impl Preprocessor {
    /// Return a preprocessor using `config`, provided it is valid.
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Preprocessor { config })
    }

    /// Decode `bytes` (JPEG, PNG or WebP) and sample it.
    ///
    /// Encoded images declaring a zero width or height are rejected by
    /// the decoders and reported as [`Error::Decode`];
    /// [`Error::EmptyImage`] only comes from [`Preprocessor::sample`].
    pub fn process(&self, bytes: &[u8]) -> Result<SampleSet> {
        let img = image::load_from_memory(bytes)?;
        self.sample(&img)
    }

    /// Sample an already decoded image.
    pub fn sample(&self, img: &DynamicImage) -> Result<SampleSet> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height })
        }
        let max = self.config.max_dimension;
        let img = if width > max || height > max {
            img.resize(max, max, FilterType::Triangle)
        } else {
            img.clone()
        };
        let rgb = img.to_rgb8();
        debug!("working image {}×{} (from {width}×{height})",
               rgb.width(), rgb.height());

        let pixels: Vec<RGB8> = rgb.pixels()
            .map(|p| RGB8::new(p[0], p[1], p[2]))
            .collect();
        let skin: Vec<RGB8> = pixels.iter().copied()
            .filter(|&c| self.is_skin(c))
            .collect();
        let skin_fraction = skin.len() as f64 / pixels.len() as f64;
        let min_skin = (self.config.min_skin_fraction * pixels.len() as f64)
            .ceil().max(1.) as usize;
        let fallback = skin.len() < min_skin;
        if fallback {
            warn!("only {:.2}% skin-like pixels, sampling the whole image",
                  100. * skin_fraction);
        } else {
            debug!("{:.2}% skin-like pixels", 100. * skin_fraction);
        }
        let region = if fallback { &pixels } else { &skin };
        Ok(SampleSet {
            samples: self.subsample(region),
            fallback,
            skin_fraction,
        })
    }

    /// Whether `c` lies in the skin-chroma box.
    pub fn is_skin(&self, c: RGB8) -> bool {
        let (_, cb, cr) = ycbcr(c);
        self.config.skin_cb.contains(cb) && self.config.skin_cr.contains(cr)
    }

    /// Take at most `max_samples` evenly spaced pixels and merge equal
    /// colors.
    fn subsample(&self, pixels: &[RGB8]) -> Vec<PixelSample> {
        let step = pixels.len().div_ceil(self.config.max_samples).max(1);
        let mut counts: BTreeMap<[u8; 3], u32> = BTreeMap::new();
        for c in pixels.iter().step_by(step) {
            *counts.entry([c.r, c.g, c.b]).or_insert(0) += 1;
        }
        counts.into_iter()
            .map(|([r, g, b], weight)| PixelSample { rgb: RGB8::new(r, g, b), weight })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(w: u32, h: u32, c: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(c)))
    }

    fn preprocessor() -> Preprocessor { Preprocessor::default() }

    #[test]
    fn skin_chroma_box() {
        let p = preprocessor();
        assert!(p.is_skin(RGB8::new(255, 224, 189)));
        assert!(p.is_skin(RGB8::new(141, 85, 36)));
        assert!(!p.is_skin(RGB8::new(0, 0, 255)));
        assert!(!p.is_skin(RGB8::new(255, 255, 255)));
        assert!(!p.is_skin(RGB8::new(0, 0, 0)));
    }

    #[test]
    fn skin_image_is_not_a_fallback() {
        let s = preprocessor().sample(&solid(40, 30, [255, 224, 189])).unwrap();
        assert!(!s.fallback);
        assert_eq!(s.skin_fraction, 1.);
        assert_eq!(s.samples, vec![PixelSample { rgb: RGB8::new(255, 224, 189),
                                                 weight: 1200 }]);
    }

    #[test]
    fn no_skin_falls_back_to_whole_image() {
        let s = preprocessor().sample(&solid(20, 20, [0, 0, 255])).unwrap();
        assert!(s.fallback);
        assert_eq!(s.skin_fraction, 0.);
        assert_eq!(s.total_weight(), 400);
    }

    #[test]
    fn skin_region_only() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([20, 120, 20]));
        for y in 25..75 {
            for x in 25..75 {
                img.put_pixel(x, y, Rgb([224, 172, 105]));
            }
        }
        let s = preprocessor().sample(&DynamicImage::ImageRgb8(img)).unwrap();
        assert!(!s.fallback);
        assert!((s.skin_fraction - 0.25).abs() < 1e-12);
        assert_eq!(s.samples.len(), 1);
        assert_eq!(s.samples[0].rgb, RGB8::new(224, 172, 105));
    }

    #[test]
    fn large_images_are_bounded() {
        let s = preprocessor().sample(&solid(2000, 1000, [198, 134, 66])).unwrap();
        // 512×256 working pixels, capped at 4096 samples.
        assert!(s.total_weight() <= 4096, "{}", s.total_weight());
        assert!(s.total_weight() >= 4000);
    }

    #[test]
    fn empty_image() {
        let r = preprocessor().sample(&solid(0, 0, [0, 0, 0]));
        assert!(matches!(r, Err(Error::EmptyImage { width: 0, height: 0 })));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let config = PreprocessConfig { max_samples: 0, ..Default::default() };
        assert!(matches!(Preprocessor::new(config), Err(Error::InvalidConfig(_))));
        let config = PreprocessConfig { max_samples: 1, ..Default::default() };
        let s = Preprocessor::new(config).unwrap()
            .sample(&solid(4, 4, [255, 224, 189])).unwrap();
        assert_eq!(s.total_weight(), 1);
    }

    #[test]
    fn zero_width_png_is_a_decode_error() {
        // Signature and IHDR chunk of a 0×10 RGB image.
        let bytes = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a,
                     0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
                     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0a,
                     0x08, 0x02, 0x00, 0x00, 0x00, 0x15, 0x72, 0xc8, 0x23];
        assert!(matches!(preprocessor().process(&bytes), Err(Error::Decode(_))));
    }

    #[test]
    fn corrupted_bytes() {
        let r = preprocessor().process(b"\x89PNG\r\n\x1a\nthis is not a png");
        assert!(matches!(r, Err(Error::Decode(_))));
        assert!(matches!(preprocessor().process(&[]), Err(Error::Decode(_))));
    }
}
