//! Color-space conversions used by the preprocessor and the classifier.

use rgb::RGB8;

/// A color in the CIE L\*a\*b\* color space with a D50 reference
/// white point.  Distances in this space approximate perceived
/// differences (ΔE*ab).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    /// The lightness in the range 0. to 100.
    pub l: f64,
    /// Green (negative) to red (positive) axis.
    pub a: f64,
    /// Blue (negative) to yellow (positive) axis.
    pub b: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;

/// Undo the sRGB transfer curve of a component in \[0, 255\].
fn linearize(c: u8) -> f64 {
    let c = c as f64 / 255.;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

impl Lab {
    pub fn from_rgb(c: RGB8) -> Lab {
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let (r, g, b) = (linearize(c.r), linearize(c.g), linearize(c.b));
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        Lab { l: 116. * fy - 16., a: 500. * (fx - fy), b: 200. * (fy - fz) }
    }

    /// The chroma, i.e. the distance from the neutral axis.
    #[inline]
    pub fn chroma(&self) -> f64 { self.a.hypot(self.b) }

    /// The hue angle in degrees, in the range (-180, 180\].
    #[inline]
    pub fn hue_degrees(&self) -> f64 { self.b.atan2(self.a).to_degrees() }

    /// Squared Euclidean distance (ΔE*ab²).
    #[inline]
    pub fn distance2(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

/// The Rec. 601 YCbCr components of `c`, each in \[0, 255\].
pub fn ycbcr(c: RGB8) -> (f64, f64, f64) {
    let (r, g, b) = (c.r as f64, c.g as f64, c.b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128. - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128. + 0.5 * r - 0.418688 * g - 0.081312 * b;
    (y, cb, cr)
}

/// CSS notation `#rrggbb` of the color.
pub fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Serialize a slice of colors as CSS hex strings.
pub(crate) fn serialize_css_seq<S>(cs: &[RGB8], s: S) -> Result<S::Ok, S::Error>
where S: serde::Serializer {
    s.collect_seq(cs.iter().map(|&c| css_string(c)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_extremes() {
        let white = Lab::from_rgb(RGB8::new(255, 255, 255));
        assert!((white.l - 100.).abs() < 1e-3, "{} ≉ 100", white.l);
        assert!(white.chroma() < 1e-3);
        let black = Lab::from_rgb(RGB8::new(0, 0, 0));
        assert!(black.l.abs() < 1e-9);
    }

    #[test]
    fn lab_of_light_warm_skin() {
        let c = Lab::from_rgb(RGB8::new(255, 224, 189));
        assert!((c.l - 91.13).abs() < 0.05, "L = {}", c.l);
        assert!((c.hue_degrees() - 71.2).abs() < 0.1, "h = {}", c.hue_degrees());
    }

    #[test]
    fn ycbcr_of_gray_is_centered() {
        let (y, cb, cr) = ycbcr(RGB8::new(128, 128, 128));
        assert!((y - 128.).abs() < 1e-9);
        assert!((cb - 128.).abs() < 1e-3);
        assert!((cr - 128.).abs() < 1e-3);
    }

    #[test]
    fn css() {
        assert_eq!(css_string(RGB8::new(255, 224, 189)), "#ffe0bd");
        assert_eq!(css_string(RGB8::new(0, 10, 1)), "#000a01");
    }
}
