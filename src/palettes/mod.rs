//! Curated colors for every skin-tone category and undertone.

use std::collections::BTreeMap;
use lazy_static::lazy_static;
use log::error;

use crate::error::{Error, Result};

pub mod ty;
pub use ty::{CatalogEntry, Palette, RecommendationSet, SkinCategory, Swatch,
             Undertone};

// Swatches

const AMBER: Swatch = Swatch::new("Amber", 0xFFBF00);
const AMETHYST: Swatch = Swatch::new("Amethyst", 0x9966CC);
const BABY_BLUE: Swatch = Swatch::new("Baby Blue", 0x89CFF0);
const BEIGE: Swatch = Swatch::new("Beige", 0xF5F5DC);
const BLACK: Swatch = Swatch::new("Black", 0x000000);
const BLUSH: Swatch = Swatch::new("Blush", 0xDE5D83);
const BLUSH_PINK: Swatch = Swatch::new("Blush Pink", 0xFEC5E5);
const BRIGHT_ORANGE: Swatch = Swatch::new("Bright Orange", 0xFFA500);
const BRONZE: Swatch = Swatch::new("Bronze", 0xCD7F32);
const BURGUNDY: Swatch = Swatch::new("Burgundy", 0x800020);
const BURNT_ORANGE: Swatch = Swatch::new("Burnt Orange", 0xCC5500);
const BUTTER: Swatch = Swatch::new("Butter Yellow", 0xFFFDAF);
const CAMEL: Swatch = Swatch::new("Camel", 0xC19A6B);
const CARDAMOM: Swatch = Swatch::new("Cardamom", 0x77815C);
const CHARCOAL: Swatch = Swatch::new("Charcoal", 0x36454F);
const CHOCOLATE: Swatch = Swatch::new("Chocolate", 0x7B3F00);
const CINNAMON: Swatch = Swatch::new("Cinnamon", 0xD2691E);
const COBALT: Swatch = Swatch::new("Cobalt Blue", 0x0047AB);
const CORAL: Swatch = Swatch::new("Coral", 0xFF7F50);
const CREAM: Swatch = Swatch::new("Cream", 0xFFFDD0);
const DUSTY_ROSE: Swatch = Swatch::new("Dusty Rose", 0xDCAE96);
const EMERALD: Swatch = Swatch::new("Emerald", 0x50C878);
const FUCHSIA: Swatch = Swatch::new("Fuchsia", 0xFF00FF);
const GOLDEN_YELLOW: Swatch = Swatch::new("Golden Yellow", 0xFFDF00);
const HONEY: Swatch = Swatch::new("Honey", 0xEB9605);
const HOT_PINK: Swatch = Swatch::new("Hot Pink", 0xFF69B4);
const ICY_WHITE: Swatch = Swatch::new("Icy White", 0xF0F8FF);
const JADE: Swatch = Swatch::new("Jade", 0x00A86B);
const LAVENDER: Swatch = Swatch::new("Lavender", 0xB57EDC);
const LILAC: Swatch = Swatch::new("Lilac", 0xC8A2C8);
const LIME: Swatch = Swatch::new("Lime", 0x32CD32);
const MAUVE: Swatch = Swatch::new("Mauve", 0xE0B0FF);
const MINT: Swatch = Swatch::new("Mint", 0x98FF98);
const MUSTARD: Swatch = Swatch::new("Mustard", 0xFFDB58);
const NAVY: Swatch = Swatch::new("Navy", 0x000080);
const NEON_PINK: Swatch = Swatch::new("Neon Pink", 0xFF6EC7);
const NEON_YELLOW: Swatch = Swatch::new("Neon Yellow", 0xFFFF33);
const OLIVE: Swatch = Swatch::new("Olive", 0x808000);
const PEACH: Swatch = Swatch::new("Peach", 0xFFE5B4);
const PEACOCK: Swatch = Swatch::new("Peacock Blue", 0x005F69);
const PEWTER: Swatch = Swatch::new("Pewter", 0x96A8A1);
const POWDER_BLUE: Swatch = Swatch::new("Powder Blue", 0xB0E0E6);
const PURE_WHITE: Swatch = Swatch::new("Pure White", 0xFFFFFF);
const ROSE_PINK: Swatch = Swatch::new("Rose Pink", 0xFF66CC);
const ROYAL_PURPLE: Swatch = Swatch::new("Royal Purple", 0x7851A9);
const RUBY: Swatch = Swatch::new("Ruby", 0x9B111E);
const RUST: Swatch = Swatch::new("Rust", 0xB7410E);
const SAFFRON: Swatch = Swatch::new("Saffron", 0xF4C430);
const SAGE: Swatch = Swatch::new("Sage", 0x9CAF88);
const SAPPHIRE: Swatch = Swatch::new("Sapphire", 0x0F52BA);
const SEAFOAM: Swatch = Swatch::new("Seafoam", 0x93E9BE);
const SILVER: Swatch = Swatch::new("Silver", 0xC0C0C0);
const SLATE_GRAY: Swatch = Swatch::new("Slate Gray", 0x708090);
const SOFT_WHITE: Swatch = Swatch::new("Soft White", 0xFAF9F6);
const TANGERINE: Swatch = Swatch::new("Tangerine", 0xF28500);
const TAUPE: Swatch = Swatch::new("Taupe", 0x8B8589);
const TEAL: Swatch = Swatch::new("Teal", 0x008080);
const TERRACOTTA: Swatch = Swatch::new("Terracotta", 0xE2725B);
const WARM_IVORY: Swatch = Swatch::new("Warm Ivory", 0xFFFFF0);
const WARM_TURQUOISE: Swatch = Swatch::new("Warm Turquoise", 0x30D5C8);

// Palettes

static WINTER_JEWELS: Palette = Palette {
    name: "Winter Jewels",
    colors: &[SAPPHIRE, EMERALD, AMETHYST, RUBY, ICY_WHITE] };
static SOFT_SUMMER: Palette = Palette {
    name: "Soft Summer",
    colors: &[LAVENDER, POWDER_BLUE, DUSTY_ROSE, SLATE_GRAY, MAUVE] };
static SPRING_BRIGHTS: Palette = Palette {
    name: "Spring Brights",
    colors: &[CORAL, PEACH, WARM_TURQUOISE, GOLDEN_YELLOW, CAMEL] };
static AUTUMN_EARTH: Palette = Palette {
    name: "Autumn Earth",
    colors: &[RUST, OLIVE, MUSTARD, TERRACOTTA, CHOCOLATE] };
static GOLDEN_HOUR: Palette = Palette {
    name: "Golden Hour",
    colors: &[AMBER, BURNT_ORANGE, HONEY, BRONZE, WARM_IVORY] };
static SOFT_NEUTRALS: Palette = Palette {
    name: "Soft Neutrals",
    colors: &[TAUPE, SAGE, BLUSH, SOFT_WHITE, JADE] };
static CLASSIC_NEUTRALS: Palette = Palette {
    name: "Classic Neutrals",
    colors: &[NAVY, CHARCOAL, CREAM, CAMEL, BURGUNDY] };
static RICH_JEWELS: Palette = Palette {
    name: "Rich Jewel Tones",
    colors: &[COBALT, FUCHSIA, EMERALD, ROYAL_PURPLE, RUBY] };
static OCEAN_DEPTHS: Palette = Palette {
    name: "Ocean Depths",
    colors: &[TEAL, NAVY, PEACOCK, SEAFOAM, PEWTER] };
static SPICE_MARKET: Palette = Palette {
    name: "Spice Market",
    colors: &[SAFFRON, CINNAMON, RUST, HONEY, CARDAMOM] };
static PASTEL_GARDEN: Palette = Palette {
    name: "Pastel Garden",
    colors: &[BLUSH_PINK, MINT, LILAC, BABY_BLUE, BUTTER] };
static VIVID_BRIGHTS: Palette = Palette {
    name: "Vivid Brights",
    colors: &[COBALT, HOT_PINK, TANGERINE, LIME, PURE_WHITE] };

// Entries

static FAIR_COOL: CatalogEntry = CatalogEntry {
    recommended: &[POWDER_BLUE, LAVENDER, ROSE_PINK, NAVY, EMERALD, SOFT_WHITE],
    avoid: &[BRIGHT_ORANGE, MUSTARD, NEON_YELLOW],
    palettes: &[&SOFT_SUMMER, &PASTEL_GARDEN],
    tips: &["Soft, cool pastels flatter without overpowering fair skin",
            "Choose silver and white gold jewelry",
            "Navy and charcoal are gentler alternatives to black"],
};

static FAIR_WARM: CatalogEntry = CatalogEntry {
    recommended: &[PEACH, CORAL, WARM_IVORY, CAMEL, WARM_TURQUOISE, GOLDEN_YELLOW],
    avoid: &[BLACK, PURE_WHITE, NEON_PINK],
    palettes: &[&SPRING_BRIGHTS, &PASTEL_GARDEN],
    tips: &["Warm ivory and cream are softer than stark white",
            "Gold and rose gold jewelry complement golden undertones",
            "Keep high-contrast outfits away from the face"],
};

static FAIR_NEUTRAL: CatalogEntry = CatalogEntry {
    recommended: &[JADE, BLUSH, SOFT_WHITE, DUSTY_ROSE, SLATE_GRAY, NAVY],
    avoid: &[NEON_YELLOW, BRIGHT_ORANGE],
    palettes: &[&SOFT_NEUTRALS, &PASTEL_GARDEN],
    tips: &["Muted, medium-intensity shades are the safest choice",
            "Both silver and gold jewelry work",
            "Avoid fluorescent colors which wash out fair skin"],
};

static LIGHT_COOL: CatalogEntry = CatalogEntry {
    recommended: &[SAPPHIRE, LAVENDER, ROSE_PINK, NAVY, SLATE_GRAY, EMERALD],
    avoid: &[BRIGHT_ORANGE, MUSTARD, OLIVE],
    palettes: &[&SOFT_SUMMER, &OCEAN_DEPTHS],
    tips: &["Blue-based reds and berry shades bring out a natural flush",
            "Favor silver and platinum accessories",
            "Gray and navy make better neutrals than brown"],
};

static LIGHT_WARM: CatalogEntry = CatalogEntry {
    recommended: &[CORAL, PEACH, GOLDEN_YELLOW, WARM_TURQUOISE, CAMEL, OLIVE],
    avoid: &[BLACK, ICY_WHITE, FUCHSIA],
    palettes: &[&SPRING_BRIGHTS, &GOLDEN_HOUR],
    tips: &["Clear, warm brights echo the golden cast of the skin",
            "Gold jewelry adds warmth",
            "Camel and chocolate replace black as base colors"],
};

static LIGHT_NEUTRAL: CatalogEntry = CatalogEntry {
    recommended: &[JADE, DUSTY_ROSE, TEAL, SOFT_WHITE, TAUPE, NAVY],
    avoid: &[NEON_YELLOW, NEON_PINK],
    palettes: &[&SOFT_NEUTRALS, &CLASSIC_NEUTRALS],
    tips: &["Most colors work; focus on medium saturation",
            "Mix metals freely",
            "Teal and jade suit both warm and cool lighting"],
};

static MEDIUM_COOL: CatalogEntry = CatalogEntry {
    recommended: &[EMERALD, SAPPHIRE, RUBY, ROYAL_PURPLE, TEAL, CHARCOAL],
    avoid: &[MUSTARD, BRIGHT_ORANGE, BEIGE],
    palettes: &[&WINTER_JEWELS, &OCEAN_DEPTHS],
    tips: &["Jewel tones add depth and contrast",
            "Silver and white gold stand out against the skin",
            "Avoid beige close to the face which can look ashen"],
};

static MEDIUM_WARM: CatalogEntry = CatalogEntry {
    recommended: &[OLIVE, TERRACOTTA, MUSTARD, BURNT_ORANGE, BRONZE, CREAM],
    avoid: &[BABY_BLUE, LILAC, SILVER],
    palettes: &[&AUTUMN_EARTH, &GOLDEN_HOUR],
    tips: &["Earth tones and spice colors harmonize with golden skin",
            "Gold, brass and bronze jewelry are ideal",
            "Icy pastels tend to look dull next to warm skin"],
};

static MEDIUM_NEUTRAL: CatalogEntry = CatalogEntry {
    recommended: &[TEAL, JADE, BURGUNDY, CAMEL, NAVY, CREAM],
    avoid: &[BEIGE, NEON_YELLOW],
    palettes: &[&CLASSIC_NEUTRALS, &OCEAN_DEPTHS],
    tips: &["Rich, balanced colors such as teal and burgundy shine",
            "Both metals work; choose by outfit",
            "Add contrast with cream rather than pure white"],
};

static DARK_COOL: CatalogEntry = CatalogEntry {
    recommended: &[COBALT, FUCHSIA, EMERALD, ROYAL_PURPLE, PURE_WHITE, RUBY],
    avoid: &[BEIGE, CHOCOLATE, OLIVE],
    palettes: &[&RICH_JEWELS, &VIVID_BRIGHTS],
    tips: &["Saturated jewel tones create striking contrast",
            "Crisp white looks luminous against deep skin",
            "Silver and platinum jewelry complement cool undertones"],
};

static DARK_WARM: CatalogEntry = CatalogEntry {
    recommended: &[AMBER, BURNT_ORANGE, SAFFRON, OLIVE, BRONZE, WARM_IVORY],
    avoid: &[BEIGE, BABY_BLUE, SLATE_GRAY],
    palettes: &[&GOLDEN_HOUR, &SPICE_MARKET],
    tips: &["Spice and metallic shades enhance golden undertones",
            "Gold and copper jewelry glow against the skin",
            "Avoid muted grays that flatten the complexion"],
};

static DARK_NEUTRAL: CatalogEntry = CatalogEntry {
    recommended: &[COBALT, EMERALD, BURGUNDY, PURE_WHITE, TANGERINE, TEAL],
    avoid: &[BEIGE, CHOCOLATE],
    palettes: &[&VIVID_BRIGHTS, &RICH_JEWELS, &SPICE_MARKET],
    tips: &["Bold brights and deep jewel tones both work",
            "Contrast colors against the skin rather than matching it",
            "Any metal suits; let the outfit decide"],
};

lazy_static! {
    static ref STANDARD: PaletteCatalog = {
        use SkinCategory::*;
        use Undertone::*;
        PaletteCatalog::new()
            .with(Fair, Cool, &FAIR_COOL)
            .with(Fair, Warm, &FAIR_WARM)
            .with(Fair, Neutral, &FAIR_NEUTRAL)
            .with(Light, Cool, &LIGHT_COOL)
            .with(Light, Warm, &LIGHT_WARM)
            .with(Light, Neutral, &LIGHT_NEUTRAL)
            .with(Medium, Cool, &MEDIUM_COOL)
            .with(Medium, Warm, &MEDIUM_WARM)
            .with(Medium, Neutral, &MEDIUM_NEUTRAL)
            .with(Dark, Cool, &DARK_COOL)
            .with(Dark, Warm, &DARK_WARM)
            .with(Dark, Neutral, &DARK_NEUTRAL)
    };
}

/// Mapping from (category, undertone) to catalog data.
///
/// A catalog is assembled once with [`PaletteCatalog::with`] and only
/// read afterwards; share it by reference between threads.
#[derive(Debug, Default)]
pub struct PaletteCatalog {
    entries: BTreeMap<(SkinCategory, Undertone), &'static CatalogEntry>,
}

impl PaletteCatalog {
    /// An empty catalog.
    pub fn new() -> Self { Self::default() }

    /// The built-in catalog, covering all 12 combinations.
    pub fn standard() -> &'static PaletteCatalog { &STANDARD }

    /// Add (or replace) the entry for `(category, undertone)`.
    pub fn with(mut self, category: SkinCategory, undertone: Undertone,
                entry: &'static CatalogEntry) -> Self {
        self.entries.insert((category, undertone), entry);
        self
    }

    /// Whether every (category, undertone) pair has an entry.
    pub fn is_complete(&self) -> bool {
        SkinCategory::ALL.iter().all(|&c| {
            Undertone::ALL.iter().all(|&u| self.entries.contains_key(&(c, u)))
        })
    }

    /// Recommendations for `category` skin with an `undertone` undertone.
    pub fn recommend(&self, category: SkinCategory, undertone: Undertone)
                     -> Result<RecommendationSet> {
        match self.entries.get(&(category, undertone)) {
            Some(&entry) => Ok(RecommendationSet::from(entry)),
            None => {
                error!("palette catalog has no entry for ({category}, \
                        {undertone})");
                Err(Error::UnknownCombination { category, undertone })
            }
        }
    }

    /// Every palette of the catalog, by name.  A palette shared by
    /// several entries appears once.
    pub fn all_palettes(&self) -> BTreeMap<&'static str, Vec<Swatch>> {
        let mut palettes = BTreeMap::new();
        for p in self.entries.values().flat_map(|e| e.palettes.iter()) {
            palettes.entry(p.name).or_insert_with(|| p.colors.to_vec());
        }
        palettes
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_complete() {
        let catalog = PaletteCatalog::standard();
        assert!(catalog.is_complete());
        for c in SkinCategory::ALL {
            for u in Undertone::ALL {
                let r = catalog.recommend(c, u).unwrap();
                assert!(!r.recommended.is_empty(), "{c}/{u}: no colors");
                assert!(!r.avoid.is_empty(), "{c}/{u}: nothing to avoid");
                assert!(!r.palettes.is_empty());
                assert!(!r.tips.is_empty());
            }
        }
    }

    #[test]
    fn recommended_and_avoided_are_disjoint() {
        for (&(c, u), e) in &PaletteCatalog::standard().entries {
            for s in e.avoid {
                assert!(!e.recommended.contains(s),
                        "{c}/{u}: {} both recommended and avoided", s.name);
            }
        }
    }

    #[test]
    fn palettes_deduplicated_by_name() {
        let all = PaletteCatalog::standard().all_palettes();
        assert_eq!(all.len(), 12);
        assert_eq!(all["Ocean Depths"][0], TEAL);
        assert!(all.values().all(|colors| !colors.is_empty()));
    }

    #[test]
    fn incomplete_catalog() {
        let catalog = PaletteCatalog::new()
            .with(SkinCategory::Fair, Undertone::Cool, &FAIR_COOL);
        assert!(!catalog.is_complete());
        assert!(catalog.recommend(SkinCategory::Fair, Undertone::Cool).is_ok());
        match catalog.recommend(SkinCategory::Dark, Undertone::Warm) {
            Err(Error::UnknownCombination { category, undertone }) => {
                assert_eq!(category, SkinCategory::Dark);
                assert_eq!(undertone, Undertone::Warm);
            }
            r => panic!("expected a catalog gap, got {r:?}"),
        }
        assert_eq!(catalog.all_palettes().len(), 2);
    }

    #[test]
    fn recommendation_json() {
        let r = PaletteCatalog::standard()
            .recommend(SkinCategory::Light, Undertone::Warm).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["recommended"][0]["name"], "Coral");
        assert_eq!(v["recommended"][0]["hex"], "#ff7f50");
        assert!(v["palettes"]["Golden Hour"].is_array());
    }
}
