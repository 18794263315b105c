use thiserror::Error;

use crate::palettes::{SkinCategory, Undertone};

/// The stage of the analysis at which an [`Error`] arose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Decode,
    Classify,
    Recommend,
    Config,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The bytes are not an image in a supported format.
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels ({width}×{height})")]
    EmptyImage { width: u32, height: u32 },
    /// No sample reached the classifier.
    #[error("unable to analyze image: no color samples")]
    InsufficientData,
    /// The palette catalog has no entry for a valid pair.  This is a
    /// defect in the catalog, never a problem with the input.
    #[error("no recommendations for {category} skin with {undertone} undertone")]
    UnknownCombination { category: SkinCategory, undertone: Undertone },
    #[error("unsupported media type “{0}”")]
    UnsupportedMediaType(String),
    #[error("upload of {size} bytes exceeds the limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn stage(&self) -> Stage {
        use Error::*;
        match self {
            UnsupportedMediaType(_) | TooLarge { .. } => Stage::Upload,
            Decode(_) | EmptyImage { .. } => Stage::Decode,
            InsufficientData => Stage::Classify,
            UnknownCombination { .. } => Stage::Recommend,
            InvalidConfig(_) => Stage::Config,
        }
    }

    /// Whether the error is caused by the submitted image (as opposed
    /// to a defect of the analyzer itself).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::UnknownCombination { .. } | Error::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
