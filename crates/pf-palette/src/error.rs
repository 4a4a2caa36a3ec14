//! Error types for palette editing and persistence.

use pf_color::ColorError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors raised outside the generators: editing a session, looking up
/// saved palettes, parsing names supplied by a user.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("unknown palette strategy '{0}'")]
    UnknownStrategy(String),

    #[error("unknown mood '{0}'")]
    UnknownMood(String),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("color index {index} is out of range for a palette of {len} colors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no saved palette matches '{0}'")]
    NotFound(String),

    #[error("'{0}' matches more than one saved palette")]
    Ambiguous(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
