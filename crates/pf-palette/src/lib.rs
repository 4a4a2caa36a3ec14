//! # pf-palette: Palette Generation Engine
//!
//! Produces ordered palettes of `#RRGGBB` colors from three families of
//! generators, scores color pairs against WCAG contrast levels, and carries
//! the small amount of state a palette editor needs (locks, saved palettes,
//! share links).
//!
//! # Architecture
//!
//! ```text
//! count + strategy / mood + optional base color + RandomSource
//!     │
//!     ▼
//! harmonious.rs: golden-ratio hue rotation (the default generator)
//! strategy.rs:   color-theory rules around a base color
//! mood.rs:       uniform sampling inside fixed HSL boxes
//!     │
//!     ▼
//! session.rs:    explicit editor state: locks survive regeneration
//!     │
//!     ├──▶ contrast.rs: WCAG luminance, ratio, level, text color
//!     ├──▶ library.rs:  saved palettes (favorites, tags)
//!     ├──▶ share.rs:    `?colors=RRGGBB-RRGGBB` links
//!     └──▶ store.rs:    opaque key-value persistence
//! ```
//!
//! # Failure policy
//!
//! Generators never fail. An invalid base color degrades to a one-color
//! palette holding that input, an unrecognized strategy name degrades to
//! [`PaletteStrategy::Random`], an unrecognized mood to [`Mood::Calm`].
//! Errors exist only at the editing and storage edges ([`PaletteError`]).

// Mathematical code uses small integer-to-float casts (loop indices, angles).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod error;
pub mod harmonious;
pub mod library;
pub mod mood;
pub mod session;
pub mod share;
pub mod store;
pub mod strategy;

pub use contrast::{ContrastResult, WcagLevel};
pub use error::{PaletteError, Result};
pub use harmonious::generate_harmonious;
pub use library::{Library, PaletteUpdate, SavedPalette};
pub use mood::{Mood, MoodRanges, generate_by_mood};
pub use session::PaletteSession;
pub use store::{FileStore, MemoryStore, Store, StoreError};
pub use strategy::{PaletteStrategy, generate_by_type};
