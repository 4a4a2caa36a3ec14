//! Palette session: the editor state a user works on.
//!
//! Holds the current palette, which positions are locked, and the settings
//! that drive the next regeneration. The session is a plain value owned by
//! its caller; nothing here is global.
//!
//! Regeneration picks a generator from the settings, in priority order:
//!
//! 1. a mood, if one is selected
//! 2. the strategy, if it is not `Random` or a base color is set
//! 3. otherwise the harmonious generator with a random hue
//!
//! Locked positions keep their previous color as long as the previous
//! palette had a color at that position.

use std::collections::BTreeSet;

use pf_color::{ColorFormat, RandomSource, Rgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PaletteError, Result};
use crate::harmonious::generate_harmonious;
use crate::mood::{Mood, generate_by_mood};
use crate::store::{STATE_KEY, Store, load_json, save_json};
use crate::strategy::{PaletteStrategy, generate_by_type};

/// Palette size used when nothing else is configured.
pub const DEFAULT_COUNT: usize = 5;

/// Largest palette a session will generate.
pub const MAX_COUNT: usize = 256;

/// Bring a palette size into `1..=MAX_COUNT`.
#[must_use]
pub fn clamp_count(count: usize) -> usize {
    count.clamp(1, MAX_COUNT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteSession {
    /// Current palette, canonical `#RRGGBB` strings.
    pub colors: Vec<String>,
    /// Locked positions.
    pub locked: BTreeSet<usize>,
    /// Size of the next generated palette.
    pub count: usize,
    /// Display notation.
    pub format: ColorFormat,
    pub strategy: PaletteStrategy,
    pub mood: Option<Mood>,
    /// Canonical base color for rule-based strategies.
    pub base_color: Option<String>,
    /// Name of the palette last loaded from the library, empty otherwise.
    pub name: String,
}

impl Default for PaletteSession {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            locked: BTreeSet::new(),
            count: DEFAULT_COUNT,
            format: ColorFormat::Hex,
            strategy: PaletteStrategy::Random,
            mood: None,
            base_color: None,
            name: String::new(),
        }
    }
}

impl PaletteSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the session from `store`, or a fresh one if none is stored.
    /// A stored `count` outside `1..=MAX_COUNT` is clamped.
    #[must_use]
    pub fn load(store: &dyn Store) -> Self {
        let mut session: Self = load_json(store, STATE_KEY);
        let count = clamp_count(session.count);
        if count != session.count {
            debug!(stored = session.count, count, "clamped stored palette size");
            session.count = count;
        }
        session
    }

    /// Persist the session to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&self, store: &mut dyn Store) -> Result<()> {
        save_json(store, STATE_KEY, self)?;
        Ok(())
    }

    /// Regenerate the palette, keeping locked colors in place.
    pub fn generate(&mut self, rng: &mut dyn RandomSource) {
        let fresh = if let Some(mood) = self.mood {
            generate_by_mood(mood, self.count, rng)
        } else if self.strategy != PaletteStrategy::Random || self.base_color.is_some() {
            generate_by_type(self.strategy, self.count, self.base_color.as_deref(), rng)
        } else {
            generate_harmonious(self.count, None, rng)
        };

        let previous = std::mem::take(&mut self.colors);
        self.colors = fresh
            .into_iter()
            .enumerate()
            .map(|(i, color)| match previous.get(i) {
                Some(kept) if self.locked.contains(&i) => kept.clone(),
                _ => color,
            })
            .collect();

        debug!(
            count = self.colors.len(),
            locked = self.locked.len(),
            "regenerated palette"
        );
    }

    /// Flip the lock on position `index`. Returns the new lock state.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` has no color.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if self.locked.remove(&index) {
            Ok(false)
        } else {
            self.locked.insert(index);
            Ok(true)
        }
    }

    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.contains(&index)
    }

    /// Replace the color at `index` with `hex` (stored in canonical form).
    ///
    /// # Errors
    ///
    /// Returns an error if `hex` is not a valid color or `index` has no color.
    pub fn set_color(&mut self, index: usize, hex: &str) -> Result<()> {
        self.check_index(index)?;
        let color: Rgb = hex.parse()?;
        self.colors[index] = color.to_hex();
        Ok(())
    }

    /// Set or clear the base color used by rule-based strategies.
    ///
    /// # Errors
    ///
    /// Returns an error if `hex` is not a valid color.
    pub fn set_base_color(&mut self, hex: Option<&str>) -> Result<()> {
        self.base_color = match hex {
            Some(hex) => Some(hex.parse::<Rgb>()?.to_hex()),
            None => None,
        };
        Ok(())
    }

    /// Replace the palette wholesale (e.g. from the library or a share link).
    /// Locks are cleared and the palette size follows the new colors.
    pub fn load_colors(&mut self, colors: Vec<String>, name: impl Into<String>) {
        self.count = clamp_count(colors.len());
        self.colors = colors;
        self.locked.clear();
        self.name = name.into();
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.colors.len() {
            Ok(())
        } else {
            Err(PaletteError::IndexOutOfRange { index, len: self.colors.len() })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
