//! Saved palettes: the user's library.
//!
//! Newest palettes come first. Each entry has a random UUID, a creation
//! timestamp, free-form tags and a favorite flag. Lookups accept either a
//! full id or any unambiguous prefix of one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{PaletteError, Result};
use crate::store::{SAVED_KEY, Store, load_json, save_json};

/// A palette stored in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPalette {
    pub id: String,
    pub name: String,
    pub colors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial update for [`Library::update`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteUpdate {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    palettes: Vec<SavedPalette>,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the library from `store`, or an empty one if none is stored.
    #[must_use]
    pub fn load(store: &dyn Store) -> Self {
        load_json(store, SAVED_KEY)
    }

    /// Persist the library to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&self, store: &mut dyn Store) -> Result<()> {
        save_json(store, SAVED_KEY, self)?;
        Ok(())
    }

    /// Add a palette at the front of the library.
    ///
    /// A missing or empty `name` becomes `Palette N`, where N is the library
    /// size after insertion.
    pub fn add(&mut self, colors: &[String], name: Option<&str>, tags: Vec<String>) -> &SavedPalette {
        let name = match name {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => format!("Palette {}", self.palettes.len() + 1),
        };
        let palette = SavedPalette {
            id: Uuid::new_v4().to_string(),
            name,
            colors: colors.to_vec(),
            tags,
            created_at: Utc::now(),
            is_favorite: false,
        };
        debug!(id = %palette.id, name = %palette.name, "saved palette");
        self.palettes.insert(0, palette);
        &self.palettes[0]
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SavedPalette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Resolve a full id or a unique id prefix.
    ///
    /// # Errors
    ///
    /// [`PaletteError::NotFound`] if nothing matches, [`PaletteError::Ambiguous`]
    /// if the prefix matches more than one palette.
    /// An empty prefix never matches.
    pub fn find(&self, id_or_prefix: &str) -> Result<&SavedPalette> {
        if id_or_prefix.is_empty() {
            return Err(PaletteError::NotFound(String::new()));
        }
        if let Some(exact) = self.get(id_or_prefix) {
            return Ok(exact);
        }
        let mut matches = self.palettes.iter().filter(|p| p.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(p), None) => Ok(p),
            (Some(_), Some(_)) => Err(PaletteError::Ambiguous(id_or_prefix.to_owned())),
            (None, _) => Err(PaletteError::NotFound(id_or_prefix.to_owned())),
        }
    }

    /// Remove the palette with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.palettes.len();
        self.palettes.retain(|p| p.id != id);
        before != self.palettes.len()
    }

    /// Apply a partial update. Returns whether the palette exists.
    pub fn update(&mut self, id: &str, update: PaletteUpdate) -> bool {
        let Some(palette) = self.palettes.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if let Some(name) = update.name {
            palette.name = name;
        }
        if let Some(tags) = update.tags {
            palette.tags = tags;
        }
        if let Some(colors) = update.colors {
            palette.colors = colors;
        }
        true
    }

    /// Flip the favorite flag. Returns the new state, `None` if no such id.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let palette = self.palettes.iter_mut().find(|p| p.id == id)?;
        palette.is_favorite = !palette.is_favorite;
        Some(palette.is_favorite)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &SavedPalette> {
        self.palettes.iter().filter(|p| p.is_favorite)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedPalette> {
        self.palettes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
