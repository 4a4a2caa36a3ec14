// SPDX-License-Identifier: MIT
//
// User configuration.
//
// Read once at startup from `<config_dir>/palette-forge/config.toml`. Every
// key is optional; a missing file is the same as an empty one. The values
// seed a fresh session. Once a session exists its own settings win, and
// command-line flags win over both.
//
//   count     = 5
//   format    = "hex"            # hex | rgb | hsl
//   strategy  = "analogous"      # any strategy name, unknown → random
//   mood      = "calm"           # optional, unknown → calm
//   data_dir  = "/path/to/data"  # where session and library live
//   share_base = "https://example.org/palette"

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pf_color::ColorFormat;
use pf_palette::session::{DEFAULT_COUNT, clamp_count};
use pf_palette::{Mood, PaletteSession, PaletteStrategy};
use serde::Deserialize;
use tracing::debug;

const APP_DIR: &str = "palette-forge";
const CONFIG_FILE: &str = "config.toml";

/// Base used for share links when none is configured.
pub const DEFAULT_SHARE_BASE: &str = "http://localhost:5173/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub count: usize,
    pub format: ColorFormat,
    /// Kept as text so an unknown name degrades instead of failing the load.
    pub strategy: String,
    pub mood: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub share_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            format: ColorFormat::Hex,
            strategy: PaletteStrategy::Random.name().to_owned(),
            mood: None,
            data_dir: None,
            share_base: DEFAULT_SHARE_BASE.to_owned(),
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config.
    ///
    /// An explicit `path` must exist. The default path may be absent, in which
    /// case built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    #[must_use]
    pub fn strategy(&self) -> PaletteStrategy {
        PaletteStrategy::parse_lenient(&self.strategy)
    }

    #[must_use]
    pub fn mood(&self) -> Option<Mood> {
        self.mood.as_deref().map(Mood::parse_lenient)
    }

    /// Directory holding the session and library documents.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))
            .context("cannot determine where to store palettes; set data_dir or pass --data-dir")
    }

    /// Copy the configured defaults into a session that has never been used.
    pub fn seed_session(&self, session: &mut PaletteSession) {
        session.count = clamp_count(self.count);
        session.format = self.format;
        session.strategy = self.strategy();
        session.mood = self.mood();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
