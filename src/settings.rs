//! Runtime settings
//!
//! Persisted as JSON next to the binary. Every field has a default, so a
//! partial or missing file still loads.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::{OverflowPolicy, RamPenalty, WorldConfig};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Logic ticks per second
    pub logic_rate: u32,
    /// Most ticks run in one frame before the backlog is dropped
    pub max_substeps: u32,
    /// Visible world size, used for enemy spawn distance
    pub view_extents: Vec2,
    /// Where the high score lives
    pub high_score_path: PathBuf,
    /// Who pays when a hostile rams the player
    pub ram_penalty: RamPenalty,
    /// What a full bullet pool does with new shots
    pub bullet_overflow: OverflowPolicy,
    /// How long the headless runner plays
    pub headless_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            logic_rate: LOGIC_RATE,
            max_substeps: MAX_SUBSTEPS,
            view_extents: DEFAULT_VIEW_EXTENTS,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            ram_penalty: RamPenalty::default(),
            bullet_overflow: OverflowPolicy::default(),
            headless_seconds: 60.0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// The simulation-facing subset
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            logic_rate: self.logic_rate.max(1),
            view_extents: self.view_extents,
            ram_penalty: self.ram_penalty,
            bullet_overflow: self.bullet_overflow,
        }
    }
}
