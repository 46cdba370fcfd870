use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::messages::MessageTemplates;
use crate::game::item::ItemMaterial;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

// ── File format ─────────────────────────────────────────────────────

/// Physics section of grapple.ron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSection {
    pub max_distance: f64,
    pub pull_strength: f64,
    pub vertical_boost: f64,
    pub horizontal_multiplier: f64,
    pub velocity_smoothing: f64,
    /// Cooldown in ticks.
    pub cooldown: u64,
}

impl Default for PhysicsSection {
    fn default() -> Self {
        Self {
            max_distance: 50.0,
            pull_strength: 1.5,
            vertical_boost: 0.3,
            horizontal_multiplier: 1.0,
            velocity_smoothing: 0.85,
            cooldown: 20,
        }
    }
}

/// Item section of grapple.ron. `material` stays a string so a typo
/// degrades to a warning instead of a parse failure of the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSection {
    pub material: String,
    pub name: String,
    pub lore: Vec<String>,
}

impl Default for ItemSection {
    fn default() -> Self {
        Self {
            material: "FISHING_ROD".into(),
            name: "Grappling Hook".into(),
            lore: Vec::new(),
        }
    }
}

/// On-disk shape of the grapple configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrappleFile {
    pub physics: PhysicsSection,
    pub item: ItemSection,
    pub messages: MessageTemplates,
}

impl GrappleFile {
    /// Per-user directory holding grapple.ron; the working directory when
    /// the platform has no data dir.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("aero_hook"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default path of the config file.
    pub fn default_path() -> PathBuf {
        Self::data_dir().join("grapple.ron")
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let pretty = ron::ser::PrettyConfig::default();
        let s = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, s)?;
        Ok(())
    }
}

// ── Resolved snapshot ───────────────────────────────────────────────

/// Numeric knobs for the pull and the cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub max_distance: f64,
    pub pull_strength: f64,
    pub vertical_boost: f64,
    pub horizontal_multiplier: f64,
    /// Blend weight of the target velocity. Values outside [0, 1] overshoot.
    pub velocity_smoothing: f64,
    pub cooldown_ticks: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsSection::default().into()
    }
}

impl From<PhysicsSection> for PhysicsConfig {
    fn from(s: PhysicsSection) -> Self {
        Self {
            max_distance: s.max_distance,
            pull_strength: s.pull_strength,
            vertical_boost: s.vertical_boost,
            horizontal_multiplier: s.horizontal_multiplier,
            velocity_smoothing: s.velocity_smoothing,
            cooldown_ticks: s.cooldown,
        }
    }
}

/// What a grapple item looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemConfig {
    /// `None` means no item will ever match.
    pub material: Option<ItemMaterial>,
    /// Exact display name, already colour-resolved.
    pub display_name: String,
    pub lore: Vec<String>,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            material: Some(ItemMaterial::FishingRod),
            display_name: "Grappling Hook".into(),
            lore: Vec::new(),
        }
    }
}

/// Immutable configuration snapshot read by every evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrappleConfig {
    pub physics: PhysicsConfig,
    pub item: ItemConfig,
    pub messages: MessageTemplates,
}

impl GrappleConfig {
    /// Resolve a file into a snapshot. Bad values are logged, never fatal.
    pub fn from_file(file: GrappleFile) -> Self {
        let material = match file.item.material.parse::<ItemMaterial>() {
            Ok(m) => m,
            Err(e) => {
                warn!("{e} in config, using FISHING_ROD");
                ItemMaterial::FishingRod
            }
        };

        let physics = PhysicsConfig::from(file.physics);
        if !(0.0..=1.0).contains(&physics.velocity_smoothing) {
            warn!(
                "velocity_smoothing={} is outside [0, 1]; blending will overshoot",
                physics.velocity_smoothing
            );
        }
        if physics.max_distance <= 0.0 {
            warn!(
                "max_distance={} is not positive; every hook will be out of range",
                physics.max_distance
            );
        }

        Self {
            physics,
            item: ItemConfig {
                material: Some(material),
                display_name: file.item.name,
                lore: file.item.lore,
            },
            messages: file.messages,
        }
    }

    /// Load from file, or write and use defaults if missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match GrappleFile::load(path) {
                Ok(file) => {
                    info!("Grapple configuration loaded from {:?}", path);
                    return Self::from_file(file);
                }
                Err(e) => {
                    warn!("Failed to load {:?}: {e}, using defaults", path);
                    return Self::from_file(GrappleFile::default());
                }
            }
        }
        let file = GrappleFile::default();
        if let Err(e) = file.save(path) {
            warn!("Failed to write default config {:?}: {e}", path);
        }
        Self::from_file(file)
    }
}

/// Where the plugin reads its configuration from.
#[derive(Resource, Debug, Clone)]
pub struct GrappleConfigSource(pub PathBuf);

impl Default for GrappleConfigSource {
    fn default() -> Self {
        Self(GrappleFile::default_path())
    }
}

/// Process-wide configuration handle. Reload swaps the whole snapshot;
/// readers keep whatever `Arc` they already hold.
#[derive(Resource, Debug, Default)]
pub struct SharedConfig {
    current: RwLock<Arc<GrappleConfig>>,
}

impl SharedConfig {
    pub fn new(config: GrappleConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn snapshot(&self) -> Arc<GrappleConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, config: GrappleConfig) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_values() {
        let cfg = GrappleConfig::from_file(GrappleFile::default());
        assert_eq!(cfg.physics.max_distance, 50.0);
        assert_eq!(cfg.physics.pull_strength, 1.5);
        assert_eq!(cfg.physics.vertical_boost, 0.3);
        assert_eq!(cfg.physics.horizontal_multiplier, 1.0);
        assert_eq!(cfg.physics.velocity_smoothing, 0.85);
        assert_eq!(cfg.physics.cooldown_ticks, 20);
        assert_eq!(cfg.item.material, Some(ItemMaterial::FishingRod));
        assert_eq!(cfg.item.display_name, "Grappling Hook");
        assert_eq!(cfg, GrappleConfig::default());
    }

    #[test]
    fn unknown_material_falls_back_to_fishing_rod() {
        let mut file = GrappleFile::default();
        file.item.material = "NOT_A_THING".into();
        let cfg = GrappleConfig::from_file(file);
        assert_eq!(cfg.item.material, Some(ItemMaterial::FishingRod));
    }

    #[test]
    fn smoothing_out_of_range_is_kept() {
        let mut file = GrappleFile::default();
        file.physics.velocity_smoothing = 1.4;
        let cfg = GrappleConfig::from_file(file);
        assert_eq!(cfg.physics.velocity_smoothing, 1.4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let file: GrappleFile =
            ron::from_str("(physics: (max_distance: 30.0), item: (name: \"Hook\"))").unwrap();
        assert_eq!(file.physics.max_distance, 30.0);
        assert_eq!(file.physics.cooldown, 20);
        assert_eq!(file.item.name, "Hook");
        assert_eq!(file.item.material, "FISHING_ROD");
    }

    #[test]
    fn save_then_load_preserves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("grapple.ron");
        let mut file = GrappleFile::default();
        file.physics.pull_strength = 2.25;
        file.item.lore = vec!["Pulls you".into()];
        file.save(&path).unwrap();
        assert_eq!(GrappleFile::load(&path).unwrap(), file);
    }

    #[test]
    fn load_or_default_writes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grapple.ron");
        let cfg = GrappleConfig::load_or_default(&path);
        assert_eq!(cfg, GrappleConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn load_or_default_survives_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grapple.ron");
        std::fs::write(&path, "this is not ron {").unwrap();
        assert_eq!(GrappleConfig::load_or_default(&path), GrappleConfig::default());
    }

    #[test]
    fn replace_does_not_touch_held_snapshot() {
        let shared = SharedConfig::new(GrappleConfig::default());
        let before = shared.snapshot();

        let mut next = GrappleConfig::default();
        next.physics.max_distance = 10.0;
        shared.replace(next);

        assert_eq!(before.physics.max_distance, 50.0);
        assert_eq!(shared.snapshot().physics.max_distance, 10.0);
    }
}
