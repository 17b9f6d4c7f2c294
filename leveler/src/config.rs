//! Persistent application configuration.
//!
//! Stored as JSON in a platform-appropriate config directory. Missing fields
//! fall back to their defaults so older files keep loading.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use ie::HandState;
use serde::{Deserialize, Serialize};

use crate::input::Key;

const APP_DIR: &str = "dragonborn-leveler";

/// Window-relative capture rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
}

impl Region {
	pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
		Self { x, y, width, height }
	}

	pub fn is_valid(&self) -> bool {
		self.width > 0 && self.height > 0
	}
}

/// Where each HUD element sits, measured on a 1920x1080 window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regions {
	pub health_bar: Region,
	/// Caption of the highlighted favorite.
	pub favorite_select: Region,
	/// "QUESTS" caption of the system menu.
	pub menu: Region,
	/// Hand marker next to the highlighted favorite.
	pub favorite_equip: Region,
}

impl Default for Regions {
	fn default() -> Self {
		Self {
			health_bar: Region::new(774, 1006, 375, 19),
			favorite_select: Region::new(7, 791, 395, 43),
			menu: Region::new(517, 82, 96, 43),
			favorite_equip: Region::new(402, 798, 29, 35),
		}
	}
}

/// In-game key bindings (the game's defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
	pub favorites: Key,
	pub scroll_up: Key,
	pub scroll_down: Key,
	pub activate: Key,
	pub wait: Key,
	/// Adds one hour in the sleep/wait dialog.
	pub more_hours: Key,
	pub confirm: Key,
	pub menu: Key,
	pub quicksave: Key,
}

impl Default for KeyBindings {
	fn default() -> Self {
		Self {
			favorites: Key::Char('q'),
			scroll_up: Key::Char('w'),
			scroll_down: Key::Char('s'),
			activate: Key::Char('e'),
			wait: Key::Char('t'),
			more_hours: Key::Char('d'),
			confirm: Key::Enter,
			menu: Key::Escape,
			quicksave: Key::F5,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
	Trace,
	Debug,
	#[default]
	Info,
	Warning,
	Error,
}

impl LogLevel {
	/// Directive for `tracing_subscriber::EnvFilter`.
	pub fn directive(self) -> &'static str {
		match self {
			LogLevel::Trace => "trace",
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warning => "warn",
			LogLevel::Error => "error",
		}
	}
}

/// Restoration spells the armor training can heal with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealingSpell {
	FastHeal,
	#[default]
	Healing,
	HealingHands,
	GrandHeal,
}

impl HealingSpell {
	pub const ALL: [HealingSpell; 4] = [
		HealingSpell::FastHeal,
		HealingSpell::Healing,
		HealingSpell::HealingHands,
		HealingSpell::GrandHeal,
	];

	/// Name as it appears in the favorites menu (lowercase).
	pub fn favorite_name(self) -> &'static str {
		match self {
			HealingSpell::FastHeal => "fast heal",
			HealingSpell::Healing => "healing",
			HealingSpell::HealingHands => "healing hands",
			HealingSpell::GrandHeal => "grand heal",
		}
	}

	/// How long one cast is held.
	pub fn cast_seconds(self) -> f32 {
		match self {
			HealingSpell::FastHeal => 0.5,
			HealingSpell::Healing => 4.0,
			HealingSpell::HealingHands => 1.2,
			HealingSpell::GrandHeal => 2.0,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IllusionSettings {
	pub repeat: u32,
	pub hand: HandState,
	/// Sleep in a targeted bed instead of waiting.
	pub bed: bool,
}

impl Default for IllusionSettings {
	fn default() -> Self {
		Self {
			repeat: 5,
			hand: HandState::Right,
			bed: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConjurationSettings {
	pub repeat: u32,
	pub hand: HandState,
}

impl Default for ConjurationSettings {
	fn default() -> Self {
		Self {
			repeat: 5,
			hand: HandState::Right,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorSettings {
	pub minutes: u32,
	pub healing_spell: HealingSpell,
	pub hand: HandState,
	/// Start healing below this health percentage.
	pub start_healing: f32,
	/// Keep healing until health reaches this percentage.
	pub stop_healing: f32,
	/// Abort the run when health drops below this percentage.
	pub abort_floor: f32,
}

impl Default for ArmorSettings {
	fn default() -> Self {
		Self {
			minutes: 1,
			healing_spell: HealingSpell::Healing,
			hand: HandState::Right,
			start_healing: 75.0,
			stop_healing: 90.0,
			abort_floor: 30.0,
		}
	}
}

/// On-disk configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Title of the game window (captured and focused by title).
	pub window_name: String,

	pub log_level: LogLevel,

	/// Write intermediate crops and masks to the debug directory.
	pub debug: bool,

	pub regions: Regions,
	pub keys: KeyBindings,

	pub illusion: IllusionSettings,
	pub conjuration: ConjurationSettings,
	pub armor: ArmorSettings,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			window_name: "Skyrim Special Edition".to_string(),
			log_level: LogLevel::Info,
			debug: false,
			regions: Regions::default(),
			keys: KeyBindings::default(),
			illusion: IllusionSettings::default(),
			conjuration: ConjurationSettings::default(),
			armor: ArmorSettings::default(),
		}
	}
}

impl Config {
	/// Path to the config file.
	pub fn path() -> Result<PathBuf> {
		let base = dirs::config_dir().context("config_dir() unavailable")?;
		Ok(base.join(APP_DIR).join("config.json"))
	}

	/// Where debug crops go when `debug` is set.
	pub fn debug_dir() -> Option<PathBuf> {
		dirs::data_dir().map(|p| p.join(APP_DIR).join("debug"))
	}

	/// Load configuration from disk, falling back to defaults on missing or invalid file.
	pub fn load_or_default() -> Self {
		match Self::try_load().and_then(|cfg| cfg.validate().map(|_| cfg)) {
			Ok(cfg) => cfg,
			Err(err) => {
				tracing::warn!(error = %format!("{err:#}"), "failed to load config; using defaults");
				Self::default()
			}
		}
	}

	/// Try to load configuration from disk.
	pub fn try_load() -> Result<Self> {
		let path = Self::path()?;
		if !path.exists() {
			return Ok(Self::default());
		}
		let json = fs::read_to_string(&path).with_context(|| format!("read {:?}", path))?;
		Self::from_json(&json).with_context(|| format!("parse {:?}", path))
	}

	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Save configuration to disk.
	pub fn save(&self) -> Result<()> {
		let path = Self::path()?;
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
		}
		let json = serde_json::to_string_pretty(self).context("serialize config")?;
		fs::write(&path, json).with_context(|| format!("write {:?}", path))?;
		Ok(())
	}

	/// Reject settings the trainings cannot work with.
	pub fn validate(&self) -> Result<()> {
		let regions = [
			("health_bar", self.regions.health_bar),
			("favorite_select", self.regions.favorite_select),
			("menu", self.regions.menu),
			("favorite_equip", self.regions.favorite_equip),
		];
		for (name, region) in regions {
			if !region.is_valid() {
				bail!("region {name} must have a non-zero size, got {region:?}");
			}
		}

		let hands = [
			("illusion", self.illusion.hand),
			("conjuration", self.conjuration.hand),
			("armor", self.armor.hand),
		];
		for (name, hand) in hands {
			if hand == HandState::None {
				bail!("{name} training needs a casting hand");
			}
		}

		let a = &self.armor;
		if !(a.abort_floor < a.start_healing && a.start_healing <= a.stop_healing && a.stop_healing <= 100.0) {
			bail!(
				"armor thresholds must satisfy abort_floor < start_healing <= stop_healing <= 100 (got {} / {} / {})",
				a.abort_floor,
				a.start_healing,
				a.stop_healing
			);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		Config::default().validate().unwrap();
	}

	#[test]
	fn partial_file_keeps_defaults() {
		let cfg = Config::from_json(r#"{ "debug": true, "armor": { "minutes": 30 } }"#).unwrap();
		assert!(cfg.debug);
		assert_eq!(cfg.armor.minutes, 30);
		assert_eq!(cfg.armor.start_healing, 75.0);
		assert_eq!(cfg.regions, Regions::default());
		assert_eq!(cfg.keys.favorites, Key::Char('q'));
	}

	#[test]
	fn round_trips_through_json() {
		let mut cfg = Config::default();
		cfg.illusion.bed = true;
		cfg.armor.healing_spell = HealingSpell::GrandHeal;
		let json = serde_json::to_string(&cfg).unwrap();
		assert_eq!(Config::from_json(&json).unwrap(), cfg);
	}

	#[test]
	fn zero_sized_region_is_rejected() {
		let mut cfg = Config::default();
		cfg.regions.menu.width = 0;
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn casting_hand_is_required() {
		let mut cfg = Config::default();
		cfg.conjuration.hand = HandState::None;
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn thresholds_must_be_ordered() {
		let mut cfg = Config::default();
		cfg.armor.abort_floor = 80.0;
		assert!(cfg.validate().is_err());
	}

	#[test]
	fn healing_spells_name_their_favorite() {
		assert_eq!(HealingSpell::HealingHands.favorite_name(), "healing hands");
		assert_eq!(HealingSpell::FastHeal.cast_seconds(), 0.5);
	}
}
