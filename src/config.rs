// src/config.rs

//! Defines the configuration structures for the viewer.
//!
//! This module provides a set of structs that can be deserialized from a
//! JSON configuration file to customize the window appearance, frame
//! pacing, and keybindings. Default values reproduce the stock behavior,
//! so running without a config file is always valid.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::keys::{KeySymbol, Modifiers};

/// Process-wide configuration, loaded once on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

/// The complete viewer configuration, grouped into logical categories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Appearance-related settings.
    pub appearance: AppearanceConfig,
    /// Performance-related settings.
    pub performance: PerformanceConfig,
    /// Keybinding configuration.
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Loads the configuration from the first existing candidate path,
    /// falling back to defaults when there is no file or it cannot be
    /// parsed. A broken config file is reported, not fatal.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.is_file() {
            log::info!("no config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                log::info!("loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "failed to load config from {}: {:#}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `$PPMVIEW_CONFIG`, else `$XDG_CONFIG_HOME/ppmview/config.json`,
    /// else `~/.config/ppmview/config.json`.
    fn config_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var("PPMVIEW_CONFIG") {
            return Some(PathBuf::from(explicit));
        }
        let base = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
            .ok()?;
        Some(base.join("ppmview").join("config.json"))
    }
}

// --- Keybinding Configuration ---

/// A combination of a key and modifiers for keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct KeyCombination {
    #[serde(default)]
    pub symbol: KeySymbol,
    #[serde(default)]
    pub modifiers: Modifiers,
}

fn plain(symbol: KeySymbol) -> KeyCombination {
    KeyCombination {
        symbol,
        modifiers: Modifiers::empty(),
    }
}

fn plain_char(c: char) -> KeyCombination {
    plain(KeySymbol::Char(c))
}

/// One key per view operation. The defaults are the stock layout:
/// R reset, E quit, W/S scale both axes, D/A rotate, arrow keys scale a
/// single axis, H/F and T/G translate, L/J and I/K shear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub reset: KeyCombination,
    pub quit: KeyCombination,
    pub scale_up: KeyCombination,
    pub scale_down: KeyCombination,
    pub rotate_clockwise: KeyCombination,
    pub rotate_counter_clockwise: KeyCombination,
    pub scale_up_x: KeyCombination,
    pub scale_down_x: KeyCombination,
    pub scale_up_y: KeyCombination,
    pub scale_down_y: KeyCombination,
    pub translate_right: KeyCombination,
    pub translate_left: KeyCombination,
    pub translate_up: KeyCombination,
    pub translate_down: KeyCombination,
    pub shear_right_increase: KeyCombination,
    pub shear_right_decrease: KeyCombination,
    pub shear_up_increase: KeyCombination,
    pub shear_up_decrease: KeyCombination,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        KeybindingsConfig {
            reset: plain_char('r'),
            quit: plain_char('e'),
            scale_up: plain_char('w'),
            scale_down: plain_char('s'),
            rotate_clockwise: plain_char('d'),
            rotate_counter_clockwise: plain_char('a'),
            scale_up_x: plain(KeySymbol::Right),
            scale_down_x: plain(KeySymbol::Left),
            scale_up_y: plain(KeySymbol::Up),
            scale_down_y: plain(KeySymbol::Down),
            translate_right: plain_char('h'),
            translate_left: plain_char('f'),
            translate_up: plain_char('t'),
            translate_down: plain_char('g'),
            shear_right_increase: plain_char('l'),
            shear_right_decrease: plain_char('j'),
            shear_up_increase: plain_char('i'),
            shear_up_decrease: plain_char('k'),
        }
    }
}

// --- Appearance Configuration ---

/// Settings related to the window and frame appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Initial window width in pixels.
    pub window_width_px: u32,
    /// Initial window height in pixels.
    pub window_height_px: u32,
    /// Window title.
    pub title: String,
    /// RGB background painted where the quad does not cover the frame.
    pub background: [u8; 3],
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            window_width_px: 650,
            window_height_px: 650,
            title: "ppmview".to_string(),
            background: [0, 0, 0],
        }
    }
}

// --- Performance Configuration ---

/// Settings related to frame pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Minimum delay between event/draw cycles in milliseconds.
    pub min_draw_latency_ms: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            // Roughly one 60 Hz refresh interval.
            min_draw_latency_ms: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keybindings_match_stock_layout() {
        let keys = KeybindingsConfig::default();
        assert_eq!(keys.reset, plain_char('r'));
        assert_eq!(keys.quit, plain_char('e'));
        assert_eq!(keys.scale_up, plain_char('w'));
        assert_eq!(keys.scale_down, plain_char('s'));
        assert_eq!(keys.rotate_clockwise, plain_char('d'));
        assert_eq!(keys.rotate_counter_clockwise, plain_char('a'));
        assert_eq!(keys.scale_up_x, plain(KeySymbol::Right));
        assert_eq!(keys.scale_down_x, plain(KeySymbol::Left));
        assert_eq!(keys.scale_up_y, plain(KeySymbol::Up));
        assert_eq!(keys.scale_down_y, plain(KeySymbol::Down));
        assert_eq!(keys.translate_right, plain_char('h'));
        assert_eq!(keys.translate_left, plain_char('f'));
        assert_eq!(keys.translate_up, plain_char('t'));
        assert_eq!(keys.translate_down, plain_char('g'));
        assert_eq!(keys.shear_right_increase, plain_char('l'));
        assert_eq!(keys.shear_right_decrease, plain_char('j'));
        assert_eq!(keys.shear_up_increase, plain_char('i'));
        assert_eq!(keys.shear_up_decrease, plain_char('k'));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("serialize default config");
        let back: Config = serde_json::from_str(&json).expect("deserialize it again");
        assert_eq!(back.appearance.window_width_px, 650);
        assert_eq!(back.keybindings.quit, plain_char('e'));
    }

    #[test]
    fn partial_config_file_fills_in_defaults() {
        let json = r#"{ "appearance": { "window_width_px": 800 } }"#;
        let config: Config = serde_json::from_str(json).expect("partial config is valid");
        assert_eq!(config.appearance.window_width_px, 800);
        assert_eq!(config.appearance.window_height_px, 650);
        assert_eq!(config.performance.min_draw_latency_ms, 16.0);
        assert_eq!(config.keybindings.reset, plain_char('r'));
    }
}
