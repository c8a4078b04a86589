use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::optimize::{DEFAULT_PROTECTED_NAME, DEFAULT_TARGET_BYTES};
use crate::system::sampler::DEFAULT_MEASUREMENT_WINDOW;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub optimizer: OptimizerConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Delay between the end of one resource sample and the start of the next.
    pub sample_interval_ms: u64,
    pub measurement_window_ms: u64,
    pub theme: String,
    pub history_length: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            sample_interval_ms: 1000,
            measurement_window_ms: DEFAULT_MEASUREMENT_WINDOW.as_millis() as u64,
            theme: "dark".to_string(),
            history_length: 60,
            log_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub target_mb: u64,
    pub protected_names: Vec<String>,
    pub protect_self: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            target_mb: DEFAULT_TARGET_BYTES / (1024 * 1024),
            protected_names: vec![DEFAULT_PROTECTED_NAME.to_string()],
            protect_self: true,
        }
    }
}

impl OptimizerConfig {
    pub fn target_bytes(&self) -> u64 {
        self.target_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub kill: String,
    pub optimize: String,
    pub refresh: String,
    pub next_tab: String,
    pub prev_tab: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            kill: "k".to_string(),
            optimize: "o".to_string(),
            refresh: "r".to_string(),
            next_tab: "Tab".to_string(),
            prev_tab: "BackTab".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parses a keybind name: a single character or one of the named keys.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pcmanager").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
