//! Configuration management for the lifeos application.
//!
//! Settings live in a JSON file in the platform data directory. Each
//! configurable area has its own section: focus-session phase lengths and
//! the autosave debounce. `read()` falls back to defaults when no file
//! exists, so a fresh install works without running `init` first.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::session::{PhaseDurations, DEFAULT_FOCUS_SECS, DEFAULT_PLAN_SECS, DEFAULT_REFLECT_SECS};
use crate::msg_error;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Focus-session phase lengths in seconds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FocusConfig {
    pub plan_secs: i64,
    pub focus_secs: i64,
    pub reflect_secs: i64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            plan_secs: DEFAULT_PLAN_SECS,
            focus_secs: DEFAULT_FOCUS_SECS,
            reflect_secs: DEFAULT_REFLECT_SECS,
        }
    }
}

impl FocusConfig {
    pub fn durations(&self) -> PhaseDurations {
        PhaseDurations {
            plan_secs: self.plan_secs,
            focus_secs: self.focus_secs,
            reflect_secs: self.reflect_secs,
        }
    }
}

/// Debounce settings for the draft autosave.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AutosaveConfig {
    /// Stability window in milliseconds before a draft is written.
    pub delay_ms: u64,
    pub enabled: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { delay_ms: 2000, enabled: true }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub focus: Option<FocusConfig>,
    pub autosave: Option<AutosaveConfig>,
}

impl Config {
    /// Loads the configuration file, or returns defaults when none exists.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| {
            msg_error!(Message::ConfigParseError);
            e
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive configuration wizard.
    pub fn init() -> Result<Self> {
        let current = Config::read()?;
        let focus = current.focus.unwrap_or_default();
        let autosave = current.autosave.unwrap_or_default();

        let theme = ColorfulTheme::default();

        let plan_secs: i64 = Input::with_theme(&theme)
            .with_prompt("Plan phase length (seconds)")
            .default(focus.plan_secs)
            .interact_text()?;
        let focus_secs: i64 = Input::with_theme(&theme)
            .with_prompt("Focus phase length (seconds)")
            .default(focus.focus_secs)
            .interact_text()?;
        let reflect_secs: i64 = Input::with_theme(&theme)
            .with_prompt("Reflect phase length (seconds)")
            .default(focus.reflect_secs)
            .interact_text()?;

        let autosave_enabled = Confirm::with_theme(&theme)
            .with_prompt("Autosave drafts while editing?")
            .default(autosave.enabled)
            .interact()?;
        let delay_ms: u64 = Input::with_theme(&theme)
            .with_prompt("Autosave stability delay (milliseconds)")
            .default(autosave.delay_ms)
            .interact_text()?;

        Ok(Config {
            focus: Some(FocusConfig {
                plan_secs,
                focus_secs,
                reflect_secs,
            }),
            autosave: Some(AutosaveConfig {
                delay_ms,
                enabled: autosave_enabled,
            }),
        })
    }
}
