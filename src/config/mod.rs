pub mod loader;

use log::{debug, info, warn};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime};

use crate::game::{FRAME_INTERVAL_MS, GRAVITY_INTERVAL_MS, UPDATE_INTERVAL_MS};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

// Modification time of the config file the last time it was loaded
static LAST_MODIFIED: once_cell::sync::Lazy<Mutex<Option<SystemTime>>> =
    once_cell::sync::Lazy::new(|| Mutex::new(None));

// Time to wait between checking for config file changes
const CONFIG_CHECK_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gravity: GravityConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    #[serde(skip)]
    last_checked: Option<Instant>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            timing: TimingConfig::default(),
            display: DisplayConfig::default(),
            last_checked: Some(Instant::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub interval_ms: u64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            interval_ms: GRAVITY_INTERVAL_MS,
        }
    }
}

impl GravityConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub frame_interval_ms: u64,
    pub update_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: FRAME_INTERVAL_MS,
            update_interval_ms: UPDATE_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_grid_lines: bool,
    // Single color for every occupied cell; per-shape colors when unset
    pub fill_color: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
            fill_color: None,
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn fill_color(&self) -> Option<Color> {
        let name = self.fill_color.as_deref()?;
        match name.parse::<Color>() {
            Ok(color) => Some(color),
            Err(_) => {
                warn!("Ignoring unknown fill color {name:?}");
                None
            }
        }
    }
}

impl Config {
    /// A copy of the active global configuration.
    #[must_use]
    pub fn current() -> Self {
        CONFIG
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn install(config: Config) {
        let mut current = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
        *current = config;
        current.last_checked = Some(Instant::now());
        *LAST_MODIFIED.lock().unwrap_or_else(PoisonError::into_inner) =
            loader::config_file_modified();
    }

    // Check if the config needs to be reloaded and reload if necessary
    pub fn check_and_reload() -> bool {
        let now = Instant::now();
        let should_check = {
            let config = CONFIG.read().unwrap_or_else(PoisonError::into_inner);
            config
                .last_checked
                .is_none_or(|last| now.duration_since(last) > CONFIG_CHECK_INTERVAL)
        };

        if !should_check {
            return false;
        }

        CONFIG
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .last_checked = Some(now);

        let modified = loader::config_file_modified();
        let unchanged = *LAST_MODIFIED.lock().unwrap_or_else(PoisonError::into_inner) == modified;
        if unchanged {
            debug!("Config file unchanged");
            return false;
        }

        Self::force_reload()
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        match loader::load_config_from_file() {
            Ok(new_config) => {
                info!("Configuration reloaded");
                Self::install(new_config);
                true
            }
            Err(e) => {
                warn!("Failed to reload configuration: {e}");
                false
            }
        }
    }
}
