use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::{DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_USER_ID};
use crate::conversation::GREETING;

/// RGB color represented as a 3-element array.
pub type Rgb = [u8; 3];

/// Environment variable overriding `backend.base_url`.
pub const ENV_BASE_URL: &str = "APPOINTMENT_CHAT_URL";

/// Environment variable overriding `backend.user_id`.
pub const ENV_USER_ID: &str = "APPOINTMENT_CHAT_USER";

/// Command line arguments.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    pub url: Option<String>,

    /// User id sent with every message
    #[arg(long)]
    pub user: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.backend.base_url = url.clone();
        }
        if let Some(user) = &self.user {
            config.backend.user_id = user.clone();
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
    }
}

/// Backend section of the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackendConfigFile {
    /// Scheme, host and port of the agent service
    pub base_url: String,
    /// Path of the message endpoint
    pub endpoint: String,
    /// Identity sent with each message
    pub user_id: String,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
    /// Treat non-2xx responses as failures
    pub check_status: bool,
}

impl Default for BackendConfigFile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_secs: None,
            check_status: true,
        }
    }
}

/// Color configuration for the UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Chat area gradient start color (Purple by default)
    pub chat_gradient_start: Rgb,
    /// Chat area gradient end color (Blue by default)
    pub chat_gradient_end: Rgb,
    /// Input area gradient start color (Green by default)
    pub input_gradient_start: Rgb,
    /// Input area gradient end color (Cyan by default)
    pub input_gradient_end: Rgb,
    pub user_bubble_bg: Rgb,
    pub user_bubble_fg: Rgb,
    pub agent_bubble_bg: Rgb,
    pub agent_bubble_fg: Rgb,
    /// Status: Ready
    pub status_ready: Rgb,
    /// Status: Sending
    pub status_sending: Rgb,
    /// Status: Offline
    pub status_offline: Rgb,
    /// Main background color
    pub bg_primary: Rgb,
    /// Input background color
    pub bg_input: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            chat_gradient_start: [147, 51, 234],  // Purple
            chat_gradient_end: [59, 130, 246],    // Blue
            input_gradient_start: [16, 185, 129], // Green
            input_gradient_end: [6, 182, 212],    // Cyan
            user_bubble_bg: [11, 99, 214],
            user_bubble_fg: [255, 255, 255],
            agent_bubble_bg: [241, 241, 241],
            agent_bubble_fg: [17, 17, 17],
            status_ready: [100, 255, 100],
            status_sending: [100, 200, 255],
            status_offline: [255, 100, 100],
            bg_primary: [20, 20, 25],
            bg_input: [30, 30, 35],
        }
    }
}

/// Behavior configuration for the UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Agent message shown at start-up and after a reset
    pub greeting: String,
    /// Number of lines to scroll with Page Up/Down
    pub scroll_page_size: usize,
    /// Idle polling interval in milliseconds
    pub idle_poll_ms: u64,
    /// Drop replies to requests issued before the last reset
    pub discard_stale_replies: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            greeting: GREETING.to_string(),
            scroll_page_size: 10,
            idle_poll_ms: 50,
            discard_stale_replies: true,
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path (defaults to the user cache directory)
    pub file: Option<PathBuf>,
    /// Filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfigFile,
    pub behavior: BehaviorConfig,
    pub colors: ColorConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns the default config file path: ~/.config/appointment-chat/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("appointment-chat").join("config.toml"))
    }

    /// Load configuration from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_from_path(&path).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(user) = lookup(ENV_USER_ID).filter(|v| !v.is_empty()) {
            self.backend.user_id = user;
        }
    }
}

impl ColorConfig {
    /// Convert an RGB array to a tuple for gradient math.
    pub fn to_tuple(rgb: &Rgb) -> (u8, u8, u8) {
        (rgb[0], rgb[1], rgb[2])
    }

    /// Convert an RGB array to a ratatui Color.
    pub fn to_color(rgb: &Rgb) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Get chat gradient colors as tuples.
    pub fn chat_gradient(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        (
            Self::to_tuple(&self.chat_gradient_start),
            Self::to_tuple(&self.chat_gradient_end),
        )
    }

    /// Get input gradient colors as tuples.
    pub fn input_gradient(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        (
            Self::to_tuple(&self.input_gradient_start),
            Self::to_tuple(&self.input_gradient_end),
        )
    }
}
