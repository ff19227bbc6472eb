//! File logging.
//!
//! The terminal belongs to the UI, so log lines go to a file instead of
//! stdout/stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Default log file: ~/.cache/appointment-chat/appointment-chat.log
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("appointment-chat").join("appointment-chat.log"))
}

/// Where logs will be written for this config.
pub fn resolve_log_path(config: &LoggingConfig) -> Option<PathBuf> {
    config.file.clone().or_else(default_log_path)
}

/// Build the level filter. RUST_LOG wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns the log path on success; logging
/// stays off when the file cannot be opened.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    let path = resolve_log_path(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(config))
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_path_prefers_config() {
        let config = LoggingConfig {
            file: Some(PathBuf::from("/tmp/chat.log")),
            level: "debug".to_string(),
        };
        assert_eq!(resolve_log_path(&config), Some(PathBuf::from("/tmp/chat.log")));
    }

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("appointment-chat/appointment-chat.log"));
        }
    }
}
