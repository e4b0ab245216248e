mod config;
pub mod database;
pub mod migrations;

pub use config::{
    Config, NotificationsConfig, PreferencesConfig, ProfileConfig, RetentionConfig,
    TemperatureUnit,
};
pub use database::{Database, ReadingStats, StoredReading};

use std::path::PathBuf;

/// Returns the Luna data directory, creating it if needed.
///
/// `LUNA_DATA_DIR` wins when set. Otherwise `~/.config/luna`, or
/// `~/.config/luna-dev` when `LUNA_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("LUNA_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LUNA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("luna-dev")
            } else {
                base_dir.join("luna")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
