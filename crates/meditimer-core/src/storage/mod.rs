mod config;
pub mod session_store;

pub use config::{AlertsConfig, AppConfig, TimerConfig};
pub use session_store::{Session, SessionStore};

use std::path::PathBuf;

/// Returns `~/.config/meditimer[-dev]/` based on MEDITIMER_ENV.
///
/// Set MEDITIMER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEDITIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("meditimer-dev")
    } else {
        base_dir.join("meditimer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
