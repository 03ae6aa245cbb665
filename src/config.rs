use serde::Deserialize;

use crate::services::import_service::ImportMode;
use crate::services::statbotics::STATBOTICS_BASE_URL;
use crate::services::tba::TBA_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub board_path: String,
    pub tba_base_url: String,
    pub tba_auth_key: String,
    pub statbotics_base_url: String,
    pub import_mode: ImportMode,
    pub import_analytics: bool,
    pub save_debounce_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self {
            board_path: std::env::var("BOARD_PATH").unwrap_or_else(|_| "board.json".into()),
            tba_base_url: std::env::var("TBA_BASE_URL").unwrap_or_else(|_| TBA_BASE_URL.into()),
            tba_auth_key: std::env::var("TBA_AUTH_KEY").unwrap_or_default(),
            statbotics_base_url: std::env::var("STATBOTICS_BASE_URL")
                .unwrap_or_else(|_| STATBOTICS_BASE_URL.into()),
            import_mode: std::env::var("IMPORT_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            import_analytics: std::env::var("IMPORT_ANALYTICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            save_debounce_ms: std::env::var("SAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_path: "board.json".into(),
            tba_base_url: TBA_BASE_URL.into(),
            tba_auth_key: String::new(),
            statbotics_base_url: STATBOTICS_BASE_URL.into(),
            import_mode: ImportMode::default(),
            import_analytics: false,
            save_debounce_ms: 150,
        }
    }
}
