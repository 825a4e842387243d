use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::models::Settings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub struct SettingsService {
    settings_path: PathBuf,
    settings: Settings,
}

impl SettingsService {
    /// Initialize the settings service.
    /// Creates default settings file if it doesn't exist.
    pub async fn new(config: &Config) -> Result<Self, SettingsError> {
        let settings_path = config.settings_path();
        let settings = Self::load_or_create(&settings_path).await?;

        Ok(Self {
            settings_path,
            settings,
        })
    }

    /// Load settings from file, or create with defaults if file doesn't exist.
    async fn load_or_create(path: &Path) -> Result<Settings, SettingsError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Ensure parent directory exists
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let default = Settings::default();
                let toml_str = toml::to_string_pretty(&default)?;
                tokio::fs::write(path, toml_str).await?;
                tracing::info!("Created default settings at {}", path.display());
                Ok(default)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get current settings (no I/O).
    pub fn get(&self) -> Settings {
        self.settings.clone()
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}
