use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Returns the default data path for this environment
    pub fn default_data_path(&self) -> PathBuf {
        match self {
            Self::Dev => PathBuf::from("./data"),
            Self::Prod => PathBuf::from("/data"),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub env: Environment,
    pub port: u16,
    pub data_path: PathBuf,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 8089;

    pub fn new(env: Environment, port: u16, data_path: impl AsRef<Path>) -> Self {
        let data_path = data_path.as_ref().to_path_buf();
        let database_url = format!(
            "sqlite:{}?mode=rwc",
            data_path.join("kaori.db").display()
        );
        Self {
            env,
            port,
            data_path,
            database_url,
            max_connections: 5,
        }
    }

    /// Returns the path to the TOML settings file
    pub fn settings_path(&self) -> PathBuf {
        self.data_path.join("config.toml")
    }
}
