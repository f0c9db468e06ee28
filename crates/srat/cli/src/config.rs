//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use srat_engine::DEFAULT_FUNDERS;
use std::path::{Path, PathBuf};

/// CLI configuration as read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Dataset JSON file
    pub data_file: Option<PathBuf>,

    /// Directory for stored attachments
    pub attachments_dir: Option<PathBuf>,

    /// Funders offered at submission. An empty list accepts any funder.
    pub funders: Option<Vec<String>>,
}

/// Configuration with every default filled in
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub data_file: PathBuf,
    pub attachments_dir: PathBuf,
    pub funders: Vec<String>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Resolve defaults. `data_override` comes from `--data`.
    pub fn resolve(&self, data_override: Option<&Path>) -> CliResult<Settings> {
        let data_file = match (data_override, &self.data_file) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => Self::default_data_file()?,
        };

        let attachments_dir = match &self.attachments_dir {
            Some(dir) => dir.clone(),
            None => data_file
                .parent()
                .map(|p| p.join("attachments"))
                .unwrap_or_else(|| PathBuf::from("attachments")),
        };

        let funders = self
            .funders
            .clone()
            .unwrap_or_else(|| DEFAULT_FUNDERS.iter().map(|f| f.to_string()).collect());

        Ok(Settings {
            data_file,
            attachments_dir,
            funders,
        })
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("srat").join("config.toml"))
    }

    fn default_data_file() -> CliResult<PathBuf> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| CliError::Config("Cannot find data directory".into()))?;
        Ok(data_dir.join("srat").join("db.json"))
    }
}
