use crate::error::{AppError, Result};
use crate::sheets::SheetLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "score-keeper";
const SCORE_FILE: &str = "scores.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// OAuth client JSON downloaded from the Google Cloud console. Takes
    /// precedence over `client_id`/`client_secret`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_file: Option<PathBuf>,
}

impl GoogleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.client_secret_file.is_some() {
            return Ok(());
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AppError::Config(
                "Google client_id and client_secret (or client_secret_file) must be set in config file"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SheetConfig {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default = "default_first_column")]
    pub first_column: String,
    #[serde(default = "default_last_column")]
    pub last_column: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            sheet_name: default_sheet_name(),
            header_rows: default_header_rows(),
            first_column: default_first_column(),
            last_column: default_last_column(),
        }
    }
}

impl SheetConfig {
    pub fn spreadsheet_id(&self) -> Result<&str> {
        match self.spreadsheet_id.trim() {
            "" => Err(AppError::Config(
                "sheet.spreadsheet_id must be set in config file".to_string(),
            )),
            id => Ok(id),
        }
    }

    /// Layout constants for the score table, rejecting column bounds that
    /// are not exactly the `name`/`score` pair wide.
    pub fn layout(&self) -> Result<SheetLayout> {
        let layout = SheetLayout {
            sheet_name: self.sheet_name.clone(),
            header_rows: self.header_rows,
            first_column: self.first_column.trim().to_ascii_uppercase(),
            last_column: self.last_column.trim().to_ascii_uppercase(),
        };
        layout.validate()?;

        Ok(layout)
    }
}

fn default_sheet_name() -> String {
    "Score".to_string()
}

fn default_header_rows() -> usize {
    1
}

fn default_first_column() -> String {
    "A".to_string()
}

fn default_last_column() -> String {
    "B".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LocalConfig {
    /// Score document location, defaults to the XDG data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl LocalConfig {
    pub fn score_file(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Config::data_file(SCORE_FILE),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }

    /// Get the cache directory path
    pub fn cache_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_cache_home()
            .ok_or_else(|| AppError::Config("Failed to determine cache directory".to_string()))
    }

    /// Get a cache file path
    pub fn cache_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_cache_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create cache file path: {}", e)))
    }

    /// Get a data file path
    pub fn data_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_data_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create data file path: {}", e)))
    }
}
