//! Configuration management for vcf-tonnage
//!
//! Config stored at: ~/.config/vcf-tonnage/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vcf_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "vcf-tonnage";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the reference table and calculation history
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Decimal places shown for tonnage
    #[serde(default = "default_tonnage_decimals")]
    pub tonnage_decimals: usize,

    /// Decimal places shown for VCF
    #[serde(default = "default_vcf_decimals")]
    pub vcf_decimals: usize,

    /// Calculations per history page
    #[serde(default = "default_history_page_size")]
    pub history_page_size: usize,

    /// Entries per reference table page
    #[serde(default = "default_table_page_size")]
    pub table_page_size: usize,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_tonnage_decimals() -> usize {
    3
}

fn default_vcf_decimals() -> usize {
    4
}

fn default_history_page_size() -> usize {
    20
}

fn default_table_page_size() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_format: default_output_format(),
            tonnage_decimals: default_tonnage_decimals(),
            vcf_decimals: default_vcf_decimals(),
            history_page_size: default_history_page_size(),
            table_page_size: default_table_page_size(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory holding the reference table snapshot and history
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::DataDirNotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Load config from the default location, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or use defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VCF Tonnage Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:          {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:     {}", self.output_format)?;
        writeln!(f, "Tonnage decimals:  {}", self.tonnage_decimals)?;
        writeln!(f, "VCF decimals:      {}", self.vcf_decimals)?;
        writeln!(f, "History page size: {}", self.history_page_size)?;
        writeln!(f, "Table page size:   {}", self.table_page_size)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_page_size, 20);
        assert_eq!(config.table_page_size, 50);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            output_format: OutputFormat::Json,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_format": "json"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.tonnage_decimals, 3);
        assert_eq!(config.vcf_decimals, 4);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(vcf_types::Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/vcf")),
            ..Config::default()
        };
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/tmp/vcf"));
    }
}
