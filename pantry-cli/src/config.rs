use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pantry_core::{HttpOracle, Oracle, OracleConfig, DEFAULT_STORE_FILE};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Oracle (text-completion endpoint) configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OracleSettings {
    /// Completion endpoint URL (e.g., "https://llm.example.com/v1/complete")
    pub url: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Model name forwarded to the endpoint
    pub model: Option<String>,
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: Option<u64>,
}

impl OracleSettings {
    /// Returns true if an oracle endpoint is configured
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the grocery document JSON file
    pub data_path: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Oracle configuration
    pub oracle: OracleSettings,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_path: Option<PathBuf>,
    oracle: Option<OracleSettings>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_data_path = Self::default_data_dir().join(DEFAULT_STORE_FILE);

        // Start with defaults
        let mut data_path = ConfigValue::new(default_data_path, ConfigSource::Default);
        let mut config_file = None;
        let mut oracle = OracleSettings::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(file_path) = file_config.data_path {
                // Resolve relative paths against config file's directory
                let resolved = if file_path.is_relative() {
                    path.parent()
                        .map(|p| p.join(&file_path))
                        .unwrap_or(file_path)
                } else {
                    file_path
                };
                data_path = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(oracle_settings) = file_config.oracle {
                oracle = oracle_settings;
            }
        }

        // Apply environment variable overrides
        if let Ok(path) = std::env::var("PANTRY_DATA_PATH") {
            data_path = ConfigValue::new(PathBuf::from(path), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("PANTRY_ORACLE_URL") {
            oracle.url = Some(url);
        }
        if let Ok(key) = std::env::var("PANTRY_ORACLE_API_KEY") {
            oracle.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("PANTRY_ORACLE_MODEL") {
            oracle.model = Some(model);
        }

        Ok(Self {
            data_path,
            config_file,
            oracle,
        })
    }

    /// Build the oracle handle from config, if one is configured.
    ///
    /// A misconfigured oracle degrades to no oracle (advisory text falls
    /// back) rather than failing the command.
    pub fn build_oracle(&self) -> Option<Box<dyn Oracle>> {
        let url = self.oracle.url.clone()?;
        let oracle_config = OracleConfig {
            url,
            api_key: self.oracle.api_key.clone(),
            model: self.oracle.model.clone(),
            timeout: Duration::from_secs(self.oracle.timeout_secs.unwrap_or(15)),
        };
        match HttpOracle::new(oracle_config) {
            Ok(oracle) => Some(Box::new(oracle)),
            Err(e) => {
                tracing::warn!("Failed to build oracle client: {}", e);
                None
            }
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/pantry/
    /// - macOS: ~/Library/Application Support/pantry/
    /// - Windows: %APPDATA%/pantry/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pantry")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/pantry/
    /// - macOS: ~/Library/Application Support/pantry/
    /// - Windows: %APPDATA%/pantry/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pantry")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config
            .data_path
            .value
            .to_string_lossy()
            .contains(DEFAULT_STORE_FILE));
        assert_eq!(config.data_path.source, ConfigSource::Default);
        assert!(!config.oracle.is_configured());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_path: /custom/path/grocery.json").unwrap();
        writeln!(file, "oracle:").unwrap();
        writeln!(file, "  url: https://llm.example.com/v1/complete").unwrap();
        writeln!(file, "  model: house-llm").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.data_path.value,
            PathBuf::from("/custom/path/grocery.json")
        );
        assert_eq!(config.data_path.source, ConfigSource::File);
        assert!(config.oracle.is_configured());
        assert_eq!(config.oracle.model.as_deref(), Some("house-llm"));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_path_resolved_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_path: data/grocery.json").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.data_path.value,
            temp_dir.path().join("data/grocery.json")
        );
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_path: /fromfile/grocery.json").unwrap();

        std::env::set_var("PANTRY_DATA_PATH", "/fromenv/grocery.json");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(
            config.data_path.value,
            PathBuf::from("/fromenv/grocery.json")
        );
        assert_eq!(config.data_path.source, ConfigSource::Environment);

        std::env::remove_var("PANTRY_DATA_PATH");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_build_oracle_requires_url() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap();
        assert!(config.build_oracle().is_none());
    }
}
