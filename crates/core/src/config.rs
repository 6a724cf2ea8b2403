use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::Apc40Mapping;
use crate::midi::DeviceMode;

const CONFIG_DIR_NAME: &str = "apc-bridge";
const CONFIG_FILE_NAME: &str = "config.json";

/// Bridge settings. Port names and startup behaviour only; the CC mapping is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hardware port the controller sends on
    pub input_port: String,
    /// Port translated events are written to
    pub output_port: String,
    /// Client name registered with the MIDI backend
    pub client_name: String,

    /// Log every translated event
    pub log_events: bool,

    // Mode switch handshake
    pub sysex_enabled: bool,
    pub sysex_port: String,
    pub device_mode: DeviceMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_port: Apc40Mapping::device_name().to_string(),
            output_port: Apc40Mapping::virtual_port_name().to_string(),
            client_name: "apc-bridge".to_string(),
            log_events: true,
            sysex_enabled: false,
            sysex_port: Apc40Mapping::device_name().to_string(),
            device_mode: DeviceMode::default(),
        }
    }
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

/// Loads and stores bridge settings as JSON.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
    /// Creation time of the file on disk, kept across saves.
    created_at: Option<String>,
}

impl ConfigManager {
    /// Create a new configuration manager.
    /// Without a path, uses `<config dir>/apc-bridge/config.json`, or
    /// `config.json` in the working directory when no config dir exists.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_path);

        Self {
            config_path,
            settings: Settings::default(),
            created_at: None,
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load settings from the configuration file.
    /// Writes and returns defaults if the file doesn't exist yet.
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            log::info!(
                "No config at {}, writing defaults",
                self.config_path.display()
            );
            self.save()?;
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Config file version {} doesn't match application version {}. Using defaults for new settings.",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        self.settings = config_file.settings;
        self.created_at = Some(config_file.created_at).filter(|created| !created.is_empty());
        Ok(self.settings.clone())
    }

    /// Save current settings to the configuration file.
    /// `created_at` is set on the first save and preserved afterwards.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let created_at = self.created_at.get_or_insert_with(|| now.clone()).clone();
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at,
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if settings.input_port.trim().is_empty() {
            errors.push("input_port must not be empty".to_string());
        }
        if settings.output_port.trim().is_empty() {
            errors.push("output_port must not be empty".to_string());
        }
        if settings.input_port == settings.output_port {
            errors.push("input_port and output_port must differ".to_string());
        }
        if settings.client_name.trim().is_empty() {
            errors.push("client_name must not be empty".to_string());
        }
        if settings.sysex_enabled && settings.sysex_port.trim().is_empty() {
            errors.push("sysex_port must be set when sysex is enabled".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    ReadError(String),
    WriteError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(msg) => write!(f, "Failed to read config file: {}", msg),
            ConfigError::WriteError(msg) => write!(f, "Failed to write config file: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigError::SerializeError(msg) => write!(f, "Failed to serialize config: {}", msg),
            ConfigError::ValidationError(errors) => {
                write!(f, "Config validation errors: {}", errors.join(", "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}
