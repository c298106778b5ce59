//! Configuration management

use crate::{Result, VoiceoverError};
use ini::Ini;
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Piper voice, looked up under `<data_dir>/piper/models`
const DEFAULT_PIPER_VOICE: &str = "en_US-lessac-medium";

/// Backend settings for the speech chain
///
/// Backed by an INI file so the cloud backend can be switched off, the Piper
/// model moved, or the external tool set pinned to a directory.
#[derive(Clone)]
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.voiceover.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from ~/.voiceover.cfg, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| VoiceoverError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| VoiceoverError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Load ~/.voiceover.cfg if it exists, else use in-memory defaults
    ///
    /// Unlike [`Config::load`], nothing is written to disk.
    pub fn load_or_default() -> Result<Self> {
        Self::load_existing(Self::config_path())
    }

    /// Read `path` if it exists; defaults bound to `path` otherwise
    pub fn load_existing(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            return Self::load_from(path);
        }

        debug!("No config at {:?}, using defaults", path);
        Ok(Self {
            ini: Self::default_config(),
            path,
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| VoiceoverError::Config(format!("Failed to save config: {}", e)))
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voiceover.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("cloud"))
            .set("enabled", "true")
            .set("lang", "en")
            .set("tld", "com")
            .set("timeout", "30");

        ini.with_section(Some("local")).set("piper", "piper");

        ini.with_section(Some("tools"));

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a value that is only meaningful when set to something non-blank
    fn get_optional(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get_from(Some(section), key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Is the cloud backend allowed to run?
    pub fn cloud_enabled(&self) -> bool {
        self.get_bool("cloud", "enabled", true)
    }

    /// Language code sent to the cloud backend
    pub fn cloud_lang(&self) -> String {
        self.get_string("cloud", "lang", "en")
    }

    /// Top-level domain of the cloud endpoint (com, co.uk, ...)
    pub fn cloud_tld(&self) -> String {
        self.get_string("cloud", "tld", "com")
    }

    /// Full endpoint override for the cloud backend
    pub fn cloud_endpoint(&self) -> Option<String> {
        self.get_optional("cloud", "endpoint")
    }

    /// Per-request timeout for the cloud backend
    pub fn cloud_timeout(&self) -> Duration {
        let secs = self.get_int("cloud", "timeout", 30).max(1);
        Duration::from_secs(secs as u64)
    }

    /// Name or path of the Piper executable
    pub fn piper_binary(&self) -> String {
        self.get_string("local", "piper", "piper")
    }

    /// Piper voice model (.onnx)
    pub fn piper_model(&self) -> PathBuf {
        match self.get_optional("local", "model") {
            Some(model) => PathBuf::from(model),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join("piper")
                .join("models")
                .join(format!("{}.onnx", DEFAULT_PIPER_VOICE)),
        }
    }

    /// Search path for external tools, instead of $PATH
    pub fn tool_path(&self) -> Option<OsString> {
        self.get_optional("tools", "path").map(OsString::from)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ini: Self::default_config(),
            path: Self::config_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.cloud_enabled());
        assert_eq!(config.cloud_lang(), "en");
        assert_eq!(config.cloud_tld(), "com");
        assert_eq!(config.cloud_endpoint(), None);
        assert_eq!(config.cloud_timeout(), Duration::from_secs(30));
        assert_eq!(config.piper_binary(), "piper");
        assert!(config.piper_model().ends_with("en_US-lessac-medium.onnx"));
        assert_eq!(config.tool_path(), None);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let mut config = Config::default();
        config.set("cloud", "endpoint", "   ");
        config.set("tools", "path", "");
        assert_eq!(config.cloud_endpoint(), None);
        assert_eq!(config.tool_path(), None);
    }

    #[test]
    fn test_load_existing_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voiceover.cfg");

        let config = Config::load_existing(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(config.path(), path.as_path());
        assert!(config.cloud_enabled());

        std::fs::write(&path, "[cloud]\nenabled=false\n").unwrap();
        let config = Config::load_existing(&path).unwrap();
        assert!(!config.cloud_enabled());
    }

    #[test]
    fn test_timeout_floor() {
        let mut config = Config::default();
        config.set("cloud", "timeout", "0");
        assert_eq!(config.cloud_timeout(), Duration::from_secs(1));
    }
}
