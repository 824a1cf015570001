use crate::error::{OfwscanError, Result};
use crate::utils::file::WordSize;
use dirs::config_dir;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_DEVTREE_ROOT: &str = "/proc/device-tree";
const SYSTEM_CONFIG_PATH: &str = "/usr/share/ofwscan/config.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub devtree: DevtreeConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct DevtreeConfig {
    pub root: String,
    /// Bytes per binary word; the host `unsigned long` when unset
    pub word_size: Option<usize>,
}

impl Default for DevtreeConfig {
    fn default() -> Self {
        DevtreeConfig {
            root: DEFAULT_DEVTREE_ROOT.to_string(),
            word_size: None,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

/// Where a scan reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub word_size: WordSize,
}

impl ScanConfig {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        ScanConfig {
            root: root.into(),
            word_size: WordSize::native(),
        }
    }

    pub fn with_word_size(mut self, word_size: WordSize) -> Self {
        self.word_size = word_size;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig::new(DEFAULT_DEVTREE_ROOT)
    }
}

impl Config {
    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::de::from_str(data)?)
    }

    pub fn scan_config(&self) -> Result<ScanConfig> {
        let root = shellexpand::tilde(self.devtree.root.trim()).to_string();
        if root.is_empty() {
            return Err(OfwscanError::Config("devtree.root is empty".to_string()));
        }

        let word_size = match self.devtree.word_size {
            Some(bytes) => WordSize::from_bytes(bytes)?,
            None => WordSize::native(),
        };

        Ok(ScanConfig::new(root).with_word_size(word_size))
    }
}

/// User config if present, else the system-wide one
pub fn config_path() -> Option<PathBuf> {
    let user_config_path = config_dir().map(|p| p.join("ofwscan/config.toml"));

    match user_config_path {
        Some(path) if path.exists() => Some(path),
        _ if Path::new(SYSTEM_CONFIG_PATH).exists() => Some(SYSTEM_CONFIG_PATH.into()),
        _ => None,
    }
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config_data = fs::read_to_string(path.as_ref())?;
    Config::from_toml(&config_data)
}

/// Load the configuration, falling back to built-in defaults when no file exists
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            load_config_from(path)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.devtree.root, DEFAULT_DEVTREE_ROOT);
        assert_eq!(config.logging.level, "warn");

        let scan = config.scan_config().unwrap();
        assert_eq!(scan, ScanConfig::default());
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_toml(
            "[devtree]\nroot = \"/tmp/dt\"\nword_size = 4\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let scan = config.scan_config().unwrap();
        assert_eq!(scan.root, PathBuf::from("/tmp/dt"));
        assert_eq!(scan.word_size, WordSize::Four);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_word_size() {
        let config = Config::from_toml("[devtree]\nword_size = 3\n").unwrap();
        assert!(matches!(config.scan_config(), Err(OfwscanError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml("[devtree\nroot = 1"),
            Err(OfwscanError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[devtree]\nword_size = 8\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.devtree.word_size, Some(8));
        assert!(load_config_from(dir.path().join("missing.toml")).is_err());
    }
}
