//! Settings read from `config.yml`.
//!
//! The file lives in `~/.config/blueschema` unless another directory is given
//! on the command line, and names where the document store lives, the log
//! level and the export file name. Every key is optional.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::export::DEFAULT_FILE_NAME;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/blueschema";

/// Settings in effect for this run.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub export_file_name: String,
    file_path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_export_file_name")]
    export_file_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Config {
    pub fn new() -> Config {
        Config {
            data_dir: None,
            log_level: default_log_level(),
            export_file_name: default_export_file_name(),
            file_path: None,
        }
    }

    /// Read `config.yml` from `custom_path`, or from the default directory,
    /// creating the directory if needed. A missing file keeps the defaults
    /// and is written out with them.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => PathBuf::from(path),
            None => Config::default_path()?,
        };
        create_dir(&dir_path)?;

        let file_path = dir_path.join(FILE_NAME);
        let found = file_path.exists();
        if found {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: e.to_string(),
            })?;
            let settings: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.data_dir = settings.data_dir;
            self.log_level = settings.log_level;
            self.export_file_name = settings.export_file_name;
        }
        self.file_path = Some(file_path);

        if !found {
            info!("Writing default settings to {}/{}", dir_path.display(), FILE_NAME);
            self.save()?;
        }
        Ok(())
    }

    /// Write the current settings back to the file they were loaded from.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let settings = FileSpec {
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.clone(),
            export_file_name: self.export_file_name.clone(),
        };
        let content = serde_yaml::to_string(&settings)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        if let Some(parent) = file_path.parent() {
            create_dir(parent)?;
        }
        fs::write(file_path, content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the path of the loaded configuration file, if any.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the directory the document store writes to: the configured
    /// data directory, else the directory holding the configuration file.
    ///
    pub fn store_dir(&self) -> Result<PathBuf, AppError> {
        if let Some(data_dir) = &self.data_dir {
            return Ok(data_dir.clone());
        }
        match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) => Ok(parent.to_path_buf()),
            None => Config::default_path(),
        }
    }

    /// Parses the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    fn default_path() -> Result<PathBuf, AppError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_DIRECTORY_PATH))
            .ok_or_else(|| ConfigError::HomeDirectoryNotFound.into())
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| ConfigError::CreateDirectoryFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        let written = fs::read_to_string(dir.path().join(FILE_NAME)).unwrap();
        assert!(written.contains("log_level: info"));
        assert!(!written.contains("data_dir"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.export_file_name, DEFAULT_FILE_NAME);
        assert!(config.data_dir.is_none());
        assert_eq!(
            config.file_path(),
            Some(dir.path().join(FILE_NAME).as_path())
        );
        assert_eq!(config.store_dir().unwrap(), dir.path());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        config.data_dir = Some(dir.path().join("data"));
        config.log_level = "debug".to_string();
        config.export_file_name = "schema.json".to_string();
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str()).unwrap();
        assert_eq!(reloaded.data_dir, Some(dir.path().join("data")));
        assert_eq!(reloaded.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(reloaded.export_file_name, "schema.json");
        assert_eq!(reloaded.store_dir().unwrap(), dir.path().join("data"));
    }

    #[test]
    fn partial_file_uses_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "log_level: warn\n").unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Warn);
        assert_eq!(config.export_file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "log_level: [unterminated\n").unwrap();
        let mut config = Config::new();
        let error = config.load(dir.path().to_str()).unwrap_err();
        assert!(matches!(
            error,
            AppError::Config(ConfigError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn save_without_load_fails() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }

    #[test]
    fn invalid_log_level_is_reported() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::new()
        };
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
