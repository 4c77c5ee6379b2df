//! Connection configuration
//!
//! One JSON object per local user at `~/.sncli/config.json`, overwritten
//! wholesale by every successful `connect`.

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".sncli";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub instance: String,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load configuration; a missing file is an error pointing at `connect`
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Err(StorageError::ConfigNotFound {
                path: config_path.to_string_lossy().to_string(),
            });
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| StorageError::ConfigParse {
                message: format!("Failed to parse config file: {}", e),
            })?;

        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration, creating the parent directory if needed
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                create_private_dir(parent)?;
            }
        }

        let json_content =
            serde_json::to_string_pretty(self).map_err(|e| StorageError::ConfigParse {
                message: format!("Failed to serialize config: {}", e),
            })?;

        write_private_file(&config_path, json_content.as_bytes())?;
        log::debug!("saved config to {}", config_path.display());
        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::HomeDirNotFound)?;
        Ok(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|source| io_error(dir, source))
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))
}

#[cfg(unix)]
fn write_private_file(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|source| io_error(path, source))?;
    file.write_all(content)
        .map_err(|source| io_error(path, source))
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|source| io_error(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            instance: "dev1".to_string(),
            username: "admin".to_string(),
            password: "s3cr3t".to_string(),
        }
    }

    #[test]
    fn test_config_save_load_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = sample_config();
        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded = Config::load(Some(config_path)).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_layout() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        sample_config()
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(raw["instance"], "dev1");
        assert_eq!(raw["username"], "admin");
        assert_eq!(raw["password"], "s3cr3t");
    }

    #[test]
    fn test_save_overwrites_previous_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");

        sample_config().save(Some(config_path.clone())).unwrap();
        let replacement = Config {
            instance: "prod".to_string(),
            username: "svc".to_string(),
            password: "x".to_string(),
        };
        replacement.save(Some(config_path.clone())).unwrap();

        assert_eq!(Config::load(Some(config_path)).unwrap(), replacement);
    }

    #[cfg(unix)]
    #[test]
    fn test_config_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("sub").join("config.json");
        sample_config().save(Some(config_path.clone())).unwrap();

        let mode = fs::metadata(&config_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let result = Config::load(Some(temp_dir.path().join("absent.json")));
        assert!(matches!(result, Err(StorageError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "not json").unwrap();
        let result = Config::load(Some(config_path));
        assert!(matches!(result, Err(StorageError::ConfigParse { .. })));
    }
}
