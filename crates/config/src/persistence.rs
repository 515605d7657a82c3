//! Configuration file discovery, reading and writing.
//!
//! Files are read as JSON5, which also accepts plain JSON, and written back
//! as pretty-printed JSON.
//!
//! # File Locations
//!
//! Searched in order, first match wins:
//!
//! 1. `./tasklane.json5`, `./tasklane.json`
//! 2. `<config dir>/tasklane/config.json5`, `<config dir>/tasklane/config.json`
//!
//! where `<config dir>` is the platform config directory (`~/.config` on
//! Linux).

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["tasklane.json5", "tasklane.json"];

/// Application directory under the platform config directory.
const USER_CONFIG_DIR: &str = "tasklane";

/// File names inside the user config directory, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Lists every location a config file is looked for, in priority order.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tasklane_config::persistence::search_paths;
///
/// let paths = search_paths(Path::new("/work"), Some(Path::new("/home/me/.config")));
/// assert_eq!(paths[0], Path::new("/work/tasklane.json5"));
/// assert_eq!(paths[3], Path::new("/home/me/.config/tasklane/config.json"));
/// ```
#[must_use]
pub fn search_paths(local_dir: &Path, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = config_dir
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).collect()
}

/// Returns the first existing config file among [`search_paths`].
#[must_use]
pub fn find_config_file_in(local_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    search_paths(local_dir, config_dir)
        .into_iter()
        .find(|path| path.is_file())
}

/// Finds the config file for the current directory and user.
///
/// # Examples
///
/// ```no_run
/// use tasklane_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Returns the user configuration directory, typically `~/.config/tasklane/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default user configuration file path.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(USER_FILE_NAMES[0]))
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes a configuration file as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written, or the
/// value cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // comments and trailing commas are fine
                name: "sample",
                value: 42,
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample.name, "sample");
        assert_eq!(sample.value, 42);
    }

    #[test]
    fn read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result: Result<Sample> = read_config_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<Sample> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let sample = Sample {
            name: "sample".to_string(),
            value: 7,
        };

        write_config_file(&path, &sample).unwrap();
        let loaded: Sample = read_config_file(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn local_file_wins_over_user_file() {
        let local = TempDir::new().unwrap();
        let config = TempDir::new().unwrap();
        std::fs::create_dir_all(config.path().join(USER_CONFIG_DIR)).unwrap();
        std::fs::write(config.path().join("tasklane/config.json5"), "{}").unwrap();

        assert_eq!(
            find_config_file_in(local.path(), Some(config.path())),
            Some(config.path().join("tasklane/config.json5"))
        );

        std::fs::write(local.path().join("tasklane.json"), "{}").unwrap();
        assert_eq!(
            find_config_file_in(local.path(), Some(config.path())),
            Some(local.path().join("tasklane.json"))
        );
    }

    #[test]
    fn json5_wins_over_json() {
        let local = TempDir::new().unwrap();
        std::fs::write(local.path().join("tasklane.json"), "{}").unwrap();
        std::fs::write(local.path().join("tasklane.json5"), "{}").unwrap();

        assert_eq!(
            find_config_file_in(local.path(), None),
            Some(local.path().join("tasklane.json5"))
        );
    }

    #[test]
    fn nothing_found() {
        let local = TempDir::new().unwrap();
        assert_eq!(find_config_file_in(local.path(), None), None);
        assert_eq!(search_paths(local.path(), None).len(), 2);
    }
}
