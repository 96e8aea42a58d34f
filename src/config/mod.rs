//! Configuration management for the moodjournal application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MOODJOURNAL_DIR`: Directory holding the data files (defaults to ~/.local/share/moodjournal)
//! - `MOODJOURNAL_LOG_FORMAT`: `text` (default) or `json`
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, ENV_VAR_HOME, ENV_VAR_MOODJOURNAL_DIR, ENV_VAR_MOODJOURNAL_LOG_FORMAT,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the moodjournal application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use moodjournal::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
///     log_format: "text".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory holding one JSON file per storage key.
    ///
    /// This is loaded from the MOODJOURNAL_DIR environment variable with a fallback
    /// to ~/.local/share/moodjournal if not specified.
    pub data_dir: PathBuf,

    /// Log output format, `text` or `json`.
    pub log_format: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            log_format: LOG_FORMAT_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded using `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - The data directory path is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use moodjournal::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_MOODJOURNAL_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let log_format = env::var(ENV_VAR_MOODJOURNAL_LOG_FORMAT)
            .map(|f| f.trim().to_lowercase())
            .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());

        Ok(Config {
            data_dir,
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Unsupported log format: ..."
    ///
    /// # Examples
    ///
    /// ```
    /// use moodjournal::Config;
    /// use std::path::PathBuf;
    ///
    /// let invalid_config = Config {
    ///     data_dir: PathBuf::from("relative/path"),
    ///     log_format: "text".to_string(),
    /// };
    /// assert!(invalid_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Unsupported log format: '{}'. Use '{}' or '{}'",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    /// Saves and restores the variables a test touches.
    struct EnvGuard(Vec<(&'static str, Option<String>)>);

    impl EnvGuard {
        fn new(keys: &[&'static str]) -> Self {
            let saved = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
            for key in keys {
                env::remove_var(key);
            }
            EnvGuard(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.0 {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    const KEYS: &[&str] = &[
        ENV_VAR_MOODJOURNAL_DIR,
        ENV_VAR_MOODJOURNAL_LOG_FORMAT,
        ENV_VAR_HOME,
    ];

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let config = Config {
            data_dir: PathBuf::from("/home/username/private/moods"),
            log_format: "json".to_string(),
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("/home/username/private/moods"));
        assert!(debug_output.contains("json"));
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir() {
        let _guard = EnvGuard::new(KEYS);
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        env::set_var(ENV_VAR_MOODJOURNAL_DIR, &dir_path);
        let config = Config::load().unwrap();

        assert_eq!(config.data_dir, PathBuf::from(dir_path));
        assert_eq!(config.log_format, "text");
    }

    #[test]
    #[serial]
    fn test_load_default_dir_under_home() {
        let _guard = EnvGuard::new(KEYS);
        env::set_var(ENV_VAR_HOME, "/home/tester");

        let config = Config::load().unwrap();

        assert_eq!(
            config.data_dir,
            PathBuf::from("/home/tester/.local/share/moodjournal")
        );
    }

    #[test]
    #[serial]
    fn test_load_expands_tilde() {
        let _guard = EnvGuard::new(KEYS);
        env::set_var(ENV_VAR_HOME, "/home/tester");
        env::set_var(ENV_VAR_MOODJOURNAL_DIR, "~/moods");

        let config = Config::load().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/home/tester/moods"));
    }

    #[test]
    #[serial]
    fn test_load_log_format_is_normalized() {
        let _guard = EnvGuard::new(KEYS);
        env::set_var(ENV_VAR_MOODJOURNAL_DIR, "/tmp/moods");
        env::set_var(ENV_VAR_MOODJOURNAL_LOG_FORMAT, " JSON ");

        let config = Config::load().unwrap();

        assert_eq!(config.log_format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let config = Config::default();

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Data directory path is empty"));
            }
            _ => panic!("Expected Config error about empty data directory"),
        }
    }

    #[test]
    fn test_validate_relative_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("relative/path"),
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("must be an absolute path"));
            }
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validate_unknown_log_format() {
        let config = Config {
            data_dir: PathBuf::from("/some/path"),
            log_format: "xml".to_string(),
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Unsupported log format"));
                assert!(message.contains("xml"));
            }
            _ => panic!("Expected Config error about log format"),
        }
    }
}
