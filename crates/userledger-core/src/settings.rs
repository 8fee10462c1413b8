//! Application settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::store::DEFAULT_STORE_FILE;

/// Directory name used under the platform config and data directories.
const APP_DIR: &str = "userledger";

/// Settings file name inside the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Environment variable that overrides the store path.
pub const STORE_ENV_VAR: &str = "USERLEDGER_STORE";

/// Settings that persist across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the account store file.
    pub store_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl Settings {
    /// Default settings file location (`<config_dir>/userledger/settings.json`).
    #[must_use]
    pub fn default_location() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(SETTINGS_FILE)
    }

    /// Store path inside the per-user data directory.
    #[must_use]
    pub fn user_data_store() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(DEFAULT_STORE_FILE)
    }

    /// Load settings from a JSON file, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }

    /// Pick the store path: explicit override, then `USERLEDGER_STORE`,
    /// then the configured path.
    #[must_use]
    pub fn resolve_store_path(&self, explicit: Option<&Path>) -> PathBuf {
        let from_env = std::env::var_os(STORE_ENV_VAR).map(PathBuf::from);
        self.resolve_store_path_with(explicit, from_env)
    }

    fn resolve_store_path_with(
        &self,
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
    ) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
            .unwrap_or_else(|| self.store_path.clone())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_store_path() {
        assert_eq!(Settings::default().store_path, PathBuf::from("usuario.json"));
    }

    #[test]
    fn default_locations_use_app_dir() {
        assert!(Settings::default_location().ends_with("userledger/settings.json"));
        assert!(Settings::user_data_store().ends_with("userledger/usuario.json"));
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_reads_store_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"store_path": "/var/lib/userledger/accounts.json"}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(
            settings.store_path,
            PathBuf::from("/var/lib/userledger/accounts.json")
        );
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "store_path = 1").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Serde(_))));
    }

    mod resolve_tests {
        use super::*;

        fn settings() -> Settings {
            Settings {
                store_path: PathBuf::from("configured.json"),
            }
        }

        #[test]
        fn explicit_wins() {
            let path = settings().resolve_store_path_with(
                Some(Path::new("flag.json")),
                Some(PathBuf::from("env.json")),
            );
            assert_eq!(path, PathBuf::from("flag.json"));
        }

        #[test]
        fn env_beats_settings() {
            let path = settings().resolve_store_path_with(None, Some(PathBuf::from("env.json")));
            assert_eq!(path, PathBuf::from("env.json"));
        }

        #[test]
        fn empty_env_is_ignored() {
            let path = settings().resolve_store_path_with(None, Some(PathBuf::new()));
            assert_eq!(path, PathBuf::from("configured.json"));
        }

        #[test]
        fn falls_back_to_settings() {
            let path = settings().resolve_store_path_with(None, None);
            assert_eq!(path, PathBuf::from("configured.json"));
        }
    }
}
