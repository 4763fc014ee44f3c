//! Application configuration, persisted as JSON in the data directory.

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::ConfigError, places::AddPolicy};

pub const CONFIG_FILE_NAME: &str = "travelupa.json";

const CONFIG_VERSION: u32 = 1;

const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
const DEFAULT_STORAGE_URL: &str = "https://firebasestorage.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Log level for our own crates; `RUST_LOG` overrides it entirely
	#[serde(default = "default_log_level")]
	pub log_level: String,

	/// Upload picked photos to the blob store before saving a place
	#[serde(default = "default_upload_photos")]
	pub upload_photos: bool,

	#[serde(default)]
	pub firebase: FirebaseConfig,
}

/// Where the Firebase project lives. The service URLs only change when pointing at the
/// local emulator suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
	#[serde(default)]
	pub project_id: String,
	#[serde(default)]
	pub api_key: String,
	/// Defaults to `<project_id>.appspot.com` when empty
	#[serde(default)]
	pub storage_bucket: String,
	#[serde(default = "default_identity_url")]
	pub identity_url: String,
	#[serde(default = "default_firestore_url")]
	pub firestore_url: String,
	#[serde(default = "default_storage_url")]
	pub storage_url: String,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_upload_photos() -> bool {
	true
}

fn default_identity_url() -> String {
	DEFAULT_IDENTITY_URL.to_string()
}

fn default_firestore_url() -> String {
	DEFAULT_FIRESTORE_URL.to_string()
}

fn default_storage_url() -> String {
	DEFAULT_STORAGE_URL.to_string()
}

impl Default for FirebaseConfig {
	fn default() -> Self {
		Self {
			project_id: String::new(),
			api_key: String::new(),
			storage_bucket: String::new(),
			identity_url: default_identity_url(),
			firestore_url: default_firestore_url(),
			storage_url: default_storage_url(),
		}
	}
}

impl FirebaseConfig {
	pub fn bucket(&self) -> String {
		if self.storage_bucket.is_empty() {
			format!("{}.appspot.com", self.project_id)
		} else {
			self.storage_bucket.clone()
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			version: CONFIG_VERSION,
			log_level: default_log_level(),
			upload_photos: default_upload_photos(),
			firebase: FirebaseConfig::default(),
		}
	}
}

/// Platform data directory, e.g. `~/.local/share/travelupa` on Linux.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
	ProjectDirs::from("com", "example", "Travelupa")
		.map(|dirs| dirs.data_dir().to_path_buf())
		.ok_or(ConfigError::NoDataDir)
}

impl AppConfig {
	pub fn config_path(data_dir: &Path) -> PathBuf {
		data_dir.join(CONFIG_FILE_NAME)
	}

	/// Reads the config in `data_dir`, writing a default one first if there is none.
	pub fn load_from(data_dir: &Path) -> Result<Self, ConfigError> {
		let path = Self::config_path(data_dir);

		let json = match fs::read_to_string(&path) {
			Ok(json) => json,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				warn!(path = %path.display(), "No config found, creating default");
				let config = Self::default();
				config.save_to(data_dir)?;
				return Ok(config);
			}
			Err(source) => return Err(ConfigError::Io { path, source }),
		};

		let mut config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
			path: path.clone(),
			source,
		})?;

		if config.version < CONFIG_VERSION {
			info!(
				from = config.version,
				to = CONFIG_VERSION,
				"Migrating config"
			);
			config.migrate()?;
			config.save_to(data_dir)?;
		} else if config.version > CONFIG_VERSION {
			return Err(ConfigError::UnknownVersion(config.version));
		}

		Ok(config)
	}

	pub fn save_to(&self, data_dir: &Path) -> Result<(), ConfigError> {
		fs::create_dir_all(data_dir).map_err(|source| ConfigError::Io {
			path: data_dir.to_path_buf(),
			source,
		})?;

		let path = Self::config_path(data_dir);
		let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
			path: path.clone(),
			source,
		})?;

		fs::write(&path, json).map_err(|source| ConfigError::Io { path, source })
	}

	/// Applies `TRAVELUPA_PROJECT_ID`, `TRAVELUPA_API_KEY` and `TRAVELUPA_STORAGE_BUCKET`.
	pub fn apply_env(&mut self) {
		self.apply_overrides(|key| env::var(key).ok());
	}

	fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		let firebase = &mut self.firebase;

		for (key, slot) in [
			("TRAVELUPA_PROJECT_ID", &mut firebase.project_id),
			("TRAVELUPA_API_KEY", &mut firebase.api_key),
			("TRAVELUPA_STORAGE_BUCKET", &mut firebase.storage_bucket),
		] {
			if let Some(value) = lookup(key).filter(|value| !value.is_empty()) {
				info!("{key} set, overriding config");
				*slot = value;
			}
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.firebase.project_id.is_empty() {
			return Err(ConfigError::Missing("firebase.project_id"));
		}

		if self.firebase.api_key.is_empty() {
			return Err(ConfigError::Missing("firebase.api_key"));
		}

		Ok(())
	}

	pub fn add_policy(&self) -> AddPolicy {
		AddPolicy {
			upload_photos: self.upload_photos,
		}
	}

	fn migrate(&mut self) -> Result<(), ConfigError> {
		match self.version {
			// v0 had no version field semantics beyond the defaults
			0 => {
				self.version = 1;
				Ok(())
			}
			1 => Ok(()),
			v => Err(ConfigError::UnknownVersion(v)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::collections::HashMap;

	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	#[test]
	fn first_load_writes_defaults() {
		let dir = tempdir().unwrap();

		let config = AppConfig::load_from(dir.path()).unwrap();
		assert_eq!(config, AppConfig::default());
		assert!(AppConfig::config_path(dir.path()).exists());

		// Defaults are not enough to talk to a project
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Missing("firebase.project_id"))
		));
	}

	#[test]
	fn partial_file_is_filled_with_defaults_and_migrated() {
		let dir = tempdir().unwrap();
		fs::write(
			AppConfig::config_path(dir.path()),
			r#"{"version": 0, "firebase": {"project_id": "travelupa-app", "api_key": "k"}}"#,
		)
		.unwrap();

		let config = AppConfig::load_from(dir.path()).unwrap();
		assert_eq!(config.version, CONFIG_VERSION);
		assert!(config.upload_photos);
		assert_eq!(config.firebase.firestore_url, DEFAULT_FIRESTORE_URL);
		assert_eq!(config.firebase.bucket(), "travelupa-app.appspot.com");
		config.validate().unwrap();

		// The migration was written back
		let reloaded = AppConfig::load_from(dir.path()).unwrap();
		assert_eq!(reloaded, config);
	}

	#[test]
	fn newer_versions_are_refused() {
		let dir = tempdir().unwrap();
		fs::write(AppConfig::config_path(dir.path()), r#"{"version": 9}"#).unwrap();

		assert!(matches!(
			AppConfig::load_from(dir.path()),
			Err(ConfigError::UnknownVersion(9))
		));
	}

	#[test]
	fn malformed_file_names_the_path() {
		let dir = tempdir().unwrap();
		fs::write(AppConfig::config_path(dir.path()), "{").unwrap();

		let err = AppConfig::load_from(dir.path()).unwrap_err();
		assert!(err.to_string().contains(CONFIG_FILE_NAME), "{err}");
	}

	#[test]
	fn environment_overrides_non_empty_values() {
		let env = HashMap::from([
			("TRAVELUPA_PROJECT_ID", "from-env"),
			("TRAVELUPA_API_KEY", ""),
			("TRAVELUPA_STORAGE_BUCKET", "photos-bucket"),
		]);

		let mut config = AppConfig::default();
		config.firebase.api_key = "from-file".to_string();
		config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

		assert_eq!(config.firebase.project_id, "from-env");
		assert_eq!(config.firebase.api_key, "from-file");
		assert_eq!(config.firebase.bucket(), "photos-bucket");
	}
}
