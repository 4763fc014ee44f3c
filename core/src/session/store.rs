use std::{
	fs, io,
	path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::SessionIdentity;

const SESSION_FILE_NAME: &str = "session.json";

/// Keeps the signed-in identity across process restarts in `<data_dir>/session.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
	path: PathBuf,
}

impl SessionStore {
	pub fn new(data_dir: impl AsRef<Path>) -> Self {
		Self {
			path: data_dir.as_ref().join(SESSION_FILE_NAME),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The persisted identity, if any. A corrupt file counts as signed out.
	pub fn load(&self) -> Option<SessionIdentity> {
		let json = match fs::read_to_string(&self.path) {
			Ok(json) => json,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
			Err(e) => {
				warn!(?e, path = %self.path.display(), "Failed to read session file;");
				return None;
			}
		};

		serde_json::from_str(&json)
			.map_err(|e| warn!(?e, path = %self.path.display(), "Ignoring malformed session file;"))
			.ok()
	}

	pub async fn save(&self, identity: &SessionIdentity) -> io::Result<()> {
		if let Some(parent) = self.path.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}

		let json = serde_json::to_vec_pretty(identity)?;
		tokio::fs::write(&self.path, json).await?;
		debug!(path = %self.path.display(), "Saved session");

		Ok(())
	}

	/// Removes the persisted identity. Failures are logged, never returned.
	pub fn clear(&self) {
		match fs::remove_file(&self.path) {
			Ok(()) => debug!(path = %self.path.display(), "Cleared session"),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {}
			Err(e) => warn!(?e, path = %self.path.display(), "Failed to remove session file;"),
		}
	}
}
