use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A tourist place recommendation. `name` doubles as the remote document key, so two
/// entries with the same name are the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceEntry {
	pub name: String,
	pub description: String,
	/// Remote download URL once uploaded, or the local handle when uploads are off.
	pub image_uri: Option<String>,
}

impl PlaceEntry {
	pub fn new(
		name: impl Into<String>,
		description: impl Into<String>,
		image_uri: Option<String>,
	) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
			image_uri,
		}
	}

	pub fn id(&self) -> &str {
		&self.name
	}
}

/// A photo picked on this device, not yet uploaded anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage(PathBuf);

impl LocalImage {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self(path.into())
	}

	pub fn path(&self) -> &Path {
		&self.0
	}

	/// The string persisted as the image reference when the photo is not uploaded.
	pub fn handle(&self) -> String {
		self.0.display().to_string()
	}
}
