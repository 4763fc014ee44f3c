//! Seams between list state and the remote services.
//!
//! The view-model only ever talks to these traits, so any backend (or a test fake) can
//! stand in for the Firebase implementations in [`crate::firebase`].

use async_trait::async_trait;

use crate::{
	error::{AuthError, RemoteReadError, RemoteWriteError, UploadError},
	place::{LocalImage, PlaceEntry},
	session::SessionIdentity,
};

/// The remote `tempat_wisata` document collection.
#[async_trait]
pub trait PlaceCollection: Send + Sync {
	/// Every stored place, in whatever order the backend keeps them.
	async fn load_all(&self) -> Result<Vec<PlaceEntry>, RemoteReadError>;

	/// Stores `entry` under its name, overwriting an existing entry with that name.
	async fn create(&self, entry: &PlaceEntry) -> Result<(), RemoteWriteError>;

	/// Removes the entry named `name`. Removing a missing entry is not an error.
	async fn delete(&self, name: &str) -> Result<(), RemoteWriteError>;
}

/// Remote photo storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
	/// Uploads `image` under a freshly generated object name and returns a fetchable URL.
	/// `suggested_name` is for diagnostics only and never ends up in the object name.
	async fn upload(&self, image: &LocalImage, suggested_name: &str)
		-> Result<String, UploadError>;
}

#[async_trait]
pub trait SessionGateway: Send + Sync {
	async fn sign_in(&self, email: &str, password: &str) -> Result<SessionIdentity, AuthError>;

	/// Forgets the current identity locally. Never fails.
	fn sign_out(&self);

	fn current_identity(&self) -> Option<SessionIdentity>;
}
