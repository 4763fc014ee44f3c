//! Gateway implementations backed by Firebase (Identity Toolkit, Firestore, Storage).

use std::sync::Arc;

use tu_cloud_api::{auth::AuthToken, RequestConfig};

use crate::{
	config::FirebaseConfig,
	places::{AddPolicy, PlaceListViewModel},
	session::{SessionIdentity, SessionStore},
};

mod collection;
mod session;
mod storage;

pub use collection::{FirebaseCollection, PLACES_COLLECTION};
pub use session::FirebaseSession;
pub use storage::FirebaseBlobStore;

/// Builds the Firebase gateways. Anything acting for a user gets that user's
/// [`SessionIdentity`] passed in explicitly.
#[derive(Clone)]
pub struct FirebaseBackend {
	client: reqwest::Client,
	config: FirebaseConfig,
}

impl FirebaseBackend {
	pub fn new(config: FirebaseConfig) -> Self {
		Self {
			client: reqwest::Client::new(),
			config,
		}
	}

	pub fn session(&self, store: SessionStore) -> FirebaseSession {
		FirebaseSession::new(
			self.client.clone(),
			self.config.identity_url.clone(),
			self.config.api_key.clone(),
			store,
		)
	}

	pub fn collection(&self, identity: &SessionIdentity) -> FirebaseCollection {
		FirebaseCollection::new(
			self.authorized(&self.config.firestore_url, identity),
			self.config.project_id.clone(),
		)
	}

	pub fn blob_store(&self, identity: &SessionIdentity) -> FirebaseBlobStore {
		FirebaseBlobStore::new(
			self.authorized(&self.config.storage_url, identity),
			self.config.bucket(),
		)
	}

	/// The place list screen for `identity`.
	pub fn place_list(&self, identity: &SessionIdentity, policy: AddPolicy) -> PlaceListViewModel {
		PlaceListViewModel::new(
			Arc::new(self.collection(identity)),
			Arc::new(self.blob_store(identity)),
		)
		.with_policy(policy)
	}

	fn authorized(&self, api_url: &str, identity: &SessionIdentity) -> Endpoint {
		Endpoint {
			client: self.client.clone(),
			api_url: api_url.to_string(),
			auth_token: Some(identity.auth_token()),
		}
	}
}

/// One service's base URL plus the credentials to call it with.
#[derive(Clone)]
struct Endpoint {
	client: reqwest::Client,
	api_url: String,
	auth_token: Option<AuthToken>,
}

impl Endpoint {
	fn request_config(&self) -> RequestConfig {
		RequestConfig {
			client: self.client.clone(),
			api_url: self.api_url.clone(),
			auth_token: self.auth_token.clone(),
		}
	}
}
