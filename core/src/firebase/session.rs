use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{info, instrument, warn};
use tu_cloud_api::{auth, RequestConfig};

use crate::{
	error::AuthError,
	gateway::SessionGateway,
	session::{SessionIdentity, SessionStore},
};

/// Email + password sessions against the Identity Toolkit. The identity found in the
/// [`SessionStore`] at construction is the current one until sign-in or sign-out.
pub struct FirebaseSession {
	client: reqwest::Client,
	api_url: String,
	api_key: String,
	store: SessionStore,
	current: RwLock<Option<SessionIdentity>>,
}

impl FirebaseSession {
	pub(super) fn new(
		client: reqwest::Client,
		api_url: String,
		api_key: String,
		store: SessionStore,
	) -> Self {
		let current = store.load();

		Self {
			client,
			api_url,
			api_key,
			store,
			current: RwLock::new(current),
		}
	}
}

#[async_trait]
impl SessionGateway for FirebaseSession {
	#[instrument(skip(self, password))]
	async fn sign_in(&self, email: &str, password: &str) -> Result<SessionIdentity, AuthError> {
		let response = auth::sign_in(
			RequestConfig {
				client: self.client.clone(),
				api_url: self.api_url.clone(),
				auth_token: None,
			},
			&self.api_key,
			email,
			password,
		)
		.await?;

		let email = if response.email.is_empty() {
			email.to_string()
		} else {
			response.email
		};
		let identity = SessionIdentity::new(response.local_id, email, response.id_token);

		if let Err(e) = self.store.save(&identity).await {
			warn!(?e, "Failed to persist session, it will end with this process;");
		}

		*self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
		info!(user_id = %identity.user_id, "Signed in");

		Ok(identity)
	}

	fn sign_out(&self) {
		self.current
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
		self.store.clear();
		info!("Signed out");
	}

	fn current_identity(&self) -> Option<SessionIdentity> {
		self.current
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}
