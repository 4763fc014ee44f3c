use std::fmt;

use serde::{Deserialize, Serialize};
use tu_cloud_api::auth::AuthToken;

mod login;
mod store;

pub use login::{LoginForm, PendingSignIn};
pub use store::SessionStore;

/// The signed-in user. Built by a [`crate::gateway::SessionGateway`] and handed
/// explicitly to whatever needs to act on the user's behalf.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
	pub user_id: String,
	pub email: String,
	id_token: String,
}

impl SessionIdentity {
	pub fn new(
		user_id: impl Into<String>,
		email: impl Into<String>,
		id_token: impl Into<String>,
	) -> Self {
		Self {
			user_id: user_id.into(),
			email: email.into(),
			id_token: id_token.into(),
		}
	}

	pub fn id_token(&self) -> &str {
		&self.id_token
	}

	pub(crate) fn auth_token(&self) -> AuthToken {
		AuthToken::bearer(self.id_token.clone())
	}
}

impl fmt::Debug for SessionIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SessionIdentity")
			.field("user_id", &self.user_id)
			.field("email", &self.email)
			.field("id_token", &"<redacted>")
			.finish()
	}
}
