use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use super::{check, endpoint, Error, RequestConfig};

/// Credential attached to Firestore and Storage requests.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
	pub token_type: String,
	pub access_token: String,
}

impl AuthToken {
	pub fn bearer(access_token: impl Into<String>) -> Self {
		Self {
			token_type: "Bearer".to_string(),
			access_token: access_token.into(),
		}
	}
}

impl fmt::Debug for AuthToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthToken")
			.field("token_type", &self.token_type)
			.field("access_token", &"<redacted>")
			.finish()
	}
}

pub use sign_in::exec as sign_in;
pub mod sign_in {
	use super::*;

	#[derive(Deserialize)]
	#[serde(rename_all = "camelCase")]
	pub struct Response {
		pub local_id: String,
		#[serde(default)]
		pub email: String,
		pub id_token: String,
		#[serde(default)]
		pub refresh_token: String,
		/// Seconds until `id_token` expires, as a decimal string.
		#[serde(default)]
		pub expires_in: String,
	}

	#[instrument(skip(config, api_key, password))]
	pub async fn exec(
		config: RequestConfig,
		api_key: &str,
		email: &str,
		password: &str,
	) -> Result<Response, Error> {
		let url = endpoint(&config.api_url, &["v1", "accounts:signInWithPassword"])?;

		let res = config
			.client
			.post(url)
			.query(&[("key", api_key)])
			.json(&json!({
				"email": email,
				"password": password,
				"returnSecureToken": true,
			}))
			.send()
			.await?;

		let response: Response = check(res).await?.json().await?;
		debug!(user_id = %response.local_id, "signed in");

		Ok(response)
	}
}
