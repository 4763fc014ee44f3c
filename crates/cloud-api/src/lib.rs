//! REST bindings for the Firebase services Travelupa talks to.
//!
//! Every remote call lives in its own module exposing an `exec` function that takes a
//! [`RequestConfig`] by value, mirroring how the calls are grouped on the service side:
//! [`auth`] (Identity Toolkit), [`firestore`] (document collections) and [`storage`]
//! (Cloud Storage for Firebase).

pub mod auth;
pub mod firestore;
pub mod storage;

use auth::AuthToken;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

pub struct RequestConfig {
	pub client: reqwest::Client,
	pub api_url: String,
	pub auth_token: Option<AuthToken>,
}

#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct Error(String);

impl From<reqwest::Error> for Error {
	fn from(e: reqwest::Error) -> Self {
		Self(e.to_string())
	}
}

trait WithAuth {
	fn with_auth(self, token: &AuthToken) -> Self;
}

impl WithAuth for reqwest::RequestBuilder {
	fn with_auth(self, token: &AuthToken) -> Self {
		self.header(
			"authorization",
			format!("{} {}", token.token_type, token.access_token),
		)
	}
}

/// Google APIs wrap failures as `{"error": {"code": 403, "message": "...", "status": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	message: String,
}

fn error_message(status: StatusCode, body: &str) -> String {
	serde_json::from_str::<ErrorEnvelope>(body)
		.ok()
		.map(|envelope| envelope.error.message)
		.filter(|message| !message.is_empty())
		.unwrap_or_else(|| status.to_string())
}

async fn check(res: reqwest::Response) -> Result<reqwest::Response, Error> {
	let status = res.status();
	if status.is_success() {
		return Ok(res);
	}

	let body = res.text().await.unwrap_or_default();
	Err(Error(error_message(status, &body)))
}

/// Appends `segments` to `base`, percent-encoding each one as a single path segment.
fn endpoint<S: AsRef<str>>(base: &str, segments: &[S]) -> Result<Url, Error> {
	let mut url =
		Url::parse(base).map_err(|e| Error(format!("invalid api url '{base}': {e}")))?;

	url.path_segments_mut()
		.map_err(|()| Error(format!("api url '{base}' cannot have a path")))?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

fn require_auth(auth_token: Option<AuthToken>) -> Result<AuthToken, Error> {
	auth_token.ok_or_else(|| Error("Authentication required".to_string()))
}
