use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{check, endpoint, require_auth, Error, RequestConfig, WithAuth};

pub const IMAGES_PREFIX: &str = "images/";

/// Fresh object name under [`IMAGES_PREFIX`]. Never built from caller-provided text.
pub fn new_image_object_name() -> String {
	format!("{IMAGES_PREFIX}{}.jpg", Uuid::new_v4())
}

/// Object metadata as returned by the Firebase Storage REST endpoint.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Object {
	pub name: String,
	pub bucket: String,
	#[serde(default)]
	pub content_type: Option<String>,
	#[serde(default)]
	pub size: Option<String>,
	#[serde(default)]
	pub download_tokens: Option<String>,
}

impl Object {
	/// `downloadTokens` is a comma separated list; any of them grants read access.
	pub fn download_token(&self) -> Option<&str> {
		self.download_tokens
			.as_deref()?
			.split(',')
			.map(str::trim)
			.find(|token| !token.is_empty())
	}
}

fn objects_url(api_url: &str, bucket: &str) -> Result<Url, Error> {
	endpoint(api_url, &["v0", "b", bucket, "o"])
}

fn object_url(api_url: &str, bucket: &str, object_name: &str) -> Result<Url, Error> {
	endpoint(api_url, &["v0", "b", bucket, "o", object_name])
}

pub mod objects {
	use super::*;

	pub use upload::exec as upload;
	pub mod upload {
		use super::*;

		#[instrument(skip(config, bytes), fields(len = bytes.len()))]
		pub async fn exec(
			config: RequestConfig,
			bucket: &str,
			object_name: &str,
			bytes: Vec<u8>,
			content_type: &str,
		) -> Result<Object, Error> {
			let auth_token = require_auth(config.auth_token)?;
			let url = objects_url(&config.api_url, bucket)?;

			let res = config
				.client
				.post(url)
				.query(&[("name", object_name)])
				.header("content-type", content_type)
				.with_auth(&auth_token)
				.body(bytes)
				.send()
				.await?;

			let object: Object = check(res).await?.json().await?;
			debug!(name = %object.name, "uploaded object");

			Ok(object)
		}
	}

	pub use metadata::exec as metadata;
	pub mod metadata {
		use super::*;

		#[instrument(skip(config))]
		pub async fn exec(
			config: RequestConfig,
			bucket: &str,
			object_name: &str,
		) -> Result<Object, Error> {
			let auth_token = require_auth(config.auth_token)?;
			let url = object_url(&config.api_url, bucket, object_name)?;

			let res = config
				.client
				.get(url)
				.with_auth(&auth_token)
				.send()
				.await?;

			Ok(check(res).await?.json().await?)
		}
	}

	pub use download_url::exec as download_url;
	pub mod download_url {
		use super::*;

		/// Resolves a public, token-bearing URL for an already stored object.
		pub async fn exec(
			config: RequestConfig,
			bucket: &str,
			object_name: &str,
		) -> Result<Url, Error> {
			let api_url = config.api_url.clone();
			let object = metadata::exec(config, bucket, object_name).await?;

			let token = object.download_token().ok_or_else(|| {
				Error(format!("object '{object_name}' has no download token"))
			})?;

			build(&api_url, bucket, object_name, token)
		}

		pub fn build(
			api_url: &str,
			bucket: &str,
			object_name: &str,
			token: &str,
		) -> Result<Url, Error> {
			let mut url = object_url(api_url, bucket, object_name)?;
			url.query_pairs_mut()
				.append_pair("alt", "media")
				.append_pair("token", token);

			Ok(url)
		}
	}
}
