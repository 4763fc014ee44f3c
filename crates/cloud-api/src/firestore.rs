use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use super::{check, endpoint, require_auth, Error, RequestConfig, WithAuth};

pub const DEFAULT_DATABASE: &str = "(default)";

/// A Firestore document in its REST shape. Field values keep their typed wrappers
/// (`{"stringValue": ...}`, `{"nullValue": null}`, ...), so documents holding value
/// types we never read still decode.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub name: String,
	#[serde(default)]
	pub fields: Map<String, Value>,
	#[serde(default, skip_serializing)]
	pub update_time: Option<String>,
}

impl Document {
	/// Last segment of the resource name.
	pub fn id(&self) -> Option<&str> {
		self.name.rsplit('/').next().filter(|id| !id.is_empty())
	}

	pub fn string_field(&self, field: &str) -> Option<&str> {
		self.fields.get(field)?.get("stringValue")?.as_str()
	}

	/// `None` is stored as an explicit `nullValue`.
	pub fn set_string_field(&mut self, field: &str, value: Option<&str>) {
		let value = match value {
			Some(value) => json!({ "stringValue": value }),
			None => json!({ "nullValue": null }),
		};

		self.fields.insert(field.to_string(), value);
	}
}

fn collection_url(api_url: &str, project_id: &str, collection: &str) -> Result<Url, Error> {
	endpoint(
		api_url,
		&[
			"v1",
			"projects",
			project_id,
			"databases",
			DEFAULT_DATABASE,
			"documents",
			collection,
		],
	)
}

fn document_url(
	api_url: &str,
	project_id: &str,
	collection: &str,
	document_id: &str,
) -> Result<Url, Error> {
	endpoint(
		api_url,
		&[
			"v1",
			"projects",
			project_id,
			"databases",
			DEFAULT_DATABASE,
			"documents",
			collection,
			document_id,
		],
	)
}

pub mod documents {
	use super::*;

	pub use list::exec as list;
	pub mod list {
		use super::*;

		#[derive(Deserialize, Default)]
		#[serde(rename_all = "camelCase")]
		pub(crate) struct Page {
			#[serde(default)]
			pub(crate) documents: Vec<Document>,
			pub(crate) next_page_token: Option<String>,
		}

		/// Every document in `collection`, in the order the service returns them.
		#[instrument(skip(config))]
		pub async fn exec(
			config: RequestConfig,
			project_id: &str,
			collection: &str,
		) -> Result<Vec<Document>, Error> {
			let auth_token = require_auth(config.auth_token)?;
			let url = collection_url(&config.api_url, project_id, collection)?;

			let mut documents = Vec::new();
			let mut page_token: Option<String> = None;

			loop {
				let mut req = config.client.get(url.clone()).with_auth(&auth_token);
				if let Some(token) = &page_token {
					req = req.query(&[("pageToken", token)]);
				}

				let page: Page = check(req.send().await?).await?.json().await?;
				documents.extend(page.documents);

				match page.next_page_token {
					Some(token) if !token.is_empty() => page_token = Some(token),
					_ => break,
				}
			}

			debug!(count = documents.len(), "listed documents");

			Ok(documents)
		}
	}

	pub use set::exec as set;
	pub mod set {
		use super::*;

		/// Writes `document` under `document_id`, replacing whatever was stored there.
		#[instrument(skip(config, document))]
		pub async fn exec(
			config: RequestConfig,
			project_id: &str,
			collection: &str,
			document_id: &str,
			document: &Document,
		) -> Result<Document, Error> {
			let auth_token = require_auth(config.auth_token)?;
			let url = document_url(&config.api_url, project_id, collection, document_id)?;

			let res = config
				.client
				.patch(url)
				.with_auth(&auth_token)
				.json(&json!({ "fields": document.fields }))
				.send()
				.await?;

			Ok(check(res).await?.json().await?)
		}
	}

	pub use delete::exec as delete;
	pub mod delete {
		use super::*;

		/// The service answers a delete of a missing document with success too.
		#[instrument(skip(config))]
		pub async fn exec(
			config: RequestConfig,
			project_id: &str,
			collection: &str,
			document_id: &str,
		) -> Result<(), Error> {
			let auth_token = require_auth(config.auth_token)?;
			let url = document_url(&config.api_url, project_id, collection, document_id)?;

			let res = config
				.client
				.delete(url)
				.with_auth(&auth_token)
				.send()
				.await?;
			check(res).await?;

			Ok(())
		}
	}
}
