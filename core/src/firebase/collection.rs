use async_trait::async_trait;
use tracing::instrument;
use tu_cloud_api::firestore::{documents, Document};

use crate::{
	error::{RemoteReadError, RemoteWriteError},
	gateway::PlaceCollection,
	place::PlaceEntry,
};

use super::Endpoint;

pub const PLACES_COLLECTION: &str = "tempat_wisata";

// Stored field names, shared with documents written by the mobile app.
const FIELD_NAME: &str = "nama";
const FIELD_DESCRIPTION: &str = "deskripsi";
const FIELD_IMAGE: &str = "gambarUriString";

pub struct FirebaseCollection {
	endpoint: Endpoint,
	project_id: String,
}

impl FirebaseCollection {
	pub(super) fn new(endpoint: Endpoint, project_id: String) -> Self {
		Self {
			endpoint,
			project_id,
		}
	}
}

#[async_trait]
impl PlaceCollection for FirebaseCollection {
	#[instrument(skip(self))]
	async fn load_all(&self) -> Result<Vec<PlaceEntry>, RemoteReadError> {
		let documents = documents::list(
			self.endpoint.request_config(),
			&self.project_id,
			PLACES_COLLECTION,
		)
		.await?;

		Ok(documents.iter().map(place_from_document).collect())
	}

	#[instrument(skip(self, entry), fields(name = %entry.name))]
	async fn create(&self, entry: &PlaceEntry) -> Result<(), RemoteWriteError> {
		documents::set(
			self.endpoint.request_config(),
			&self.project_id,
			PLACES_COLLECTION,
			&entry.name,
			&document_from_place(entry),
		)
		.await?;

		Ok(())
	}

	#[instrument(skip(self))]
	async fn delete(&self, name: &str) -> Result<(), RemoteWriteError> {
		documents::delete(
			self.endpoint.request_config(),
			&self.project_id,
			PLACES_COLLECTION,
			name,
		)
		.await?;

		Ok(())
	}
}

/// Missing fields read as empty, like the app's own model defaults; a missing name falls
/// back to the document id, which is the name anyway.
fn place_from_document(document: &Document) -> PlaceEntry {
	let name = document
		.string_field(FIELD_NAME)
		.or_else(|| document.id())
		.unwrap_or_default();

	PlaceEntry::new(
		name,
		document.string_field(FIELD_DESCRIPTION).unwrap_or_default(),
		document.string_field(FIELD_IMAGE).map(str::to_string),
	)
}

fn document_from_place(entry: &PlaceEntry) -> Document {
	let mut document = Document::default();
	document.set_string_field(FIELD_NAME, Some(&entry.name));
	document.set_string_field(FIELD_DESCRIPTION, Some(&entry.description));
	document.set_string_field(FIELD_IMAGE, entry.image_uri.as_deref());
	document
}
