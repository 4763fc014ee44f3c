use async_trait::async_trait;
use tracing::{debug, instrument};
use tu_cloud_api::storage::{self, objects};

use crate::{error::UploadError, gateway::BlobStore, place::LocalImage};

use super::Endpoint;

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub struct FirebaseBlobStore {
	endpoint: Endpoint,
	bucket: String,
}

impl FirebaseBlobStore {
	pub(super) fn new(endpoint: Endpoint, bucket: String) -> Self {
		Self { endpoint, bucket }
	}
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
	#[instrument(skip(self, image), fields(path = %image.path().display()))]
	async fn upload(&self, image: &LocalImage, suggested_name: &str) -> Result<String, UploadError> {
		let bytes = tokio::fs::read(image.path()).await.map_err(|e| {
			UploadError(format!(
				"failed to read photo '{}': {e}",
				image.path().display()
			))
		})?;

		let object_name = storage::new_image_object_name();
		debug!(%object_name, len = bytes.len(), "Uploading photo");

		// The URL can only be resolved for an object that finished uploading
		objects::upload(
			self.endpoint.request_config(),
			&self.bucket,
			&object_name,
			bytes,
			IMAGE_CONTENT_TYPE,
		)
		.await?;

		let url = objects::download_url(self.endpoint.request_config(), &self.bucket, &object_name)
			.await?;

		Ok(url.to_string())
	}
}
