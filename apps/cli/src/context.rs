use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use tu_core::{
	firebase::FirebaseSession, AppConfig, FirebaseBackend, PlaceListViewModel, SessionGateway,
	SessionIdentity, SessionStore,
};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

pub struct Context {
	pub config: AppConfig,
	pub data_dir: PathBuf,
	pub format: OutputFormat,
	pub backend: FirebaseBackend,
	pub session: Arc<FirebaseSession>,
}

impl Context {
	pub fn new(config: AppConfig, data_dir: PathBuf, format: OutputFormat) -> Self {
		let backend = FirebaseBackend::new(config.firebase.clone());
		let session = Arc::new(backend.session(SessionStore::new(&data_dir)));

		Self {
			config,
			data_dir,
			format,
			backend,
			session,
		}
	}

	/// The signed-in user, or an error telling them to sign in
	pub fn identity(&self) -> Result<SessionIdentity> {
		self.session
			.current_identity()
			.ok_or_else(|| anyhow!("Not signed in; run `travelupa login` first"))
	}

	pub fn place_list(&self) -> Result<PlaceListViewModel> {
		let identity = self.identity()?;
		Ok(self
			.backend
			.place_list(&identity, self.config.add_policy()))
	}
}
