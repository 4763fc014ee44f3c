use std::{collections::VecDeque, future::Future, sync::Arc};

use tokio::{sync::mpsc, task::JoinError};
use tracing::{debug, error, info, warn, Instrument};

use crate::{
	error::{AddError, RemoteReadError, RemoteWriteError, SubmitError},
	gateway::{BlobStore, PlaceCollection},
	place::PlaceEntry,
};

use super::{
	form::{AddPlaceForm, FormId, PlaceDraft},
	notice::Notice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
	Unloaded,
	Loading,
	Loaded,
	LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddPolicy {
	/// Upload the picked photo and persist its URL. When off, the local handle is
	/// persisted as-is.
	pub upload_photos: bool,
}

impl Default for AddPolicy {
	fn default() -> Self {
		Self {
			upload_photos: true,
		}
	}
}

/// Result of a remote call issued by the view-model, waiting to be applied.
#[derive(Debug)]
pub enum Outcome {
	Loaded(Result<Vec<PlaceEntry>, RemoteReadError>),
	Added {
		form: FormId,
		result: Result<PlaceEntry, AddError>,
	},
	Deleted {
		name: String,
		result: Result<(), RemoteWriteError>,
	},
}

/// In-memory list of places for one screen session.
///
/// Remote calls run on spawned tasks and report back through a channel owned by the
/// view-model; the list is only touched from [`PlaceListViewModel::apply`], which the
/// owner calls, so mutations never interleave. Both create and delete change the list
/// only after the backend confirmed them.
///
/// Spawned calls are never aborted. If the view-model is dropped first, their outcomes
/// are discarded.
pub struct PlaceListViewModel {
	collection: Arc<dyn PlaceCollection>,
	blobs: Arc<dyn BlobStore>,
	policy: AddPolicy,
	state: ListState,
	entries: Vec<PlaceEntry>,
	add_form: Option<AddPlaceForm>,
	next_form_id: u64,
	notices: VecDeque<Notice>,
	pending: usize,
	outcomes_tx: mpsc::UnboundedSender<Outcome>,
	outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl PlaceListViewModel {
	pub fn new(collection: Arc<dyn PlaceCollection>, blobs: Arc<dyn BlobStore>) -> Self {
		let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

		Self {
			collection,
			blobs,
			policy: AddPolicy::default(),
			state: ListState::Unloaded,
			entries: Vec::new(),
			add_form: None,
			next_form_id: 0,
			notices: VecDeque::new(),
			pending: 0,
			outcomes_tx,
			outcomes_rx,
		}
	}

	#[must_use]
	pub fn with_policy(mut self, policy: AddPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn state(&self) -> ListState {
		self.state
	}

	pub fn entries(&self) -> &[PlaceEntry] {
		&self.entries
	}

	pub fn add_form(&self) -> Option<&AddPlaceForm> {
		self.add_form.as_ref()
	}

	pub fn add_form_mut(&mut self) -> Option<&mut AddPlaceForm> {
		self.add_form.as_mut()
	}

	/// Remote calls issued and not yet applied.
	pub fn pending(&self) -> usize {
		self.pending
	}

	pub fn take_notices(&mut self) -> Vec<Notice> {
		self.notices.drain(..).collect()
	}

	/// Issues the one initial load. Does nothing once the list left `Unloaded`.
	pub fn mount(&mut self) {
		if self.state != ListState::Unloaded {
			return;
		}

		self.state = ListState::Loading;
		let collection = Arc::clone(&self.collection);
		self.spawn(
			async move { Outcome::Loaded(collection.load_all().await) },
			|e| Outcome::Loaded(Err(RemoteReadError(e.to_string()))),
		);
	}

	/// Opens the add form, or returns the one already open.
	pub fn open_add_form(&mut self) -> &mut AddPlaceForm {
		let next_form_id = &mut self.next_form_id;

		self.add_form.get_or_insert_with(|| {
			let id = FormId(*next_form_id);
			*next_form_id += 1;
			AddPlaceForm::new(id)
		})
	}

	/// Closes the add form. Refused while it is saving.
	pub fn dismiss_add_form(&mut self) -> bool {
		if self.add_form.as_ref().is_some_and(AddPlaceForm::is_saving) {
			return false;
		}

		self.add_form = None;
		true
	}

	/// Validates the open form and, if it holds up, starts uploading and saving it.
	///
	/// Validation failures are also queued as notices. Nothing is sent to the backend
	/// unless this returns `Ok`.
	pub fn submit_add_form(&mut self) -> Result<FormId, SubmitError> {
		self.ensure_ready()?;

		let Some(form) = self.add_form.as_mut() else {
			return Err(SubmitError::NoForm);
		};

		if form.is_saving() {
			return Err(SubmitError::InFlight);
		}

		let draft = match form.validate() {
			Ok(draft) => draft,
			Err(e) => {
				debug!(%e, "Rejected add form");
				self.notices.push_back(Notice::error(e.to_string()));
				return Err(e.into());
			}
		};

		form.begin_saving();
		let form_id = form.id();

		let collection = Arc::clone(&self.collection);
		let blobs = Arc::clone(&self.blobs);
		let policy = self.policy;

		self.spawn(
			async move {
				Outcome::Added {
					form: form_id,
					result: persist(&*collection, &*blobs, draft, policy).await,
				}
			},
			move |e| Outcome::Added {
				form: form_id,
				result: Err(RemoteWriteError(e.to_string()).into()),
			},
		);

		Ok(form_id)
	}

	pub fn request_delete(&mut self, name: &str) -> Result<(), SubmitError> {
		self.ensure_ready()?;

		let name = name.to_string();
		let failed_name = name.clone();
		let collection = Arc::clone(&self.collection);

		self.spawn(
			async move {
				let result = collection.delete(&name).await;
				Outcome::Deleted { name, result }
			},
			move |e| Outcome::Deleted {
				name: failed_name,
				result: Err(RemoteWriteError(e.to_string())),
			},
		);

		Ok(())
	}

	/// Waits for the next issued call to finish. `None` when nothing is in flight.
	pub async fn next_outcome(&mut self) -> Option<Outcome> {
		if self.pending == 0 {
			return None;
		}

		self.outcomes_rx.recv().await
	}

	/// Reconciles the list with a finished remote call.
	pub fn apply(&mut self, outcome: Outcome) {
		self.pending = self.pending.saturating_sub(1);

		match outcome {
			Outcome::Loaded(Ok(entries)) => {
				info!(count = entries.len(), "Loaded places");
				self.entries = entries;
				self.state = ListState::Loaded;
			}

			Outcome::Loaded(Err(e)) => {
				warn!(%e, "Failed to load places;");
				self.entries.clear();
				self.state = ListState::LoadFailed;
				self.notices
					.push_back(Notice::error(format!("Failed to load places: {e}")));
			}

			Outcome::Added {
				form,
				result: Ok(entry),
			} => {
				info!(name = %entry.name, "Saved place");
				self.notices.push_back(Notice::info("Place saved!"));
				self.upsert(entry);

				if self.add_form.as_ref().is_some_and(|open| open.id() == form) {
					self.add_form = None;
				}
			}

			Outcome::Added {
				form,
				result: Err(e),
			} => {
				error!(%e, "Failed to save place;");
				let message = format!("Failed to save: {e}");

				if let Some(open) = self.add_form.as_mut().filter(|open| open.id() == form) {
					open.fail_saving(message.clone());
				}

				self.notices.push_back(Notice::error(message));
			}

			Outcome::Deleted { name, result: Ok(()) } => {
				info!(%name, "Deleted place");
				self.entries.retain(|entry| entry.id() != name);
				self.notices.push_back(Notice::info(format!("{name} deleted.")));
			}

			Outcome::Deleted {
				name,
				result: Err(e),
			} => {
				error!(%name, %e, "Failed to delete place;");
				self.notices
					.push_back(Notice::error(format!("Failed to delete {name}: {e}")));
			}
		}
	}

	/// Applies outcomes until nothing is left in flight.
	pub async fn settle(&mut self) {
		while let Some(outcome) = self.next_outcome().await {
			self.apply(outcome);
		}
	}

	fn ensure_ready(&self) -> Result<(), SubmitError> {
		match self.state {
			ListState::Loaded | ListState::LoadFailed => Ok(()),
			ListState::Unloaded | ListState::Loading => Err(SubmitError::NotReady),
		}
	}

	/// The backend keys documents by name, so a save under an existing name replaces it.
	fn upsert(&mut self, entry: PlaceEntry) {
		match self
			.entries
			.iter_mut()
			.find(|existing| existing.id() == entry.id())
		{
			Some(existing) => *existing = entry,
			None => self.entries.push(entry),
		}
	}

	/// Runs `call` on its own task. If that task panics or is cancelled, `on_abort` turns
	/// the join error into the call's failed outcome so `pending` still drains.
	fn spawn(
		&mut self,
		call: impl Future<Output = Outcome> + Send + 'static,
		on_abort: impl FnOnce(JoinError) -> Outcome + Send + 'static,
	) {
		self.pending += 1;
		let outcomes_tx = self.outcomes_tx.clone();
		let call = tokio::spawn(call.in_current_span());

		tokio::spawn(
			async move {
				let outcome = match call.await {
					Ok(outcome) => outcome,
					Err(e) => {
						error!(?e, "Place list task failed;");
						on_abort(e)
					}
				};

				if outcomes_tx.send(outcome).is_err() {
					debug!("Place list is gone, discarding late outcome");
				}
			}
			.in_current_span(),
		);
	}
}

/// Upload (when enabled) strictly before the create; an upload failure skips the create.
async fn persist(
	collection: &dyn PlaceCollection,
	blobs: &dyn BlobStore,
	draft: PlaceDraft,
	policy: AddPolicy,
) -> Result<PlaceEntry, AddError> {
	let image_uri = if policy.upload_photos {
		blobs.upload(&draft.image, &draft.name).await?
	} else {
		draft.image.handle()
	};

	let entry = PlaceEntry::new(draft.name, draft.description, Some(image_uri));
	collection.create(&entry).await?;

	Ok(entry)
}
