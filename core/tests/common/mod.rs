#![allow(dead_code)]

use std::{
	path::PathBuf,
	sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tu_core::{
	AuthError, BlobStore, LocalImage, PlaceCollection, PlaceEntry, PlaceListViewModel,
	RemoteReadError, RemoteWriteError, SessionGateway, SessionIdentity, UploadError,
};

/// Everything the fakes were asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	LoadAll,
	Create(String),
	Delete(String),
	Upload(PathBuf),
	SignIn(String),
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
	fn push(&self, call: Call) {
		self.0.lock().unwrap().push(call);
	}

	pub fn snapshot(&self) -> Vec<Call> {
		self.0.lock().unwrap().clone()
	}

	pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
		self.0.lock().unwrap().iter().filter(|call| matches(call)).count()
	}
}

/// In-memory document collection keyed by place name.
pub struct FakeCollection {
	calls: CallLog,
	stored: Mutex<Vec<PlaceEntry>>,
	load_error: Mutex<Option<String>>,
	write_error: Mutex<Option<String>>,
	create_gate: Mutex<Option<Arc<Semaphore>>>,
	panic_on_create: Mutex<bool>,
}

impl FakeCollection {
	pub fn stored(&self) -> Vec<PlaceEntry> {
		self.stored.lock().unwrap().clone()
	}

	pub fn fail_loads(&self, message: &str) {
		*self.load_error.lock().unwrap() = Some(message.to_string());
	}

	pub fn fail_writes(&self, message: &str) {
		*self.write_error.lock().unwrap() = Some(message.to_string());
	}

	/// Makes every create panic inside the gateway call.
	pub fn panic_on_create(&self) {
		*self.panic_on_create.lock().unwrap() = true;
	}

	/// Creates block until a permit is added to the returned semaphore.
	pub fn hold_creates(&self) -> Arc<Semaphore> {
		let gate = Arc::new(Semaphore::new(0));
		*self.create_gate.lock().unwrap() = Some(Arc::clone(&gate));
		gate
	}

	fn write_error(&self) -> Option<RemoteWriteError> {
		self.write_error.lock().unwrap().clone().map(RemoteWriteError)
	}
}

#[async_trait]
impl PlaceCollection for FakeCollection {
	async fn load_all(&self) -> Result<Vec<PlaceEntry>, RemoteReadError> {
		self.calls.push(Call::LoadAll);

		if let Some(message) = self.load_error.lock().unwrap().clone() {
			return Err(RemoteReadError(message));
		}

		Ok(self.stored())
	}

	async fn create(&self, entry: &PlaceEntry) -> Result<(), RemoteWriteError> {
		self.calls.push(Call::Create(entry.name.clone()));

		if *self.panic_on_create.lock().unwrap() {
			panic!("backend blew up while creating {}", entry.name);
		}

		let gate = self.create_gate.lock().unwrap().clone();
		if let Some(gate) = gate {
			gate.acquire().await.unwrap().forget();
		}

		if let Some(e) = self.write_error() {
			return Err(e);
		}

		let mut stored = self.stored.lock().unwrap();
		match stored.iter_mut().find(|existing| existing.name == entry.name) {
			Some(existing) => *existing = entry.clone(),
			None => stored.push(entry.clone()),
		}

		Ok(())
	}

	async fn delete(&self, name: &str) -> Result<(), RemoteWriteError> {
		self.calls.push(Call::Delete(name.to_string()));

		if let Some(e) = self.write_error() {
			return Err(e);
		}

		self.stored.lock().unwrap().retain(|entry| entry.name != name);

		Ok(())
	}
}

pub struct FakeBlobStore {
	calls: CallLog,
	error: Mutex<Option<String>>,
	uploaded: Mutex<usize>,
}

impl FakeBlobStore {
	pub fn fail_uploads(&self, message: &str) {
		*self.error.lock().unwrap() = Some(message.to_string());
	}
}

#[async_trait]
impl BlobStore for FakeBlobStore {
	async fn upload(&self, image: &LocalImage, _suggested_name: &str) -> Result<String, UploadError> {
		self.calls.push(Call::Upload(image.path().to_path_buf()));

		if let Some(message) = self.error.lock().unwrap().clone() {
			return Err(UploadError(message));
		}

		let mut uploaded = self.uploaded.lock().unwrap();
		*uploaded += 1;

		Ok(format!("https://blobs.test/images/{}.jpg", *uploaded))
	}
}

pub struct Fakes {
	pub calls: CallLog,
	pub collection: Arc<FakeCollection>,
	pub blobs: Arc<FakeBlobStore>,
}

impl Fakes {
	pub fn with_stored(stored: Vec<PlaceEntry>) -> Self {
		let calls = CallLog::default();

		Self {
			collection: Arc::new(FakeCollection {
				calls: calls.clone(),
				stored: Mutex::new(stored),
				load_error: Mutex::new(None),
				write_error: Mutex::new(None),
				create_gate: Mutex::new(None),
				panic_on_create: Mutex::new(false),
			}),
			blobs: Arc::new(FakeBlobStore {
				calls: calls.clone(),
				error: Mutex::new(None),
				uploaded: Mutex::new(0),
			}),
			calls,
		}
	}

	pub fn view_model(&self) -> PlaceListViewModel {
		PlaceListViewModel::new(self.collection.clone(), self.blobs.clone())
	}

	/// A view-model that finished its initial load.
	pub async fn loaded_view_model(&self) -> PlaceListViewModel {
		let mut view_model = self.view_model();
		view_model.mount();
		view_model.settle().await;
		view_model
	}
}

/// Accepts exactly one email/password pair.
pub struct FakeSession {
	calls: CallLog,
	email: String,
	password: String,
	current: Mutex<Option<SessionIdentity>>,
	sign_in_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeSession {
	pub fn accepting(email: &str, password: &str) -> (Arc<Self>, CallLog) {
		let calls = CallLog::default();

		(
			Arc::new(Self {
				calls: calls.clone(),
				email: email.to_string(),
				password: password.to_string(),
				current: Mutex::new(None),
				sign_in_gate: Mutex::new(None),
			}),
			calls,
		)
	}

	/// Sign-ins block until a permit is added to the returned semaphore.
	pub fn hold_sign_ins(&self) -> Arc<Semaphore> {
		let gate = Arc::new(Semaphore::new(0));
		*self.sign_in_gate.lock().unwrap() = Some(Arc::clone(&gate));
		gate
	}
}

#[async_trait]
impl SessionGateway for FakeSession {
	async fn sign_in(&self, email: &str, password: &str) -> Result<SessionIdentity, AuthError> {
		self.calls.push(Call::SignIn(email.to_string()));

		let gate = self.sign_in_gate.lock().unwrap().clone();
		if let Some(gate) = gate {
			gate.acquire().await.unwrap().forget();
		}

		if email != self.email {
			return Err(AuthError("EMAIL_NOT_FOUND".to_string()));
		}

		if password != self.password {
			return Err(AuthError("INVALID_PASSWORD".to_string()));
		}

		let identity = SessionIdentity::new("u-1", email, "token");
		*self.current.lock().unwrap() = Some(identity.clone());

		Ok(identity)
	}

	fn sign_out(&self) {
		self.current.lock().unwrap().take();
	}

	fn current_identity(&self) -> Option<SessionIdentity> {
		self.current.lock().unwrap().clone()
	}
}

pub fn place(name: &str, description: &str, image_uri: &str) -> PlaceEntry {
	PlaceEntry::new(name, description, Some(image_uri.to_string()))
}

/// Lets spawned gateway calls make progress on the current-thread test runtime.
pub async fn let_tasks_run() {
	for _ in 0..16 {
		tokio::task::yield_now().await;
	}
}
