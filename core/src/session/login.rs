use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
	error::{AuthError, LoginError, ValidationError},
	gateway::SessionGateway,
};

use super::SessionIdentity;

/// Email + password form in front of a [`SessionGateway`].
///
/// Submitting runs the sign-in on its own runtime task so the caller's context is never
/// blocked; the form stays in the loading state until [`LoginForm::complete`] receives
/// the result.
#[derive(Default)]
pub struct LoginForm {
	email: String,
	password: String,
	error: Option<String>,
	loading: bool,
}

/// A sign-in that has been issued and not yet observed.
pub struct PendingSignIn(JoinHandle<Result<SessionIdentity, AuthError>>);

impl PendingSignIn {
	pub async fn wait(self) -> Result<SessionIdentity, AuthError> {
		self.0
			.await
			.map_err(|e| AuthError(format!("sign-in task failed: {e}")))?
	}
}

impl LoginForm {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn set_email(&mut self, email: impl Into<String>) {
		self.email = email.into();
		self.error = None;
	}

	pub fn set_password(&mut self, password: impl Into<String>) {
		self.password = password.into();
		self.error = None;
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}

	pub fn submit(&mut self, gateway: Arc<dyn SessionGateway>) -> Result<PendingSignIn, LoginError> {
		if self.loading {
			return Err(LoginError::InFlight);
		}

		if self.email.trim().is_empty() || self.password.trim().is_empty() {
			let e = ValidationError::MissingCredentials;
			self.error = Some(e.to_string());
			return Err(e.into());
		}

		self.loading = true;
		self.error = None;

		let email = self.email.clone();
		let password = self.password.clone();
		debug!(%email, "Signing in");

		Ok(PendingSignIn(tokio::spawn(async move {
			gateway.sign_in(&email, &password).await
		})))
	}

	/// Leaves the loading state whatever the result was.
	pub fn complete(
		&mut self,
		result: Result<SessionIdentity, AuthError>,
	) -> Result<SessionIdentity, LoginError> {
		self.loading = false;

		result.map_err(|e| {
			warn!(%e, "Sign-in failed;");
			let e = LoginError::from(e);
			self.error = Some(e.to_string());
			e
		})
	}

	/// Submit, wait and complete in one go.
	///
	/// Dropping the returned future before it finishes leaves the form ready for another
	/// submit; the spawned sign-in itself still runs to completion.
	pub async fn sign_in(
		&mut self,
		gateway: Arc<dyn SessionGateway>,
	) -> Result<SessionIdentity, LoginError> {
		let pending = self.submit(gateway)?;
		let mut form = ResetLoadingOnDrop(self);
		let result = pending.wait().await;
		form.0.complete(result)
	}
}

struct ResetLoadingOnDrop<'a>(&'a mut LoginForm);

impl Drop for ResetLoadingOnDrop<'_> {
	fn drop(&mut self) {
		if self.0.loading {
			debug!("Sign-in abandoned before completing");
			self.0.loading = false;
		}
	}
}
