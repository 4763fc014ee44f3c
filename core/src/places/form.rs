use crate::{error::ValidationError, place::LocalImage};

/// Identifies one opening of the add form, so a result can be matched to the form that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(pub(crate) u64);

/// The "add place" dialog. Inputs are frozen while a save is in flight.
#[derive(Debug, Clone)]
pub struct AddPlaceForm {
	id: FormId,
	name: String,
	description: String,
	image: Option<LocalImage>,
	saving: bool,
	error: Option<String>,
}

/// Validated form contents, ready to persist.
#[derive(Debug, Clone)]
pub(crate) struct PlaceDraft {
	pub(crate) name: String,
	pub(crate) description: String,
	pub(crate) image: LocalImage,
}

impl AddPlaceForm {
	pub(crate) fn new(id: FormId) -> Self {
		Self {
			id,
			name: String::new(),
			description: String::new(),
			image: None,
			saving: false,
			error: None,
		}
	}

	pub fn id(&self) -> FormId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn image(&self) -> Option<&LocalImage> {
		self.image.as_ref()
	}

	pub fn is_saving(&self) -> bool {
		self.saving
	}

	/// Message from the last failed save, if the form is still open after it.
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		if !self.saving {
			self.name = name.into();
		}
	}

	pub fn set_description(&mut self, description: impl Into<String>) {
		if !self.saving {
			self.description = description.into();
		}
	}

	pub fn pick_image(&mut self, image: LocalImage) {
		if !self.saving {
			self.image = Some(image);
		}
	}

	pub(crate) fn validate(&self) -> Result<PlaceDraft, ValidationError> {
		if self.name.trim().is_empty() {
			return Err(ValidationError::MissingName);
		}

		if self.description.trim().is_empty() {
			return Err(ValidationError::MissingDescription);
		}

		let image = self.image.clone().ok_or(ValidationError::MissingImage)?;

		Ok(PlaceDraft {
			name: self.name.clone(),
			description: self.description.clone(),
			image,
		})
	}

	pub(crate) fn begin_saving(&mut self) {
		self.saving = true;
		self.error = None;
	}

	pub(crate) fn fail_saving(&mut self, message: String) {
		self.saving = false;
		self.error = Some(message);
	}
}
