use std::{io, path::PathBuf};

use thiserror::Error;

/// Loading the place collection failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RemoteReadError(pub String);

/// Creating or deleting a place failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RemoteWriteError(pub String);

/// Either phase of a photo upload failed; no URL was produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct UploadError(pub String);

/// Sign-in was rejected or could not reach the identity service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AuthError(pub String);

impl From<tu_cloud_api::Error> for RemoteReadError {
	fn from(e: tu_cloud_api::Error) -> Self {
		Self(e.to_string())
	}
}

impl From<tu_cloud_api::Error> for RemoteWriteError {
	fn from(e: tu_cloud_api::Error) -> Self {
		Self(e.to_string())
	}
}

impl From<tu_cloud_api::Error> for UploadError {
	fn from(e: tu_cloud_api::Error) -> Self {
		Self(e.to_string())
	}
}

impl From<tu_cloud_api::Error> for AuthError {
	fn from(e: tu_cloud_api::Error) -> Self {
		Self(e.to_string())
	}
}

/// Input rejected locally, before any remote call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Please enter a place name")]
	MissingName,
	#[error("Please enter a description")]
	MissingDescription,
	#[error("Please pick a photo")]
	MissingImage,
	#[error("Please enter email and password")]
	MissingCredentials,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
	#[error("upload failed: {0}")]
	Upload(#[from] UploadError),
	#[error(transparent)]
	Write(#[from] RemoteWriteError),
}

/// Why a list mutation was not issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
	#[error("places are still loading")]
	NotReady,
	#[error("the add form is not open")]
	NoForm,
	#[error("a save is already in progress")]
	InFlight,
	#[error(transparent)]
	Invalid(#[from] ValidationError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
	#[error("a sign-in is already in progress")]
	InFlight,
	#[error(transparent)]
	Invalid(#[from] ValidationError),
	#[error("Login failed: {0}")]
	Auth(#[from] AuthError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("config file I/O error: {source}; path: '{}'", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("malformed config file '{}': {source}", .path.display())]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
	#[error("unknown config version: {0}")]
	UnknownVersion(u32),
	#[error("missing required setting '{0}'")]
	Missing(&'static str),
	#[error("unable to determine a data directory for this platform")]
	NoDataDir,
}

#[derive(Error, Debug)]
pub enum LoggerError {
	#[error("failed to create logs directory '{}': {source}", .path.display())]
	LogsDir {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("invalid log directive: {0}")]
	Directive(#[from] tracing_subscriber::filter::ParseError),
	#[error("failed to install tracing subscriber: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
}
