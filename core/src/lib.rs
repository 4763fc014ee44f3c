//! Travelupa's client core: the tourist place list, its add form, sign-in, and the
//! Firebase services behind them.

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::path::Path;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod config;
pub mod error;
pub mod firebase;
pub mod gateway;
pub mod navigation;
pub mod place;
pub mod places;
pub mod session;

pub use config::AppConfig;
pub use error::{
	AddError, AuthError, ConfigError, LoggerError, LoginError, RemoteReadError,
	RemoteWriteError, SubmitError, UploadError, ValidationError,
};
pub use firebase::FirebaseBackend;
pub use gateway::{BlobStore, PlaceCollection, SessionGateway};
pub use navigation::{initial_screen, NavEvent, Screen};
pub use place::{LocalImage, PlaceEntry};
pub use places::{AddPolicy, ListState, Notice, PlaceListViewModel};
pub use session::{LoginForm, SessionIdentity, SessionStore};

/// Installs the global subscriber: stderr plus a daily rolling file under
/// `<data_dir>/logs`. Keep the returned guard alive or buffered file logs are lost.
///
/// `RUST_LOG` replaces the default directives built from `level`.
pub fn init_logger(data_dir: impl AsRef<Path>, level: &str) -> Result<WorkerGuard, LoggerError> {
	let logs_dir = data_dir.as_ref().join("logs");
	std::fs::create_dir_all(&logs_dir).map_err(|source| LoggerError::LogsDir {
		path: logs_dir.clone(),
		source,
	})?;

	let (non_blocking, guard) = tracing_appender::non_blocking(rolling::daily(&logs_dir, "log"));

	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(format!(
			"warn,tu_core={level},tu_cloud_api={level},travelupa={level}"
		))?,
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(
			fmt::layer()
				.with_writer(non_blocking)
				.with_ansi(false),
		)
		.try_init()?;

	Ok(guard)
}
