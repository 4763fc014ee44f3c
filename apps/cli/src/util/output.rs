use anyhow::{bail, Result};
use serde::Serialize;
use tu_core::Notice;

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(json) => println!("{json}"),
		Err(e) => eprintln!("Failed to serialize output: {e}"),
	}
}

/// Shows every notice on stderr and fails with the first error among them.
pub fn report_notices(notices: Vec<Notice>) -> Result<()> {
	let mut failure = None;

	for notice in notices {
		eprintln!("{}", notice.message);

		if notice.is_error() && failure.is_none() {
			failure = Some(notice.message);
		}
	}

	match failure {
		Some(message) => bail!(message),
		None => Ok(()),
	}
}
