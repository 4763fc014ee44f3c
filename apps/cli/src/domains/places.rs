use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use tracing::warn;
use tu_core::{LocalImage, PlaceEntry};

use crate::{context::Context, util::prelude::*};

#[derive(Subcommand, Debug)]
pub enum PlacesCmd {
	/// List every stored place
	List,
	/// Add a place, or replace the one with the same name
	Add(PlaceAddArgs),
	/// Delete a place by name
	Delete { name: String },
}

#[derive(Args, Debug)]
pub struct PlaceAddArgs {
	#[arg(long)]
	pub name: String,
	#[arg(long)]
	pub description: String,
	/// Photo of the place
	#[arg(long)]
	pub image: PathBuf,
}

pub async fn run(ctx: &Context, cmd: PlacesCmd) -> Result<()> {
	let mut places = ctx.place_list()?;
	places.mount();
	places.settle().await;

	match cmd {
		PlacesCmd::List => {
			report_notices(places.take_notices())?;

			print_output!(ctx, places.entries(), |entries: &[PlaceEntry]| {
				if entries.is_empty() {
					println!("No places yet");
				}
				for entry in entries {
					println!("- {}: {}", entry.name, entry.description);
					if let Some(image_uri) = &entry.image_uri {
						println!("  {image_uri}");
					}
				}
			});
		}

		PlacesCmd::Add(args) => {
			// A failed load doesn't block adding
			if let Err(e) = report_notices(places.take_notices()) {
				warn!(?e, "Adding without the current list;");
			}

			let form = places.open_add_form();
			form.set_name(args.name.clone());
			form.set_description(args.description);
			form.pick_image(LocalImage::new(args.image));

			places.submit_add_form()?;
			places.settle().await;
			report_notices(places.take_notices())?;

			let saved = places
				.entries()
				.iter()
				.find(|entry| entry.name == args.name)
				.ok_or_else(|| anyhow!("'{}' is missing after saving", args.name))?;

			print_output!(ctx, saved, |entry: &PlaceEntry| {
				println!("Saved {}", entry.name);
			});
		}

		PlacesCmd::Delete { name } => {
			if let Err(e) = report_notices(places.take_notices()) {
				warn!(?e, "Deleting without the current list;");
			}

			places.request_delete(&name)?;
			places.settle().await;
			report_notices(places.take_notices())?;

			print_output!(ctx, places.entries(), |entries: &[PlaceEntry]| {
				println!("{} place(s) left", entries.len());
			});
		}
	}

	Ok(())
}
