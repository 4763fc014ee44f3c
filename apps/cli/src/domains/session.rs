use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tu_core::{initial_screen, LoginForm, NavEvent, Screen, SessionGateway, SessionIdentity};

use crate::{context::Context, util::prelude::*};

#[derive(Args, Debug)]
pub struct LoginArgs {
	#[arg(long)]
	pub email: String,
	#[arg(long, env = "TRAVELUPA_PASSWORD", hide_env_values = true)]
	pub password: String,
}

/// What the CLI shows about a session. The id token never leaves the core.
#[derive(Debug, Serialize)]
struct SessionOutput {
	screen: Screen,
	user_id: Option<String>,
	email: Option<String>,
}

impl SessionOutput {
	fn new(screen: Screen, identity: Option<&SessionIdentity>) -> Self {
		Self {
			screen,
			user_id: identity.map(|identity| identity.user_id.clone()),
			email: identity.map(|identity| identity.email.clone()),
		}
	}
}

pub fn status(ctx: &Context) -> Result<()> {
	let identity = ctx.session.current_identity();
	let out = SessionOutput::new(initial_screen(identity.as_ref()), identity.as_ref());

	print_output!(ctx, &out, |o: &SessionOutput| {
		match &o.email {
			Some(email) => println!("Signed in as {email}"),
			None => println!("Not signed in"),
		}
		println!("Data directory: {}", ctx.data_dir.display());
	});

	Ok(())
}

pub async fn login(ctx: &Context, args: LoginArgs) -> Result<()> {
	let mut form = LoginForm::new();
	form.set_email(args.email);
	form.set_password(args.password);

	let identity = form.sign_in(ctx.session.clone()).await?;
	let out = SessionOutput::new(Screen::Login.on(NavEvent::SignedIn), Some(&identity));

	print_output!(ctx, &out, |o: &SessionOutput| {
		println!("Signed in as {}", o.email.as_deref().unwrap_or_default());
	});

	Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
	ctx.session.sign_out();
	let out = SessionOutput::new(Screen::Places.on(NavEvent::SignedOut), None);

	print_output!(ctx, &out, |_: &SessionOutput| println!("Signed out"));

	Ok(())
}
