use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tu_core::{config::default_data_dir, init_logger, AppConfig};

mod context;
mod domains;
mod util;

use context::{Context, OutputFormat};
use domains::{places::PlacesCmd, session::LoginArgs};

#[derive(Parser, Debug)]
#[command(name = "travelupa", about = "Travelupa tourist place recommendations")]
struct Cli {
	/// Path to the Travelupa data directory
	#[arg(long, env = "TRAVELUPA_DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Who is signed in, and where the app would open
	Status,
	/// Sign in with email and password
	Login(LoginArgs),
	/// Forget the stored session
	Logout,
	/// Tourist place operations
	#[command(subcommand)]
	Places(PlacesCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let data_dir = match cli.data_dir {
		Some(data_dir) => data_dir,
		None => default_data_dir()?,
	};

	let mut config = AppConfig::load_from(&data_dir)?;
	config.apply_env();

	let _guard = init_logger(&data_dir, &config.log_level)?;
	config.validate()?;

	let ctx = Context::new(config, data_dir, cli.format);

	match cli.command {
		Commands::Status => domains::session::status(&ctx),
		Commands::Login(args) => domains::session::login(&ctx, args).await,
		Commands::Logout => domains::session::logout(&ctx),
		Commands::Places(cmd) => domains::places::run(&ctx, cmd).await,
	}
}
