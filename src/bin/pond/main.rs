use std::process::ExitCode;

use quack::{
	config::Config,
	dependencies::{config, executor},
	services::{
		handlers::PondHandler,
		response::{ServiceError, ValidationError},
		session::Session,
	},
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: pond feed <user_id> | users <term> | quacks <term> | quack <quack_id>";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	dotenv::dotenv().ok();

	let config = match config() {
		Ok(config) => config,
		Err(err) => {
			eprintln!("{err}");
			return ExitCode::FAILURE;
		}
	};

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("quack={}", config.log_level).into()))
		.with(tracing_subscriber::fmt::layer())
		.init();

	let args: Vec<String> = std::env::args().skip(1).collect();
	match run(&args, config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("{err}");
			eprintln!("{err}");
			ExitCode::FAILURE
		}
	}
}

async fn run(
	args: &[String],
	config: &Config,
) -> Result<(), ServiceError> {
	let (command, argument) = match args {
		[command, argument] => (command.as_str(), argument.as_str()),
		_ => {
			eprintln!("{USAGE}");
			return Ok(());
		}
	};

	// ! Connection
	let executor = executor().await?;
	let mut session = Session::new(config);

	match command {
		"feed" => print(&PondHandler::compose_feed(parse_id(argument)?, &executor).await?),
		"users" => print(&PondHandler::search_users(argument, &mut session, &executor).await?),
		"quacks" => print(&PondHandler::search_quacks(argument, &mut session, &executor).await?),
		"quack" => print(&PondHandler::quack_detail(parse_id(argument)?, &executor).await?),
		_ => {
			eprintln!("{USAGE}");
			Ok(())
		}
	}
}

fn parse_id(raw: &str) -> Result<i32, ServiceError> {
	Ok(raw.trim().parse::<i32>().map_err(|_| ValidationError::InvalidId)?)
}

fn print<T: Serialize>(value: &T) -> Result<(), ServiceError> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
