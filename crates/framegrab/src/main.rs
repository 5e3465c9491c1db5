#![allow(clippy::needless_return)]
#![warn(clippy::implicit_return)]

#[macro_use]
extern crate log;

use flexi_logger::LogSpecification;

mod clap_conf;
mod commands;
mod error;
mod logger;
mod state;
mod utils;

use clap_conf::CliDerive;
pub use error::Error;

/// Main
fn main() {
	if let Err(err) = run() {
		debug!("Run failed: {:?}", err);
		utils::print_error(err.to_string());

		// partial files are left as they are
		std::process::exit(1);
	}
}

/// Parse the arguments, set up logging and run the requested command
fn run() -> Result<(), crate::Error> {
	let logger_handle = logger::setup_logger()?;

	let cli_matches = CliDerive::custom_parse()?;

	colored::control::set_override(cli_matches.enable_colors());

	// apply cli "verbosity" argument to the log level
	logger_handle.set_new_spec(match cli_matches.verbosity {
		0 => LogSpecification::parse("warn"),
		1 => LogSpecification::parse("info"),
		2 => LogSpecification::parse("debug"),
		_ => LogSpecification::parse("trace"),
	}?);

	info!("CLI Verbosity is {}", cli_matches.verbosity);

	if let Some(shell) = cli_matches.completions {
		return commands::completions::command_completions(shell);
	}

	commands::run::command_run(&cli_matches)?;

	return Ok(());
}
