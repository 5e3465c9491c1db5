//! Utils for the `framegrab` binary

use crate::clap_conf::CliDerive;
use colored::{
	Color,
	Colorize,
};
use indicatif::{
	ProgressBar,
	ProgressDrawTarget,
};

/// Helper function to set the progressbar to a draw target if mode is interactive
pub fn set_progressbar(bar: &ProgressBar, main_args: &CliDerive) {
	if main_args.is_interactive() {
		bar.set_draw_target(ProgressDrawTarget::stderr());
	}
}

/// Print a informational status line to stdout
pub fn print_info<M: AsRef<str>>(msg: M) {
	println!("{} {}", "[INFO]".color(Color::Cyan), msg.as_ref());
}

/// Print a success status line to stdout
pub fn print_ok<M: AsRef<str>>(msg: M) {
	println!("{} {}", "[OK]".color(Color::Green), msg.as_ref());
}

/// Print a error status line to stderr
pub fn print_error<M: AsRef<str>>(msg: M) {
	eprintln!("{} {}", "[ERROR]".color(Color::Red), msg.as_ref());
}
