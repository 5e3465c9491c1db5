//! Module for all spawn related things, like locating and building commands for the external tools

use std::process::ExitStatus;

pub mod ffmpeg;
pub mod locate;
pub mod ytdl;

/// How many lines of a command's output are kept for error messages
pub const ERROR_TAIL_LINES: usize = 10;

/// Get the last `count` non-empty lines of `output`, joined by a newline
pub fn last_lines(output: &str, count: usize) -> String {
	let lines: Vec<&str> = output.lines().filter(|v| return !v.trim().is_empty()).collect();
	let start = lines.len().saturating_sub(count);

	return lines[start..].join("\n");
}

/// Create a consistent [crate::Error] for when `name` exited with a non-0 status
/// `output` is expected to be the diagnostic output of the command, of which only the last lines are used
pub fn unsuccessful_command_exit(name: &str, status: ExitStatus, output: &str) -> crate::Error {
	let code = match status.code() {
		Some(code) => code.to_string(),
		None => "None (terminated by signal)".to_owned(),
	};

	return crate::Error::command_unsuccessful(format!(
		"{} did not successfully exit! Exit Code: {}\nLast Lines:\n{}",
		name,
		code,
		last_lines(output, ERROR_TAIL_LINES)
	));
}
