//! Module for the "acquire" step, downloading the media with youtube-dl

use std::{
	collections::VecDeque,
	ffi::OsString,
	io::{
		BufRead,
		BufReader,
	},
	path::Path,
	process::ExitStatus,
	sync::LazyLock,
	time::Duration,
};

use regex::Regex;

use crate::{
	data::layout::escape_percent,
	error::IOErrorToError,
	spawn::{
		ERROR_TAIL_LINES,
		locate::ToolCommand,
		unsuccessful_command_exit,
		ytdl::YTDL_BIN_NAME,
	},
};

/// Format selection, preferring a mp4 video with m4a audio merged, then the best single mp4, then anything
pub const FORMAT_SELECTION: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Assemble all arguments for youtube-dl to download `url` into `destination`, in order
pub fn assemble_ytdl_args(url: &str, destination: &Path) -> Vec<OsString> {
	return vec![
		OsString::from("-f"),
		OsString::from(FORMAT_SELECTION),
		// only errors are important, warnings are mostly about extractor quirks
		OsString::from("--no-warnings"),
		// ensure the progress reports are on their own line, instead of being "\r" updated
		OsString::from("--newline"),
		OsString::from("-o"),
		// "-o" is a output template, so a literal "%" in the path has to be escaped
		escape_percent(destination),
		OsString::from(url),
	];
}

/// Download `url` into `destination` with the youtube-dl `tool`
/// `pgcb` is called with the download percentage whenever it changes
///
/// Assumes `tool` has already been resolved (like with [crate::spawn::ytdl::locate_ytdl])
pub fn acquire<C: FnMut(u8)>(
	tool: &ToolCommand,
	url: &str,
	destination: &Path,
	print_command_log: bool,
	pgcb: C,
) -> Result<(), crate::Error> {
	let url = url.trim();

	if url.is_empty() {
		return Err(crate::Error::invalid_argument("Source URL is empty"));
	}

	if let Some(parent) = destination.parent().filter(|v| return !v.as_os_str().is_empty()) {
		if parent.exists() && !parent.is_dir() {
			return Err(crate::Error::not_a_directory(
				"Destination parent exists but is not a directory!",
				parent,
			));
		}

		std::fs::create_dir_all(parent).attach_path_err(parent)?;
	}

	info!(
		"Downloading \"{}\" to \"{}\" with \"{}\"",
		url,
		destination.display(),
		tool
	);

	// merge stderr into stdout, "unchecked" so that the exit status can be handled here instead of as a io error
	let ytdl_child = tool
		.expression(assemble_ytdl_args(url, destination))
		.stderr_to_stdout()
		.stdin_null()
		.unchecked()
		.reader()
		.attach_location_err("duct ytdl reader")?;

	let diagnostic = handle_output(BufReader::new(&ytdl_child), print_command_log, pgcb);

	let status = wait_reader(&ytdl_child)?;

	if !status.success() {
		return Err(unsuccessful_command_exit(YTDL_BIN_NAME, status, &diagnostic));
	}

	if !destination.is_file() {
		return Err(crate::Error::not_a_file(
			"youtube-dl exited successfully, but the output file does not exist",
			destination,
		));
	}

	return Ok(());
}

/// Wait until the duct `reader` has exited and get its status
fn wait_reader(reader: &duct::ReaderHandle) -> Result<ExitStatus, crate::Error> {
	loop {
		// wait loop, because somehow a "ReaderHandle" does not implement "wait", only "try_wait", but have to wait for it to exit here
		if let Some(output) = reader.try_wait().attach_location_err("duct ytdl try_wait")? {
			return Ok(output.status);
		}

		std::thread::sleep(Duration::from_millis(100)); // sleep to same some time between the next wait (to not cause constant cpu spike)
	}
}

/// Regex to parse the download percentage from a line
/// cap1: percentage (not decimal)
static DOWNLOAD_PERCENTAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^\[download\]\s+(\d{1,3})(?:\.\d+)?%").unwrap();
});

/// Try to get the download percentage from a youtube-dl output line
fn try_get_download_percent(line: &str) -> Option<u8> {
	let cap = DOWNLOAD_PERCENTAGE_REGEX.captures(line)?;

	return cap[1].parse::<u8>().ok();
}

/// Read all lines of `reader` until EOF, reporting progress to `pgcb`
/// Returns the text that best describes a failure: the last "ERROR:" line, or otherwise the last lines of the output
///
/// Lines are decoded lossy, the output has to be drained fully or youtube-dl may block on a full pipe
fn handle_output<R: BufRead, C: FnMut(u8)>(mut reader: R, print_command_log: bool, mut pgcb: C) -> String {
	let mut last_error: Option<String> = None;
	let mut tail: VecDeque<String> = VecDeque::with_capacity(ERROR_TAIL_LINES);
	let mut last_percent: Option<u8> = None;
	let mut buf: Vec<u8> = Vec::new();

	loop {
		buf.clear();

		match reader.read_until(b'\n', &mut buf) {
			Ok(0) => break,
			Ok(_) => (),
			Err(err) => {
				debug!("duct output reader errored: {}", err);
				break;
			},
		}

		// youtube-dl output is not always UTF-8, like titles printed with a non-UTF-8 console code page
		let decoded = String::from_utf8_lossy(&buf);
		let line = decoded.trim_end_matches(['\n', '\r']);

		if print_command_log {
			trace!("ytdl [STDOUT]: \"{}\"", line);
		}

		if let Some(percent) = try_get_download_percent(line) {
			// only report changes, youtube-dl outputs the same percentage multiple times for fast downloads
			if last_percent != Some(percent) {
				last_percent = Some(percent);
				pgcb(percent);
			}
		} else if line.starts_with("ERROR:") {
			// the following is using debug printing, because the line may include escape characters
			warn!("Encountered youtube-dl error: {:#?}", line);
			last_error = Some(line.to_owned());
		}

		if tail.len() == ERROR_TAIL_LINES {
			tail.pop_front();
		}
		tail.push_back(line.to_owned());
	}

	return last_error.unwrap_or_else(|| return Vec::from(tail).join("\n"));
}
