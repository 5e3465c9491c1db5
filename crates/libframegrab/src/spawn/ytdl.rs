//! Module that contains all logic for locating and probing the "ytdl" command
use std::{
	path::{
		Path,
		PathBuf,
	},
	sync::LazyLock,
	time::Duration,
};

use regex::Regex;

use super::locate::{
	ToolCommand,
	ToolOrigin,
	find_in_path,
	probe_with_timeout,
	resolve_override,
};

/// Binary name to spawn for the youtube-dl process
pub const YTDL_BIN_NAME: &str = "yt-dlp";
/// Python module name of yt-dlp, for use with "python -m"
pub const YTDL_MODULE_NAME: &str = "yt_dlp";
/// How long a version probe may take before the candidate is discarded
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Python interpreter names to try for the module fallback, in order
#[cfg(target_os = "windows")]
const PYTHON_NAMES: &[&str] = &["python", "py"];
/// Python interpreter names to try for the module fallback, in order
#[cfg(not(target_os = "windows"))]
const PYTHON_NAMES: &[&str] = &["python3", "python"];

/// Get a installation hint for youtube-dl for the current OS
pub fn install_hint() -> &'static str {
	if cfg!(target_os = "windows") {
		return "install it with \"winget install yt-dlp\" or \"pip install yt-dlp\"";
	}
	if cfg!(target_os = "macos") {
		return "install it with \"brew install yt-dlp\" or \"pip install yt-dlp\"";
	}

	return "install it with \"pip install yt-dlp\" or the package manager of your distribution";
}

/// Resolve how youtube-dl can be invoked
///
/// Order:
/// 1. `explicit`, if set (no fallback if it cannot be resolved)
/// 2. [YTDL_BIN_NAME] in PATH
/// 3. [YTDL_MODULE_NAME] as a module of a python interpreter in PATH, if a version probe succeeds in [PROBE_TIMEOUT]
pub fn locate_ytdl(explicit: Option<&Path>) -> Result<ToolCommand, crate::Error> {
	return locate_ytdl_with(explicit, |name| return find_in_path(name), |tool| {
		let mut cmd = tool.command();
		cmd.arg("--version");

		if let Err(err) = probe_with_timeout(cmd, PROBE_TIMEOUT) {
			debug!("Module probe with \"{}\" failed: {}", tool, err);

			return false;
		}

		return true;
	});
}

/// Resolve how youtube-dl can be invoked, with custom lookup and probe functions
///
/// See [locate_ytdl] for the order
pub fn locate_ytdl_with<L, P>(explicit: Option<&Path>, lookup: L, probe: P) -> Result<ToolCommand, crate::Error>
where
	L: Fn(&str) -> Option<PathBuf>,
	P: Fn(&ToolCommand) -> bool,
{
	if let Some(explicit) = explicit {
		debug!("Using explicitly set youtube-dl command \"{}\"", explicit.display());
		return resolve_override(YTDL_BIN_NAME, explicit, install_hint());
	}

	if let Some(path) = lookup(YTDL_BIN_NAME) {
		debug!("Found youtube-dl in PATH at \"{}\"", path.display());
		return Ok(ToolCommand::new(path, ToolOrigin::Path));
	}

	for &python in PYTHON_NAMES {
		let Some(interpreter) = lookup(python) else {
			continue;
		};

		let tool = ToolCommand::python_module(interpreter, YTDL_MODULE_NAME);

		if probe(&tool) {
			debug!("Using youtube-dl as python module \"{}\"", tool);
			return Ok(tool);
		}
	}

	return Err(crate::Error::tool_not_found(YTDL_BIN_NAME, install_hint()));
}

/// Regex to parse the version from a "youtube-dl --version" output
/// cap1: version (date)
static YTDL_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^(\d{4}\.\d{1,2}\.\d{1,2})").unwrap();
});

/// Get Version of the youtube-dl `tool`
#[inline]
pub fn ytdl_version(tool: &ToolCommand) -> Result<String, crate::Error> {
	let mut cmd = tool.command();
	cmd.arg("--version");

	let output = probe_with_timeout(cmd, PROBE_TIMEOUT)?;

	return ytdl_parse_version(&output);
}

/// Internal Function to parse the input to a ytdl version with regex
#[inline]
fn ytdl_parse_version(input: &str) -> Result<String, crate::Error> {
	return Ok(YTDL_VERSION_REGEX
		.captures_iter(input)
		.next()
		.ok_or_else(|| return crate::Error::no_captures("YTDL Version could not be determined"))?[1]
		.to_owned());
}
