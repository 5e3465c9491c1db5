//! Module that contains all logic for locating and spawning the "ffmpeg" command
use std::{
	path::{
		Path,
		PathBuf,
	},
	process::Command,
	sync::LazyLock,
	time::Duration,
};

use regex::Regex;

use super::locate::{
	ToolCommand,
	ToolOrigin,
	find_in_path,
	first_existing,
	probe_with_timeout,
	resolve_override,
};

/// Binary name to spawn for the ffmpeg process
pub const FFMPEG_BIN_NAME: &str = "ffmpeg";
/// How long "ffmpeg -version" may take
const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Get a installation hint for ffmpeg for the current OS
pub fn install_hint() -> &'static str {
	if cfg!(target_os = "windows") {
		return "install it with \"winget install Gyan.FFmpeg\" or \"choco install ffmpeg\" and make sure it is in PATH";
	}
	if cfg!(target_os = "macos") {
		return "install it with \"brew install ffmpeg\"";
	}

	return "install it with the package manager of your distribution, like \"sudo apt install ffmpeg\"";
}

/// Get the conventional installation locations of ffmpeg on windows, in the order they are checked
#[cfg(target_os = "windows")]
pub fn known_locations() -> Vec<PathBuf> {
	let mut locations = vec![
		PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"),
		PathBuf::from(r"C:\Program Files\ffmpeg\bin\ffmpeg.exe"),
		PathBuf::from(r"C:\ProgramData\chocolatey\bin\ffmpeg.exe"),
	];

	if let Some(home) = dirs::home_dir() {
		locations.push(home.join(r"scoop\shims\ffmpeg.exe"));
	}
	if let Some(local) = dirs::data_local_dir() {
		locations.push(local.join(r"Microsoft\WinGet\Links\ffmpeg.exe"));
	}

	return locations;
}

/// Get the conventional installation locations of ffmpeg on macos, in the order they are checked
#[cfg(target_os = "macos")]
pub fn known_locations() -> Vec<PathBuf> {
	return vec![
		PathBuf::from("/opt/homebrew/bin/ffmpeg"),
		PathBuf::from("/usr/local/bin/ffmpeg"),
		PathBuf::from("/opt/local/bin/ffmpeg"),
	];
}

/// Get the conventional installation locations of ffmpeg on other unix-likes, in the order they are checked
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn known_locations() -> Vec<PathBuf> {
	let mut locations = vec![
		PathBuf::from("/usr/bin/ffmpeg"),
		PathBuf::from("/usr/local/bin/ffmpeg"),
		PathBuf::from("/snap/bin/ffmpeg"),
	];

	if let Some(home) = dirs::home_dir() {
		locations.push(home.join(".local/bin/ffmpeg"));
	}

	return locations;
}

/// Resolve how ffmpeg can be invoked
///
/// Order:
/// 1. `explicit`, if set (no fallback if it cannot be resolved)
/// 2. [FFMPEG_BIN_NAME] in PATH
/// 3. the first existing path of [known_locations]
pub fn locate_ffmpeg(explicit: Option<&Path>) -> Result<ToolCommand, crate::Error> {
	return locate_ffmpeg_with(explicit, |name| return find_in_path(name), &known_locations());
}

/// Resolve how ffmpeg can be invoked, with a custom lookup function and custom locations
///
/// See [locate_ffmpeg] for the order
pub fn locate_ffmpeg_with<L>(explicit: Option<&Path>, lookup: L, locations: &[PathBuf]) -> Result<ToolCommand, crate::Error>
where
	L: Fn(&str) -> Option<PathBuf>,
{
	if let Some(explicit) = explicit {
		debug!("Using explicitly set ffmpeg command \"{}\"", explicit.display());
		return resolve_override(FFMPEG_BIN_NAME, explicit, install_hint());
	}

	if let Some(path) = lookup(FFMPEG_BIN_NAME) {
		debug!("Found ffmpeg in PATH at \"{}\"", path.display());
		return Ok(ToolCommand::new(path, ToolOrigin::Path));
	}

	if let Some(path) = first_existing(locations) {
		debug!("Found ffmpeg at known location \"{}\"", path.display());
		return Ok(ToolCommand::new(path.clone(), ToolOrigin::KnownLocation));
	}

	return Err(crate::Error::tool_not_found(FFMPEG_BIN_NAME, install_hint()));
}

/// Create a new ffmpeg [Command] from `tool`, with non-interactive defaults applied
#[inline]
#[must_use]
pub fn base_ffmpeg(tool: &ToolCommand, overwrite: bool) -> Command {
	let mut cmd = tool.command();

	if overwrite {
		cmd.arg("-y"); // always overwrite output path
	}

	// explicitly disable interactive mode
	cmd.arg("-nostdin");
	// dont print the build configuration on every run
	cmd.arg("-hide_banner");

	return cmd;
}

/// Regex to parse the version from a "ffmpeg -version" output
/// cap1: version
static FFMPEG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^ffmpeg version ([a-z0-9.-]+) Copyright").unwrap();
});

/// Get Version of the ffmpeg `tool`
#[inline]
pub fn ffmpeg_version(tool: &ToolCommand) -> Result<String, crate::Error> {
	let mut cmd = tool.command();
	cmd.arg("-version");

	let output = probe_with_timeout(cmd, VERSION_TIMEOUT)?;

	return ffmpeg_parse_version(&output);
}

/// Internal Function to parse the input to a ffmpeg version with regex
#[inline]
fn ffmpeg_parse_version(input: &str) -> Result<String, crate::Error> {
	return Ok(FFMPEG_VERSION_REGEX
		.captures_iter(input)
		.next()
		.ok_or_else(|| return crate::Error::no_captures("FFMPEG Version could not be determined"))?[1]
		.to_owned());
}

#[cfg(test)]
mod test {
	use std::ffi::OsStr;

	use super::*;

	#[test]
	fn test_ffmpeg_parse_version_invalid_input() {
		assert_eq!(
			ffmpeg_parse_version("hello"),
			Err(crate::Error::no_captures("FFMPEG Version could not be determined"))
		);
	}

	#[test]
	fn test_ffmpeg_parse_version_valid_static_input() {
		let ffmpeg_output = "ffmpeg version n6.1.1 Copyright (c) 2000-2023 the FFmpeg developers
built with gcc 13.2.1 (GCC) 20230801
configuration: --prefix=/usr --disable-debug --disable-static --disable-stripping --enable-gpl --enable-libx264 --enable-shared --enable-version3
libavutil      58. 29.100 / 58. 29.100
libavcodec     60. 31.102 / 60. 31.102
libavformat    60. 16.100 / 60. 16.100
";

		assert_eq!(ffmpeg_parse_version(ffmpeg_output), Ok("n6.1.1".to_owned()));
	}

	#[test]
	#[ignore = "CI Install not present currently"]
	fn test_ffmpeg_spawn() {
		let tool = locate_ffmpeg(None).expect("Expected ffmpeg to be installed");
		assert!(ffmpeg_version(&tool).is_ok());
	}

	#[test]
	fn test_base_ffmpeg_args() {
		let tool = ToolCommand::new("/usr/bin/ffmpeg", ToolOrigin::Path);

		let cmd = base_ffmpeg(&tool, true);
		let args: Vec<&OsStr> = cmd.get_args().collect();
		assert_eq!(vec![OsStr::new("-y"), OsStr::new("-nostdin"), OsStr::new("-hide_banner")], args);

		let cmd = base_ffmpeg(&tool, false);
		let args: Vec<&OsStr> = cmd.get_args().collect();
		assert_eq!(vec![OsStr::new("-nostdin"), OsStr::new("-hide_banner")], args);
	}

	#[test]
	fn test_known_locations_not_empty() {
		assert!(!known_locations().is_empty());
	}

	mod locate {
		use super::*;

		#[test]
		fn test_path_first() {
			let res = locate_ffmpeg_with(
				None,
				|name| return Some(PathBuf::from("/bin").join(name)),
				&[PathBuf::from("/should/not/be/used")],
			);

			assert_eq!(Ok(ToolCommand::new("/bin/ffmpeg", ToolOrigin::Path)), res);
		}

		#[test]
		fn test_known_location_fallback() {
			let tempdir = tempfile::Builder::new()
				.prefix("framegrab-test-locateffmpeg-")
				.tempdir()
				.expect("Expected a temp dir to be created");

			let installed = tempdir.path().join("ffmpeg");
			std::fs::write(&installed, "").expect("Expected write to be successfull");

			let res = locate_ffmpeg_with(
				None,
				|_| return None,
				&[tempdir.path().join("missing"), installed.clone()],
			);

			assert_eq!(Ok(ToolCommand::new(installed, ToolOrigin::KnownLocation)), res);
		}

		#[test]
		fn test_not_found() {
			let res = locate_ffmpeg_with(None, |_| return None, &[PathBuf::from("/this/path/does/not/exist")]);

			assert_eq!(Err(crate::Error::tool_not_found(FFMPEG_BIN_NAME, install_hint())), res);
		}
	}
}
