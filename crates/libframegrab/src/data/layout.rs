//! Module for the on-disk layout of a run

use std::{
	ffi::OsString,
	path::{
		Path,
		PathBuf,
	},
};

/// Filename of the downloaded media inside the output directory
pub const VIDEO_FILE_NAME: &str = "video.mp4";
/// Name of the directory inside the output directory the frames are written to
pub const IMAGES_DIR_NAME: &str = "images";
/// Prefix every frame file starts with
pub const FRAME_PREFIX: &str = "frame_";
/// Extension every frame file has
pub const FRAME_EXTENSION: &str = "jpg";
/// Output pattern given to ffmpeg, numbering is done by ffmpeg
pub const FRAME_PATTERN: &str = "frame_%04d.jpg";

/// All paths used in a single run, derived from the output directory
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
	/// The base directory everything is written into
	pub output_dir: PathBuf,
	/// Path the media is downloaded to and read from
	pub video_path: PathBuf,
	/// Directory the frames are written into
	pub images_dir: PathBuf,
}

impl OutputLayout {
	/// Derive all paths from `output_dir`
	pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
		let output_dir = output_dir.into();

		return Self {
			video_path: output_dir.join(VIDEO_FILE_NAME),
			images_dir: output_dir.join(IMAGES_DIR_NAME),
			output_dir,
		};
	}

	/// Get the pattern path ffmpeg should write the frames to
	#[must_use]
	pub fn frame_pattern(&self) -> PathBuf {
		return frame_pattern_in(&self.images_dir);
	}
}

/// Get the ffmpeg output pattern for frames inside `dir`
/// Every "%" of `dir` is escaped, as ffmpeg treats the whole path as a pattern
pub fn frame_pattern_in(dir: &Path) -> PathBuf {
	return PathBuf::from(escape_percent(dir)).join(FRAME_PATTERN);
}

/// Escape every "%" in `path` as "%%", for tools that treat a output path as a template (ffmpeg, youtube-dl)
/// Paths that are not valid UTF-8 are returned unchanged
pub fn escape_percent(path: &Path) -> OsString {
	let Some(as_str) = path.to_str() else {
		debug!("Cannot escape non-UTF-8 path \"{}\"", path.display());
		return path.as_os_str().to_owned();
	};

	return OsString::from(as_str.replace('%', "%%"));
}

/// Test if the given filename is named like a extracted frame
pub fn is_frame_file_name(name: &str) -> bool {
	let Some(rest) = name.strip_prefix(FRAME_PREFIX) else {
		return false;
	};

	return rest
		.strip_suffix(FRAME_EXTENSION)
		.is_some_and(|v| return v.ends_with('.'));
}
