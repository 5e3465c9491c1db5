//! Module for the "sample" step, extracting still frames from a media file with ffmpeg

use std::{
	ffi::OsString,
	path::Path,
	process::{
		Command,
		Stdio,
	},
};

use crate::{
	data::{
		layout::{
			frame_pattern_in,
			is_frame_file_name,
		},
		sample_rate::SampleRate,
	},
	error::IOErrorToError,
	spawn::{
		ffmpeg::{
			FFMPEG_BIN_NAME,
			base_ffmpeg,
		},
		locate::ToolCommand,
		unsuccessful_command_exit,
	},
};

/// The jpeg quality scale given to ffmpeg, where 2 is the best practical value
pub const JPEG_QUALITY: &str = "2";

/// Assemble all arguments for ffmpeg to sample `video` into `output_dir` with `rate`, in order
/// This does not include the base arguments from [base_ffmpeg]
pub fn assemble_ffmpeg_args(video: &Path, output_dir: &Path, rate: SampleRate) -> Vec<OsString> {
	return vec![
		OsString::from("-i"),
		video.as_os_str().to_owned(),
		OsString::from("-vf"),
		OsString::from(rate.as_filter()),
		OsString::from("-q:v"),
		OsString::from(JPEG_QUALITY),
		frame_pattern_in(output_dir).into_os_string(),
	];
}

/// Extract frames from `video` into `output_dir` at `rate` frames per second with the ffmpeg `tool`
/// Already existing frames are overwritten
///
/// Returns the count of frame files in `output_dir` after ffmpeg has finished
pub fn sample(tool: &ToolCommand, video: &Path, output_dir: &Path, rate: SampleRate) -> Result<usize, crate::Error> {
	let cmd = base_ffmpeg(tool, true);

	return sample_with_command(cmd, video, output_dir, rate);
}

/// Extract frames from `video` into `output_dir` at `rate` with the provided command base
///
/// This function should not be called directly, use [sample] instead
pub fn sample_with_command(
	mut cmd: Command,
	video: &Path,
	output_dir: &Path,
	rate: SampleRate,
) -> Result<usize, crate::Error> {
	if !video.exists() {
		return Err(crate::Error::custom_ioerror_path(
			std::io::ErrorKind::NotFound,
			"video does not exist!",
			video,
		));
	}

	if !video.is_file() {
		return Err(crate::Error::not_a_file("video is not a file!", video));
	}

	if output_dir.exists() && !output_dir.is_dir() {
		return Err(crate::Error::not_a_directory(
			"output_dir exists but is not a directory!",
			output_dir,
		));
	}

	std::fs::create_dir_all(output_dir).attach_path_err(output_dir)?;

	// frames of a earlier run that are not overwritten (like from a higher rate) are still counted afterwards
	let existing = count_frames(output_dir)?;
	if existing > 0 {
		debug!(
			"\"{}\" already contains {} frames before extracting",
			output_dir.display(),
			existing
		);
	}

	info!(
		"Extracting frames from \"{}\" into \"{}\" at {} per second",
		video.display(),
		output_dir.display(),
		rate
	);

	cmd.args(assemble_ffmpeg_args(video, output_dir, rate));

	// create pipe for stderr, other stream are ignored
	// this is because ffmpeg only logs to stderr, where stdout is used for data piping
	cmd.stdout(Stdio::null()).stderr(Stdio::piped()).stdin(Stdio::null());

	let ffmpeg_output = cmd
		.spawn()
		.attach_location_err("ffmpeg spawn")?
		.wait_with_output()
		.attach_location_err("ffmpeg wait_with_output")?;

	let output_as_string = String::from_utf8_lossy(&ffmpeg_output.stderr);

	if !ffmpeg_output.status.success() {
		return Err(unsuccessful_command_exit(
			FFMPEG_BIN_NAME,
			ffmpeg_output.status,
			&output_as_string,
		));
	}

	let count = count_frames(output_dir)?;
	debug!("Found {} frames in \"{}\"", count, output_dir.display());

	return Ok(count);
}

/// Count all files in `dir` that are named like a extracted frame
pub fn count_frames(dir: &Path) -> Result<usize, crate::Error> {
	let mut count = 0;

	for entry in std::fs::read_dir(dir).attach_path_err(dir)? {
		let entry = entry.attach_path_err(dir)?;

		if !entry.file_type().attach_path_err(entry.path())?.is_file() {
			continue;
		}

		if entry.file_name().to_str().is_some_and(is_frame_file_name) {
			count += 1;
		}
	}

	return Ok(count);
}
