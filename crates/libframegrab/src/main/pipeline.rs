//! Module for running the whole pipeline: acquire, then sample

use std::path::{
	Path,
	PathBuf,
};

use crate::{
	data::sample_rate::SampleRate,
	error::IOErrorToError,
	spawn::{
		ffmpeg::{
			ffmpeg_version,
			locate_ffmpeg,
		},
		ytdl::{
			locate_ytdl,
			ytdl_version,
		},
	},
	traits::{
		pipeline_options::PipelineOptions,
		pipeline_steps::PipelineSteps,
	},
};

/// Enum for hooks to know what is currently happening
/// Variants are always called in the order they are defined in, but steps that do not run are skipped
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineProgress {
	/// Variant representing that the download is starting
	/// values: (url)
	AcquireStarting(String),
	/// Variant representing that the download has progressed
	/// values: (percent)
	AcquireProgress(u8),
	/// Variant representing that the download has finished
	/// values: (video path)
	AcquireFinished(PathBuf),
	/// Variant representing that the frame extraction is starting
	/// values: (rate)
	SampleStarting(SampleRate),
	/// Variant representing that the frame extraction has finished
	/// values: (frame count)
	SampleFinished(usize),
}

/// The result of a successfull [run_pipeline]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
	/// Path of the media file
	pub video_path:  PathBuf,
	/// Directory containing the frames
	pub images_dir:  PathBuf,
	/// Count of frames, [None] if the sample step did not run
	pub frame_count: Option<usize>,
}

/// Run all steps `options` requests with `steps`
/// Stops at the first error, files that were already written are not cleaned-up
pub fn run_pipeline<O: PipelineOptions, S: PipelineSteps, C: FnMut(PipelineProgress)>(
	options: &O,
	steps: &mut S,
	mut pgcb: C,
) -> Result<PipelineSummary, crate::Error> {
	let layout = options.layout();
	let mode = options.run_mode();

	debug!("Running pipeline in mode {:?} for \"{}\"", mode, layout.output_dir.display());

	if mode.runs_acquire() {
		let url = options
			.source_url()
			.map(str::trim)
			.filter(|v| return !v.is_empty())
			.ok_or_else(|| return crate::Error::invalid_argument("A source URL is required for downloading"))?;

		std::fs::create_dir_all(&layout.output_dir).attach_path_err(&layout.output_dir)?;

		pgcb(PipelineProgress::AcquireStarting(url.to_owned()));
		steps.acquire(url, &layout.video_path, &mut |percent| {
			pgcb(PipelineProgress::AcquireProgress(percent));
		})?;
		pgcb(PipelineProgress::AcquireFinished(layout.video_path.clone()));
	}

	let mut frame_count = None;

	if mode.runs_sample() {
		// the video has to exist before sampling, either just downloaded or already provided
		if !layout.video_path.is_file() {
			return Err(crate::Error::custom_ioerror_path(
				std::io::ErrorKind::NotFound,
				"Video file does not exist, cannot extract frames",
				&layout.video_path,
			));
		}

		let rate = options.sample_rate();

		pgcb(PipelineProgress::SampleStarting(rate));
		let count = steps.sample(&layout.video_path, &layout.images_dir, rate)?;
		pgcb(PipelineProgress::SampleFinished(count));

		frame_count = Some(count);
	}

	return Ok(PipelineSummary {
		video_path: layout.video_path.clone(),
		images_dir: layout.images_dir.clone(),
		frame_count,
	});
}

/// [PipelineSteps] implementation that locates and runs youtube-dl and ffmpeg
/// Tools are located once per step invocation, nothing is cached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalTools {
	/// Explicitly set youtube-dl command
	ytdl_override:     Option<PathBuf>,
	/// Explicitly set ffmpeg command
	ffmpeg_override:   Option<PathBuf>,
	/// Log youtube-dl output as trace
	print_command_log: bool,
}

impl ExternalTools {
	/// Create a new instance which searches for all tools
	#[must_use]
	pub fn new() -> Self {
		return Self::default();
	}

	/// Set a explicit youtube-dl command to use instead of searching for it
	#[must_use]
	pub fn with_ytdl_override(mut self, path: Option<PathBuf>) -> Self {
		self.ytdl_override = path;

		return self;
	}

	/// Set a explicit ffmpeg command to use instead of searching for it
	#[must_use]
	pub fn with_ffmpeg_override(mut self, path: Option<PathBuf>) -> Self {
		self.ffmpeg_override = path;

		return self;
	}

	/// Set whether the youtube-dl output should be logged as trace
	#[must_use]
	pub fn with_print_command_log(mut self, print: bool) -> Self {
		self.print_command_log = print;

		return self;
	}
}

impl PipelineSteps for ExternalTools {
	fn acquire(&mut self, url: &str, destination: &Path, pgcb: &mut dyn FnMut(u8)) -> Result<(), crate::Error> {
		let tool = locate_ytdl(self.ytdl_override.as_deref())?;

		match ytdl_version(&tool) {
			Ok(version) => info!("Using youtube-dl \"{}\" version {}", tool, version),
			Err(err) => warn!("Could not determine youtube-dl version of \"{}\": {}", tool, err),
		}

		return super::acquire::acquire(&tool, url, destination, self.print_command_log, pgcb);
	}

	fn sample(&mut self, video: &Path, images_dir: &Path, rate: SampleRate) -> Result<usize, crate::Error> {
		let tool = locate_ffmpeg(self.ffmpeg_override.as_deref())?;

		match ffmpeg_version(&tool) {
			Ok(version) => info!("Using ffmpeg \"{}\" version {}", tool, version),
			Err(err) => warn!("Could not determine ffmpeg version of \"{}\": {}", tool, err),
		}

		return super::sample::sample(&tool, video, images_dir, rate);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::data::{
		layout::OutputLayout,
		run_mode::RunMode,
	};
	use tempfile::{
		Builder as TempBuilder,
		TempDir,
	};

	fn create_dir(target: &'static str) -> (PathBuf, TempDir) {
		let testdir = TempBuilder::new()
			.prefix(&format!("framegrab-test-{target}-"))
			.tempdir()
			.expect("Expected a temp dir to be created");

		return (testdir.as_ref().to_owned(), testdir);
	}

	/// Test Implementation for [`PipelineOptions`]
	struct TestOptions {
		url:    Option<String>,
		layout: OutputLayout,
		rate:   SampleRate,
		mode:   RunMode,
	}

	impl TestOptions {
		fn new(output_dir: PathBuf, mode: RunMode) -> Self {
			return Self {
				url: Some("https://example.com/video/ID".to_owned()),
				layout: OutputLayout::new(output_dir),
				rate: SampleRate::DEFAULT,
				mode,
			};
		}
	}

	impl PipelineOptions for TestOptions {
		fn source_url(&self) -> Option<&str> {
			return self.url.as_deref();
		}

		fn layout(&self) -> &OutputLayout {
			return &self.layout;
		}

		fn sample_rate(&self) -> SampleRate {
			return self.rate;
		}

		fn run_mode(&self) -> RunMode {
			return self.mode;
		}
	}

	/// Test Implementation for [`PipelineSteps`] that records which steps were called
	#[derive(Default)]
	struct RecordingSteps {
		calls:         Vec<&'static str>,
		acquire_error: Option<crate::Error>,
		create_video:  bool,
		frames:        usize,
	}

	impl PipelineSteps for RecordingSteps {
		fn acquire(&mut self, _url: &str, destination: &Path, pgcb: &mut dyn FnMut(u8)) -> Result<(), crate::Error> {
			self.calls.push("acquire");

			if let Some(err) = self.acquire_error.take() {
				return Err(err);
			}

			pgcb(100);

			if self.create_video {
				std::fs::File::create(destination).expect("Expected File::create to be successfull");
			}

			return Ok(());
		}

		fn sample(&mut self, _video: &Path, _images_dir: &Path, _rate: SampleRate) -> Result<usize, crate::Error> {
			self.calls.push("sample");

			return Ok(self.frames);
		}
	}

	#[test]
	fn test_full() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let options = TestOptions::new(workdir.join("out"), RunMode::Full);
		let mut steps = RecordingSteps {
			create_video: true,
			frames: 4,
			..Default::default()
		};
		let mut events = Vec::new();

		let res = run_pipeline(&options, &mut steps, |v| events.push(v));

		assert_eq!(
			Ok(PipelineSummary {
				video_path:  workdir.join("out/video.mp4"),
				images_dir:  workdir.join("out/images"),
				frame_count: Some(4),
			}),
			res
		);
		assert_eq!(vec!["acquire", "sample"], steps.calls);
		assert_eq!(
			vec![
				PipelineProgress::AcquireStarting("https://example.com/video/ID".to_owned()),
				PipelineProgress::AcquireProgress(100),
				PipelineProgress::AcquireFinished(workdir.join("out/video.mp4")),
				PipelineProgress::SampleStarting(SampleRate::DEFAULT),
				PipelineProgress::SampleFinished(4),
			],
			events
		);
	}

	#[test]
	fn test_extract_only_without_video() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let options = TestOptions::new(workdir.clone(), RunMode::ExtractOnly);
		let mut steps = RecordingSteps::default();

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert_eq!(
			Err(crate::Error::custom_ioerror_path(
				std::io::ErrorKind::NotFound,
				"",
				workdir.join("video.mp4")
			)),
			res
		);
		assert!(steps.calls.is_empty());
	}

	#[test]
	fn test_extract_only_with_video() {
		let (workdir, _tempdir) = create_dir("pipeline");
		std::fs::File::create(workdir.join("video.mp4")).expect("Expected File::create to be successfull");
		let mut options = TestOptions::new(workdir, RunMode::ExtractOnly);
		// the url is not required when not downloading
		options.url = None;
		let mut steps = RecordingSteps {
			frames: 2,
			..Default::default()
		};

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert_eq!(Some(2), res.expect("Expected pipeline to succeed").frame_count);
		assert_eq!(vec!["sample"], steps.calls);
	}

	#[test]
	fn test_download_only() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let options = TestOptions::new(workdir, RunMode::DownloadOnly);
		// the video exists after acquire, but sample should still not be called
		let mut steps = RecordingSteps {
			create_video: true,
			..Default::default()
		};

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert_eq!(None, res.expect("Expected pipeline to succeed").frame_count);
		assert_eq!(vec!["acquire"], steps.calls);
	}

	#[test]
	fn test_acquire_error_stops() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let options = TestOptions::new(workdir, RunMode::Full);
		let mut steps = RecordingSteps {
			acquire_error: Some(crate::Error::tool_not_found("yt-dlp", "hint")),
			create_video: true,
			..Default::default()
		};

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert_eq!(Err(crate::Error::tool_not_found("yt-dlp", "hint")), res);
		assert_eq!(vec!["acquire"], steps.calls);
	}

	#[test]
	fn test_missing_url() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let mut options = TestOptions::new(workdir, RunMode::Full);
		options.url = Some("  ".to_owned());
		let mut steps = RecordingSteps::default();

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert_eq!(
			Err(crate::Error::invalid_argument("A source URL is required for downloading")),
			res
		);
		assert!(steps.calls.is_empty());
	}

	#[test]
	fn test_video_missing_after_download() {
		let (workdir, _tempdir) = create_dir("pipeline");
		let options = TestOptions::new(workdir, RunMode::Full);
		let mut steps = RecordingSteps::default();

		let res = run_pipeline(&options, &mut steps, |_| ());

		assert!(res.is_err());
		assert_eq!(vec!["acquire"], steps.calls);
	}

	#[cfg(unix)]
	mod external_tools {
		use super::*;
		use std::os::unix::fs::PermissionsExt;

		/// Write a executable shell script at `path`
		fn write_script(path: &Path, content: &str) {
			std::fs::write(path, content).expect("Expected write to be successfull");
			std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
				.expect("Expected set_permissions to be successfull");
		}

		const FAKE_YTDL: &str = "#!/bin/sh
if [ \"$1\" = \"--version\" ]; then echo \"2024.01.01\"; exit 0; fi
echo \"[download] 100% of 1MiB\"
touch \"$6\"
";

		const FAKE_FFMPEG: &str = "#!/bin/sh
if [ \"$1\" = \"-version\" ]; then echo \"ffmpeg version n6.1.1 Copyright (c) 2000-2023\"; exit 0; fi
for last; do :; done
d=$(dirname \"$last\")
touch \"$d/frame_0001.jpg\" \"$d/frame_0002.jpg\"
";

		#[test]
		fn test_end_to_end() {
			let (workdir, _tempdir) = create_dir("pipeline-e2e");
			let bin_dir = workdir.join("bin");
			std::fs::create_dir_all(&bin_dir).expect("Expected create_dir_all to be successfull");
			let ytdl = bin_dir.join("yt-dlp");
			let ffmpeg = bin_dir.join("ffmpeg");
			write_script(&ytdl, FAKE_YTDL);
			write_script(&ffmpeg, FAKE_FFMPEG);

			let mut options = TestOptions::new(workdir.join("out"), RunMode::Full);
			options.rate = SampleRate::new(0.5).unwrap();
			let mut steps = ExternalTools::new()
				.with_ytdl_override(Some(ytdl))
				.with_ffmpeg_override(Some(ffmpeg));

			let res = run_pipeline(&options, &mut steps, |_| ());

			assert_eq!(
				Ok(PipelineSummary {
					video_path:  workdir.join("out/video.mp4"),
					images_dir:  workdir.join("out/images"),
					frame_count: Some(2),
				}),
				res
			);
			assert!(workdir.join("out/video.mp4").is_file());
			assert!(workdir.join("out/images/frame_0001.jpg").is_file());
		}

		#[test]
		fn test_missing_downloader() {
			let (workdir, _tempdir) = create_dir("pipeline-e2e");
			let options = TestOptions::new(workdir.join("out"), RunMode::Full);
			let mut steps = ExternalTools::new().with_ytdl_override(Some(workdir.join("missing-yt-dlp")));

			let res = run_pipeline(&options, &mut steps, |_| ());

			let err = res.expect_err("Expected a missing downloader to be a error");
			assert!(matches!(err.kind(), crate::error::ErrorInner::ToolNotFound(..)));
			assert!(!workdir.join("out/images").exists());
		}
	}
}
