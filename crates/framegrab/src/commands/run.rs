use std::{
	sync::LazyLock,
	time::Duration,
};

use crate::{
	clap_conf::CliDerive,
	state::RunState,
	utils,
};
use indicatif::{
	ProgressBar,
	ProgressStyle,
};
use libframegrab::main::pipeline::{
	ExternalTools,
	PipelineProgress,
	PipelineSummary,
	run_pipeline,
};

/// Static for easily referencing the 100% length for a progressbar
const PG_PERCENT_100: u64 = 100;

/// ProgressBar Style for download, will look like `[00:00:00] [#>-] 42%`
static DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
	return ProgressStyle::default_bar()
		.template("[{elapsed_precise}] {wide_bar:.cyan/blue} {pos:>3}%")
		.expect("Expected ProgressStyle template to be valid")
		.progress_chars("#>-");
});

/// Spinner Style for frame extraction, will look like `[00:00:00] ⠋ Extracting frames`
static SAMPLE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
	return ProgressStyle::default_spinner()
		.template("[{elapsed_precise}] {spinner:.cyan} {msg}")
		.expect("Expected ProgressStyle template to be valid");
});

/// Handler function for the main run, downloading and / or extracting frames
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_run(main_args: &CliDerive) -> Result<PipelineSummary, crate::Error> {
	let state = RunState::new(main_args)?;
	let mut steps = ExternalTools::new()
		.with_ytdl_override(main_args.ytdl_path.clone())
		.with_ffmpeg_override(main_args.ffmpeg_path.clone())
		.with_print_command_log(main_args.print_command_log);

	let download_bar: ProgressBar = ProgressBar::hidden().with_style(DOWNLOAD_STYLE.clone());
	download_bar.set_length(PG_PERCENT_100);
	utils::set_progressbar(&download_bar, main_args);

	let sample_spinner: ProgressBar = ProgressBar::hidden().with_style(SAMPLE_STYLE.clone());
	utils::set_progressbar(&sample_spinner, main_args);

	let interactive = main_args.is_interactive();

	let pgcb = |progress: PipelineProgress| match progress {
		PipelineProgress::AcquireStarting(url) => {
			utils::print_info(format!("Downloading \"{url}\""));
			download_bar.set_position(0);
		},
		PipelineProgress::AcquireProgress(percent) => {
			if interactive {
				download_bar.set_position(u64::from(percent));
			} else {
				trace!("Download at {}%", percent);
			}
		},
		PipelineProgress::AcquireFinished(path) => {
			download_bar.finish_and_clear();
			utils::print_ok(format!("Downloaded to \"{}\"", path.display()));
		},
		PipelineProgress::SampleStarting(rate) => {
			utils::print_info(format!("Extracting frames at {rate} per second"));
			if interactive {
				sample_spinner.set_message("Extracting frames");
				sample_spinner.enable_steady_tick(Duration::from_millis(100));
			}
		},
		PipelineProgress::SampleFinished(count) => {
			sample_spinner.finish_and_clear();
			utils::print_ok(format!("Extracted {count} frames"));
		},
	};

	let res = run_pipeline(&state, &mut steps, pgcb);

	// dont leave a half-drawn bar behind the error message
	download_bar.finish_and_clear();
	sample_spinner.finish_and_clear();

	let summary = res?;

	utils::print_ok("Done!");
	println!("  Video:  \"{}\"", summary.video_path.display());
	match summary.frame_count {
		Some(count) => println!("  Frames: \"{}\" ({count} frames)", summary.images_dir.display()),
		None => println!("  Frames: \"{}\" (not extracted)", summary.images_dir.display()),
	}

	return Ok(summary);
}
