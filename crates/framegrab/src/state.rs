//! Module for State Struct for the run

use libframegrab::{
	data::{
		layout::OutputLayout,
		run_mode::RunMode,
		sample_rate::SampleRate,
	},
	traits::pipeline_options::PipelineOptions,
	utils::to_absolute,
};

use crate::clap_conf::CliDerive;

/// Struct to keep configuration data for the [`PipelineOptions`] trait
#[derive(Debug, PartialEq, Clone)]
pub struct RunState {
	/// The URL to download, if any
	url:         Option<String>,
	/// All paths of the run, already absolute
	layout:      OutputLayout,
	/// Frames per second of video to extract
	sample_rate: SampleRate,
	/// Which steps to run
	run_mode:    RunMode,
}

impl RunState {
	/// Create a new instance from the already checked cli arguments
	/// The output path is made absolute, so that the printed paths are unambiguous
	pub fn new(main_args: &CliDerive) -> Result<Self, crate::Error> {
		let output_dir = to_absolute(&main_args.output_path)?;

		return Ok(Self {
			url:         main_args.url.clone(),
			layout:      OutputLayout::new(output_dir),
			sample_rate: main_args.fps,
			run_mode:    main_args.run_mode(),
		});
	}
}

impl PipelineOptions for RunState {
	fn source_url(&self) -> Option<&str> {
		return self.url.as_deref();
	}

	fn layout(&self) -> &OutputLayout {
		return &self.layout;
	}

	fn sample_rate(&self) -> SampleRate {
		return self.sample_rate;
	}

	fn run_mode(&self) -> RunMode {
		return self.run_mode;
	}
}
