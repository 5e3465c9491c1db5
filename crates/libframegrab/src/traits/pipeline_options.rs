//! Module for the [PipelineOptions] trait

use crate::data::{
	layout::OutputLayout,
	run_mode::RunMode,
	sample_rate::SampleRate,
};

/// Options specific for the [`crate::main::pipeline::run_pipeline`] function
pub trait PipelineOptions {
	/// Get the URL to download
	/// May be [None] when [RunMode::ExtractOnly] is used
	fn source_url(&self) -> Option<&str>;
	/// Get all paths the run should use
	fn layout(&self) -> &OutputLayout;
	/// Get how many frames per second of video should be extracted
	fn sample_rate(&self) -> SampleRate;
	/// Get which steps should run
	fn run_mode(&self) -> RunMode;
}
