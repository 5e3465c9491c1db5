//! Module for the [PipelineSteps] trait

use std::path::Path;

use crate::data::sample_rate::SampleRate;

/// The steps [`crate::main::pipeline::run_pipeline`] runs, see [`crate::main::pipeline::ExternalTools`] for the implementation using the actual tools
pub trait PipelineSteps {
	/// Download `url` into the file `destination`
	/// `pgcb` should be called with the download percentage whenever it is known
	fn acquire(&mut self, url: &str, destination: &Path, pgcb: &mut dyn FnMut(u8)) -> Result<(), crate::Error>;
	/// Extract frames from `video` into `images_dir` at `rate`, returning the count of frames in `images_dir` afterwards
	fn sample(&mut self, video: &Path, images_dir: &Path, rate: SampleRate) -> Result<usize, crate::Error>;
}
