//! Module for the [SampleRate] type

use std::{
	fmt,
	str::FromStr,
};

/// Frames to extract per second of video
///
/// Always finite and larger than `0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate(f64);

impl SampleRate {
	/// The rate used when none is given
	pub const DEFAULT: Self = Self(1.0);

	/// Create a new [SampleRate], erroring if `rate` is not finite or not positive
	pub fn new(rate: f64) -> Result<Self, crate::Error> {
		if !rate.is_finite() || rate <= 0.0 {
			return Err(crate::Error::invalid_argument(format!(
				"Sampling rate has to be a positive number, got \"{rate}\""
			)));
		}

		return Ok(Self(rate));
	}

	/// Get the inner value
	#[must_use]
	pub fn get(self) -> f64 {
		return self.0;
	}

	/// Get the ffmpeg video filter expression for this rate, like `fps=0.5`
	#[must_use]
	pub fn as_filter(self) -> String {
		return format!("fps={self}");
	}
}

impl Default for SampleRate {
	fn default() -> Self {
		return Self::DEFAULT;
	}
}

impl fmt::Display for SampleRate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// "f64" display already uses the shortest form, like "1" or "0.5"
		return write!(f, "{}", self.0);
	}
}

impl FromStr for SampleRate {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let rate = s.trim().parse::<f64>().map_err(|err| {
			return crate::Error::invalid_argument(format!("Could not parse \"{s}\" as a sampling rate: {err}"));
		})?;

		return Self::new(rate);
	}
}
