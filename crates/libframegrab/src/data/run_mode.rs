//! Module for the [RunMode] enum

/// Which steps of the pipeline should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
	/// Download the media, then extract frames from it
	#[default]
	Full,
	/// Only download the media, never extract frames
	DownloadOnly,
	/// Only extract frames from a already existing media file
	ExtractOnly,
}

impl RunMode {
	/// Get the mode from the two exclusive cli flags
	/// If both are set, [RunMode::Full] is returned, the cli is expected to reject that combination beforehand
	#[must_use]
	pub fn from_flags(download_only: bool, extract_only: bool) -> Self {
		return match (download_only, extract_only) {
			(true, false) => Self::DownloadOnly,
			(false, true) => Self::ExtractOnly,
			_ => Self::Full,
		};
	}

	/// Get if the "acquire" step runs in this mode
	#[must_use]
	pub fn runs_acquire(self) -> bool {
		return self != Self::ExtractOnly;
	}

	/// Get if the "sample" step runs in this mode
	#[must_use]
	pub fn runs_sample(self) -> bool {
		return self != Self::DownloadOnly;
	}
}
