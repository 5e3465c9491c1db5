//! Module for Clap related structs (derived)

#![deny(missing_docs)] // comments are used for "--help" generation, so it should always be defined

use clap::{
	ArgAction,
	Parser,
};
use clap_complete::Shell;
use is_terminal::IsTerminal;
use libframegrab::data::{
	run_mode::RunMode,
	sample_rate::SampleRate,
};
use std::{
	path::PathBuf,
	str::FromStr,
};

/// Highest supported verbosity, everything above is the same as TRACE
const MAX_VERBOSITY: u8 = 3;

/// Trait to check and transform all Command Structures
trait Check {
	/// Check and transform self to be correct
	fn check(&mut self) -> Result<(), crate::Error>;
}

/// Download a video and extract still frames from it at a fixed rate
#[derive(Debug, Parser, Clone, PartialEq)]
#[command(author, version = env!("FRAMEGRAB_VERSION"), about, long_about = None)]
#[command(bin_name("framegrab"))]
#[command(args_override_self(true))] // specifying a argument multiple times overwrites the earlier ones
pub struct CliDerive {
	/// Source URL of the video, required unless "--frames-only" is used
	pub url:               Option<String>,
	/// Output directory, the video is written as "video.mp4" and the frames into "images/"
	#[arg(short = 'o', long = "output", env = "FRAMEGRAB_OUTPUT", default_value = ".")]
	pub output_path:       PathBuf,
	/// Frames to extract per second of video, may be fractional (like 0.5)
	#[arg(long = "fps", default_value = "1", value_parser = SampleRate::from_str)]
	pub fps:               SampleRate,
	/// Only download the video, dont extract frames
	#[arg(long = "video-only", alias = "download-only", conflicts_with = "frames_only")]
	pub video_only:        bool,
	/// Only extract frames from a already existing video in the output directory
	#[arg(long = "frames-only", alias = "extract-only")]
	pub frames_only:       bool,
	/// Explicit youtube-dl command to use, disables searching for it
	#[arg(long = "ytdl-path", env = "FRAMEGRAB_YTDL")]
	pub ytdl_path:         Option<PathBuf>,
	/// Explicit ffmpeg command to use, disables searching for it
	#[arg(long = "ffmpeg-path", env = "FRAMEGRAB_FFMPEG")]
	pub ffmpeg_path:       Option<PathBuf>,
	/// Print youtube-dl output
	/// This will still require logging verbosity set to 3 or "RUST_LOG=trace"
	#[arg(long = "command-log")]
	pub print_command_log: bool,
	/// Set Loggin verbosity (0 - Default - WARN, 1 - INFO, 2 - DEBUG, 3 - TRACE)
	#[arg(short, long, action = ArgAction::Count)]
	pub verbosity:         u8,
	/// Explicitly set interactive / not interactive
	#[arg(long = "interactive")]
	pub explicit_tty:      Option<bool>,
	/// Force Color to be active in any mode
	#[arg(long = "color")]
	pub force_color:       bool,
	/// Print shell completions for the given shell and exit
	#[arg(long = "completions", value_name = "SHELL")]
	pub completions:       Option<Shell>,
}

impl CliDerive {
	/// Execute clap::Parser::parse and apply custom validation and transformation logic
	pub fn custom_parse() -> Result<Self, crate::Error> {
		let mut parsed = Self::parse();

		Check::check(&mut parsed)?;

		return Ok(parsed);
	}

	/// Get if the mode is interactive or not
	#[must_use]
	pub fn is_interactive(&self) -> bool {
		if let Some(explicit) = self.explicit_tty {
			return explicit;
		}

		return std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
	}

	/// Get if the colors are enabled or not
	#[must_use]
	pub fn enable_colors(&self) -> bool {
		return self.force_color | self.is_interactive();
	}

	/// Get which steps should be run
	#[must_use]
	pub fn run_mode(&self) -> RunMode {
		return RunMode::from_flags(self.video_only, self.frames_only);
	}
}

impl Check for CliDerive {
	fn check(&mut self) -> Result<(), crate::Error> {
		// nothing else is run when printing completions
		if self.completions.is_some() {
			return Ok(());
		}

		if self.video_only && self.frames_only {
			return Err(crate::Error::invalid_arguments(
				"\"--video-only\" and \"--frames-only\" cannot be used together",
			));
		}

		// normalize a blank url to be unset
		self.url = self
			.url
			.take()
			.map(|v| return v.trim().to_owned())
			.filter(|v| return !v.is_empty());

		if self.run_mode().runs_acquire() && self.url.is_none() {
			return Err(crate::Error::invalid_arguments(
				"A URL is required, unless \"--frames-only\" is used",
			));
		}

		self.verbosity = self.verbosity.min(MAX_VERBOSITY);

		return Ok(());
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn default_cli() -> CliDerive {
		return CliDerive {
			url:               Some("https://example.com/video/ID".to_owned()),
			output_path:       PathBuf::from("."),
			fps:               SampleRate::DEFAULT,
			video_only:        false,
			frames_only:       false,
			ytdl_path:         None,
			ffmpeg_path:       None,
			print_command_log: false,
			verbosity:         0,
			explicit_tty:      None,
			force_color:       false,
			completions:       None,
		};
	}

	#[test]
	fn test_verify_cli() {
		use clap::CommandFactory;
		CliDerive::command().debug_assert();
	}

	mod parse {
		use super::*;

		#[test]
		fn test_defaults() {
			let parsed = CliDerive::try_parse_from(["framegrab", "https://example.com/video/ID"])
				.expect("Expected parsing to be successfull");

			assert_eq!(PathBuf::from("."), parsed.output_path);
			assert_eq!(SampleRate::DEFAULT, parsed.fps);
			assert_eq!(RunMode::Full, parsed.run_mode());
		}

		#[test]
		fn test_fps_and_aliases() {
			let parsed = CliDerive::try_parse_from([
				"framegrab",
				"--fps",
				"0.5",
				"--download-only",
				"-o",
				"./out",
				"https://example.com/video/ID",
			])
			.expect("Expected parsing to be successfull");

			assert_eq!(SampleRate::new(0.5).unwrap(), parsed.fps);
			assert_eq!(RunMode::DownloadOnly, parsed.run_mode());
			assert_eq!(PathBuf::from("./out"), parsed.output_path);

			let parsed = CliDerive::try_parse_from(["framegrab", "--extract-only"])
				.expect("Expected parsing to be successfull");

			assert_eq!(RunMode::ExtractOnly, parsed.run_mode());
		}

		#[test]
		fn test_invalid_fps() {
			assert!(CliDerive::try_parse_from(["framegrab", "--fps", "0", "https://example.com"]).is_err());
			assert!(CliDerive::try_parse_from(["framegrab", "--fps", "-1", "https://example.com"]).is_err());
			assert!(CliDerive::try_parse_from(["framegrab", "--fps", "fast", "https://example.com"]).is_err());
		}

		#[test]
		fn test_modes_conflict() {
			let res = CliDerive::try_parse_from(["framegrab", "--video-only", "--frames-only", "https://example.com"]);

			assert_eq!(
				clap::error::ErrorKind::ArgumentConflict,
				res.expect_err("Expected a conflict").kind()
			);
		}

		#[test]
		fn test_verbosity_count() {
			let parsed = CliDerive::try_parse_from(["framegrab", "-vv", "https://example.com"])
				.expect("Expected parsing to be successfull");

			assert_eq!(2, parsed.verbosity);
		}
	}

	mod check {
		use super::*;

		#[test]
		fn test_unchanged() {
			let init_default = default_cli();

			let mut cloned = init_default.clone();
			assert!(cloned.check().is_ok());
			assert_eq!(init_default, cloned);
		}

		#[test]
		fn test_url_required() {
			let mut missing = default_cli();
			missing.url = None;
			assert!(missing.check().is_err());

			let mut blank = default_cli();
			blank.url = Some("   ".to_owned());
			blank.video_only = true;
			assert!(blank.check().is_err());
		}

		#[test]
		fn test_frames_only_without_url() {
			let mut init = default_cli();
			init.url = None;
			init.frames_only = true;

			assert!(init.check().is_ok());
			assert_eq!(RunMode::ExtractOnly, init.run_mode());
		}

		#[test]
		fn test_url_trimmed() {
			let mut init = default_cli();
			init.url = Some("  https://example.com/video/ID\n".to_owned());

			assert!(init.check().is_ok());
			assert_eq!(Some("https://example.com/video/ID".to_owned()), init.url);
		}

		#[test]
		fn test_completions_skip_validation() {
			let mut init = default_cli();
			init.url = None;
			init.completions = Some(Shell::Bash);

			assert!(init.check().is_ok());
		}

		#[test]
		fn test_verbosity_clamped() {
			let mut init = default_cli();
			init.verbosity = 9;

			assert!(init.check().is_ok());
			assert_eq!(3, init.verbosity);
		}
	}

	mod cli_derive {
		use super::*;

		#[test]
		fn test_is_interactive_explicit() {
			let mut init = default_cli();

			init.explicit_tty = Some(false);
			assert!(!init.is_interactive());

			init.explicit_tty = Some(true);
			assert!(init.is_interactive());
		}

		#[test]
		fn test_enable_colors_forced() {
			let mut init = default_cli();
			init.explicit_tty = Some(false);
			assert!(!init.enable_colors());

			init.force_color = true;
			assert!(init.enable_colors());
		}
	}
}
