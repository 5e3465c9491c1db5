//! Module for the Error type of the binary

/// Error type for the "framegrab" binary
#[derive(thiserror::Error, Debug)]
pub enum Error {
	/// Wrapper Variant for [`libframegrab::Error`]
	#[error("{0}")]
	LibError(#[from] libframegrab::Error),
	/// Wrapper Variant for [`std::io::Error`]
	#[error("IoError: {0}")]
	IoError(#[from] std::io::Error),
	/// Wrapper Variant for [`flexi_logger::FlexiLoggerError`]
	#[error("LoggerError: {0}")]
	LoggerError(#[from] flexi_logger::FlexiLoggerError),
	/// Variant for invalid combinations of arguments that clap cannot express
	#[error("InvalidArguments: {0}")]
	InvalidArguments(String),
}

impl Error {
	/// Create a new [Self] as [Self::InvalidArguments]
	pub fn invalid_arguments<M: Into<String>>(msg: M) -> Self {
		return Self::InvalidArguments(msg.into());
	}
}
