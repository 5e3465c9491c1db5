//! Module for path helpers shared by the library and the binary

use std::path::{
	Path,
	PathBuf,
};

use path_absolutize::Absolutize;

/// Replace a leading "~" component with the home directory
/// "~user" forms are returned unchanged, [None] is returned if the home directory cannot be determined
pub fn expand_home<P: AsRef<Path>>(input: P) -> Option<PathBuf> {
	let path = input.as_ref();

	let Ok(rest) = path.strip_prefix("~") else {
		return Some(path.to_owned());
	};

	let home = dirs::home_dir()?;

	if rest.as_os_str().is_empty() {
		return Some(home);
	}

	return Some(home.join(rest));
}

/// Turn `input` into a absolute path, without requiring it to exist
///
/// - `~/videos` -> `HOME/videos`
/// - `out/./run/../frames` -> `CWD/out/frames`
/// - `/already/absolute` -> `/already/absolute`
pub fn to_absolute<P: AsRef<Path>>(input: P) -> Result<PathBuf, crate::Error> {
	let input = input.as_ref();

	let expanded = expand_home(input).ok_or_else(|| {
		return crate::Error::custom_ioerror_path(
			std::io::ErrorKind::InvalidInput,
			"Could not resolve the home directory",
			input,
		);
	})?;

	return match expanded.absolutize() {
		Ok(v) => Ok(v.to_path_buf()),
		Err(err) => Err(crate::Error::new(crate::error::ErrorInner::IoError(
			err,
			format!("Path \"{}\"", input.display()),
		))),
	};
}
