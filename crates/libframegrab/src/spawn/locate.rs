//! Module for resolving how a external tool can be invoked

use std::{
	ffi::{
		OsStr,
		OsString,
	},
	fmt,
	io::Read,
	path::{
		Path,
		PathBuf,
	},
	process::{
		Command,
		Stdio,
	},
	time::{
		Duration,
		Instant,
	},
};

use crate::error::IOErrorToError;

/// How long to sleep between checks if a probed command has exited
const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a [ToolCommand] has been found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOrigin {
	/// Explicitly set by the user
	Override,
	/// Found in the executable search path
	Path,
	/// Invoked as a module of a python interpreter (like "python3 -m yt_dlp")
	PythonModule,
	/// Found in a conventional installation location of the current OS
	KnownLocation,
}

/// A resolved way to invoke a external tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
	/// The executable to spawn
	program:     PathBuf,
	/// Arguments that always have to come first (like "-m yt_dlp")
	prefix_args: Vec<OsString>,
	/// How the tool has been found
	origin:      ToolOrigin,
}

impl ToolCommand {
	/// Create a new instance without any prefix arguments
	pub fn new<P: Into<PathBuf>>(program: P, origin: ToolOrigin) -> Self {
		return Self {
			program: program.into(),
			prefix_args: Vec::new(),
			origin,
		};
	}

	/// Create a new instance invoking `module` with the python `interpreter`
	pub fn python_module<P: Into<PathBuf>>(interpreter: P, module: &str) -> Self {
		return Self::new(interpreter, ToolOrigin::PythonModule).with_prefix_args(["-m", module]);
	}

	/// Add arguments that are always put before any other argument
	#[must_use]
	pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		self.prefix_args.extend(args.into_iter().map(Into::into));

		return self;
	}

	/// Get the executable path
	pub fn program(&self) -> &Path {
		return &self.program;
	}

	/// Get the arguments that are put before any other
	pub fn prefix_args(&self) -> &[OsString] {
		return &self.prefix_args;
	}

	/// Get how the tool has been found
	pub fn origin(&self) -> ToolOrigin {
		return self.origin;
	}

	/// Create a new [Command] with the prefix arguments already applied
	#[must_use]
	pub fn command(&self) -> Command {
		let mut cmd = Command::new(&self.program);
		cmd.args(&self.prefix_args);

		return cmd;
	}

	/// Create a new [duct::Expression] with the prefix arguments and `args` applied
	pub fn expression<I, S>(&self, args: I) -> duct::Expression
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		let mut all_args = self.prefix_args.clone();
		all_args.extend(args.into_iter().map(Into::into));

		return duct::cmd(self.program.clone(), all_args);
	}
}

impl fmt::Display for ToolCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.program.display())?;

		for arg in &self.prefix_args {
			write!(f, " {}", arg.to_string_lossy())?;
		}

		return Ok(());
	}
}

/// Find `name` in the executable search path
pub fn find_in_path<N: AsRef<OsStr>>(name: N) -> Option<PathBuf> {
	let name = name.as_ref();

	return match which::which(name) {
		Ok(v) => Some(v),
		Err(err) => {
			debug!("\"{}\" not found in PATH: {}", name.to_string_lossy(), err);

			return None;
		},
	};
}

/// Get the first path of `candidates` that exists as a file
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
	return candidates.iter().find(|v| {
		trace!("Checking known location \"{}\"", v.display());

		return v.is_file();
	});
}

/// Resolve a explicitly set tool path or name
/// A path that cannot be resolved is a error, and there is no fallback to other methods
pub fn resolve_override(tool_name: &str, value: &Path, hint: &str) -> Result<ToolCommand, crate::Error> {
	return match which::which(value) {
		Ok(v) => Ok(ToolCommand::new(v, ToolOrigin::Override)),
		Err(err) => Err(crate::Error::tool_not_found(
			tool_name,
			format!(
				"explicitly set command \"{}\" is not executable ({}); {}",
				value.display(),
				err,
				hint
			),
		)),
	};
}

/// Run `cmd` and return its STDOUT, killing it if it does not exit within `timeout`
/// Only meant for short-lived commands like version outputs, as STDOUT is only read after the command has exited
pub fn probe_with_timeout(mut cmd: Command, timeout: Duration) -> Result<String, crate::Error> {
	cmd.stdout(Stdio::piped()).stderr(Stdio::null()).stdin(Stdio::null());

	let mut child = cmd.spawn().attach_location_err("probe spawn")?;
	let start = Instant::now();

	let status = loop {
		if let Some(status) = child.try_wait().attach_location_err("probe try_wait")? {
			break status;
		}

		if start.elapsed() >= timeout {
			// the result of those are not important, the probe is already a failure
			let _ = child.kill();
			let _ = child.wait();

			return Err(crate::Error::custom_ioerror_location(
				std::io::ErrorKind::TimedOut,
				format!("Probe did not exit within {}ms", timeout.as_millis()),
				"probe wait",
			));
		}

		std::thread::sleep(PROBE_POLL_INTERVAL);
	};

	let mut stdout = Vec::new();

	if let Some(mut pipe) = child.stdout.take() {
		pipe.read_to_end(&mut stdout).attach_location_err("probe read stdout")?;
	}

	if !status.success() {
		return Err(super::unsuccessful_command_exit(
			"probe",
			status,
			&String::from_utf8_lossy(&stdout),
		));
	}

	return Ok(String::from_utf8(stdout)?);
}
