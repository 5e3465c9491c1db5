use std::io::{
	BufWriter,
	Write,
};

use clap::CommandFactory;
use clap_complete::{
	Shell,
	generate,
};

use crate::clap_conf::CliDerive;

/// Handler function for "--completions"
/// Writes the completions for `shell` to stdout
#[inline]
pub fn command_completions(shell: Shell) -> Result<(), crate::Error> {
	let mut writer = BufWriter::new(std::io::stdout());

	write_completions(shell, &mut writer)?;

	return Ok(());
}

/// Write the completions for `shell` into `writer`
pub fn write_completions<W: Write>(shell: Shell, writer: &mut W) -> Result<(), crate::Error> {
	let mut parsed = CliDerive::command();
	let bin_name = parsed.get_bin_name().unwrap_or("framegrab").to_owned();
	generate(shell, &mut parsed, bin_name, writer);
	writer.flush()?;

	return Ok(());
}
