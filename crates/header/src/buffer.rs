use crate::error::{ErrorMessage, GenError};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use tempfile::NamedTempFile;

/// Appends formatted text to a [`HeaderBuffer`], like `write!` but infallible.
macro_rules! emit {
	($out:expr, $($arg:tt)*) => {
		$out.push_fmt(format_args!($($arg)*))
	};
}

pub(crate) use emit;

/// Accumulates the generated header text. Sections may be rendered into their own buffer and appended once they are
/// complete; nothing touches the filesystem until [`HeaderBuffer::commit`].
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct HeaderBuffer {
	content: String,
}

impl HeaderBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_fmt(&mut self, args: std::fmt::Arguments<'_>) {
		// writing into a String cannot fail
		let _ = self.content.write_fmt(args);
	}

	pub fn push_str(&mut self, s: &str) {
		self.content.push_str(s);
	}

	pub fn append(&mut self, other: HeaderBuffer) {
		self.content.push_str(&other.content);
	}

	pub fn as_str(&self) -> &str {
		&self.content
	}

	pub fn len(&self) -> usize {
		self.content.len()
	}

	pub fn is_empty(&self) -> bool {
		self.content.is_empty()
	}

	pub fn into_string(self) -> String {
		self.content
	}

	/// Writes the complete buffer to `output`. `input_path` is the shader input the error is reported against.
	///
	/// The text is staged in a temporary file next to `output` and moved into place at the end, so `output` is never
	/// left partially written.
	pub fn commit(&self, input_path: &Path, output: &Path) -> Result<(), GenError> {
		let error = |what: &str, source: io::Error| GenError::Commit {
			message: ErrorMessage::at(
				input_path,
				0,
				format!("failed to {} output file '{}'", what, output.display()),
			),
			source,
		};
		let dir = match output.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};
		let mut staged = NamedTempFile::new_in(dir).map_err(|source| error("open", source))?;
		staged
			.write_all(self.content.as_bytes())
			.map_err(|source| error("write", source))?;
		if let Ok(previous) = fs::metadata(output) {
			staged
				.as_file()
				.set_permissions(previous.permissions())
				.map_err(|source| error("write", source))?;
		}
		staged.persist(output).map_err(|err| error("replace", err.error))?;
		log::info!("Shader header written to {}", output.display());
		Ok(())
	}
}
