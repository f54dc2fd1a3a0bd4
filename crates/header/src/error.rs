use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A message tied to a location in the shader input file. A line of 0 means the message is not associated with any
/// line.
#[derive(Clone, Eq, PartialEq)]
pub struct ErrorMessage {
	pub path: PathBuf,
	pub line: u32,
	pub message: String,
}

impl ErrorMessage {
	pub fn new(path: impl Into<PathBuf>, line: u32, message: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			line,
			message: message.into(),
		}
	}

	pub fn at(path: &Path, line: u32, message: impl Into<String>) -> Self {
		Self::new(path, line, message)
	}
}

impl Display for ErrorMessage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		// gcc style, so IDEs can jump to the location
		write!(f, "{}:{}:0: error: {}", self.path.display(), self.line, self.message)
	}
}

impl Debug for ErrorMessage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}

/// A fatal error aborting header generation. Nothing is written to the output when one occurs.
#[derive(Error)]
#[non_exhaustive]
pub enum GenError {
	/// A program references a snippet or compiled source that does not exist.
	#[error("{0}")]
	Lookup(ErrorMessage),
	/// The reflected interfaces cannot be represented by the descriptor tables, or disagree between stages or dialects.
	#[error("{0}")]
	Consistency(ErrorMessage),
	/// The output file could not be written.
	#[error("{message}")]
	Commit {
		message: ErrorMessage,
		#[source]
		source: std::io::Error,
	},
}

impl GenError {
	pub fn message(&self) -> &ErrorMessage {
		match self {
			GenError::Lookup(message) | GenError::Consistency(message) => message,
			GenError::Commit { message, .. } => message,
		}
	}
}

impl Debug for GenError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}

/// A non-fatal problem that degraded part of the output but did not stop generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
	/// Name of the generated declaration the problem is visible in.
	pub declaration: String,
	pub message: String,
}
