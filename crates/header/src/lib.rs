//! Generates a C header that embeds shaders compiled for several dialects, together with host side uniform block
//! structs, bind slot constants and the fixed shape shader descriptors the runtime consumes.
//!
//! Generation renders the whole header into memory first and only writes the output once every enabled dialect
//! validated, so the output is either left untouched or complete.

use shdc_reflection::{DialectOutputs, DialectSet, ShaderInput};
use std::path::PathBuf;

pub mod buffer;
pub mod bytes;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod multiplex;
pub mod overview;
pub mod shared;
pub mod slots;
pub mod validate;

pub use buffer::HeaderBuffer;
pub use error::{Diagnostic, ErrorMessage, GenError};
pub use multiplex::{render, RenderedHeader};

#[derive(Debug, Clone)]
pub struct HeaderOptions {
	/// The header file to write.
	pub output: PathBuf,
	/// Dialects to generate descriptors for.
	pub dialects: DialectSet,
	/// Skip the conditional compilation guards around per-dialect sections.
	pub no_ifdef: bool,
	/// Version number written into the header comment.
	pub gen_version: u32,
}

pub struct HeaderBuilder<'a> {
	input: &'a ShaderInput,
	outputs: &'a DialectOutputs,
	pub options: HeaderOptions,
}

impl<'a> HeaderBuilder<'a> {
	/// Generate a header for `input` into `output`, for every dialect present in `outputs`.
	pub fn new(input: &'a ShaderInput, outputs: &'a DialectOutputs, output: impl Into<PathBuf>) -> Self {
		Self {
			input,
			outputs,
			options: HeaderOptions {
				output: output.into(),
				dialects: outputs.keys().copied().collect(),
				no_ifdef: false,
				gen_version: 1,
			},
		}
	}

	/// Restrict or extend the set of dialects. Enabling a dialect without compiled outputs fails generation.
	pub fn dialects(self, dialects: DialectSet) -> Self {
		Self {
			options: HeaderOptions {
				dialects,
				..self.options
			},
			..self
		}
	}

	pub fn no_ifdef(self, no_ifdef: bool) -> Self {
		Self {
			options: HeaderOptions {
				no_ifdef,
				..self.options
			},
			..self
		}
	}

	pub fn gen_version(self, gen_version: u32) -> Self {
		Self {
			options: HeaderOptions {
				gen_version,
				..self.options
			},
			..self
		}
	}

	/// Generate the header without writing it.
	pub fn render(&self) -> Result<RenderedHeader, GenError> {
		render(self.input, self.outputs, &self.options)
	}

	/// Generate the header and write it to [`HeaderOptions::output`].
	pub fn build(self) -> Result<HeaderReport, GenError> {
		let rendered = self.render()?;
		rendered.buffer.commit(&self.input.path, &self.options.output)?;
		Ok(HeaderReport {
			bytes: rendered.buffer.len(),
			output: self.options.output,
			warnings: rendered.warnings,
		})
	}
}

#[derive(Debug, Clone)]
pub struct HeaderReport {
	pub output: PathBuf,
	pub bytes: usize,
	/// Soft errors that are visible as markers in the written header.
	pub warnings: Vec<Diagnostic>,
}
