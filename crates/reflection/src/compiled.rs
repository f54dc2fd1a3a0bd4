use crate::dialect::Dialect;
use crate::reflection::ShaderReflection;
use std::collections::BTreeMap;

/// Cross compiled source of one snippet for one dialect, together with its reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
	/// Index into [`ShaderInput::snippets`](crate::input::ShaderInput::snippets).
	pub snippet_index: usize,
	pub source_code: String,
	pub refl: ShaderReflection,
}

impl SourceEntry {
	pub fn new(snippet_index: usize, source_code: impl Into<String>, refl: ShaderReflection) -> Self {
		Self {
			snippet_index,
			source_code: source_code.into(),
			refl,
		}
	}
}

/// Precompiled bytecode of one snippet for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytecodeBlob {
	pub snippet_index: usize,
	pub data: Vec<u8>,
}

impl BytecodeBlob {
	pub fn new(snippet_index: usize, data: Vec<u8>) -> Self {
		Self { snippet_index, data }
	}
}

/// Everything the upstream collaborators produced for one dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectOutput {
	/// Sources in compilation order, which follows snippet declaration order.
	pub sources: Vec<SourceEntry>,
	pub blobs: Vec<BytecodeBlob>,
}

impl DialectOutput {
	pub fn with_source(mut self, source: SourceEntry) -> Self {
		self.sources.push(source);
		self
	}

	pub fn with_blob(mut self, blob: BytecodeBlob) -> Self {
		self.blobs.push(blob);
		self
	}
}

/// Compiled outputs of every dialect the upstream pipeline ran for.
pub type DialectOutputs = BTreeMap<Dialect, DialectOutput>;
