//! Resolution of programs to their compiled stages, and the slot-unique sets of images and uniform blocks that the
//! shared declarations are written from.

use crate::error::{Diagnostic, ErrorMessage, GenError};
use rustc_hash::FxHashMap;
use shdc_reflection::{
	BytecodeBlob, Dialect, DialectOutput, Image, Program, ShaderInput, Snippet, SnippetIndex, SnippetKind,
	SourceEntry, Stage, UniformBlock,
};

/// One dialect's compiled outputs, indexed by snippet.
#[derive(Debug, Clone)]
pub struct DialectIndex<'a> {
	pub dialect: Dialect,
	pub output: &'a DialectOutput,
	sources: FxHashMap<usize, &'a SourceEntry>,
	blobs: FxHashMap<usize, &'a BytecodeBlob>,
}

impl<'a> DialectIndex<'a> {
	pub fn new(dialect: Dialect, output: &'a DialectOutput) -> Self {
		let mut sources = FxHashMap::default();
		for src in &output.sources {
			sources.entry(src.snippet_index).or_insert(src);
		}
		let mut blobs = FxHashMap::default();
		for blob in &output.blobs {
			blobs.entry(blob.snippet_index).or_insert(blob);
		}
		Self {
			dialect,
			output,
			sources,
			blobs,
		}
	}

	pub fn source(&self, snippet_index: usize) -> Option<&'a SourceEntry> {
		self.sources.get(&snippet_index).copied()
	}

	pub fn blob(&self, snippet_index: usize) -> Option<&'a BytecodeBlob> {
		self.blobs.get(&snippet_index).copied()
	}
}

/// A program stage resolved to its snippet, compiled source and optional bytecode.
#[derive(Debug, Copy, Clone)]
pub struct StageEntry<'a> {
	pub snippet: &'a Snippet,
	pub source: &'a SourceEntry,
	pub blob: Option<&'a BytecodeBlob>,
}

#[derive(Debug, Copy, Clone)]
pub struct ProgramStages<'a> {
	pub program: &'a Program,
	pub vs: StageEntry<'a>,
	pub fs: StageEntry<'a>,
}

impl<'a> ProgramStages<'a> {
	pub fn stage(&self, stage: Stage) -> &StageEntry<'a> {
		match stage {
			Stage::Vertex => &self.vs,
			Stage::Fragment => &self.fs,
		}
	}
}

/// Resolves both stages of `program` for the dialect of `index`.
pub fn resolve_program<'a>(
	input: &'a ShaderInput,
	snippets: &SnippetIndex<'a>,
	index: &DialectIndex<'a>,
	program: &'a Program,
) -> Result<ProgramStages<'a>, GenError> {
	Ok(ProgramStages {
		program,
		vs: resolve_stage(input, snippets, index, program, Stage::Vertex)?,
		fs: resolve_stage(input, snippets, index, program, Stage::Fragment)?,
	})
}

fn resolve_stage<'a>(
	input: &'a ShaderInput,
	snippets: &SnippetIndex<'a>,
	index: &DialectIndex<'a>,
	program: &'a Program,
	stage: Stage,
) -> Result<StageEntry<'a>, GenError> {
	let (name, kind, what) = match stage {
		Stage::Vertex => (&program.vs_name, SnippetKind::Vertex, "vertex shader"),
		Stage::Fragment => (&program.fs_name, SnippetKind::Fragment, "fragment shader"),
	};
	let snippet_index = snippets.find(name).ok_or_else(|| {
		GenError::Lookup(ErrorMessage::at(
			&input.path,
			program.line,
			format!("unknown {} '{}' in program '{}'", what, name, program.name),
		))
	})?;
	let snippet = snippets.get(snippet_index).ok_or_else(|| {
		GenError::Lookup(ErrorMessage::at(
			&input.path,
			program.line,
			format!("snippet '{}' of program '{}' is out of range", name, program.name),
		))
	})?;
	if snippet.kind != kind {
		return Err(GenError::Consistency(ErrorMessage::at(
			&input.path,
			program.line,
			format!("'{}' in program '{}' is not a {}", name, program.name, what),
		)));
	}
	let source = index.source(snippet_index).ok_or_else(|| {
		GenError::Lookup(ErrorMessage::at(
			&input.path,
			snippet.line,
			format!(
				"no generated '{}' source for {} '{}' in program '{}'",
				index.dialect, what, name, program.name
			),
		))
	})?;
	Ok(StageEntry {
		snippet,
		source,
		blob: index.blob(snippet_index),
	})
}

/// Images and uniform blocks of all sources of one dialect, merged by bind slot in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct UniqueSlots<'a> {
	pub images: Vec<&'a Image>,
	pub uniform_blocks: Vec<&'a UniformBlock>,
	/// Resources that lost their slot to an earlier, differently named one.
	pub shadowed: Vec<Diagnostic>,
}

impl<'a> UniqueSlots<'a> {
	pub fn gather(input: &ShaderInput, output: &'a DialectOutput) -> Result<Self, GenError> {
		let mut images = SlotSet::default();
		let mut uniform_blocks = SlotSet::default();
		for src in &output.sources {
			let line = input.snippets.get(src.snippet_index).map_or(0, |s| s.line);
			for img in &src.refl.images {
				images.insert(input, line, "image", img.slot, &img.name, img)?;
			}
			for ub in &src.refl.uniform_blocks {
				uniform_blocks.insert(input, line, "uniform block", ub.slot, &ub.name, ub)?;
			}
		}
		let mut shadowed = images.shadowed;
		shadowed.extend(uniform_blocks.shadowed);
		Ok(Self {
			images: images.entries,
			uniform_blocks: uniform_blocks.entries,
			shadowed,
		})
	}
}

struct SlotSet<'a, T> {
	entries: Vec<&'a T>,
	by_slot: FxHashMap<u32, &'a str>,
	by_name: FxHashMap<&'a str, u32>,
	shadowed: Vec<Diagnostic>,
}

impl<T> Default for SlotSet<'_, T> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			by_slot: FxHashMap::default(),
			by_name: FxHashMap::default(),
			shadowed: Vec::new(),
		}
	}
}

impl<'a, T> SlotSet<'a, T> {
	fn insert(
		&mut self,
		input: &ShaderInput,
		line: u32,
		what: &str,
		slot: u32,
		name: &'a str,
		t: &'a T,
	) -> Result<(), GenError> {
		if let Some(first) = self.by_slot.get(&slot) {
			if *first != name {
				let diagnostic = Diagnostic {
					declaration: format!("SLOT_{}{}", input.prefix(), first),
					message: format!(
						"{} '{}' shares bind slot {} with '{}', only '{}' is declared",
						what, name, slot, first, first
					),
				};
				log::warn!("{}: {}", diagnostic.declaration, diagnostic.message);
				self.shadowed.push(diagnostic);
			}
			return Ok(());
		}
		if let Some(other_slot) = self.by_name.get(name) {
			return Err(GenError::Consistency(ErrorMessage::at(
				&input.path,
				line,
				format!(
					"conflicting bind slots for {} '{}' ({} and {})",
					what, name, other_slot, slot
				),
			)));
		}
		self.by_slot.insert(slot, name);
		self.by_name.insert(name, slot);
		self.entries.push(t);
		Ok(())
	}
}
