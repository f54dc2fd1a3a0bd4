use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SnippetKind {
	/// Shared code included by other snippets, never compiled on its own.
	Block,
	Vertex,
	Fragment,
}

/// A named unit of shader text, the unit of compilation and reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
	pub name: String,
	pub kind: SnippetKind,
	/// Line of the snippet's declaration in the input file.
	pub line: u32,
}

impl Snippet {
	pub fn new(name: impl Into<String>, kind: SnippetKind, line: u32) -> Self {
		Self {
			name: name.into(),
			kind,
			line,
		}
	}

	pub fn is_stage(&self) -> bool {
		matches!(self.kind, SnippetKind::Vertex | SnippetKind::Fragment)
	}
}

/// A shader program, linking a vertex and a fragment snippet by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
	pub name: String,
	pub vs_name: String,
	pub fs_name: String,
	/// Line of the program's declaration in the input file.
	pub line: u32,
}

impl Program {
	pub fn new(name: impl Into<String>, vs_name: impl Into<String>, fs_name: impl Into<String>, line: u32) -> Self {
		Self {
			name: name.into(),
			vs_name: vs_name.into(),
			fs_name: fs_name.into(),
			line,
		}
	}
}

/// The parsed shader input file: its snippet and program namespace plus the generation tags attached to it.
#[derive(Debug, Clone, Default)]
pub struct ShaderInput {
	pub path: PathBuf,
	/// Optional module name, prepended to every generated identifier.
	pub module: Option<String>,
	/// Snippets in declaration order, referenced by index from compiled outputs.
	pub snippets: Vec<Snippet>,
	/// Programs ordered by name.
	pub programs: BTreeMap<String, Program>,
	/// User supplied host type names, keyed by shading-language type name (`float`, `vec2`, ..., `mat4`).
	pub type_map: FxHashMap<String, String>,
}

impl ShaderInput {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	pub fn with_module(self, module: impl Into<String>) -> Self {
		Self {
			module: Some(module.into()),
			..self
		}
	}

	pub fn with_snippet(mut self, snippet: Snippet) -> Self {
		self.snippets.push(snippet);
		self
	}

	pub fn with_program(mut self, program: Program) -> Self {
		self.programs.insert(program.name.clone(), program);
		self
	}

	pub fn with_type(mut self, shader_type: impl Into<String>, host_type: impl Into<String>) -> Self {
		self.type_map.insert(shader_type.into(), host_type.into());
		self
	}

	/// Prefix of every generated identifier, `"{module}_"` or empty.
	pub fn prefix(&self) -> String {
		match &self.module {
			Some(module) => format!("{}_", module),
			None => String::new(),
		}
	}

	pub fn snippet_index(&self) -> SnippetIndex<'_> {
		SnippetIndex::new(&self.snippets)
	}
}

/// Name to index lookup over the snippet namespace, built once before generation.
#[derive(Debug, Clone)]
pub struct SnippetIndex<'a> {
	snippets: &'a [Snippet],
	by_name: FxHashMap<&'a str, usize>,
}

impl<'a> SnippetIndex<'a> {
	pub fn new(snippets: &'a [Snippet]) -> Self {
		let mut by_name = FxHashMap::default();
		for (index, snippet) in snippets.iter().enumerate() {
			// first declaration wins, the parser already rejects duplicates
			by_name.entry(snippet.name.as_str()).or_insert(index);
		}
		Self { snippets, by_name }
	}

	pub fn find(&self, name: &str) -> Option<usize> {
		self.by_name.get(name).copied()
	}

	pub fn get(&self, index: usize) -> Option<&'a Snippet> {
		self.snippets.get(index)
	}
}
