//! Checks run for every enabled dialect before anything of it is emitted.

use crate::error::{ErrorMessage, GenError};
use crate::layout::StructLayout;
use crate::slots::{resolve_program, DialectIndex, ProgramStages, UniqueSlots};
use rustc_hash::FxHashSet;
use shdc_reflection::limits::{MAX_IMAGES, MAX_UNIFORM_BLOCKS};
use shdc_reflection::{
	Dialect, DialectOutputs, Image, ImageType, ShaderInput, ShaderReflection, SnippetIndex, Stage, UniformBlock,
	UniformType,
};

/// A dialect that passed validation, with everything emission needs already resolved.
#[derive(Debug, Clone)]
pub struct ValidatedDialect<'a> {
	pub index: DialectIndex<'a>,
	/// Programs in name order.
	pub programs: Vec<ProgramStages<'a>>,
	pub unique: UniqueSlots<'a>,
}

impl<'a> ValidatedDialect<'a> {
	pub fn dialect(&self) -> Dialect {
		self.index.dialect
	}
}

pub fn validate_dialect<'a>(
	input: &'a ShaderInput,
	snippets: &SnippetIndex<'a>,
	outputs: &'a DialectOutputs,
	dialect: Dialect,
) -> Result<ValidatedDialect<'a>, GenError> {
	let output = outputs.get(&dialect).ok_or_else(|| {
		GenError::Lookup(ErrorMessage::at(
			&input.path,
			0,
			format!("no generated sources for '{}'", dialect),
		))
	})?;
	let index = DialectIndex::new(dialect, output);

	for (snippet_index, snippet) in input.snippets.iter().enumerate() {
		if snippet.is_stage() && index.source(snippet_index).is_none() {
			return Err(GenError::Lookup(ErrorMessage::at(
				&input.path,
				snippet.line,
				format!("no generated '{}' source for snippet '{}'", dialect, snippet.name),
			)));
		}
	}

	for src in &output.sources {
		let line = input.snippets.get(src.snippet_index).map_or(0, |s| s.line);
		check_stage_slots(input, line, &src.refl)?;
		for ub in &src.refl.uniform_blocks {
			StructLayout::new(ub, &input.type_map).map_err(|err| err.at(&input.path, line, &ub.name))?;
		}
	}

	if !dialect.supports_bytecode() {
		if let Some(blob) = output.blobs.first() {
			let line = input.snippets.get(blob.snippet_index).map_or(0, |s| s.line);
			return Err(GenError::Consistency(ErrorMessage::at(
				&input.path,
				line,
				format!("'{}' does not support bytecode, but bytecode was provided", dialect),
			)));
		}
	}

	let programs = input
		.programs
		.values()
		.map(|program| {
			let stages = resolve_program(input, snippets, &index, program)?;
			check_stage_link(input, &stages)?;
			Ok(stages)
		})
		.collect::<Result<Vec<_>, GenError>>()?;

	let unique = UniqueSlots::gather(input, output)?;
	Ok(ValidatedDialect {
		index,
		programs,
		unique,
	})
}

/// Slots must be unique within a stage and fit the descriptor tables.
fn check_stage_slots(input: &ShaderInput, line: u32, refl: &ShaderReflection) -> Result<(), GenError> {
	let error = |message: String| Err(GenError::Consistency(ErrorMessage::at(&input.path, line, message)));
	let mut slots = FxHashSet::default();
	for ub in &refl.uniform_blocks {
		if ub.slot as usize >= MAX_UNIFORM_BLOCKS {
			return error(format!(
				"uniform block '{}' uses bind slot {}, at most {} uniform blocks per stage are supported",
				ub.name, ub.slot, MAX_UNIFORM_BLOCKS
			));
		}
		if !slots.insert(ub.slot) {
			return error(format!("uniform block '{}' reuses bind slot {}", ub.name, ub.slot));
		}
	}
	slots.clear();
	for img in &refl.images {
		if img.slot as usize >= MAX_IMAGES {
			return error(format!(
				"image '{}' uses bind slot {}, at most {} images per stage are supported",
				img.name, img.slot, MAX_IMAGES
			));
		}
		if !slots.insert(img.slot) {
			return error(format!("image '{}' reuses bind slot {}", img.name, img.slot));
		}
	}
	Ok(())
}

/// The vertex stage outputs must match the fragment stage inputs location by location.
fn check_stage_link(input: &ShaderInput, stages: &ProgramStages<'_>) -> Result<(), GenError> {
	let vs_outputs = &stages.vs.source.refl.outputs;
	let fs_inputs = &stages.fs.source.refl.inputs;
	for (location, (vs_out, fs_in)) in vs_outputs.iter().zip(fs_inputs.iter()).enumerate() {
		if vs_out != fs_in {
			return Err(GenError::Consistency(ErrorMessage::at(
				&input.path,
				stages.program.line,
				format!(
					"outputs of vs '{}' don't match inputs of fs '{}' at location {} (vs out: '{}', fs in: '{}')",
					stages.program.vs_name, stages.program.fs_name, location, vs_out.name, fs_in.name
				),
			)));
		}
	}
	Ok(())
}

/// Everything the shared struct declaration and the descriptor tables derive from a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockInterface {
	slot: u32,
	name: String,
	size: Option<u32>,
	members: Vec<(String, UniformType, u32, u32)>,
}

impl BlockInterface {
	fn new(ub: &UniformBlock) -> Self {
		Self {
			slot: ub.slot,
			name: ub.name.clone(),
			size: ub.rounded_size(),
			members: ub
				.uniforms
				.iter()
				.map(|u| (u.name.clone(), u.ty, u.offset, u.array_count))
				.collect(),
		}
	}

	fn sorted<'a>(blocks: impl IntoIterator<Item = &'a UniformBlock>) -> Vec<Self> {
		let mut blocks = blocks.into_iter().map(Self::new).collect::<Vec<_>>();
		blocks.sort_by_key(|ub| ub.slot);
		blocks
	}
}

fn sorted_images<'a>(images: impl IntoIterator<Item = &'a Image>) -> Vec<(u32, String, ImageType)> {
	let mut images = images
		.into_iter()
		.map(|img| (img.slot, img.name.clone(), img.ty))
		.collect::<Vec<_>>();
	images.sort_by_key(|(slot, ..)| *slot);
	images
}

/// The parts of a stage's interface the descriptor tables and shared declarations depend on. These have to be the
/// same for every dialect, since only one set of slot constants and structs is written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StageInterface {
	attr_slots: Vec<u32>,
	uniform_blocks: Vec<BlockInterface>,
	images: Vec<(u32, String, ImageType)>,
}

impl StageInterface {
	fn new(refl: &ShaderReflection) -> Self {
		Self {
			attr_slots: refl.inputs.iter().filter_map(|attr| attr.slot).collect(),
			uniform_blocks: BlockInterface::sorted(&refl.uniform_blocks),
			images: sorted_images(&refl.images),
		}
	}
}

/// Every program must reflect the same interface for `other` as for the first enabled dialect, and both must produce
/// the same shared declarations.
pub fn check_cross_dialect(
	input: &ShaderInput,
	reference: &ValidatedDialect<'_>,
	other: &ValidatedDialect<'_>,
) -> Result<(), GenError> {
	for (a, b) in reference.programs.iter().zip(other.programs.iter()) {
		for stage in [Stage::Vertex, Stage::Fragment] {
			let a_refl = &a.stage(stage).source.refl;
			let b_refl = &b.stage(stage).source.refl;
			if StageInterface::new(a_refl) != StageInterface::new(b_refl) {
				return Err(GenError::Consistency(ErrorMessage::at(
					&input.path,
					a.program.line,
					format!(
						"reflected {} shader interface of program '{}' differs between '{}' and '{}'",
						match stage {
							Stage::Vertex => "vertex",
							Stage::Fragment => "fragment",
						},
						a.program.name,
						reference.dialect(),
						other.dialect()
					),
				)));
			}
		}
	}

	let same_blocks = BlockInterface::sorted(reference.unique.uniform_blocks.iter().copied())
		== BlockInterface::sorted(other.unique.uniform_blocks.iter().copied());
	let same_images = sorted_images(reference.unique.images.iter().copied())
		== sorted_images(other.unique.images.iter().copied());
	if !same_blocks || !same_images {
		return Err(GenError::Consistency(ErrorMessage::at(
			&input.path,
			0,
			format!(
				"uniform blocks or images shared by all shaders differ between '{}' and '{}'",
				reference.dialect(),
				other.dialect()
			),
		)));
	}
	Ok(())
}
