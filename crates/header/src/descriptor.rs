//! Fixed shape shader descriptors, one per program and dialect.
//!
//! Every table has the capacity the runtime ABI prescribes and is populated by slot index. Unused entries are `None`
//! and render as the runtime's sentinel values.

use crate::buffer::{emit, HeaderBuffer};
use crate::slots::{ProgramStages, StageEntry};
use shdc_reflection::limits::{MAX_IMAGES, MAX_UNIFORM_BLOCKS, MAX_UNIFORM_BLOCK_MEMBERS, MAX_VERTEX_ATTRIBUTES};
use shdc_reflection::{Dialect, ImageType, ShaderReflection, Stage};

pub fn source_array_name(prefix: &str, snippet: &str, dialect: Dialect) -> String {
	format!("{}{}_source_{}", prefix, snippet, dialect)
}

pub fn bytecode_array_name(prefix: &str, snippet: &str, dialect: Dialect) -> String {
	format!("{}{}_bytecode_{}", prefix, snippet, dialect)
}

pub fn image_type_name(ty: ImageType) -> &'static str {
	match ty {
		ImageType::Image2d => "SG_IMAGETYPE_2D",
		ImageType::Cube => "SG_IMAGETYPE_CUBE",
		ImageType::Image3d => "SG_IMAGETYPE_3D",
		ImageType::Array => "SG_IMAGETYPE_ARRAY",
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrDesc {
	pub name: String,
	pub sem_name: String,
	pub sem_index: u32,
}

/// Where a stage's code comes from. A stage embeds either source text or bytecode, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageCode {
	Source { array: String },
	Bytecode { array: String, size: usize },
}

impl StageCode {
	pub fn source_ref(&self) -> Option<&str> {
		match self {
			StageCode::Source { array } => Some(array),
			StageCode::Bytecode { .. } => None,
		}
	}

	pub fn bytecode_ref(&self) -> Option<(&str, usize)> {
		match self {
			StageCode::Source { .. } => None,
			StageCode::Bytecode { array, size } => Some((array, *size)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBlockDesc {
	pub name: String,
	/// Block size rounded to 16 bytes.
	pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDesc {
	pub name: String,
	pub ty: ImageType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDesc {
	pub stage: Stage,
	pub code: StageCode,
	pub entry: String,
	pub uniform_blocks: [Option<UniformBlockDesc>; MAX_UNIFORM_BLOCKS],
	pub images: [Option<ImageDesc>; MAX_IMAGES],
}

impl StageDesc {
	pub fn new(prefix: &str, dialect: Dialect, stage: Stage, entry: &StageEntry<'_>) -> Self {
		let refl = &entry.source.refl;
		let code = match entry.blob {
			Some(blob) => StageCode::Bytecode {
				array: bytecode_array_name(prefix, &entry.snippet.name, dialect),
				size: blob.data.len(),
			},
			None => StageCode::Source {
				array: source_array_name(prefix, &entry.snippet.name, dialect),
			},
		};
		Self {
			stage,
			code,
			entry: refl.entry_point.clone(),
			// validation rejects blocks whose size does not round
			uniform_blocks: std::array::from_fn(|slot| {
				let ub = refl.find_uniform_block(slot as u32)?;
				Some(UniformBlockDesc {
					name: ub.name.clone(),
					size: ub.rounded_size()?,
				})
			}),
			images: std::array::from_fn(|slot| {
				refl.find_image(slot as u32).map(|img| ImageDesc {
					name: img.name.clone(),
					ty: img.ty,
				})
			}),
		}
	}

	fn write(&self, out: &mut HeaderBuffer) {
		emit!(out, "  {{ /* {} */\n", self.stage.short_name());
		match &self.code {
			StageCode::Bytecode { array, size } => {
				out.push_str("    0, /* source */\n");
				emit!(out, "    {}, /* bytecode */\n", array);
				emit!(out, "    {}, /* bytecode_size */\n", size);
			}
			StageCode::Source { array } => {
				emit!(out, "    {}, /* source */\n", array);
				out.push_str("    0,  /* bytecode */\n");
				out.push_str("    0,  /* bytecode_size */\n");
			}
		}
		emit!(out, "    \"{}\", /* entry */\n", self.entry);
		out.push_str("    { /* uniform blocks */\n");
		for ub in &self.uniform_blocks {
			out.push_str("      {\n");
			emit!(out, "        {}, /* size */\n", ub.as_ref().map_or(0, |ub| ub.size));
			out.push_str("        { /* uniforms */");
			for index in 0..MAX_UNIFORM_BLOCK_MEMBERS {
				match ub {
					// the whole block is uploaded as one array of vec4
					Some(ub) if index == 0 => emit!(out, "{{\"{}\",SG_UNIFORMTYPE_FLOAT4,{}}},", ub.name, ub.size / 16),
					_ => out.push_str("{0,SG_UNIFORMTYPE_INVALID,0},"),
				}
			}
			out.push_str(" },\n");
			out.push_str("      },\n");
		}
		out.push_str("    },\n");
		out.push_str("    { /* images */ ");
		for img in &self.images {
			match img {
				Some(img) => emit!(out, "{{\"{}\",{}}},", img.name, image_type_name(img.ty)),
				None => out.push_str("{0,_SG_IMAGETYPE_DEFAULT},"),
			}
		}
		out.push_str(" },\n");
		out.push_str("  },\n");
	}
}

/// The complete descriptor of one program for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
	/// Identifier of the generated descriptor constant.
	pub name: String,
	pub attrs: [Option<AttrDesc>; MAX_VERTEX_ATTRIBUTES],
	pub vs: StageDesc,
	pub fs: StageDesc,
	pub label: String,
}

impl ShaderDesc {
	pub fn name(prefix: &str, program: &str, dialect: Dialect) -> String {
		format!("{}{}_shader_desc_{}", prefix, program, dialect)
	}

	pub fn assemble(prefix: &str, dialect: Dialect, stages: &ProgramStages<'_>) -> Self {
		let program = &stages.program.name;
		Self {
			name: Self::name(prefix, program, dialect),
			attrs: attr_table(&stages.vs.source.refl),
			vs: StageDesc::new(prefix, dialect, Stage::Vertex, &stages.vs),
			fs: StageDesc::new(prefix, dialect, Stage::Fragment, &stages.fs),
			label: format!("{}{}_shader", prefix, program),
		}
	}

	pub fn stage(&self, stage: Stage) -> &StageDesc {
		match stage {
			Stage::Vertex => &self.vs,
			Stage::Fragment => &self.fs,
		}
	}

	pub fn write(&self, out: &mut HeaderBuffer) {
		emit!(out, "static const sg_shader_desc {} = {{\n", self.name);
		out.push_str("  0, /* _start_canary */\n");
		out.push_str("  { /*attrs*/");
		for attr in &self.attrs {
			match attr {
				Some(attr) => emit!(out, "{{\"{}\",\"{}\",{}}},", attr.name, attr.sem_name, attr.sem_index),
				None => out.push_str("{0,0,0},"),
			}
		}
		out.push_str(" },\n");
		self.vs.write(out);
		self.fs.write(out);
		emit!(out, "  \"{}\", /* label */\n", self.label);
		out.push_str("  0, /* _end_canary */\n");
		out.push_str("};\n");
	}
}

fn attr_table(vs: &ShaderReflection) -> [Option<AttrDesc>; MAX_VERTEX_ATTRIBUTES] {
	std::array::from_fn(|index| {
		let attr = &vs.inputs[index];
		attr.is_used().then(|| AttrDesc {
			name: attr.name.clone(),
			sem_name: attr.sem_name.clone(),
			sem_index: attr.sem_index,
		})
	})
}
