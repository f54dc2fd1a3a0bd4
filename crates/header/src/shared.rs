//! Declarations written once per header, independent of the dialect: the alignment macro, attribute and image slot
//! constants and the uniform block structs.

use crate::buffer::{emit, HeaderBuffer};
use crate::error::{Diagnostic, GenError};
use crate::layout::StructLayout;
use crate::validate::ValidatedDialect;
use shdc_reflection::{ShaderInput, Stage};

pub fn write_align_macro(out: &mut HeaderBuffer) {
	out.push_str("#if !defined(SOKOL_SHDC_ALIGN)\n");
	out.push_str("#if defined(_MSC_VER)\n");
	out.push_str("#define SOKOL_SHDC_ALIGN(a) __declspec(align(a))\n");
	out.push_str("#else\n");
	out.push_str("#define SOKOL_SHDC_ALIGN(a) __attribute__((aligned(a)))\n");
	out.push_str("#endif\n");
	out.push_str("#endif\n");
}

pub fn write_attr_slots(out: &mut HeaderBuffer, input: &ShaderInput, validated: &ValidatedDialect<'_>) {
	let prefix = input.prefix();
	for src in &validated.index.output.sources {
		if src.refl.stage != Stage::Vertex {
			continue;
		}
		let Some(snippet) = input.snippets.get(src.snippet_index) else {
			continue;
		};
		for attr in src.refl.used_inputs() {
			if let Some(slot) = attr.slot {
				emit!(out, "#define ATTR_{}{}_{} ({})\n", prefix, snippet.name, attr.name, slot);
			}
		}
	}
}

pub fn write_image_slots(out: &mut HeaderBuffer, input: &ShaderInput, validated: &ValidatedDialect<'_>) {
	let prefix = input.prefix();
	for img in &validated.unique.images {
		emit!(out, "#define SLOT_{}{} ({})\n", prefix, img.name, img.slot);
	}
}

/// Writes one packed struct per unique uniform block and returns the soft errors encountered while laying them out.
pub fn write_uniform_blocks(
	out: &mut HeaderBuffer,
	input: &ShaderInput,
	validated: &ValidatedDialect<'_>,
) -> Result<Vec<Diagnostic>, GenError> {
	let prefix = input.prefix();
	let mut diagnostics = Vec::new();
	for ub in &validated.unique.uniform_blocks {
		let layout = StructLayout::new(ub, &input.type_map).map_err(|err| err.at(&input.path, 0, &ub.name))?;
		for diagnostic in layout.diagnostics(&prefix) {
			log::warn!("{}: {}", diagnostic.declaration, diagnostic.message);
			diagnostics.push(diagnostic);
		}
		layout.write(out, &prefix);
	}
	Ok(diagnostics)
}

/// Everything shared between dialects, in header order.
pub fn write_shared_declarations(
	out: &mut HeaderBuffer,
	input: &ShaderInput,
	validated: &ValidatedDialect<'_>,
) -> Result<Vec<Diagnostic>, GenError> {
	write_align_macro(out);
	write_attr_slots(out, input, validated);
	write_image_slots(out, input, validated);
	write_uniform_blocks(out, input, validated)
}
