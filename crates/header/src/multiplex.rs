//! Drives generation over all enabled dialects and writes the runtime accessors that pick the descriptor of the
//! active backend.

use crate::buffer::{emit, HeaderBuffer};
use crate::bytes::{write_bytecode_array, write_source_array, write_source_comment};
use crate::descriptor::{bytecode_array_name, source_array_name, ShaderDesc};
use crate::error::{Diagnostic, GenError};
use crate::overview::write_overview;
use crate::shared::write_shared_declarations;
use crate::validate::{check_cross_dialect, validate_dialect, ValidatedDialect};
use crate::HeaderOptions;
use shdc_reflection::{Dialect, DialectOutputs, ShaderInput};
use smallvec::SmallVec;
use std::path::Path;

/// A fully generated header that has not been written anywhere yet.
#[derive(Debug, Clone)]
pub struct RenderedHeader {
	pub buffer: HeaderBuffer,
	pub warnings: Vec<Diagnostic>,
}

/// Generates the complete header into memory. Fails on the first dialect that does not validate, in which case no
/// partial output is returned.
pub fn render(
	input: &ShaderInput,
	outputs: &DialectOutputs,
	options: &HeaderOptions,
) -> Result<RenderedHeader, GenError> {
	let snippets = input.snippet_index();
	let prefix = input.prefix();
	let dialects = options.dialects.dialects().collect::<SmallVec<[Dialect; 7]>>();

	let mut out = HeaderBuffer::new();
	let mut warnings = Vec::new();
	out.push_str("#pragma once\n");

	let mut first: Option<ValidatedDialect<'_>> = None;
	for &dialect in &dialects {
		log::debug!("generating '{}' section of {}", dialect, options.output.display());
		let validated = validate_dialect(input, &snippets, outputs, dialect)?;
		match &first {
			Some(first) => check_cross_dialect(input, first, &validated)?,
			None => {
				warnings.extend(validated.unique.shadowed.iter().cloned());
				write_overview(&mut out, input, options.gen_version, &validated);
				warnings.extend(write_shared_declarations(&mut out, input, &validated)?);
				write_decl_guard(&mut out, &options.output);
			}
		}
		out.append(dialect_section(&prefix, options.no_ifdef, input, &validated));
		if first.is_none() {
			first = Some(validated);
		}
	}

	for program in input.programs.values() {
		log::debug!("writing accessor for program '{}'", program.name);
		write_accessor(&mut out, &prefix, &program.name, &dialects, options.no_ifdef);
	}

	if first.is_some() {
		out.push_str("#endif /* SOKOL_SHDC_DECL */\n");
	}
	Ok(RenderedHeader {
		buffer: out,
		warnings,
	})
}

fn write_decl_guard(out: &mut HeaderBuffer, output: &Path) {
	let file_name = output.file_name().map_or_else(
		|| output.display().to_string(),
		|name| name.to_string_lossy().into_owned(),
	);
	out.push_str("#if !defined(SOKOL_SHDC_DECL)\n");
	out.push_str("#if !defined(SOKOL_GFX_INCLUDED)\n");
	emit!(out, "#error \"Please include sokol_gfx.h before {}\"\n", file_name);
	out.push_str("#endif\n");
}

/// Sources or bytecode of every stage snippet, followed by one descriptor per program, all guarded by the dialect's
/// symbol.
fn dialect_section(prefix: &str, no_ifdef: bool, input: &ShaderInput, validated: &ValidatedDialect<'_>) -> HeaderBuffer {
	let dialect = validated.dialect();
	let mut out = HeaderBuffer::new();
	if !no_ifdef {
		emit!(out, "#if defined({})\n", dialect.guard_symbol());
	}
	for (snippet_index, snippet) in input.snippets.iter().enumerate() {
		if !snippet.is_stage() {
			continue;
		}
		// validation ensured every stage snippet has a source
		let Some(src) = validated.index.source(snippet_index) else {
			continue;
		};
		write_source_comment(&mut out, &src.source_code);
		match validated.index.blob(snippet_index) {
			Some(blob) => write_bytecode_array(
				&mut out,
				&bytecode_array_name(prefix, &snippet.name, dialect),
				&blob.data,
			),
			None => write_source_array(
				&mut out,
				&source_array_name(prefix, &snippet.name, dialect),
				&src.source_code,
			),
		}
	}
	for stages in &validated.programs {
		ShaderDesc::assemble(prefix, dialect, stages).write(&mut out);
	}
	if !no_ifdef {
		emit!(out, "#endif /* {} */\n", dialect.guard_symbol());
	}
	out
}

/// Writes `{prefix}{program}_shader_desc()`, returning the descriptor of the backend active at call time.
fn write_accessor(out: &mut HeaderBuffer, prefix: &str, program: &str, dialects: &[Dialect], no_ifdef: bool) {
	emit!(
		out,
		"static inline const sg_shader_desc* {}{}_shader_desc(void) {{\n",
		prefix,
		program
	);
	if let [dialect] = dialects {
		// only one descriptor exists, no need to ask the runtime
		if !no_ifdef {
			emit!(out, "    #if defined({})\n", dialect.guard_symbol());
		}
		emit!(out, "    return &{};\n", ShaderDesc::name(prefix, program, *dialect));
		if no_ifdef {
			out.push_str("}\n");
			return;
		}
		emit!(out, "    #endif /* {} */\n", dialect.guard_symbol());
	} else {
		for dialect in dialects {
			if !no_ifdef {
				emit!(out, "    #if defined({})\n", dialect.guard_symbol());
			}
			emit!(out, "    if (sg_query_backend() == {}) {{\n", dialect.backend());
			emit!(out, "        return &{};\n", ShaderDesc::name(prefix, program, *dialect));
			out.push_str("    }\n");
			if !no_ifdef {
				emit!(out, "    #endif /* {} */\n", dialect.guard_symbol());
			}
		}
	}
	out.push_str("    return 0; /* can't happen */\n");
	out.push_str("}\n");
}
