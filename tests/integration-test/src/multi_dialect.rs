#![cfg(test)]

use crate::{
	assert_in_order, quad_fs, quad_input, quad_output, quad_vs, quad_vs_with_params, FS_SOURCE, VS_SOURCE,
};
use shdc_header::{GenError, HeaderBuilder};
use shdc_reflection::{
	BytecodeBlob, Dialect, DialectOutput, DialectOutputs, DialectSet, SourceEntry, Uniform, UniformBlock, UniformType,
};

const FS_BYTECODE: [u8; 20] = [
	0x44, 0x58, 0x42, 0x43, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
	0x10,
];

/// hlsl5 output that embeds the fragment stage as bytecode.
fn hlsl5_output() -> DialectOutput {
	DialectOutput::default()
		.with_source(SourceEntry::new(1, VS_SOURCE, quad_vs()))
		.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs()))
		.with_blob(BytecodeBlob::new(2, FS_BYTECODE.to_vec()))
}

fn glsl_and_hlsl() -> DialectOutputs {
	DialectOutputs::from([(Dialect::Hlsl5, hlsl5_output()), (Dialect::Glsl330, quad_output())])
}

#[test]
fn test_sections_in_canonical_order() -> anyhow::Result<()> {
	let input = quad_input();
	let outputs = glsl_and_hlsl();
	let header = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()?
		.buffer
		.into_string();

	assert_in_order(
		&header,
		&[
			"#if defined(SOKOL_GLCORE33)\n",
			"static const sg_shader_desc quad_shader_desc_glsl330 = {\n",
			"#endif /* SOKOL_GLCORE33 */\n",
			"#if defined(SOKOL_D3D11)\n",
			"static const sg_shader_desc quad_shader_desc_hlsl5 = {\n",
			"#endif /* SOKOL_D3D11 */\n",
			"static inline const sg_shader_desc* quad_shader_desc(void) {\n",
			"#endif /* SOKOL_SHDC_DECL */\n",
		],
	);

	// shared declarations are written once, before the first section
	assert_eq!(header.matches("typedef struct params_t {").count(), 1);
	assert_eq!(header.matches("#define SLOT_tex (0)\n").count(), 1);
	assert_eq!(header.matches("#define ATTR_vs_position (0)\n").count(), 1);
	assert_eq!(header.matches("#if !defined(SOKOL_SHDC_DECL)\n").count(), 1);
	assert_eq!(header.matches("    Overview:\n").count(), 1);
	Ok(())
}

#[test]
fn test_bytecode_replaces_source() -> anyhow::Result<()> {
	let input = quad_input();
	let outputs = glsl_and_hlsl();
	let header = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()?
		.buffer
		.into_string();

	assert!(header.contains("static const char vs_source_glsl330["));
	assert!(header.contains("static const char fs_source_glsl330["));
	assert!(header.contains("static const char vs_source_hlsl5["));
	assert!(!header.contains("fs_source_hlsl5"));

	assert!(header.contains(
		"static const uint8_t fs_bytecode_hlsl5[20] = {\n    \
		0x44,0x58,0x42,0x43,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,\n    \
		0x0d,0x0e,0x0f,0x10,\n\
		};\n"
	));
	assert!(header.contains("    0, /* source */\n    fs_bytecode_hlsl5, /* bytecode */\n    20, /* bytecode_size */\n"));
	assert!(header.contains("    fs_source_glsl330, /* source */\n    0,  /* bytecode */\n"));
	Ok(())
}

#[test]
fn test_accessor_checks_backends_in_order() -> anyhow::Result<()> {
	let input = quad_input();
	let outputs = glsl_and_hlsl();
	let header = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()?
		.buffer
		.into_string();

	let accessor = &header[header
		.find("static inline const sg_shader_desc* quad_shader_desc(void)")
		.expect("accessor is written")..];
	assert_in_order(
		accessor,
		&[
			"    if (sg_query_backend() == SG_BACKEND_GLCORE33) {\n        return &quad_shader_desc_glsl330;\n",
			"    if (sg_query_backend() == SG_BACKEND_D3D11) {\n        return &quad_shader_desc_hlsl5;\n",
			"    return 0; /* can't happen */\n}\n",
		],
	);
	Ok(())
}

#[test]
fn test_explicit_dialect_subset() -> anyhow::Result<()> {
	let input = quad_input();
	let outputs = glsl_and_hlsl();
	let header = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.dialects(DialectSet::HLSL5)
		.render()?
		.buffer
		.into_string();

	assert!(!header.contains("glsl330"));
	assert!(header.contains("static const sg_shader_desc quad_shader_desc_hlsl5 = {\n"));
	assert!(!header.contains("sg_query_backend()"));
	Ok(())
}

#[test]
fn test_enabled_dialect_without_output() {
	let input = quad_input();
	let outputs = glsl_and_hlsl();
	let err = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.dialects(DialectSet::GLSL330 | DialectSet::GLSL300ES)
		.render()
		.expect_err("glsl300es was never compiled");
	assert!(matches!(err, GenError::Lookup(_)));
	assert!(err.message().message.contains("glsl300es"));
}

#[test]
fn test_bytecode_for_source_only_dialect() {
	let input = quad_input();
	let outputs = DialectOutputs::from([(
		Dialect::Glsl300es,
		quad_output().with_blob(BytecodeBlob::new(2, FS_BYTECODE.to_vec())),
	)]);
	let err = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()
		.expect_err("glsl has no bytecode");
	assert!(matches!(err, GenError::Consistency(_)));
	assert_eq!(err.message().line, 17);
}

#[test]
fn test_metal_dialects_share_a_guard() -> anyhow::Result<()> {
	let input = quad_input();
	let outputs = DialectOutputs::from([
		(Dialect::MetalSim, quad_output()),
		(Dialect::MetalMacos, quad_output()),
		(Dialect::MetalIos, quad_output()),
	]);
	let header = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()?
		.buffer
		.into_string();

	// one section per dialect, the accessor repeats the guard indented
	assert_eq!(header.matches("\n#if defined(SOKOL_METAL)\n").count(), 3);
	assert_eq!(header.matches("\n#endif /* SOKOL_METAL */\n").count(), 3);
	assert_eq!(header.matches("\n    #if defined(SOKOL_METAL)\n").count(), 3);
	assert_in_order(
		&header,
		&[
			"quad_shader_desc_metal_macos = {",
			"quad_shader_desc_metal_ios = {",
			"quad_shader_desc_metal_sim = {",
			"sg_query_backend() == SG_BACKEND_METAL_MACOS",
			"sg_query_backend() == SG_BACKEND_METAL_IOS",
			"sg_query_backend() == SG_BACKEND_METAL_SIMULATOR",
		],
	);
	Ok(())
}

#[test]
fn test_block_members_differ_between_dialects() {
	let input = quad_input();
	let vs_params = |scale_offset| {
		quad_vs_with_params(UniformBlock::new(
			"params",
			0,
			16,
			vec![
				Uniform::new("offset", UniformType::Float2, 0),
				Uniform::new("scale", UniformType::Float, scale_offset),
			],
		))
	};
	let outputs = DialectOutputs::from([
		(
			Dialect::Glsl330,
			DialectOutput::default()
				.with_source(SourceEntry::new(1, VS_SOURCE, vs_params(8)))
				.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs())),
		),
		(
			Dialect::Hlsl5,
			DialectOutput::default()
				.with_source(SourceEntry::new(1, VS_SOURCE, vs_params(12)))
				.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs())),
		),
	]);
	let err = HeaderBuilder::new(&input, &outputs, "quad.glsl.h")
		.render()
		.expect_err("scale sits at 8 in glsl330 and at 12 in hlsl5");
	assert!(matches!(err, GenError::Consistency(_)));
	assert_eq!(err.message().line, 26);
	assert!(err.message().message.contains("'glsl330' and 'hlsl5'"));
}
