#![cfg(test)]

use crate::{quad_fs, quad_input, uv_varying, FS_SOURCE, VS_SOURCE};
use shdc_header::HeaderBuilder;
use shdc_reflection::{
	Attribute, Dialect, DialectOutput, DialectOutputs, ShaderReflection, SourceEntry, Stage, Uniform, UniformBlock,
	UniformType,
};
use std::fs;

fn vs_with_invalid_uniform() -> ShaderReflection {
	ShaderReflection::new(Stage::Vertex, "main")
		.with_input(Attribute::new(0, "position", "TEXCOORD", 0))
		.with_output(uv_varying())
		.with_uniform_block(UniformBlock::new(
			"params",
			0,
			32,
			vec![
				Uniform::new("offset", UniformType::Float2, 0),
				Uniform::new("flags", UniformType::Invalid, 16),
			],
		))
}

#[test]
fn test_invalid_uniform_is_marked_not_fatal() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("quad.glsl.h");
	let input = quad_input();
	let outputs = DialectOutputs::from([(
		Dialect::Glsl330,
		DialectOutput::default()
			.with_source(SourceEntry::new(1, VS_SOURCE, vs_with_invalid_uniform()))
			.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs())),
	)]);

	let report = HeaderBuilder::new(&input, &outputs, path.clone()).build()?;
	assert_eq!(report.warnings.len(), 1);
	assert_eq!(report.warnings[0].declaration, "params_t");
	assert!(report.warnings[0].message.contains("'flags'"));

	let header = fs::read_to_string(&path)?;
	assert!(header.contains(
		"    float offset[2];\n    \
		uint8_t _pad_8[8];\n    \
		INVALID_UNIFORM_TYPE;\n"
	));
	// the rest of the header is generated as usual
	assert!(header.contains("static const sg_shader_desc quad_shader_desc_glsl330 = {\n"));
	assert!(header.contains("static inline const sg_shader_desc* quad_shader_desc(void) {\n"));
	assert!(header.ends_with("#endif /* SOKOL_SHDC_DECL */\n"));
	Ok(())
}
