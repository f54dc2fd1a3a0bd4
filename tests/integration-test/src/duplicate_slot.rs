#![cfg(test)]

use crate::{quad_fs, quad_vs, quad_vs_with_params, uv_varying, FS_SOURCE, INPUT_PATH, VS_SOURCE};
use shdc_header::{GenError, HeaderBuilder};
use shdc_reflection::{
	Attribute, Dialect, DialectOutput, DialectOutputs, Image, ImageType, Program, ShaderInput, ShaderReflection,
	Snippet, SnippetKind, SourceEntry, Stage, Uniform, UniformBlock, UniformType,
};

/// Two programs sharing one fragment shader, with vertex shaders that bind different images to the same slot.
fn shared_slot_input() -> ShaderInput {
	ShaderInput::new(INPUT_PATH)
		.with_snippet(Snippet::new("vs_a", SnippetKind::Vertex, 1))
		.with_snippet(Snippet::new("vs_b", SnippetKind::Vertex, 12))
		.with_snippet(Snippet::new("fs", SnippetKind::Fragment, 23))
		.with_program(Program::new("a", "vs_a", "fs", 30))
		.with_program(Program::new("b", "vs_b", "fs", 31))
}

fn vs_with_image(name: &str) -> ShaderReflection {
	quad_vs().with_image(Image::new(name, 0, ImageType::Image2d))
}

#[test]
fn test_first_image_on_slot_wins() -> anyhow::Result<()> {
	let input = shared_slot_input();
	let output = DialectOutput::default()
		.with_source(SourceEntry::new(0, VS_SOURCE, vs_with_image("tex_a")))
		.with_source(SourceEntry::new(1, VS_SOURCE, vs_with_image("tex_b")))
		.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs()));
	let outputs = DialectOutputs::from([(Dialect::Glsl330, output)]);
	let header = HeaderBuilder::new(&input, &outputs, "shared.h")
		.render()?
		.buffer
		.into_string();

	assert_eq!(header.matches("#define SLOT_tex_a (0)\n").count(), 1);
	assert!(!header.contains("#define SLOT_tex_b"));
	// the fragment shader's own image on slot 0 is shadowed as well
	assert!(!header.contains("#define SLOT_tex "));

	// every vertex shader reads the same block, it is declared once
	assert_eq!(header.matches("typedef struct params_t {").count(), 1);
	assert_eq!(header.matches("#define SLOT_params (0)\n").count(), 1);

	// both vertex shaders get their attribute constants
	assert!(header.contains("#define ATTR_vs_a_position (0)\n"));
	assert!(header.contains("#define ATTR_vs_b_position (0)\n"));

	// each descriptor still names the image its own stage reflected
	let desc_b = &header[header.find("b_shader_desc_glsl330 = {").expect("descriptor of b")..];
	assert!(desc_b.contains("{ /* images */ {\"tex_b\",SG_IMAGETYPE_2D},"));
	assert_eq!(header.matches("static const sg_shader_desc ").count(), 2);
	Ok(())
}

#[test]
fn test_same_name_on_two_slots() {
	let input = shared_slot_input();
	let vs_b = ShaderReflection::new(Stage::Vertex, "main")
		.with_input(Attribute::new(0, "position", "TEXCOORD", 0))
		.with_output(uv_varying())
		.with_image(Image::new("tex", 3, ImageType::Image2d));
	let output = DialectOutput::default()
		.with_source(SourceEntry::new(0, VS_SOURCE, quad_vs()))
		.with_source(SourceEntry::new(1, VS_SOURCE, vs_b))
		.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs()));
	let outputs = DialectOutputs::from([(Dialect::Glsl330, output)]);

	let err = HeaderBuilder::new(&input, &outputs, "shared.h")
		.render()
		.expect_err("'tex' would need two slot constants");
	assert!(matches!(err, GenError::Consistency(_)));
	// vs_b claimed slot 3 first, the fragment shader's slot 0 conflicts
	assert_eq!(err.message().line, 23);
	assert!(err.to_string().starts_with("shaders/quad.glsl:23:0: error: conflicting bind slots for image 'tex'"));
}

#[test]
fn test_first_uniform_block_on_slot_wins() -> anyhow::Result<()> {
	let input = shared_slot_input();
	let block = |name: &str| {
		quad_vs_with_params(UniformBlock::new(
			name,
			0,
			16,
			vec![Uniform::new("color", UniformType::Float4, 0)],
		))
	};
	let output = DialectOutput::default()
		.with_source(SourceEntry::new(0, VS_SOURCE, block("a_params")))
		.with_source(SourceEntry::new(1, VS_SOURCE, block("b_params")))
		.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs()));
	let outputs = DialectOutputs::from([(Dialect::Glsl330, output)]);
	let rendered = HeaderBuilder::new(&input, &outputs, "shared.h").render()?;
	let header = rendered.buffer.as_str();

	assert_eq!(header.matches("#define SLOT_a_params (0)\n").count(), 1);
	assert_eq!(header.matches("typedef struct ").count(), 1);
	assert!(header.contains("SOKOL_SHDC_ALIGN(16) typedef struct a_params_t {\n"));
	assert!(!header.contains("#define SLOT_b_params"));

	assert_eq!(rendered.warnings.len(), 1);
	assert_eq!(rendered.warnings[0].declaration, "SLOT_a_params");
	assert!(rendered.warnings[0]
		.message
		.starts_with("uniform block 'b_params' shares bind slot 0 with 'a_params'"));
	Ok(())
}
