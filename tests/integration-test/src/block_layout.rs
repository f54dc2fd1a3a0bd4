#![cfg(test)]

use crate::{quad_fs, quad_input, quad_vs_with_params, FS_SOURCE, VS_SOURCE};
use pretty_assertions::assert_eq;
use shdc_header::{GenError, HeaderBuilder};
use shdc_reflection::{Dialect, DialectOutput, DialectOutputs, SourceEntry, Uniform, UniformBlock, UniformType};
use std::fs;

fn outputs_with(params: UniformBlock) -> DialectOutputs {
	DialectOutputs::from([(
		Dialect::Glsl330,
		DialectOutput::default()
			.with_source(SourceEntry::new(1, VS_SOURCE, quad_vs_with_params(params)))
			.with_source(SourceEntry::new(2, FS_SOURCE, quad_fs())),
	)])
}

fn build_err(params: UniformBlock) -> anyhow::Result<(GenError, bool)> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("quad.glsl.h");
	let input = quad_input();
	let outputs = outputs_with(params);
	let err = HeaderBuilder::new(&input, &outputs, path.clone())
		.build()
		.expect_err("block layout cannot be reproduced");
	Ok((err, path.exists()))
}

#[test]
fn test_members_larger_than_block() -> anyhow::Result<()> {
	let (err, written) = build_err(UniformBlock::new(
		"params",
		0,
		16,
		vec![
			Uniform::new("a", UniformType::Float4, 0),
			Uniform::new("b", UniformType::Float4, 16),
		],
	))?;
	assert!(matches!(err, GenError::Consistency(_)));
	// reported at the vertex snippet
	assert_eq!(err.message().line, 4);
	assert_eq!(
		err.message().message,
		"uniform block 'params': members need 32 bytes, but the block is only 16 bytes"
	);
	assert!(!written);
	Ok(())
}

#[test]
fn test_member_before_previous_end() -> anyhow::Result<()> {
	let (err, written) = build_err(UniformBlock::new(
		"params",
		0,
		16,
		vec![
			Uniform::new("a", UniformType::Float4, 0),
			Uniform::new("b", UniformType::Float, 8),
		],
	))?;
	assert!(matches!(err, GenError::Consistency(_)));
	assert_eq!(
		err.message().message,
		"uniform block 'params': uniform 'b' is declared at offset 8, but the previous member ends at 16"
	);
	assert!(!written);
	Ok(())
}

#[test]
fn test_empty_array() -> anyhow::Result<()> {
	let (err, _) = build_err(UniformBlock::new(
		"params",
		0,
		16,
		vec![Uniform::array("weights", UniformType::Float, 0, 0)],
	))?;
	assert!(err.message().message.ends_with("uniform 'weights' is an array of 0 elements"));
	Ok(())
}

#[test]
fn test_declared_offsets_are_kept() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("quad.glsl.h");
	let input = quad_input();
	let outputs = outputs_with(UniformBlock::new(
		"params",
		0,
		48,
		vec![
			Uniform::new("scale", UniformType::Float, 0),
			Uniform::new("tint", UniformType::Float3, 16),
			Uniform::new("alpha", UniformType::Float, 44),
		],
	));
	HeaderBuilder::new(&input, &outputs, path.clone()).build()?;
	let header = fs::read_to_string(&path)?;
	assert!(header.contains(
		"    float scale;\n    \
		uint8_t _pad_4[12];\n    \
		float tint[3];\n    \
		uint8_t _pad_28[16];\n    \
		float alpha;\n\
		} params_t;\n"
	));
	assert!(header.contains("        48, /* size */\n"));
	Ok(())
}
