//! Embedding of source text and bytecode as C byte array literals.

use crate::buffer::{emit, HeaderBuffer};

const BYTES_PER_LINE: usize = 16;

/// Writes `static const {c_type} {name}[{len}]` initialized with `bytes`, sixteen hex literals per line.
pub fn write_byte_array(out: &mut HeaderBuffer, c_type: &str, name: &str, bytes: &[u8]) {
	emit!(out, "static const {} {}[{}] = {{\n", c_type, name, bytes.len());
	for (i, byte) in bytes.iter().enumerate() {
		if i % BYTES_PER_LINE == 0 {
			out.push_str("    ");
		}
		emit!(out, "{:#04x},", byte);
		if i % BYTES_PER_LINE == BYTES_PER_LINE - 1 {
			out.push_str("\n");
		}
	}
	out.push_str("\n};\n");
}

/// Embeds source text as a `char` array including its terminating zero.
pub fn write_source_array(out: &mut HeaderBuffer, name: &str, source: &str) {
	write_byte_array(out, "char", name, &nul_terminated(source));
}

pub fn write_bytecode_array(out: &mut HeaderBuffer, name: &str, bytecode: &[u8]) {
	write_byte_array(out, "uint8_t", name, bytecode);
}

/// Writes the human-readable source text as a block comment.
pub fn write_source_comment(out: &mut HeaderBuffer, source: &str) {
	out.push_str("/*\n");
	for line in source.lines() {
		emit!(out, "    {}\n", line);
	}
	out.push_str("*/\n");
}

pub fn nul_terminated(source: &str) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(source.len() + 1);
	bytes.extend_from_slice(source.as_bytes());
	bytes.push(0);
	bytes
}
