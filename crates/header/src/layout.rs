//! Host side memory layout of uniform blocks.
//!
//! The device side already decided every member offset (std140 style); this module only reproduces that layout in a
//! packed C struct by filling gaps with explicit padding and rounding the struct up to the 16 byte block stride.

use crate::buffer::{emit, HeaderBuffer};
use crate::error::{Diagnostic, ErrorMessage, GenError};
use rustc_hash::FxHashMap;
use shdc_reflection::uniform::round_up;
use shdc_reflection::{UniformBlock, UniformType};
use static_assertions::const_assert;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;
use thiserror::Error;

/// Block stride host and device agree on.
pub const BLOCK_ALIGNMENT: u32 = 16;
const_assert!(BLOCK_ALIGNMENT.is_power_of_two());

/// How a uniform is represented on the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRepr {
	/// A user supplied type name replacing the default representation.
	Mapped(String),
	/// `float` or a fixed array of `components` floats.
	Floats { components: u32 },
	/// The uniform's type has no host representation.
	Invalid,
}

impl HostRepr {
	pub fn new(ty: UniformType, type_map: &FxHashMap<String, String>) -> Self {
		match ty.type_name() {
			None => HostRepr::Invalid,
			Some(name) => match type_map.get(name) {
				Some(mapped) => HostRepr::Mapped(mapped.clone()),
				None => HostRepr::Floats {
					components: ty.components(),
				},
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
	Padding {
		offset: u32,
		len: u32,
	},
	Field {
		name: String,
		offset: u32,
		repr: HostRepr,
		array_count: u32,
	},
}

impl Member {
	pub fn offset(&self) -> u32 {
		match self {
			Member::Padding { offset, .. } | Member::Field { offset, .. } => *offset,
		}
	}

	fn write(&self, out: &mut HeaderBuffer) {
		match self {
			Member::Padding { offset, len } => emit!(out, "    uint8_t _pad_{}[{}];\n", offset, len),
			Member::Field {
				name,
				repr,
				array_count,
				..
			} => match (repr, *array_count) {
				(HostRepr::Invalid, _) => emit!(out, "    INVALID_UNIFORM_TYPE;\n"),
				(HostRepr::Mapped(ty), 1) => emit!(out, "    {} {};\n", ty, name),
				(HostRepr::Mapped(ty), n) => emit!(out, "    {} {}[{}];\n", ty, name, n),
				(HostRepr::Floats { components: 1 }, 1) => emit!(out, "    float {};\n", name),
				(HostRepr::Floats { components }, 1) => emit!(out, "    float {}[{}];\n", name, components),
				(HostRepr::Floats { components: 1 }, n) => emit!(out, "    float {}[{}];\n", name, n),
				(HostRepr::Floats { components }, n) => emit!(out, "    float {}[{}][{}];\n", name, n, components),
			},
		}
	}
}

/// Reflected offsets or sizes of a uniform block that no packed host struct can reproduce.
#[derive(Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
	#[error("uniform '{uniform}' is declared at offset {offset}, but the previous member ends at {cursor}")]
	Overlap { uniform: String, offset: u32, cursor: u32 },
	#[error("uniform '{uniform}' is an array of 0 elements")]
	EmptyArray { uniform: String },
	#[error("uniform '{uniform}' ends beyond the largest representable block")]
	MemberOverflow { uniform: String },
	#[error("block size {size} cannot be rounded to the 16 byte block stride")]
	BlockOverflow { size: u32 },
	#[error("members need {size} bytes, but the block is only {declared} bytes")]
	Oversized { size: u32, declared: u32 },
}

impl LayoutError {
	/// Turns this into a consistency error of block `block`, reported at `line` of `path`.
	pub fn at(self, path: &Path, line: u32, block: &str) -> GenError {
		GenError::Consistency(ErrorMessage::at(path, line, format!("uniform block '{}': {}", block, self)))
	}
}

impl Debug for LayoutError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(self, f)
	}
}

/// The packed host struct of one uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
	pub block_name: String,
	pub slot: u32,
	pub members: Vec<Member>,
	/// Total struct size, always a multiple of [`BLOCK_ALIGNMENT`].
	pub size: u32,
}

impl StructLayout {
	/// Lays out `ub` at its declared offsets. Fails if the declared offsets are not ascending or the members do not fit
	/// into the declared block size.
	pub fn new(ub: &UniformBlock, type_map: &FxHashMap<String, String>) -> Result<Self, LayoutError> {
		let declared = ub.rounded_size().ok_or(LayoutError::BlockOverflow { size: ub.size })?;
		let mut members = Vec::with_capacity(ub.uniforms.len() + 1);
		let mut cursor = 0u32;
		for uniform in &ub.uniforms {
			if uniform.array_count == 0 {
				return Err(LayoutError::EmptyArray {
					uniform: uniform.name.clone(),
				});
			}
			if uniform.offset < cursor {
				return Err(LayoutError::Overlap {
					uniform: uniform.name.clone(),
					offset: uniform.offset,
					cursor,
				});
			}
			if uniform.offset > cursor {
				members.push(Member::Padding {
					offset: cursor,
					len: uniform.offset - cursor,
				});
				cursor = uniform.offset;
			}
			members.push(Member::Field {
				name: uniform.name.clone(),
				offset: cursor,
				repr: HostRepr::new(uniform.ty, type_map),
				array_count: uniform.array_count,
			});
			cursor = uniform
				.host_size()
				.and_then(|size| cursor.checked_add(size))
				.ok_or_else(|| LayoutError::MemberOverflow {
					uniform: uniform.name.clone(),
				})?;
		}
		if cursor > declared {
			return Err(LayoutError::Oversized { size: cursor, declared });
		}
		// cursor <= declared, which is already aligned
		let size = round_up(cursor, BLOCK_ALIGNMENT).ok_or(LayoutError::BlockOverflow { size: cursor })?;
		if size > cursor {
			members.push(Member::Padding {
				offset: cursor,
				len: size - cursor,
			});
		}
		Ok(Self {
			block_name: ub.name.clone(),
			slot: ub.slot,
			members,
			size,
		})
	}

	pub fn struct_name(&self, prefix: &str) -> String {
		format!("{}{}_t", prefix, self.block_name)
	}

	/// Every field whose type could not be represented.
	pub fn diagnostics(&self, prefix: &str) -> Vec<Diagnostic> {
		self.members
			.iter()
			.filter_map(|member| match member {
				Member::Field {
					name,
					repr: HostRepr::Invalid,
					..
				} => Some(Diagnostic {
					declaration: self.struct_name(prefix),
					message: format!("uniform '{}' in block '{}' has an unsupported type", name, self.block_name),
				}),
				_ => None,
			})
			.collect()
	}

	/// Writes the slot constant and the packed struct declaration.
	pub fn write(&self, out: &mut HeaderBuffer, prefix: &str) {
		let struct_name = self.struct_name(prefix);
		emit!(out, "#define SLOT_{}{} ({})\n", prefix, self.block_name, self.slot);
		emit!(out, "#pragma pack(push,1)\n");
		emit!(out, "SOKOL_SHDC_ALIGN({}) typedef struct {} {{\n", BLOCK_ALIGNMENT, struct_name);
		for member in &self.members {
			member.write(out);
		}
		emit!(out, "}} {};\n", struct_name);
		emit!(out, "#pragma pack(pop)\n");
	}
}
