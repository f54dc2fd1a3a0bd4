use bitflags::bitflags;
use std::fmt::{Display, Formatter};

/// A target shading dialect the upstream cross compiler can produce.
///
/// The declaration order is the canonical order in which dialects are processed and in which the runtime accessor
/// tests them.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dialect {
	Glsl330,
	Glsl100,
	Glsl300es,
	Hlsl5,
	MetalMacos,
	MetalIos,
	MetalSim,
}

impl Dialect {
	pub const VALUES: [Dialect; 7] = [
		Dialect::Glsl330,
		Dialect::Glsl100,
		Dialect::Glsl300es,
		Dialect::Hlsl5,
		Dialect::MetalMacos,
		Dialect::MetalIos,
		Dialect::MetalSim,
	];

	pub fn to_u32(&self) -> u32 {
		*self as u32
	}

	pub fn from_u32(value: u32) -> Option<Self> {
		Self::VALUES.get(value as usize).copied()
	}

	pub fn bit(&self) -> DialectSet {
		DialectSet::from_bits_retain(1 << self.to_u32())
	}

	/// Name used as suffix of every per-dialect identifier.
	pub fn name(&self) -> &'static str {
		match self {
			Dialect::Glsl330 => "glsl330",
			Dialect::Glsl100 => "glsl100",
			Dialect::Glsl300es => "glsl300es",
			Dialect::Hlsl5 => "hlsl5",
			Dialect::MetalMacos => "metal_macos",
			Dialect::MetalIos => "metal_ios",
			Dialect::MetalSim => "metal_sim",
		}
	}

	/// Preprocessor symbol the runtime defines when it is compiled for this dialect's backend.
	pub fn guard_symbol(&self) -> &'static str {
		match self {
			Dialect::Glsl330 => "SOKOL_GLCORE33",
			Dialect::Glsl100 => "SOKOL_GLES2",
			Dialect::Glsl300es => "SOKOL_GLES3",
			Dialect::Hlsl5 => "SOKOL_D3D11",
			Dialect::MetalMacos | Dialect::MetalIos | Dialect::MetalSim => "SOKOL_METAL",
		}
	}

	/// Value the runtime's backend query returns when this dialect is active.
	pub fn backend(&self) -> &'static str {
		match self {
			Dialect::Glsl330 => "SG_BACKEND_GLCORE33",
			Dialect::Glsl100 => "SG_BACKEND_GLES2",
			Dialect::Glsl300es => "SG_BACKEND_GLES3",
			Dialect::Hlsl5 => "SG_BACKEND_D3D11",
			Dialect::MetalMacos => "SG_BACKEND_METAL_MACOS",
			Dialect::MetalIos => "SG_BACKEND_METAL_IOS",
			Dialect::MetalSim => "SG_BACKEND_METAL_SIMULATOR",
		}
	}

	/// Whether the runtime accepts precompiled bytecode for this dialect instead of source text.
	pub fn supports_bytecode(&self) -> bool {
		match self {
			Dialect::Glsl330 | Dialect::Glsl100 | Dialect::Glsl300es => false,
			Dialect::Hlsl5 | Dialect::MetalMacos | Dialect::MetalIos | Dialect::MetalSim => true,
		}
	}
}

impl Display for Dialect {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

bitflags! {
	/// The set of enabled dialects of one generation run.
	#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
	pub struct DialectSet: u32 {
		const GLSL330 = 1 << 0;
		const GLSL100 = 1 << 1;
		const GLSL300ES = 1 << 2;
		const HLSL5 = 1 << 3;
		const METAL_MACOS = 1 << 4;
		const METAL_IOS = 1 << 5;
		const METAL_SIM = 1 << 6;
	}
}

impl DialectSet {
	pub fn contains_dialect(&self, dialect: Dialect) -> bool {
		self.contains(dialect.bit())
	}

	/// Iterates the contained dialects in canonical order.
	pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
		Dialect::VALUES.into_iter().filter(|d| self.contains_dialect(*d))
	}
}

impl From<Dialect> for DialectSet {
	fn from(value: Dialect) -> Self {
		value.bit()
	}
}

impl FromIterator<Dialect> for DialectSet {
	fn from_iter<T: IntoIterator<Item = Dialect>>(iter: T) -> Self {
		iter.into_iter().fold(DialectSet::empty(), |set, d| set | d.bit())
	}
}
