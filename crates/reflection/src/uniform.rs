use static_assertions::const_assert_eq;

/// The scalar kind of a uniform as reported by reflection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UniformType {
	/// Reflection encountered a type the host side has no representation for.
	Invalid,
	Float,
	Float2,
	Float3,
	Float4,
	Mat4,
}

impl UniformType {
	/// Size of one element in bytes, 0 for [`UniformType::Invalid`].
	pub const fn size(&self) -> u32 {
		match self {
			UniformType::Invalid => 0,
			UniformType::Float => 4,
			UniformType::Float2 => 8,
			UniformType::Float3 => 12,
			UniformType::Float4 => 16,
			UniformType::Mat4 => 64,
		}
	}

	/// Number of `float` components of one element.
	pub const fn components(&self) -> u32 {
		self.size() / 4
	}

	/// The shading-language type name, used as key of user supplied type remappings.
	pub fn type_name(&self) -> Option<&'static str> {
		match self {
			UniformType::Invalid => None,
			UniformType::Float => Some("float"),
			UniformType::Float2 => Some("vec2"),
			UniformType::Float3 => Some("vec3"),
			UniformType::Float4 => Some("vec4"),
			UniformType::Mat4 => Some("mat4"),
		}
	}
}

const_assert_eq!(UniformType::Float3.size(), 12);
const_assert_eq!(UniformType::Mat4.components(), 16);

/// A single member of a uniform block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uniform {
	pub name: String,
	pub ty: UniformType,
	/// Byte offset within the block, as laid out by the device side.
	pub offset: u32,
	/// Number of array elements, 1 for non-arrays.
	pub array_count: u32,
}

impl Uniform {
	pub fn new(name: impl Into<String>, ty: UniformType, offset: u32) -> Self {
		Self {
			name: name.into(),
			ty,
			offset,
			array_count: 1,
		}
	}

	pub fn array(name: impl Into<String>, ty: UniformType, offset: u32, array_count: u32) -> Self {
		Self {
			array_count,
			..Self::new(name, ty, offset)
		}
	}

	/// Bytes this member occupies on the host side, `None` if that does not fit a `u32`.
	pub fn host_size(&self) -> Option<u32> {
		self.ty.size().checked_mul(self.array_count)
	}
}

/// A uniform block of one shader stage. Members are kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBlock {
	pub name: String,
	pub slot: u32,
	/// Size reported by reflection, not yet rounded.
	pub size: u32,
	pub uniforms: Vec<Uniform>,
}

impl UniformBlock {
	pub fn new(name: impl Into<String>, slot: u32, size: u32, uniforms: Vec<Uniform>) -> Self {
		Self {
			name: name.into(),
			slot,
			size,
			uniforms,
		}
	}

	/// The block size rounded up to the 16 byte block stride.
	pub fn rounded_size(&self) -> Option<u32> {
		round_up(self.size, 16)
	}
}

/// Rounds `value` up to the next multiple of `to`, which must be a power of two. `None` on overflow.
pub const fn round_up(value: u32, to: u32) -> Option<u32> {
	match value.checked_add(to - 1) {
		Some(value) => Some(value & !(to - 1)),
		None => None,
	}
}
