/// Dimensionality of a bound image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ImageType {
	Image2d,
	Cube,
	Image3d,
	Array,
}

/// An image (texture) bound to one shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
	pub name: String,
	pub slot: u32,
	pub ty: ImageType,
}

impl Image {
	pub fn new(name: impl Into<String>, slot: u32, ty: ImageType) -> Self {
		Self {
			name: name.into(),
			slot,
			ty,
		}
	}
}
