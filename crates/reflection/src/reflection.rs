use crate::attribute::Attribute;
use crate::image::Image;
use crate::limits::MAX_VERTEX_ATTRIBUTES;
use crate::uniform::UniformBlock;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
	Vertex,
	Fragment,
}

impl Stage {
	/// Short name used in generated comments.
	pub fn short_name(&self) -> &'static str {
		match self {
			Stage::Vertex => "vs",
			Stage::Fragment => "fs",
		}
	}
}

/// The interface of one compiled shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderReflection {
	pub stage: Stage,
	pub entry_point: String,
	/// Stage inputs, indexed by location.
	pub inputs: [Attribute; MAX_VERTEX_ATTRIBUTES],
	/// Stage outputs, indexed by location.
	pub outputs: [Attribute; MAX_VERTEX_ATTRIBUTES],
	pub uniform_blocks: Vec<UniformBlock>,
	pub images: Vec<Image>,
}

impl ShaderReflection {
	pub fn new(stage: Stage, entry_point: impl Into<String>) -> Self {
		Self {
			stage,
			entry_point: entry_point.into(),
			inputs: Default::default(),
			outputs: Default::default(),
			uniform_blocks: Vec::new(),
			images: Vec::new(),
		}
	}

	/// Places `attr` at the input position named by its slot. Attributes without a slot or beyond the
	/// table capacity are ignored.
	pub fn with_input(mut self, attr: Attribute) -> Self {
		if let Some(entry) = attr.slot.and_then(|slot| self.inputs.get_mut(slot as usize)) {
			*entry = attr;
		}
		self
	}

	/// Places `attr` at the output position named by its slot. Attributes without a slot or beyond the
	/// table capacity are ignored.
	pub fn with_output(mut self, attr: Attribute) -> Self {
		if let Some(entry) = attr.slot.and_then(|slot| self.outputs.get_mut(slot as usize)) {
			*entry = attr;
		}
		self
	}

	pub fn with_uniform_block(mut self, ub: UniformBlock) -> Self {
		self.uniform_blocks.push(ub);
		self
	}

	pub fn with_image(mut self, image: Image) -> Self {
		self.images.push(image);
		self
	}

	pub fn find_uniform_block(&self, slot: u32) -> Option<&UniformBlock> {
		self.uniform_blocks.iter().find(|ub| ub.slot == slot)
	}

	pub fn find_image(&self, slot: u32) -> Option<&Image> {
		self.images.iter().find(|img| img.slot == slot)
	}

	pub fn used_inputs(&self) -> impl Iterator<Item = &Attribute> {
		self.inputs.iter().filter(|attr| attr.is_used())
	}
}
