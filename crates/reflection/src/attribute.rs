/// A vertex stage input or output. Attributes live in fixed tables where the position is the location, unused
/// positions hold [`Attribute::default`] which has no slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
	/// `None` if the attribute is unused or was optimized out.
	pub slot: Option<u32>,
	pub name: String,
	/// HLSL semantic name.
	pub sem_name: String,
	/// HLSL semantic index.
	pub sem_index: u32,
}

impl Attribute {
	pub fn new(slot: u32, name: impl Into<String>, sem_name: impl Into<String>, sem_index: u32) -> Self {
		Self {
			slot: Some(slot),
			name: name.into(),
			sem_name: sem_name.into(),
			sem_index,
		}
	}

	pub fn is_used(&self) -> bool {
		self.slot.is_some()
	}
}
