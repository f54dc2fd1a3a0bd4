//! Fixed capacities of the descriptor tables consumed by the runtime. These are part of its binary ABI.

use static_assertions::const_assert;

/// Number of vertex attribute entries in a descriptor, also the size of the reflected input and output tables.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;
/// Number of uniform block entries per shader stage.
pub const MAX_UNIFORM_BLOCKS: usize = 4;
/// Number of uniform entries inside each uniform block entry.
pub const MAX_UNIFORM_BLOCK_MEMBERS: usize = 16;
/// Number of image entries per shader stage.
pub const MAX_IMAGES: usize = 12;

// `[T; N]: Default` only exists up to 32
const_assert!(MAX_VERTEX_ATTRIBUTES <= 32);
const_assert!(MAX_UNIFORM_BLOCKS <= 32);
const_assert!(MAX_IMAGES <= 32);
const_assert!(MAX_UNIFORM_BLOCK_MEMBERS >= 1);
