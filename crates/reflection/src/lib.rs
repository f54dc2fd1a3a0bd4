//! In-memory model of everything the header generator consumes: the reflected interface of every compiled shader
//! stage, the snippet and program namespace of the input file, and the per-dialect compiled sources and bytecode.
//!
//! All of these are produced once by upstream collaborators and never mutated afterwards.

pub mod attribute;
pub mod compiled;
pub mod dialect;
pub mod image;
pub mod input;
pub mod limits;
pub mod reflection;
pub mod uniform;

pub use attribute::Attribute;
pub use compiled::{BytecodeBlob, DialectOutput, DialectOutputs, SourceEntry};
pub use dialect::{Dialect, DialectSet};
pub use image::{Image, ImageType};
pub use input::{Program, ShaderInput, Snippet, SnippetIndex, SnippetKind};
pub use reflection::{ShaderReflection, Stage};
pub use uniform::{Uniform, UniformBlock, UniformType};
