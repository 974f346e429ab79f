//! Safe, ergonomic Rust API for the ShaderConductor shader cross-compiler
//!
//! This crate wraps the native cross-compilation engine, offering Rust
//! idioms like Result types, RAII handle wrappers, and builder patterns
//! on top of the raw boundary defined in the `shaderconductor` crate.
//!
//! # Example
//!
//! ```no_run
//! use scrs::{compile, CompileTarget, ShaderStage, ShadingLanguage};
//!
//! let source = r#"
//!     float4 main(float4 pos : POSITION) : SV_Position {
//!         return pos;
//!     }
//! "#;
//!
//! // Cross-compile a vertex shader to SPIR-V
//! let result = compile(
//!     source,
//!     "main",
//!     ShaderStage::Vertex,
//!     CompileTarget::new(ShadingLanguage::SpirV),
//! )
//! .unwrap();
//!
//! // Walk the compiled shader's resource interface
//! let reflection = result.reflection().unwrap();
//! for input in &reflection.stage_inputs {
//!     println!("in {} @ location {}", input.name, input.location);
//! }
//! ```

mod blob;
mod compile;
mod disassemble;
mod error;
mod marshal;
mod reflect;
mod result;
mod target;

pub use blob::Blob;
pub use compile::{CompileBuilder, CompileOptions, compile};
pub use disassemble::{DisassembleBuilder, disassemble};
pub use error::{Error, Result};
pub use reflect::{
    Parameter, Sampler, ShaderReflection, StageInput, StorageBuffer, UniformBuffer,
};
pub use result::CompileResult;
pub use target::{CompileTarget, ShaderModel, ShaderStage, ShadingLanguage};

/// Forces the native engine's entry points to resolve now.
///
/// The engine loads lazily on first use; hosts that want a missing or
/// broken library reported at startup rather than at the first compile
/// call this once early and treat an error as fatal.
pub fn ensure_loaded() -> Result<()> {
    shaderconductor::Api::get()?;
    Ok(())
}
