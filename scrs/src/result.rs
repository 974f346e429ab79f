//! Owned compile/disassemble result handles

use crate::blob::trim_trailing_nuls;
use crate::reflect::{
    self, Sampler, ShaderReflection, StageInput, StorageBuffer, UniformBuffer,
};
use crate::Result;
use shaderconductor::{Api, ResultDesc};
use std::slice;

/// Owned handle to the outcome of a compile or disassemble call.
///
/// The handle owns the native output and diagnostic blobs, plus the
/// reflection data nested in the native result; everything is released
/// exactly once when the value is dropped. Reflection queries borrow
/// the handle, so extracted data never outlives the native memory it
/// was read from.
pub struct CompileResult {
    api: &'static Api,
    desc: ResultDesc,
}

impl CompileResult {
    /// Takes ownership of a result produced by the engine.
    ///
    /// # Safety
    /// The descriptor's handles must be live and unowned; this wrapper
    /// becomes their sole owner.
    pub(crate) unsafe fn from_raw(api: &'static Api, desc: ResultDesc) -> Self {
        CompileResult { api, desc }
    }

    /// True when the engine reported a failure.
    pub fn has_error(&self) -> bool {
        self.desc.hasError
    }

    /// True when the output blob holds source text rather than binary
    /// code.
    pub fn is_text(&self) -> bool {
        self.desc.isText
    }

    /// The compiled output. `None` when the compile failed.
    pub fn output(&self) -> Option<&[u8]> {
        if self.desc.target.is_null() {
            return None;
        }
        unsafe {
            let data = self.api.GetShaderConductorBlobData(self.desc.target);
            let size = self.api.GetShaderConductorBlobSize(self.desc.target);
            if data.is_null() || size <= 0 {
                return Some(&[]);
            }
            Some(slice::from_raw_parts(data.cast::<u8>(), size as usize))
        }
    }

    /// The compiled output as text, for targets that emit source.
    pub fn output_str(&self) -> Result<&str> {
        let bytes = self.output().unwrap_or(&[]);
        std::str::from_utf8(trim_trailing_nuls(bytes)).map_err(Into::into)
    }

    /// Diagnostic text from the engine: errors for a failed call,
    /// warnings for a successful one. `None` when nothing was emitted.
    pub fn error_warning(&self) -> Option<String> {
        if self.desc.errorWarningMsg.is_null() {
            return None;
        }
        unsafe {
            let data = self.api.GetShaderConductorBlobData(self.desc.errorWarningMsg);
            let size = self.api.GetShaderConductorBlobSize(self.desc.errorWarningMsg);
            if data.is_null() || size <= 0 {
                return None;
            }
            let bytes = slice::from_raw_parts(data.cast::<u8>(), size as usize);
            let text = String::from_utf8_lossy(trim_trailing_nuls(bytes));
            if text.is_empty() {
                None
            } else {
                Some(text.into_owned())
            }
        }
    }

    /// Stage inputs of the compiled shader, in the engine's order.
    pub fn stage_inputs(&self) -> Result<Vec<StageInput>> {
        reflect::stage_inputs(self.api, &self.desc)
    }

    /// Uniform buffers with their nested parameters, in the engine's
    /// order.
    pub fn uniform_buffers(&self) -> Result<Vec<UniformBuffer>> {
        reflect::uniform_buffers(self.api, &self.desc)
    }

    /// Texture samplers, in the engine's order.
    pub fn samplers(&self) -> Result<Vec<Sampler>> {
        reflect::samplers(self.api, &self.desc)
    }

    /// Storage buffers, in the engine's order.
    pub fn storage_buffers(&self) -> Result<Vec<StorageBuffer>> {
        reflect::storage_buffers(self.api, &self.desc)
    }

    /// Extracts the complete resource interface in one pass.
    pub fn reflection(&self) -> Result<ShaderReflection> {
        Ok(ShaderReflection {
            stage_inputs: self.stage_inputs()?,
            uniform_buffers: self.uniform_buffers()?,
            samplers: self.samplers()?,
            storage_buffers: self.storage_buffers()?,
        })
    }
}

impl Drop for CompileResult {
    fn drop(&mut self) {
        // The native interface exposes no destructor for the reflection
        // data; it is tied to the result's blobs.
        unsafe {
            if !self.desc.target.is_null() {
                self.api.DestroyShaderConductorBlob(self.desc.target);
            }
            if !self.desc.errorWarningMsg.is_null() {
                self.api.DestroyShaderConductorBlob(self.desc.errorWarningMsg);
            }
        }
    }
}

impl std::fmt::Debug for CompileResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileResult")
            .field("has_error", &self.has_error())
            .field("is_text", &self.is_text())
            .field("output_len", &self.output().map(|o| o.len()))
            .finish()
    }
}
