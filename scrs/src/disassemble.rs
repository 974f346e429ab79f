//! Shader disassembly API

use crate::result::CompileResult;
use crate::target::ShadingLanguage;
use crate::{Blob, Error, Result};
use shaderconductor::{Api, DisassembleDesc, ResultDesc};

/// Builder for disassembling a compiled binary back into text
///
/// # Example
/// ```no_run
/// use scrs::{compile, CompileTarget, DisassembleBuilder, ShaderStage, ShadingLanguage};
///
/// let result = compile(
///     "float4 main() : SV_Target { return float4(1,0,0,1); }",
///     "main",
///     ShaderStage::Pixel,
///     CompileTarget::new(ShadingLanguage::SpirV),
/// )
/// .unwrap();
///
/// let disasm = DisassembleBuilder::new(ShadingLanguage::SpirV, result.output().unwrap())
///     .disassemble()
///     .unwrap();
/// println!("{}", disasm.output_str().unwrap());
/// ```
pub struct DisassembleBuilder<'a> {
    language: ShadingLanguage,
    binary: &'a [u8],
}

impl<'a> DisassembleBuilder<'a> {
    /// Creates a disassemble builder for a compiled binary.
    pub fn new(language: ShadingLanguage, binary: &'a [u8]) -> Self {
        DisassembleBuilder { language, binary }
    }

    /// Creates a disassemble builder from a Blob.
    pub fn from_blob(language: ShadingLanguage, blob: &'a Blob) -> Self {
        Self::new(language, blob.as_bytes())
    }

    /// Disassembles the binary.
    pub fn disassemble(self) -> Result<CompileResult> {
        let api = Api::get()?;

        let source = DisassembleDesc {
            language: self.language.into(),
            binary: self.binary.as_ptr().cast(),
            binarySize: self.binary.len() as i32,
        };

        log::debug!(
            "disassembling {} bytes of {}",
            self.binary.len(),
            self.language
        );

        let mut desc: ResultDesc = unsafe { std::mem::zeroed() };
        unsafe {
            api.Disassemble(&source, &mut desc);
        }

        let result = unsafe { CompileResult::from_raw(api, desc) };

        if result.has_error() {
            let message = result
                .error_warning()
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::Disassembly { message });
        }

        Ok(result)
    }
}

/// Convenience function for simple disassembly.
pub fn disassemble(language: ShadingLanguage, binary: &[u8]) -> Result<CompileResult> {
    DisassembleBuilder::new(language, binary).disassemble()
}
