//! Shader cross-compilation API

use crate::result::CompileResult;
use crate::target::{CompileTarget, ShaderModel, ShaderStage};
use crate::{Error, Result};
use shaderconductor::{Api, OptionsDesc, ResultDesc, SourceDesc, TargetDesc};
use std::ffi::CString;
use std::ptr;

/// Compilation options.
///
/// `Default` is the engine's documented configuration: row-major matrix
/// packing, 16-bit types off, no debug info, optimizations on at the
/// highest level, shader model 6.0, no register binding shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Pack matrices in row-major order
    pub pack_matrices_in_row_major: bool,
    /// Enable 16-bit types, such as half and uint16_t. Requires shader model 6.2+
    pub enable_16bit_types: bool,
    /// Embed debug info into the output
    pub enable_debug_info: bool,
    /// Force optimizations off, ignoring `optimization_level`
    pub disable_optimizations: bool,
    /// 0 to 3, no optimization to most optimization
    pub optimization_level: i32,
    /// Input shader model
    pub shader_model: ShaderModel,
    /// Register binding shift for all textures
    pub shift_all_textures_bindings: i32,
    /// Register binding shift for all samplers
    pub shift_all_samplers_bindings: i32,
    /// Register binding shift for all constant buffers
    pub shift_all_cbuffers_bindings: i32,
    /// Register binding shift for all unordered-access buffers
    pub shift_all_uabuffers_bindings: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            pack_matrices_in_row_major: true,
            enable_16bit_types: false,
            enable_debug_info: false,
            disable_optimizations: false,
            optimization_level: 3,
            shader_model: ShaderModel::new(6, 0),
            shift_all_textures_bindings: 0,
            shift_all_samplers_bindings: 0,
            shift_all_cbuffers_bindings: 0,
            shift_all_uabuffers_bindings: 0,
        }
    }
}

impl CompileOptions {
    pub(crate) fn to_desc(&self) -> OptionsDesc {
        OptionsDesc {
            packMatricesInRowMajor: self.pack_matrices_in_row_major,
            enable16bitTypes: self.enable_16bit_types,
            enableDebugInfo: self.enable_debug_info,
            disableOptimizations: self.disable_optimizations,
            optimizationLevel: self.optimization_level,
            shaderModel: self.shader_model.into(),
            shiftAllTexturesBindings: self.shift_all_textures_bindings,
            shiftAllSamplersBindings: self.shift_all_samplers_bindings,
            shiftAllCBuffersBindings: self.shift_all_cbuffers_bindings,
            shiftAllUABuffersBindings: self.shift_all_uabuffers_bindings,
        }
    }
}

/// Builder for shader cross-compilation with a fluent API
///
/// # Example
/// ```no_run
/// use scrs::{CompileBuilder, CompileTarget, ShaderStage, ShadingLanguage};
///
/// let source = "float4 main() : SV_Target { return float4(1,0,0,1); }";
///
/// let result = CompileBuilder::new(
///     source,
///     "main",
///     ShaderStage::Pixel,
///     CompileTarget::new(ShadingLanguage::Essl).version("310"),
/// )
/// .optimization_level(2)
/// .row_major_matrices()
/// .compile()
/// .unwrap();
/// ```
pub struct CompileBuilder<'a> {
    source: &'a str,
    entry_point: CString,
    stage: ShaderStage,
    target: CompileTarget,
    options: CompileOptions,
}

impl<'a> CompileBuilder<'a> {
    /// Creates a new compile builder with the required parameters.
    ///
    /// # Arguments
    /// * `source` - The HLSL source code
    /// * `entry_point` - The name of the entry point function (e.g., "main")
    /// * `stage` - The pipeline stage the source targets
    /// * `target` - The output shading language
    pub fn new(
        source: &'a str,
        entry_point: &str,
        stage: ShaderStage,
        target: CompileTarget,
    ) -> Self {
        CompileBuilder {
            source,
            entry_point: CString::new(entry_point).expect("Entry point contains null byte"),
            stage,
            target,
            options: CompileOptions::default(),
        }
    }

    /// Replaces the whole option block.
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the optimization level (0-3).
    pub fn optimization_level(mut self, level: i32) -> Self {
        self.options.optimization_level = level;
        self
    }

    /// Turns optimizations off entirely.
    pub fn skip_optimization(mut self) -> Self {
        self.options.disable_optimizations = true;
        self
    }

    /// Embeds debug info into the output.
    pub fn debug(mut self) -> Self {
        self.options.enable_debug_info = true;
        self
    }

    /// Enables 16-bit types (requires shader model 6.2+).
    pub fn enable_16bit_types(mut self) -> Self {
        self.options.enable_16bit_types = true;
        self
    }

    /// Sets the matrix packing order to row-major.
    pub fn row_major_matrices(mut self) -> Self {
        self.options.pack_matrices_in_row_major = true;
        self
    }

    /// Sets the matrix packing order to column-major.
    pub fn column_major_matrices(mut self) -> Self {
        self.options.pack_matrices_in_row_major = false;
        self
    }

    /// Sets the input shader model.
    pub fn shader_model(mut self, major: i32, minor: i32) -> Self {
        self.options.shader_model = ShaderModel::new(major, minor);
        self
    }

    /// Shifts all texture register bindings.
    pub fn shift_all_textures_bindings(mut self, shift: i32) -> Self {
        self.options.shift_all_textures_bindings = shift;
        self
    }

    /// Shifts all sampler register bindings.
    pub fn shift_all_samplers_bindings(mut self, shift: i32) -> Self {
        self.options.shift_all_samplers_bindings = shift;
        self
    }

    /// Shifts all constant buffer register bindings.
    pub fn shift_all_cbuffers_bindings(mut self, shift: i32) -> Self {
        self.options.shift_all_cbuffers_bindings = shift;
        self
    }

    /// Shifts all unordered-access buffer register bindings.
    pub fn shift_all_uabuffers_bindings(mut self, shift: i32) -> Self {
        self.options.shift_all_uabuffers_bindings = shift;
        self
    }

    /// Compiles the shader.
    ///
    /// Blocks until the engine finishes. Diagnostics from a failed
    /// compile are carried in the returned error; warnings from a
    /// successful one stay available on the result.
    pub fn compile(self) -> Result<CompileResult> {
        let api = Api::get()?;

        let source = CString::new(self.source).expect("Source contains null byte");
        let version = self
            .target
            .version
            .as_deref()
            .map(|v| CString::new(v).expect("Version contains null byte"));

        let source_desc = SourceDesc {
            source: source.as_ptr(),
            entryPoint: self.entry_point.as_ptr(),
            stage: self.stage.into(),
        };
        let options_desc = self.options.to_desc();
        let target_desc = TargetDesc {
            language: self.target.language.into(),
            version: version
                .as_ref()
                .map(|v| v.as_ptr())
                .unwrap_or(ptr::null()),
            asModule: self.target.as_module,
        };

        log::debug!(
            "compiling {} entry point `{}` to {}",
            self.stage,
            self.entry_point.to_string_lossy(),
            self.target
        );

        let mut desc: ResultDesc = unsafe { std::mem::zeroed() };
        unsafe {
            api.Compile(&source_desc, &options_desc, &target_desc, &mut desc);
        }

        // Takes ownership of the native blobs even on failure, so the
        // error path releases them too.
        let result = unsafe { CompileResult::from_raw(api, desc) };

        if result.has_error() {
            let message = result
                .error_warning()
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::Compilation { message });
        }

        Ok(result)
    }
}

/// Convenience function for one-shot compilation with default options.
///
/// # Example
/// ```no_run
/// use scrs::{compile, CompileTarget, ShaderStage, ShadingLanguage};
///
/// let source = "float4 main() : SV_Target { return float4(1,0,0,1); }";
/// let result = compile(
///     source,
///     "main",
///     ShaderStage::Pixel,
///     CompileTarget::new(ShadingLanguage::SpirV),
/// )
/// .unwrap();
/// assert!(!result.has_error());
/// ```
pub fn compile(
    source: &str,
    entry_point: &str,
    stage: ShaderStage,
    target: CompileTarget,
) -> Result<CompileResult> {
    CompileBuilder::new(source, entry_point, stage, target).compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_options() {
        let options = CompileOptions::default();
        assert!(options.pack_matrices_in_row_major);
        assert!(!options.enable_16bit_types);
        assert!(!options.enable_debug_info);
        assert!(!options.disable_optimizations);
        assert_eq!(options.optimization_level, 3);
        assert_eq!(options.shader_model, ShaderModel::new(6, 0));
        assert_eq!(options.shift_all_textures_bindings, 0);
        assert_eq!(options.shift_all_samplers_bindings, 0);
        assert_eq!(options.shift_all_cbuffers_bindings, 0);
        assert_eq!(options.shift_all_uabuffers_bindings, 0);
    }

    #[test]
    fn test_builder_updates_options() {
        use crate::target::ShadingLanguage;

        let builder = CompileBuilder::new(
            "",
            "main",
            ShaderStage::Vertex,
            CompileTarget::new(ShadingLanguage::Glsl),
        )
        .optimization_level(1)
        .skip_optimization()
        .debug()
        .column_major_matrices()
        .shader_model(6, 2)
        .enable_16bit_types()
        .shift_all_cbuffers_bindings(8);

        assert_eq!(builder.options.optimization_level, 1);
        assert!(builder.options.disable_optimizations);
        assert!(builder.options.enable_debug_info);
        assert!(!builder.options.pack_matrices_in_row_major);
        assert_eq!(builder.options.shader_model, ShaderModel::new(6, 2));
        assert!(builder.options.enable_16bit_types);
        assert_eq!(builder.options.shift_all_cbuffers_bindings, 8);
    }

    #[test]
    fn test_options_round_trip_to_desc() {
        let desc = CompileOptions::default().to_desc();
        assert!(desc.packMatricesInRowMajor);
        assert!(!desc.disableOptimizations);
        assert_eq!(desc.optimizationLevel, 3);
        assert_eq!(desc.shaderModel.major, 6);
        assert_eq!(desc.shaderModel.minor, 0);
    }
}
