//! Raw bindings for the ShaderConductor wrapper library
//!
//! This crate owns the binary contract shared with the native shader
//! cross-compiler: the enumerations and `#[repr(C)]` records both sides
//! read verbatim, plus the loader that resolves the wrapper library's
//! entry points at runtime.
//!
//! Field and entry-point names match the native header exactly. The
//! records here must never be reordered, widened, or renumbered on their
//! own; both sides of the boundary are kept in sync by hand.

#![allow(non_snake_case)]
#![allow(non_camel_case_types)]

use libloading::Library;
use std::ffi::{c_char, c_int, c_void};
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Failed to load native library: {0}")]
    Load(String),
    #[error("Entry point not found: {0}")]
    FunctionNotFound(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;

pub type LPCSTR = *const c_char;
pub type LPSTR = *mut c_char;

/// Shader pipeline stage. Ordinals are shared with the native side.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    VertexShader = 0,
    PixelShader,
    GeometryShader,
    HullShader,
    DomainShader,
    ComputeShader,
}

/// Output shading language. Ordinals are shared with the native side.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingLanguage {
    Dxil = 0,
    SpirV,
    Hlsl,
    Glsl,
    Essl,
    Msl_macOS,
    Msl_iOS,
}

/// Opaque native-owned byte buffer. Only ever handled by pointer.
#[repr(C)]
pub struct ShaderConductorBlob {
    _unused: [u8; 0],
}

/// Opaque reflection data owned by a compilation result.
#[repr(C)]
pub struct ShaderConductorReflection {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct SourceDesc {
    pub source: LPCSTR,
    pub entryPoint: LPCSTR,
    pub stage: ShaderStage,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderModel {
    pub major: c_int,
    pub minor: c_int,
}

#[repr(C)]
pub struct OptionsDesc {
    pub packMatricesInRowMajor: bool,
    pub enable16bitTypes: bool,
    pub enableDebugInfo: bool,
    pub disableOptimizations: bool,
    pub optimizationLevel: c_int,
    pub shaderModel: ShaderModel,
    pub shiftAllTexturesBindings: c_int,
    pub shiftAllSamplersBindings: c_int,
    pub shiftAllCBuffersBindings: c_int,
    pub shiftAllUABuffersBindings: c_int,
}

#[repr(C)]
pub struct TargetDesc {
    pub language: ShadingLanguage,
    pub version: LPCSTR,
    pub asModule: bool,
}

#[repr(C)]
pub struct ResultDesc {
    pub target: *mut ShaderConductorBlob,
    pub isText: bool,
    pub errorWarningMsg: *mut ShaderConductorBlob,
    pub hasError: bool,
    pub reflection: *mut ShaderConductorReflection,
}

#[repr(C)]
pub struct DisassembleDesc {
    pub language: ShadingLanguage,
    pub binary: *const c_void,
    pub binarySize: c_int,
}

// Function pointer types for all entry points
type PFN_Compile = unsafe extern "C" fn(
    source: *const SourceDesc,
    options: *const OptionsDesc,
    target: *const TargetDesc,
    result: *mut ResultDesc,
);

type PFN_Disassemble =
    unsafe extern "C" fn(source: *const DisassembleDesc, result: *mut ResultDesc);

type PFN_CreateShaderConductorBlob =
    unsafe extern "C" fn(data: *const c_void, size: c_int) -> *mut ShaderConductorBlob;

type PFN_DestroyShaderConductorBlob = unsafe extern "C" fn(blob: *mut ShaderConductorBlob);

type PFN_GetShaderConductorBlobData =
    unsafe extern "C" fn(blob: *mut ShaderConductorBlob) -> *const c_void;

type PFN_GetShaderConductorBlobSize =
    unsafe extern "C" fn(blob: *mut ShaderConductorBlob) -> c_int;

type PFN_GetStageInputCount = unsafe extern "C" fn(result: *const ResultDesc) -> c_int;

type PFN_GetStageInput = unsafe extern "C" fn(
    result: *const ResultDesc,
    stageInputIndex: c_int,
    name: LPSTR,
    maxNameLength: c_int,
    location: *mut c_int,
    rows: *mut c_int,
    columns: *mut c_int,
);

type PFN_GetUniformBufferCount = unsafe extern "C" fn(result: *const ResultDesc) -> c_int;

type PFN_GetUniformBuffer = unsafe extern "C" fn(
    result: *const ResultDesc,
    bufferIndex: c_int,
    blockName: LPSTR,
    instanceName: LPSTR,
    maxNameLength: c_int,
    byteSize: *mut c_int,
    slot: *mut c_int,
    parameterCount: *mut c_int,
);

type PFN_GetParameter = unsafe extern "C" fn(
    result: *const ResultDesc,
    bufferIndex: c_int,
    parameterIndex: c_int,
    name: LPSTR,
    maxNameLength: c_int,
    r#type: *mut c_int,
    rows: *mut c_int,
    columns: *mut c_int,
    byteOffset: *mut c_int,
    arrayDimensions: *mut c_int,
);

type PFN_GetParameterArraySize = unsafe extern "C" fn(
    result: *const ResultDesc,
    bufferIndex: c_int,
    parameterIndex: c_int,
    dimension: c_int,
    arraySize: *mut c_int,
);

type PFN_GetSamplerCount = unsafe extern "C" fn(result: *const ResultDesc) -> c_int;

type PFN_GetSampler = unsafe extern "C" fn(
    result: *const ResultDesc,
    samplerIndex: c_int,
    name: LPSTR,
    originalName: LPSTR,
    textureName: LPSTR,
    maxNameLength: c_int,
    r#type: *mut c_int,
    slot: *mut c_int,
    textureSlot: *mut c_int,
);

type PFN_GetStorageBufferCount = unsafe extern "C" fn(result: *const ResultDesc) -> c_int;

type PFN_GetStorageBuffer = unsafe extern "C" fn(
    result: *const ResultDesc,
    bufferIndex: c_int,
    blockName: LPSTR,
    instanceName: LPSTR,
    maxNameLength: c_int,
    byteSize: *mut c_int,
    slot: *mut c_int,
    readOnly: *mut bool,
);

#[cfg(target_os = "windows")]
const LIBRARY_NAME: &str = "ShaderConductorWrapper.dll";
#[cfg(target_os = "macos")]
const LIBRARY_NAME: &str = "libShaderConductorWrapper.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
const LIBRARY_NAME: &str = "libShaderConductorWrapper.so";

fn library_path() -> PathBuf {
    // Look next to the executable first, then fall back to the loader's
    // default search path.
    if let Ok(exe) = std::env::current_exe() {
        let path = exe.with_file_name(LIBRARY_NAME);
        if path.exists() {
            return path;
        }
    }
    PathBuf::from(LIBRARY_NAME)
}

/// Resolved entry points of the wrapper library.
///
/// Loaded once per process. All methods forward directly to the native
/// side with no argument checking; upholding the boundary contract
/// (valid pointers, live handles, in-range indices) is on the caller.
pub struct Api {
    _library: Library,
    compile: PFN_Compile,
    disassemble: PFN_Disassemble,
    create_blob: PFN_CreateShaderConductorBlob,
    destroy_blob: PFN_DestroyShaderConductorBlob,
    get_blob_data: PFN_GetShaderConductorBlobData,
    get_blob_size: PFN_GetShaderConductorBlobSize,
    get_stage_input_count: PFN_GetStageInputCount,
    get_stage_input: PFN_GetStageInput,
    get_uniform_buffer_count: PFN_GetUniformBufferCount,
    get_uniform_buffer: PFN_GetUniformBuffer,
    get_parameter: PFN_GetParameter,
    get_parameter_array_size: PFN_GetParameterArraySize,
    get_sampler_count: PFN_GetSamplerCount,
    get_sampler: PFN_GetSampler,
    get_storage_buffer_count: PFN_GetStorageBufferCount,
    get_storage_buffer: PFN_GetStorageBuffer,
}

static API: OnceLock<Result<Api>> = OnceLock::new();

fn load() -> Result<Api> {
    let path = library_path();
    let library = unsafe { Library::new(&path) }
        .map_err(|e| LoadError::Load(format!("{}: {}", path.display(), e)))?;

    macro_rules! entry_point {
        ($symbol:literal, $ty:ty) => {
            *unsafe { library.get::<$ty>(concat!($symbol, "\0").as_bytes()) }
                .map_err(|_| LoadError::FunctionNotFound($symbol.to_string()))?
        };
    }

    let compile = entry_point!("Compile", PFN_Compile);
    let disassemble = entry_point!("Disassemble", PFN_Disassemble);
    let create_blob = entry_point!("CreateShaderConductorBlob", PFN_CreateShaderConductorBlob);
    let destroy_blob = entry_point!("DestroyShaderConductorBlob", PFN_DestroyShaderConductorBlob);
    let get_blob_data = entry_point!("GetShaderConductorBlobData", PFN_GetShaderConductorBlobData);
    let get_blob_size = entry_point!("GetShaderConductorBlobSize", PFN_GetShaderConductorBlobSize);
    let get_stage_input_count = entry_point!("GetStageInputCount", PFN_GetStageInputCount);
    let get_stage_input = entry_point!("GetStageInput", PFN_GetStageInput);
    let get_uniform_buffer_count = entry_point!("GetUniformBufferCount", PFN_GetUniformBufferCount);
    let get_uniform_buffer = entry_point!("GetUniformBuffer", PFN_GetUniformBuffer);
    let get_parameter = entry_point!("GetParameter", PFN_GetParameter);
    let get_parameter_array_size = entry_point!("GetParameterArraySize", PFN_GetParameterArraySize);
    let get_sampler_count = entry_point!("GetSamplerCount", PFN_GetSamplerCount);
    let get_sampler = entry_point!("GetSampler", PFN_GetSampler);
    let get_storage_buffer_count = entry_point!("GetStorageBufferCount", PFN_GetStorageBufferCount);
    let get_storage_buffer = entry_point!("GetStorageBuffer", PFN_GetStorageBuffer);

    log::debug!("loaded {}", path.display());

    Ok(Api {
        _library: library,
        compile,
        disassemble,
        create_blob,
        destroy_blob,
        get_blob_data,
        get_blob_size,
        get_stage_input_count,
        get_stage_input,
        get_uniform_buffer_count,
        get_uniform_buffer,
        get_parameter,
        get_parameter_array_size,
        get_sampler_count,
        get_sampler,
        get_storage_buffer_count,
        get_storage_buffer,
    })
}

impl Api {
    /// Returns the process-wide entry point table, loading the wrapper
    /// library on first use. A load failure is sticky: every subsequent
    /// call reports the same error.
    pub fn get() -> Result<&'static Api> {
        match API.get_or_init(load) {
            Ok(api) => Ok(api),
            Err(err) => Err(err.clone()),
        }
    }

    pub unsafe fn Compile(
        &self,
        source: *const SourceDesc,
        options: *const OptionsDesc,
        target: *const TargetDesc,
        result: *mut ResultDesc,
    ) {
        unsafe { (self.compile)(source, options, target, result) }
    }

    pub unsafe fn Disassemble(&self, source: *const DisassembleDesc, result: *mut ResultDesc) {
        unsafe { (self.disassemble)(source, result) }
    }

    pub unsafe fn CreateShaderConductorBlob(
        &self,
        data: *const c_void,
        size: c_int,
    ) -> *mut ShaderConductorBlob {
        unsafe { (self.create_blob)(data, size) }
    }

    /// # Safety
    /// The handle must be live and must not be used again afterwards.
    pub unsafe fn DestroyShaderConductorBlob(&self, blob: *mut ShaderConductorBlob) {
        unsafe { (self.destroy_blob)(blob) }
    }

    pub unsafe fn GetShaderConductorBlobData(
        &self,
        blob: *mut ShaderConductorBlob,
    ) -> *const c_void {
        unsafe { (self.get_blob_data)(blob) }
    }

    pub unsafe fn GetShaderConductorBlobSize(&self, blob: *mut ShaderConductorBlob) -> c_int {
        unsafe { (self.get_blob_size)(blob) }
    }

    pub unsafe fn GetStageInputCount(&self, result: *const ResultDesc) -> c_int {
        unsafe { (self.get_stage_input_count)(result) }
    }

    #[allow(clippy::too_many_arguments)]
    pub unsafe fn GetStageInput(
        &self,
        result: *const ResultDesc,
        stageInputIndex: c_int,
        name: LPSTR,
        maxNameLength: c_int,
        location: *mut c_int,
        rows: *mut c_int,
        columns: *mut c_int,
    ) {
        unsafe {
            (self.get_stage_input)(
                result,
                stageInputIndex,
                name,
                maxNameLength,
                location,
                rows,
                columns,
            )
        }
    }

    pub unsafe fn GetUniformBufferCount(&self, result: *const ResultDesc) -> c_int {
        unsafe { (self.get_uniform_buffer_count)(result) }
    }

    #[allow(clippy::too_many_arguments)]
    pub unsafe fn GetUniformBuffer(
        &self,
        result: *const ResultDesc,
        bufferIndex: c_int,
        blockName: LPSTR,
        instanceName: LPSTR,
        maxNameLength: c_int,
        byteSize: *mut c_int,
        slot: *mut c_int,
        parameterCount: *mut c_int,
    ) {
        unsafe {
            (self.get_uniform_buffer)(
                result,
                bufferIndex,
                blockName,
                instanceName,
                maxNameLength,
                byteSize,
                slot,
                parameterCount,
            )
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub unsafe fn GetParameter(
        &self,
        result: *const ResultDesc,
        bufferIndex: c_int,
        parameterIndex: c_int,
        name: LPSTR,
        maxNameLength: c_int,
        r#type: *mut c_int,
        rows: *mut c_int,
        columns: *mut c_int,
        byteOffset: *mut c_int,
        arrayDimensions: *mut c_int,
    ) {
        unsafe {
            (self.get_parameter)(
                result,
                bufferIndex,
                parameterIndex,
                name,
                maxNameLength,
                r#type,
                rows,
                columns,
                byteOffset,
                arrayDimensions,
            )
        }
    }

    pub unsafe fn GetParameterArraySize(
        &self,
        result: *const ResultDesc,
        bufferIndex: c_int,
        parameterIndex: c_int,
        dimension: c_int,
        arraySize: *mut c_int,
    ) {
        unsafe {
            (self.get_parameter_array_size)(
                result,
                bufferIndex,
                parameterIndex,
                dimension,
                arraySize,
            )
        }
    }

    pub unsafe fn GetSamplerCount(&self, result: *const ResultDesc) -> c_int {
        unsafe { (self.get_sampler_count)(result) }
    }

    #[allow(clippy::too_many_arguments)]
    pub unsafe fn GetSampler(
        &self,
        result: *const ResultDesc,
        samplerIndex: c_int,
        name: LPSTR,
        originalName: LPSTR,
        textureName: LPSTR,
        maxNameLength: c_int,
        r#type: *mut c_int,
        slot: *mut c_int,
        textureSlot: *mut c_int,
    ) {
        unsafe {
            (self.get_sampler)(
                result,
                samplerIndex,
                name,
                originalName,
                textureName,
                maxNameLength,
                r#type,
                slot,
                textureSlot,
            )
        }
    }

    pub unsafe fn GetStorageBufferCount(&self, result: *const ResultDesc) -> c_int {
        unsafe { (self.get_storage_buffer_count)(result) }
    }

    #[allow(clippy::too_many_arguments)]
    pub unsafe fn GetStorageBuffer(
        &self,
        result: *const ResultDesc,
        bufferIndex: c_int,
        blockName: LPSTR,
        instanceName: LPSTR,
        maxNameLength: c_int,
        byteSize: *mut c_int,
        slot: *mut c_int,
        readOnly: *mut bool,
    ) {
        unsafe {
            (self.get_storage_buffer)(
                result,
                bufferIndex,
                blockName,
                instanceName,
                maxNameLength,
                byteSize,
                slot,
                readOnly,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_enum_ordinals() {
        assert_eq!(ShaderStage::VertexShader as i32, 0);
        assert_eq!(ShaderStage::PixelShader as i32, 1);
        assert_eq!(ShaderStage::GeometryShader as i32, 2);
        assert_eq!(ShaderStage::HullShader as i32, 3);
        assert_eq!(ShaderStage::DomainShader as i32, 4);
        assert_eq!(ShaderStage::ComputeShader as i32, 5);

        assert_eq!(ShadingLanguage::Dxil as i32, 0);
        assert_eq!(ShadingLanguage::SpirV as i32, 1);
        assert_eq!(ShadingLanguage::Hlsl as i32, 2);
        assert_eq!(ShadingLanguage::Glsl as i32, 3);
        assert_eq!(ShadingLanguage::Essl as i32, 4);
        assert_eq!(ShadingLanguage::Msl_macOS as i32, 5);
        assert_eq!(ShadingLanguage::Msl_iOS as i32, 6);
    }

    #[test]
    fn test_booleans_are_single_byte() {
        assert_eq!(offset_of!(OptionsDesc, enable16bitTypes), 1);
        assert_eq!(offset_of!(OptionsDesc, enableDebugInfo), 2);
        assert_eq!(offset_of!(OptionsDesc, disableOptimizations), 3);
        assert_eq!(offset_of!(OptionsDesc, optimizationLevel), 4);
    }

    #[test]
    fn test_options_desc_layout() {
        assert_eq!(offset_of!(OptionsDesc, shaderModel), 8);
        assert_eq!(offset_of!(OptionsDesc, shiftAllTexturesBindings), 16);
        assert_eq!(offset_of!(OptionsDesc, shiftAllUABuffersBindings), 28);
        assert_eq!(size_of::<OptionsDesc>(), 32);
    }

    #[test]
    fn test_result_desc_layout() {
        let ptr = size_of::<*mut ShaderConductorBlob>();
        assert_eq!(offset_of!(ResultDesc, target), 0);
        assert_eq!(offset_of!(ResultDesc, isText), ptr);
        assert_eq!(offset_of!(ResultDesc, errorWarningMsg), 2 * ptr);
        assert_eq!(offset_of!(ResultDesc, hasError), 3 * ptr);
        assert_eq!(offset_of!(ResultDesc, reflection), 4 * ptr);
        assert_eq!(size_of::<ResultDesc>(), 5 * ptr);
    }

    #[test]
    fn test_disassemble_desc_layout() {
        let ptr = size_of::<*const std::ffi::c_void>();
        assert_eq!(offset_of!(DisassembleDesc, binary), ptr);
        assert_eq!(offset_of!(DisassembleDesc, binarySize), 2 * ptr);
    }
}
