//! Integration tests for the safe cross-compilation API
//!
//! These tests require the native ShaderConductorWrapper library to be
//! present next to the test binary; each test skips itself when the
//! library cannot be loaded.

use scrs::{
    CompileBuilder, CompileTarget, Error, ShaderStage, ShadingLanguage, compile, disassemble,
};

macro_rules! require_engine {
    () => {
        if scrs::ensure_loaded().is_err() {
            eprintln!("skipping: native wrapper library not available");
            return;
        }
    };
}

// One float4 input and one 16-byte constant buffer holding a single
// float4 at offset 0.
const VERTEX_SHADER: &str = r#"
cbuffer Tint : register(b0) {
    float4 tint;
};

float4 main(float4 pos : POSITION) : SV_Position {
    return pos + tint;
}
"#;

const TEXTURED_PIXEL_SHADER: &str = r#"
Texture2D colorMap : register(t0);
SamplerState colorSampler : register(s0);

float4 main(float4 pos : SV_Position, float2 uv : TEXCOORD0) : SV_Target {
    return colorMap.Sample(colorSampler, uv);
}
"#;

const STORAGE_COMPUTE_SHADER: &str = r#"
StructuredBuffer<float> values : register(t0);
RWStructuredBuffer<float> doubled : register(u0);

[numthreads(64, 1, 1)]
void main(uint3 id : SV_DispatchThreadID) {
    doubled[id.x] = values[id.x] * 2.0;
}
"#;

const ARRAY_PARAMETER_SHADER: &str = r#"
cbuffer Bones : register(b0) {
    float4x4 boneTransforms[8];
};

float4 main(float4 pos : POSITION) : SV_Position {
    return mul(pos, boneTransforms[0]);
}
"#;

const BAD_SHADER: &str = r#"
float4 main() : SV_Target {
    return undefined_variable;
}
"#;

#[test]
fn test_compile_to_spirv() {
    require_engine!();

    let result = compile(
        VERTEX_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    assert!(!result.has_error());
    assert!(!result.is_text());
    let output = result.output().expect("successful compile carries output");
    assert!(!output.is_empty());
}

#[test]
fn test_compile_to_glsl_is_text() {
    require_engine!();

    let result = compile(
        VERTEX_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::Glsl).version("410"),
    )
    .unwrap();

    assert!(result.is_text());
    let text = result.output_str().unwrap();
    assert!(text.contains("void main"), "unexpected output: {text}");
}

#[test]
fn test_compile_error_carries_diagnostics() {
    require_engine!();

    let result = compile(
        BAD_SHADER,
        "main",
        ShaderStage::Pixel,
        CompileTarget::new(ShadingLanguage::SpirV),
    );

    match result {
        Err(Error::Compilation { message }) => {
            assert!(!message.is_empty(), "diagnostics should not be empty");
        }
        other => panic!("expected a compilation error, got {other:?}"),
    }
}

#[test]
fn test_vertex_reflection() {
    require_engine!();

    let result = compile(
        VERTEX_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let reflection = result.reflection().unwrap();

    assert_eq!(reflection.stage_inputs.len(), 1);
    let input = &reflection.stage_inputs[0];
    assert_eq!(input.rows, 1);
    assert_eq!(input.columns, 4);

    assert_eq!(reflection.uniform_buffers.len(), 1);
    let buffer = &reflection.uniform_buffers[0];
    assert_eq!(buffer.byte_size, 16);
    assert_eq!(buffer.parameters.len(), 1);

    let parameter = &buffer.parameters[0];
    assert_eq!(parameter.rows, 1);
    assert_eq!(parameter.columns, 4);
    assert_eq!(parameter.byte_offset, 0);
    assert_eq!(parameter.array_dimensions(), 0);
    assert!(parameter.array_sizes.is_empty());
}

#[test]
fn test_array_parameter_dimensions() {
    require_engine!();

    let result = compile(
        ARRAY_PARAMETER_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let buffers = result.uniform_buffers().unwrap();
    assert_eq!(buffers.len(), 1);

    let parameter = &buffers[0].parameters[0];
    assert_eq!(parameter.array_dimensions(), 1);
    assert_eq!(parameter.array_sizes, vec![8]);
}

#[test]
fn test_sampler_reflection() {
    require_engine!();

    let result = compile(
        TEXTURED_PIXEL_SHADER,
        "main",
        ShaderStage::Pixel,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let samplers = result.samplers().unwrap();
    assert_eq!(samplers.len(), 1);

    let sampler = &samplers[0];
    assert!(!sampler.name.is_empty());
    assert!(sampler.texture_name.contains("colorMap"));
    assert_eq!(sampler.ty, 2, "a Texture2D sampler is two-dimensional");
}

#[test]
fn test_storage_buffer_reflection() {
    require_engine!();

    let result = compile(
        STORAGE_COMPUTE_SHADER,
        "main",
        ShaderStage::Compute,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let buffers = result.storage_buffers().unwrap();
    assert_eq!(buffers.len(), 2);
    assert!(buffers.iter().any(|b| b.read_only));
    assert!(buffers.iter().any(|b| !b.read_only));
}

#[test]
fn test_compute_shader_has_no_stage_inputs() {
    require_engine!();

    let result = compile(
        STORAGE_COMPUTE_SHADER,
        "main",
        ShaderStage::Compute,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    // An empty family is an empty list, never an error.
    assert!(result.stage_inputs().unwrap().is_empty());
    assert!(result.samplers().unwrap().is_empty());
}

#[test]
fn test_disassemble_round_trip() {
    require_engine!();

    let compiled = compile(
        VERTEX_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let disasm = disassemble(ShadingLanguage::SpirV, compiled.output().unwrap()).unwrap();

    assert!(!disasm.has_error());
    assert!(disasm.is_text());
    assert!(!disasm.output_str().unwrap().is_empty());
}

#[test]
fn test_disassemble_result_has_empty_reflection() {
    require_engine!();

    let compiled = compile(
        VERTEX_SHADER,
        "main",
        ShaderStage::Vertex,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .unwrap();

    let disasm = disassemble(ShadingLanguage::SpirV, compiled.output().unwrap()).unwrap();
    let reflection = disasm.reflection().unwrap();

    assert!(reflection.stage_inputs.is_empty());
    assert!(reflection.uniform_buffers.is_empty());
    assert!(reflection.samplers.is_empty());
    assert!(reflection.storage_buffers.is_empty());
}

#[test]
fn test_register_shift_options() {
    require_engine!();

    let result = CompileBuilder::new(
        TEXTURED_PIXEL_SHADER,
        "main",
        ShaderStage::Pixel,
        CompileTarget::new(ShadingLanguage::SpirV),
    )
    .shift_all_textures_bindings(10)
    .shift_all_samplers_bindings(20)
    .compile()
    .unwrap();

    let samplers = result.samplers().unwrap();
    assert_eq!(samplers.len(), 1);
    assert_eq!(samplers[0].texture_slot, 10);
    assert_eq!(samplers[0].slot, 20);
}
