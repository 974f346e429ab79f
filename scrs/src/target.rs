//! Shader stages, shading languages, and compile targets

use std::fmt;

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Pixel (fragment) shader
    Pixel,
    /// Geometry shader
    Geometry,
    /// Hull (tessellation control) shader
    Hull,
    /// Domain (tessellation evaluation) shader
    Domain,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Returns the stage prefix (vs, ps, gs, hs, ds, cs)
    pub fn prefix(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs",
            ShaderStage::Pixel => "ps",
            ShaderStage::Geometry => "gs",
            ShaderStage::Hull => "hs",
            ShaderStage::Domain => "ds",
            ShaderStage::Compute => "cs",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl From<ShaderStage> for shaderconductor::ShaderStage {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => shaderconductor::ShaderStage::VertexShader,
            ShaderStage::Pixel => shaderconductor::ShaderStage::PixelShader,
            ShaderStage::Geometry => shaderconductor::ShaderStage::GeometryShader,
            ShaderStage::Hull => shaderconductor::ShaderStage::HullShader,
            ShaderStage::Domain => shaderconductor::ShaderStage::DomainShader,
            ShaderStage::Compute => shaderconductor::ShaderStage::ComputeShader,
        }
    }
}

/// Output shading language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingLanguage {
    /// DirectX intermediate language (binary)
    Dxil,
    /// SPIR-V (binary)
    SpirV,
    /// HLSL source
    Hlsl,
    /// Desktop GLSL source
    Glsl,
    /// OpenGL ES GLSL source
    Essl,
    /// Metal shading language source, macOS dialect
    MslMacOs,
    /// Metal shading language source, iOS dialect
    MslIos,
}

impl ShadingLanguage {
    /// Returns the language's short name
    pub fn name(&self) -> &'static str {
        match self {
            ShadingLanguage::Dxil => "dxil",
            ShadingLanguage::SpirV => "spirv",
            ShadingLanguage::Hlsl => "hlsl",
            ShadingLanguage::Glsl => "glsl",
            ShadingLanguage::Essl => "essl",
            ShadingLanguage::MslMacOs => "msl_macos",
            ShadingLanguage::MslIos => "msl_ios",
        }
    }

    /// True when the language is emitted as source text rather than a
    /// binary blob.
    pub fn is_text(&self) -> bool {
        !matches!(self, ShadingLanguage::Dxil | ShadingLanguage::SpirV)
    }

    /// Conventional file extension for output of this language
    pub fn file_extension(&self) -> &'static str {
        match self {
            ShadingLanguage::Dxil => "dxil",
            ShadingLanguage::SpirV => "spv",
            ShadingLanguage::Hlsl => "hlsl",
            ShadingLanguage::Glsl => "glsl",
            ShadingLanguage::Essl => "essl",
            ShadingLanguage::MslMacOs | ShadingLanguage::MslIos => "metal",
        }
    }
}

impl fmt::Display for ShadingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ShadingLanguage> for shaderconductor::ShadingLanguage {
    fn from(language: ShadingLanguage) -> Self {
        match language {
            ShadingLanguage::Dxil => shaderconductor::ShadingLanguage::Dxil,
            ShadingLanguage::SpirV => shaderconductor::ShadingLanguage::SpirV,
            ShadingLanguage::Hlsl => shaderconductor::ShadingLanguage::Hlsl,
            ShadingLanguage::Glsl => shaderconductor::ShadingLanguage::Glsl,
            ShadingLanguage::Essl => shaderconductor::ShadingLanguage::Essl,
            ShadingLanguage::MslMacOs => shaderconductor::ShadingLanguage::Msl_macOS,
            ShadingLanguage::MslIos => shaderconductor::ShadingLanguage::Msl_iOS,
        }
    }
}

/// Input shader model version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderModel {
    /// Major version number
    pub major: i32,
    /// Minor version number
    pub minor: i32,
}

impl ShaderModel {
    /// Creates a new shader model version
    pub const fn new(major: i32, minor: i32) -> Self {
        ShaderModel { major, minor }
    }
}

impl fmt::Display for ShaderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl From<ShaderModel> for shaderconductor::ShaderModel {
    fn from(model: ShaderModel) -> Self {
        shaderconductor::ShaderModel {
            major: model.major,
            minor: model.minor,
        }
    }
}

/// Complete output target specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTarget {
    /// The output shading language
    pub language: ShadingLanguage,
    /// Optional language version string (e.g. "30" for GLSL 3.0)
    pub version: Option<String>,
    /// Emit an importable module rather than a standalone program
    pub as_module: bool,
}

impl CompileTarget {
    /// Creates a target for the given language, with no version
    /// constraint, emitting a standalone program.
    pub fn new(language: ShadingLanguage) -> Self {
        CompileTarget {
            language,
            version: None,
            as_module: false,
        }
    }

    /// Sets the target language version.
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Requests an importable module instead of a standalone program.
    pub fn as_module(mut self) -> Self {
        self.as_module = true;
        self
    }
}

impl From<ShadingLanguage> for CompileTarget {
    fn from(language: ShadingLanguage) -> Self {
        CompileTarget::new(language)
    }
}

impl fmt::Display for CompileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {}", self.language, version),
            None => self.language.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_prefixes() {
        assert_eq!(ShaderStage::Vertex.prefix(), "vs");
        assert_eq!(ShaderStage::Pixel.prefix(), "ps");
        assert_eq!(ShaderStage::Compute.to_string(), "cs");
    }

    #[test]
    fn test_language_text_vs_binary() {
        assert!(!ShadingLanguage::Dxil.is_text());
        assert!(!ShadingLanguage::SpirV.is_text());
        assert!(ShadingLanguage::Hlsl.is_text());
        assert!(ShadingLanguage::Glsl.is_text());
        assert!(ShadingLanguage::Essl.is_text());
        assert!(ShadingLanguage::MslMacOs.is_text());
        assert!(ShadingLanguage::MslIos.is_text());
    }

    #[test]
    fn test_language_ordinals_match_native() {
        assert_eq!(
            shaderconductor::ShadingLanguage::from(ShadingLanguage::Dxil) as i32,
            0
        );
        assert_eq!(
            shaderconductor::ShadingLanguage::from(ShadingLanguage::Glsl) as i32,
            3
        );
        assert_eq!(
            shaderconductor::ShadingLanguage::from(ShadingLanguage::MslIos) as i32,
            6
        );
        assert_eq!(
            shaderconductor::ShaderStage::from(ShaderStage::Compute) as i32,
            5
        );
    }

    #[test]
    fn test_target_construction() {
        let target = CompileTarget::new(ShadingLanguage::Glsl).version("310").as_module();
        assert_eq!(target.version.as_deref(), Some("310"));
        assert!(target.as_module);
        assert_eq!(target.to_string(), "glsl 310");
    }
}
