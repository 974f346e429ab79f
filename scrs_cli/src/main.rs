//! Shader cross-compiler CLI using the safe Rust API

use clap::{Parser, Subcommand, ValueEnum};
use scrs::{CompileBuilder, CompileTarget, DisassembleBuilder, ShaderStage, ShadingLanguage};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrs")]
#[command(about = "Shader cross-compiler command-line tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-compile an HLSL shader to a target shading language
    Compile {
        /// Input HLSL file
        input: PathBuf,

        /// Entry point function name
        #[arg(short, long, default_value = "main")]
        entry: String,

        /// Shader stage
        #[arg(short, long, value_enum)]
        stage: Stage,

        /// Target shading language
        #[arg(short, long, value_enum)]
        target: Language,

        /// Target language version (e.g. 30 for HLSL SM 3.0, 310 for ESSL)
        #[arg(long)]
        version: Option<String>,

        /// Emit an importable module instead of a standalone program
        #[arg(long)]
        module: bool,

        /// Output file (default: <input> with the target's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optimization level 0-3
        #[arg(short = 'O', long, default_value = "3", value_parser = clap::value_parser!(u8).range(0..=3))]
        optimize: u8,

        /// Turn optimizations off entirely
        #[arg(long)]
        no_optimize: bool,

        /// Embed debug info into the output
        #[arg(long)]
        debug: bool,

        /// Pack matrices in column-major order
        #[arg(long)]
        column_major: bool,

        /// Enable 16-bit types (requires shader model 6.2+)
        #[arg(long)]
        enable_16bit_types: bool,

        /// Input shader model as MAJOR.MINOR
        #[arg(long, default_value = "6.0")]
        shader_model: String,
    },

    /// Disassemble a compiled binary back into text
    #[command(alias = "disassemble")]
    Disasm {
        /// Input binary file
        input: PathBuf,

        /// Language the binary was compiled to
        #[arg(short, long, value_enum)]
        language: Language,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Cross-compile and print the shader's resource interface
    Reflect {
        /// Input HLSL file
        input: PathBuf,

        /// Entry point function name
        #[arg(short, long, default_value = "main")]
        entry: String,

        /// Shader stage
        #[arg(short, long, value_enum)]
        stage: Stage,

        /// Target shading language
        #[arg(short, long, value_enum, default_value = "spirv")]
        target: Language,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Stage {
    #[value(name = "vs")]
    Vertex,
    #[value(name = "ps")]
    Pixel,
    #[value(name = "gs")]
    Geometry,
    #[value(name = "hs")]
    Hull,
    #[value(name = "ds")]
    Domain,
    #[value(name = "cs")]
    Compute,
}

impl From<Stage> for ShaderStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Vertex => ShaderStage::Vertex,
            Stage::Pixel => ShaderStage::Pixel,
            Stage::Geometry => ShaderStage::Geometry,
            Stage::Hull => ShaderStage::Hull,
            Stage::Domain => ShaderStage::Domain,
            Stage::Compute => ShaderStage::Compute,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Language {
    #[value(name = "dxil")]
    Dxil,
    #[value(name = "spirv")]
    SpirV,
    #[value(name = "hlsl")]
    Hlsl,
    #[value(name = "glsl")]
    Glsl,
    #[value(name = "essl")]
    Essl,
    #[value(name = "msl")]
    MslMacOs,
    #[value(name = "msl-ios")]
    MslIos,
}

impl From<Language> for ShadingLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Dxil => ShadingLanguage::Dxil,
            Language::SpirV => ShadingLanguage::SpirV,
            Language::Hlsl => ShadingLanguage::Hlsl,
            Language::Glsl => ShadingLanguage::Glsl,
            Language::Essl => ShadingLanguage::Essl,
            Language::MslMacOs => ShadingLanguage::MslMacOs,
            Language::MslIos => ShadingLanguage::MslIos,
        }
    }
}

fn parse_shader_model(s: &str) -> Result<(i32, i32), String> {
    let (major, minor) = s
        .split_once('.')
        .ok_or_else(|| format!("Invalid shader model '{s}', expected MAJOR.MINOR"))?;
    let major = major
        .parse()
        .map_err(|_| format!("Invalid shader model major version '{major}'"))?;
    let minor = minor
        .parse()
        .map_err(|_| format!("Invalid shader model minor version '{minor}'"))?;
    Ok((major, minor))
}

#[allow(clippy::too_many_arguments)]
fn compile_shader(
    input: PathBuf,
    entry: String,
    stage: Stage,
    target: Language,
    version: Option<String>,
    module: bool,
    output: Option<PathBuf>,
    optimize: u8,
    no_optimize: bool,
    debug: bool,
    column_major: bool,
    enable_16bit_types: bool,
    shader_model: String,
) -> Result<(), String> {
    let language = ShadingLanguage::from(target);
    let output = output.unwrap_or_else(|| input.with_extension(language.file_extension()));

    let source = std::fs::read_to_string(&input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let mut compile_target = CompileTarget::new(language);
    if let Some(version) = &version {
        compile_target = compile_target.version(version);
    }
    if module {
        compile_target = compile_target.as_module();
    }

    let (sm_major, sm_minor) = parse_shader_model(&shader_model)?;

    let mut builder = CompileBuilder::new(&source, &entry, stage.into(), compile_target)
        .optimization_level(optimize as i32)
        .shader_model(sm_major, sm_minor);

    if no_optimize {
        builder = builder.skip_optimization();
    }
    if debug {
        builder = builder.debug();
    }
    if column_major {
        builder = builder.column_major_matrices();
    }
    if enable_16bit_types {
        builder = builder.enable_16bit_types();
    }

    let result = builder.compile().map_err(|e| format!("{}", e))?;

    let bytes = result.output().unwrap_or(&[]);
    std::fs::write(&output, bytes)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    eprintln!(
        "Compiled {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        bytes.len()
    );

    if let Some(warnings) = result.error_warning() {
        eprintln!("Warnings:\n{}", warnings);
    }

    Ok(())
}

fn disassemble_shader(
    input: PathBuf,
    language: Language,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let binary =
        std::fs::read(&input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let result = DisassembleBuilder::new(language.into(), &binary)
        .disassemble()
        .map_err(|e| format!("{}", e))?;

    let text = result.output_str().map_err(|e| format!("{}", e))?;

    if let Some(output) = output {
        std::fs::write(&output, text.as_bytes())
            .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;
        eprintln!("Disassembled {} -> {}", input.display(), output.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn reflect_shader(
    input: PathBuf,
    entry: String,
    stage: Stage,
    target: Language,
) -> Result<(), String> {
    let source = std::fs::read_to_string(&input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let result = scrs::compile(
        &source,
        &entry,
        stage.into(),
        CompileTarget::new(target.into()),
    )
    .map_err(|e| format!("{}", e))?;

    let reflection = result.reflection().map_err(|e| format!("{}", e))?;

    if !reflection.stage_inputs.is_empty() {
        println!("Stage Inputs ({}):", reflection.stage_inputs.len());
        for input in &reflection.stage_inputs {
            println!(
                "  [{:2}] {} ({}x{})",
                input.location, input.name, input.rows, input.columns
            );
        }
        println!();
    }

    if !reflection.uniform_buffers.is_empty() {
        println!("Uniform Buffers ({}):", reflection.uniform_buffers.len());
        for buffer in &reflection.uniform_buffers {
            println!(
                "  [b{}] {} `{}` ({} bytes)",
                buffer.slot, buffer.block_name, buffer.instance_name, buffer.byte_size
            );
            for parameter in &buffer.parameters {
                let array = parameter
                    .array_sizes
                    .iter()
                    .map(|size| format!("[{}]", size))
                    .collect::<String>();
                println!(
                    "      +{:4}: {}{} ({}x{}, type {})",
                    parameter.byte_offset,
                    parameter.name,
                    array,
                    parameter.rows,
                    parameter.columns,
                    parameter.ty
                );
            }
        }
        println!();
    }

    if !reflection.samplers.is_empty() {
        println!("Samplers ({}):", reflection.samplers.len());
        for sampler in &reflection.samplers {
            println!(
                "  [s{}] {} -> [t{}] {} (dim {})",
                sampler.slot, sampler.name, sampler.texture_slot, sampler.texture_name, sampler.ty
            );
        }
        println!();
    }

    if !reflection.storage_buffers.is_empty() {
        println!("Storage Buffers ({}):", reflection.storage_buffers.len());
        for buffer in &reflection.storage_buffers {
            let access = if buffer.read_only { "ro" } else { "rw" };
            println!(
                "  [{}] {} `{}` ({} bytes, {})",
                buffer.slot, buffer.block_name, buffer.instance_name, buffer.byte_size, access
            );
        }
        println!();
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            input,
            entry,
            stage,
            target,
            version,
            module,
            output,
            optimize,
            no_optimize,
            debug,
            column_major,
            enable_16bit_types,
            shader_model,
        } => compile_shader(
            input,
            entry,
            stage,
            target,
            version,
            module,
            output,
            optimize,
            no_optimize,
            debug,
            column_major,
            enable_16bit_types,
            shader_model,
        ),
        Commands::Disasm {
            input,
            language,
            output,
        } => disassemble_shader(input, language, output),
        Commands::Reflect {
            input,
            entry,
            stage,
            target,
        } => reflect_shader(input, entry, stage, target),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
