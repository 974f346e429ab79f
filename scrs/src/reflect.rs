//! Reflection extraction for compiled shaders
//!
//! Every entity family crosses the boundary the same way: one count
//! query, then one indexed fetch per element. Entries are produced in
//! the engine's own enumeration order, with no reordering, filtering,
//! or deduplication on this side.

use crate::marshal::NameBuffer;
use crate::Result;
use shaderconductor::{Api, ResultDesc};

/// One input of the shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInput {
    pub name: String,
    /// Location index in the target language's input interface
    pub location: i32,
    pub rows: i32,
    pub columns: i32,
}

/// A uniform/constant buffer and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBuffer {
    pub block_name: String,
    pub instance_name: String,
    pub byte_size: i32,
    /// Register binding slot
    pub slot: i32,
    pub parameters: Vec<Parameter>,
}

/// A member of a uniform buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Numeric type code as reported by the engine
    pub ty: i32,
    pub rows: i32,
    pub columns: i32,
    /// Absolute byte offset within the owning buffer. Offsets of
    /// successive parameters follow no particular order.
    pub byte_offset: i32,
    /// One extent per array dimension; empty when the parameter is not
    /// an array.
    pub array_sizes: Vec<i32>,
}

impl Parameter {
    /// Number of array dimensions; 0 when the parameter is not an array.
    pub fn array_dimensions(&self) -> usize {
        self.array_sizes.len()
    }
}

/// A texture sampler, combined with the texture it samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampler {
    pub name: String,
    /// Name before any renaming done by the cross-compiler
    pub original_name: String,
    /// The texture this sampler was combined with
    pub texture_name: String,
    /// Dimensionality code: 1 = 1D, 2 = 2D, 3 = 3D, 4 = cube
    pub ty: i32,
    /// Sampler register binding slot
    pub slot: i32,
    /// Texture register binding slot
    pub texture_slot: i32,
}

/// A structured/storage buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageBuffer {
    pub block_name: String,
    pub instance_name: String,
    pub byte_size: i32,
    /// Register binding slot
    pub slot: i32,
    pub read_only: bool,
}

/// The complete resource interface of a compiled shader.
///
/// A plain value copy; it carries no tie to native memory once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderReflection {
    pub stage_inputs: Vec<StageInput>,
    pub uniform_buffers: Vec<UniformBuffer>,
    pub samplers: Vec<Sampler>,
    pub storage_buffers: Vec<StorageBuffer>,
}

pub(crate) fn stage_inputs(api: &'static Api, desc: &ResultDesc) -> Result<Vec<StageInput>> {
    let count = unsafe { api.GetStageInputCount(desc) }.max(0);
    let mut inputs = Vec::with_capacity(count as usize);
    let mut name = NameBuffer::new();

    for index in 0..count {
        name.clear();
        let mut location = 0;
        let mut rows = 0;
        let mut columns = 0;
        unsafe {
            api.GetStageInput(
                desc,
                index,
                name.as_mut_ptr(),
                name.capacity(),
                &mut location,
                &mut rows,
                &mut columns,
            );
        }
        inputs.push(StageInput {
            name: name.to_text()?,
            location,
            rows,
            columns,
        });
    }

    Ok(inputs)
}

pub(crate) fn uniform_buffers(
    api: &'static Api,
    desc: &ResultDesc,
) -> Result<Vec<UniformBuffer>> {
    let count = unsafe { api.GetUniformBufferCount(desc) }.max(0);
    let mut buffers = Vec::with_capacity(count as usize);
    let mut block_name = NameBuffer::new();
    let mut instance_name = NameBuffer::new();
    let mut parameter_name = NameBuffer::new();

    for buffer_index in 0..count {
        block_name.clear();
        instance_name.clear();
        let mut byte_size = 0;
        let mut slot = 0;
        let mut parameter_count = 0;
        unsafe {
            api.GetUniformBuffer(
                desc,
                buffer_index,
                block_name.as_mut_ptr(),
                instance_name.as_mut_ptr(),
                block_name.capacity(),
                &mut byte_size,
                &mut slot,
                &mut parameter_count,
            );
        }

        let parameter_count = parameter_count.max(0);
        let mut parameters = Vec::with_capacity(parameter_count as usize);
        for parameter_index in 0..parameter_count {
            parameter_name.clear();
            let mut ty = 0;
            let mut rows = 0;
            let mut columns = 0;
            let mut byte_offset = 0;
            let mut array_dimensions = 0;
            unsafe {
                api.GetParameter(
                    desc,
                    buffer_index,
                    parameter_index,
                    parameter_name.as_mut_ptr(),
                    parameter_name.capacity(),
                    &mut ty,
                    &mut rows,
                    &mut columns,
                    &mut byte_offset,
                    &mut array_dimensions,
                );
            }

            let array_dimensions = array_dimensions.max(0);
            let mut array_sizes = Vec::with_capacity(array_dimensions as usize);
            for dimension in 0..array_dimensions {
                let mut array_size = 0;
                unsafe {
                    api.GetParameterArraySize(
                        desc,
                        buffer_index,
                        parameter_index,
                        dimension,
                        &mut array_size,
                    );
                }
                array_sizes.push(array_size);
            }

            parameters.push(Parameter {
                name: parameter_name.to_text()?,
                ty,
                rows,
                columns,
                byte_offset,
                array_sizes,
            });
        }

        buffers.push(UniformBuffer {
            block_name: block_name.to_text()?,
            instance_name: instance_name.to_text()?,
            byte_size,
            slot,
            parameters,
        });
    }

    Ok(buffers)
}

pub(crate) fn samplers(api: &'static Api, desc: &ResultDesc) -> Result<Vec<Sampler>> {
    let count = unsafe { api.GetSamplerCount(desc) }.max(0);
    let mut samplers = Vec::with_capacity(count as usize);
    let mut name = NameBuffer::new();
    let mut original_name = NameBuffer::new();
    let mut texture_name = NameBuffer::new();

    for index in 0..count {
        name.clear();
        original_name.clear();
        texture_name.clear();
        let mut ty = 0;
        let mut slot = 0;
        let mut texture_slot = 0;
        unsafe {
            api.GetSampler(
                desc,
                index,
                name.as_mut_ptr(),
                original_name.as_mut_ptr(),
                texture_name.as_mut_ptr(),
                name.capacity(),
                &mut ty,
                &mut slot,
                &mut texture_slot,
            );
        }
        samplers.push(Sampler {
            name: name.to_text()?,
            original_name: original_name.to_text()?,
            texture_name: texture_name.to_text()?,
            ty,
            slot,
            texture_slot,
        });
    }

    Ok(samplers)
}

pub(crate) fn storage_buffers(
    api: &'static Api,
    desc: &ResultDesc,
) -> Result<Vec<StorageBuffer>> {
    let count = unsafe { api.GetStorageBufferCount(desc) }.max(0);
    let mut buffers = Vec::with_capacity(count as usize);
    let mut block_name = NameBuffer::new();
    let mut instance_name = NameBuffer::new();

    for index in 0..count {
        block_name.clear();
        instance_name.clear();
        let mut byte_size = 0;
        let mut slot = 0;
        let mut read_only = false;
        unsafe {
            api.GetStorageBuffer(
                desc,
                index,
                block_name.as_mut_ptr(),
                instance_name.as_mut_ptr(),
                block_name.capacity(),
                &mut byte_size,
                &mut slot,
                &mut read_only,
            );
        }
        buffers.push(StorageBuffer {
            block_name: block_name.to_text()?,
            instance_name: instance_name.to_text()?,
            byte_size,
            slot,
            read_only,
        });
    }

    Ok(buffers)
}
