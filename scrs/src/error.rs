//! Error types for scrs operations

use thiserror::Error;

/// Error type for scrs operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shader cross-compilation failed
    #[error("Compilation failed: {message}")]
    Compilation {
        /// Errors and warnings reported by the engine
        message: String,
    },

    /// Disassembly failed
    #[error("Disassembly failed: {message}")]
    Disassembly {
        /// Errors and warnings reported by the engine
        message: String,
    },

    /// A name buffer came back without its guaranteed null terminator
    #[error("Name buffer has no null terminator within {capacity} bytes")]
    MalformedString {
        /// Capacity of the offending buffer
        capacity: usize,
    },

    /// The engine refused to allocate a blob
    #[error("Create blob failed")]
    CreateBlob,

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The native engine could not be loaded
    #[error(transparent)]
    Load(#[from] shaderconductor::LoadError),
}

/// Result type for scrs operations
pub type Result<T> = std::result::Result<T, Error>;
