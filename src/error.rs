//! # Error Types
//!
//! Errors surfaced by the mesher and by configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors rejected up front by [`crate::mesh_chunk`].
///
/// The meshing pass itself is total: once the input passes these checks it
/// always produces a consistent mesh.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// A chunk must be at least one voxel wide.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    /// The worst-case vertex count would overflow `u32` indices.
    #[error("chunk size {chunk_size} exceeds the largest indexable chunk size {max}")]
    ChunkTooLarge {
        /// The requested chunk size.
        chunk_size: usize,
        /// The largest chunk size whose mesh fits `u32` indices.
        max: usize,
    },
}

/// Errors that can occur while loading or validating a [`crate::MesherConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the config schema.
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
