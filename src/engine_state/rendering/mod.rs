//! Rendering-side data for the voxel engine.
//!
//! This module produces what a renderer consumes: chunk meshes built by the
//! flood-fill mesher, the store that keeps them, and the vertex layout the
//! upload path hands to wgpu.

pub mod meshing;
pub mod tasks;
mod vertex;

// Re-export commonly used types
pub use meshing::MeshManager;
pub use vertex::Vertex;
