//! Mesh generation for voxel rendering.
//!
//! This module turns a chunk's occupancy grid into vertex and index buffers,
//! emitting geometry only for faces that can be seen from outside the solid
//! mass.
//!
//! # Architecture
//! - [`mesh_chunk`]: entry point; picks the empty, full-chunk, or flood-fill route
//! - [`Mesh`]: the vertex list, index list, and [`MeshStats`] of one call
//! - `face`: the six face emitters and the face palette
//! - `padded`: the visited-flag map over the padded chunk
//! - `occupancy`: [`OccupancySource`] and the padded lookup adapter
//!
//! # Usage
//! ```
//! use voxel_flood_mesher::{mesh_chunk, Chunk};
//! use cgmath::Point3;
//!
//! let chunk = Chunk::hollow_shell(&Point3::new(0, 0, 0), 3, 1);
//! let mesh = mesh_chunk(&chunk, chunk.dimension(), Some(chunk.solid_count())).unwrap();
//! assert_eq!(mesh.face_count(), 54);
//! ```
//!
//! # Concurrency
//! A call owns its visited map and output buffers and only reads the
//! occupancy source, so independent chunks can be meshed on separate threads
//! without locking.

mod face;
mod flood;
mod mesh;
mod occupancy;
mod padded;

pub use face::{emit_face, DIRT_BROWN, GRASS_GREEN};
pub use flood::{mesh_chunk, MAX_CHUNK_SIZE};
pub use mesh::*;
pub use occupancy::{OccupancySource, PaddedOccupancy};
pub use padded::PaddedArray;
