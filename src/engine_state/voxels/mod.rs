//! # Voxel Data
//!
//! This module holds the voxel side of the engine: what a voxel is, how a
//! chunk of them is stored, and how chunks are generated and collected into
//! a world.
//!
//! ## Architecture
//!
//! * **Block**: voxel occupancy and the six face orientations
//! * **Chunk**: fixed-size cubic occupancy grids, stored one bit per voxel
//! * **World**: chunks keyed by chunk position, generated on demand
//! * **Tasks**: chunk generation on the worker pool
//!
//! ## Data Flow
//!
//! 1. The engine asks for a region of chunks
//! 2. Generation tasks fill the world on worker threads
//! 3. Each generated chunk schedules a mesh task
//! 4. Finished meshes land in the `MeshManager`

pub mod block;
pub mod chunk;
pub mod tasks;
pub mod world;
