//! # Voxel Task System
//!
//! Tasks related to voxel world generation. They run on the worker pool so
//! generating a large region never blocks the main thread.

pub mod chunk_generation_task;
