//! Mesh generation and management for voxel rendering.
//!
//! This module owns the meshes produced for each chunk until the upload path
//! picks them up. The key goals are:
//! 1. Keep meshing itself free of shared state so workers never contend
//! 2. Bound memory by evicting the least recently meshed chunks
//! 3. Keep running totals for diagnostics
//!
//! # Architecture
//! - `MeshManager`: stores finished meshes per chunk position
//! - `mesh/`: the meshing algorithm and its output type

use std::num::NonZeroUsize;

use cgmath::Point3;
use log::{debug, warn};
use lru::LruCache;
use serde::Serialize;

/// Core mesh generation algorithms and data structures.
mod mesh;

pub use mesh::*;

use crate::error::MeshError;

/// Running totals over every mesh handed to a [`MeshManager`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MeshingSummary {
    /// Meshes stored, including replacements.
    pub chunks_meshed: usize,
    /// Faces across all stored meshes.
    pub faces: usize,
    /// Vertices across all stored meshes.
    pub vertices: usize,
    /// Indices across all stored meshes.
    pub indices: usize,
    /// Flood-fill iterations across all stored meshes.
    pub flood_iterations: usize,
    /// Meshes that took the empty-chunk shortcut.
    pub empty_chunks: usize,
    /// Meshes that took the full-chunk shortcut.
    pub full_chunks: usize,
    /// Chunks whose meshing was rejected.
    pub failures: usize,
    /// Meshes dropped to make room for newer ones.
    pub evictions: usize,
}

/// Central store for finished chunk meshes.
///
/// # Memory Management
///
/// Meshes live in an LRU cache keyed by chunk position. When the cache is
/// full, storing a new mesh drops the least recently meshed (or queried)
/// chunk.
pub struct MeshManager {
    /// Finished meshes, most recently used first
    least_recently_meshed_chunks: LruCache<Point3<i32>, Mesh>,
    /// Totals over everything stored so far
    summary: MeshingSummary,
}

impl MeshManager {
    /// Default number of chunk meshes kept before eviction starts.
    pub const DEFAULT_CAPACITY: usize = 10000;

    /// Creates a manager that keeps at most `capacity` meshes.
    pub fn new(capacity: NonZeroUsize) -> Self {
        MeshManager {
            least_recently_meshed_chunks: LruCache::new(capacity),
            summary: MeshingSummary::default(),
        }
    }

    /// Stores the mesh for a chunk, replacing any previous one.
    ///
    /// # Returns
    ///
    /// The position of the chunk evicted to make room, if any.
    pub fn store_mesh(&mut self, chunk_position: Point3<i32>, mesh: Mesh) -> Option<Point3<i32>> {
        self.summary.chunks_meshed += 1;
        self.summary.faces += mesh.face_count();
        self.summary.vertices += mesh.vertices.len();
        self.summary.indices += mesh.indices.len();
        self.summary.flood_iterations += mesh.stats.iterations;
        match mesh.stats.path {
            MeshPath::Empty => self.summary.empty_chunks += 1,
            MeshPath::FullChunk => self.summary.full_chunks += 1,
            MeshPath::FloodFill => {}
        }

        match self.least_recently_meshed_chunks.push(chunk_position, mesh) {
            Some((evicted, _)) if evicted != chunk_position => {
                debug!("Evicted mesh for chunk {:?}", evicted);
                self.summary.evictions += 1;
                Some(evicted)
            }
            _ => None,
        }
    }

    /// Records a chunk whose meshing was rejected.
    pub fn record_failure(&mut self, chunk_position: Point3<i32>, error: &MeshError) {
        warn!("Chunk {:?} could not be meshed: {}", chunk_position, error);
        self.summary.failures += 1;
    }

    /// Checks if a chunk has a stored mesh, marking it recently used.
    pub fn is_chunk_meshed(&mut self, chunk_position: Point3<i32>) -> bool {
        self.least_recently_meshed_chunks
            .get(&chunk_position)
            .is_some()
    }

    /// Returns the stored mesh for a chunk, marking it recently used.
    pub fn get_mesh(&mut self, chunk_position: Point3<i32>) -> Option<&Mesh> {
        self.least_recently_meshed_chunks.get(&chunk_position)
    }

    /// Drops the meshes of the given chunks.
    ///
    /// # Returns
    ///
    /// How many meshes were actually removed.
    pub fn unload_chunk_positions(&mut self, chunk_positions: &[Point3<i32>]) -> usize {
        chunk_positions
            .iter()
            .filter(|position| self.least_recently_meshed_chunks.pop(position).is_some())
            .count()
    }

    /// Number of meshes currently stored.
    pub fn meshed_chunk_count(&self) -> usize {
        self.least_recently_meshed_chunks.len()
    }

    /// Stored meshes, most recently used first.
    pub fn meshes(&self) -> impl Iterator<Item = (&Point3<i32>, &Mesh)> {
        self.least_recently_meshed_chunks.iter()
    }

    /// Totals over everything stored so far.
    pub fn summary(&self) -> &MeshingSummary {
        &self.summary
    }
}
