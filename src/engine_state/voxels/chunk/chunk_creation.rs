//! # Chunk Creation Module
//!
//! A builder that fills a chunk one voxel at a time in storage order
//! (x fastest, then y, then z) while keeping the solid-voxel count.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::block::Occupancy;

use super::Chunk;

/// A builder for populating chunks in storage order.
///
/// The builder owns the bit vector while it grows and hands it to a
/// [`Chunk`] once finished, so the chunk's count and bits always agree.
pub struct ChunkCreationIterator {
    /// The position of the chunk being created
    position: Point3<i32>,
    /// Edge length of the chunk being created
    dimension: usize,
    /// One bit per voxel pushed so far
    solid_array: BitVec,
    /// Number of solid voxels pushed so far
    solid_count: usize,
}

impl ChunkCreationIterator {
    /// Creates a new builder for a chunk of `dimension³` voxels at `position`.
    pub fn new(position: Point3<i32>, dimension: usize) -> Self {
        ChunkCreationIterator {
            position,
            dimension,
            solid_array: BitVec::with_capacity(dimension * dimension * dimension),
            solid_count: 0,
        }
    }

    /// Finalizes the chunk.
    ///
    /// Voxels that were never pushed are empty; pushes past the chunk volume
    /// are dropped.
    pub fn return_chunk(mut self) -> Chunk {
        let volume = self.dimension * self.dimension * self.dimension;
        if self.solid_array.len() > volume {
            self.solid_array.truncate(volume);
            self.solid_count = self.solid_array.count_ones();
        }
        self.solid_array.resize(volume, false);

        Chunk {
            position: self.position,
            dimension: self.dimension,
            solid_array: self.solid_array,
            solid_count: self.solid_count,
        }
    }

    /// Appends the next voxel in storage order.
    pub fn push_occupancy(&mut self, occupancy: Occupancy) {
        let is_solid = occupancy.is_solid();
        self.solid_array.push(is_solid);

        if is_solid {
            self.solid_count += 1;
        }
    }
}
