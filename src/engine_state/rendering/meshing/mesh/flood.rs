//! Flood-fill visibility meshing.
//!
//! Breadth-first traversal of the empty space around and inside a chunk,
//! starting from a corner of the padding ring. Every time the traversal
//! touches a solid voxel it emits that voxel's face pointing back at the
//! cell it came from. Faces that no outside air can reach, including the
//! walls of sealed interior cavities, are never emitted.
//!
//! Each face is a single unit quad; coplanar neighbours are not merged.

use std::collections::VecDeque;

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::error::MeshError;

use super::face::{emit_back, emit_bottom, emit_face, emit_front, emit_left, emit_right, emit_top};
use super::mesh::{Mesh, MeshPath};
use super::occupancy::{OccupancySource, PaddedOccupancy};
use super::padded::PaddedArray;

/// Largest chunk size whose worst-case mesh (six faces on every voxel,
/// `24 * n³` vertices) can still be addressed with `u32` indices.
pub const MAX_CHUNK_SIZE: usize = 563;

/// Directions the traversal steps in, in the order neighbours are checked.
const STEP_DIRECTIONS: [BlockSide; 6] = [
    BlockSide::FRONT,
    BlockSide::BACK,
    BlockSide::TOP,
    BlockSide::BOTTOM,
    BlockSide::RIGHT,
    BlockSide::LEFT,
];

/// Meshes one chunk.
///
/// # Arguments
/// * `source` - Occupancy of the `chunk_size³` voxels; never mutated
/// * `chunk_size` - Edge length of the chunk
/// * `solid_voxel_count` - Number of solid voxels, if known. `Some(0)` returns
///   an empty mesh at once and `Some(chunk_size³)` emits only the outer shell.
///   A wrong count is not detected. `None` always runs the flood fill.
///
/// # Returns
/// The mesh, or an error if `chunk_size` is zero or larger than
/// [`MAX_CHUNK_SIZE`].
///
/// # Performance
/// The flood fill visits each padded cell at most once and checks six
/// neighbours per visit: O((chunk_size + 2)³). The full-chunk path is
/// O(chunk_size²).
pub fn mesh_chunk<S>(
    source: &S,
    chunk_size: usize,
    solid_voxel_count: Option<usize>,
) -> Result<Mesh, MeshError>
where
    S: OccupancySource + ?Sized,
{
    if chunk_size == 0 {
        return Err(MeshError::ZeroChunkSize);
    }
    if chunk_size > MAX_CHUNK_SIZE {
        return Err(MeshError::ChunkTooLarge {
            chunk_size,
            max: MAX_CHUNK_SIZE,
        });
    }

    let volume = chunk_size * chunk_size * chunk_size;
    let mesh = match solid_voxel_count {
        Some(0) => Mesh::new(MeshPath::Empty),
        Some(count) if count == volume => full_chunk_shell(chunk_size),
        _ => flood_fill(source, chunk_size),
    };

    Ok(mesh)
}

/// Emits the outer shell of a fully solid chunk. Every interior face is
/// hidden by a neighbour, so only the six boundary planes remain.
fn full_chunk_shell(chunk_size: usize) -> Mesh {
    let mut mesh = Mesh::with_face_capacity(MeshPath::FullChunk, 6 * chunk_size * chunk_size);
    let last = (chunk_size - 1) as f32;

    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_back(Point3::new(a as f32, b as f32, 0.0), &mut mesh);
        }
    }
    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_front(Point3::new(a as f32, b as f32, last), &mut mesh);
        }
    }
    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_left(Point3::new(0.0, b as f32, a as f32), &mut mesh);
        }
    }
    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_right(Point3::new(last, b as f32, a as f32), &mut mesh);
        }
    }
    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_top(Point3::new(a as f32, last, b as f32), &mut mesh);
        }
    }
    for a in 0..chunk_size {
        for b in 0..chunk_size {
            emit_bottom(Point3::new(a as f32, 0.0, b as f32), &mut mesh);
        }
    }

    mesh
}

/// Runs the breadth-first traversal over the padded chunk.
///
/// Only empty cells are ever marked or queued, each at most once. Solid
/// cells stay unmarked, so a solid voxel is reached once per empty
/// neighbour and emits exactly one face toward each of them.
fn flood_fill<S>(source: &S, chunk_size: usize) -> Mesh
where
    S: OccupancySource + ?Sized,
{
    let occupancy = PaddedOccupancy::new(source, chunk_size);
    let mut visited = PaddedArray::new(chunk_size + 2);
    let mut voxels_to_visit = VecDeque::new();
    let mut mesh = Mesh::new(MeshPath::FloodFill);

    // The padded origin lies outside the chunk, so it is always empty.
    let start = Point3::new(0, 0, 0);
    visited.set(start, true);
    voxels_to_visit.push_back(start);

    while let Some(current) = voxels_to_visit.pop_front() {
        mesh.stats.iterations += 1;

        for direction in STEP_DIRECTIONS {
            let Some(neighbour) = visited.step(current, direction.normal()) else {
                continue;
            };
            if visited.get(neighbour) {
                continue;
            }

            match occupancy.solid_voxel(neighbour) {
                Some(real) => emit_face(direction.opposite(), real, &mut mesh),
                None => {
                    visited.set(neighbour, true);
                    voxels_to_visit.push_back(neighbour);
                }
            }
        }
    }

    mesh
}
