//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] is the output of one meshing call: an ordered vertex list, an
//! ordered `u32` index list, and diagnostics describing how it was built.
//! The vertex and index lists are handed verbatim to the buffer upload path.

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;

/// Number of vertices every emitted face owns.
pub const VERTICES_PER_FACE: usize = 4;
/// Number of indices every emitted face contributes (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// Which route through the mesher produced a mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MeshPath {
    /// The chunk was reported empty; nothing was traversed.
    #[default]
    Empty,
    /// The chunk was reported fully solid; only the outer shell was emitted.
    FullChunk,
    /// The flood fill ran over the padded chunk.
    FloodFill,
}

/// Diagnostics gathered while meshing a chunk.
///
/// These replace printing from inside the mesher; callers decide whether
/// and how to report them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct MeshStats {
    /// The route taken.
    pub path: MeshPath,
    /// Number of cells dequeued by the flood fill (zero on the fast paths).
    pub iterations: usize,
    /// Faces emitted per side, indexed by `BlockSide as usize`.
    pub faces_per_side: [usize; 6],
}

/// A triangle mesh for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Four private vertices per face, in emission order.
    pub vertices: Vec<Vertex>,
    /// Six indices per face, each pointing at a vertex of the same face.
    pub indices: Vec<u32>,
    /// How the mesh was produced.
    pub stats: MeshStats,
}

impl Mesh {
    /// Creates an empty mesh tagged with the route that will fill it.
    pub fn new(path: MeshPath) -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
            stats: MeshStats {
                path,
                ..MeshStats::default()
            },
        }
    }

    /// Creates an empty mesh with room for `faces` faces.
    pub fn with_face_capacity(path: MeshPath, faces: usize) -> Self {
        let mut mesh = Mesh::new(path);
        mesh.vertices.reserve(faces * VERTICES_PER_FACE);
        mesh.indices.reserve(faces * INDICES_PER_FACE);
        mesh
    }

    /// Number of faces (quads) in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Returns `true` when no faces were emitted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Faces emitted for one side.
    pub fn faces_on_side(&self, side: BlockSide) -> usize {
        self.stats.faces_per_side[side as usize]
    }

    /// Vertex data as raw bytes for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for an index buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Appends one face: four corner vertices and the six indices that wind
    /// them into two triangles. `winding` is relative to the first corner.
    pub(crate) fn push_face(&mut self, side: BlockSide, corners: [Vertex; 4], winding: [u32; 6]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend(winding.iter().map(|offset| base + offset));
        self.stats.faces_per_side[side as usize] += 1;
    }

    /// Checks the structural invariants every mesh must satisfy: four
    /// vertices and six indices per face, and every index pointing into the
    /// vertices of its own face.
    pub fn is_consistent(&self) -> bool {
        let faces = self.face_count();
        if self.vertices.len() != faces * VERTICES_PER_FACE
            || self.indices.len() != faces * INDICES_PER_FACE
            || self.stats.faces_per_side.iter().sum::<usize>() != faces
        {
            return false;
        }

        self.indices
            .chunks_exact(INDICES_PER_FACE)
            .enumerate()
            .all(|(face, indices)| {
                let first = (face * VERTICES_PER_FACE) as u32;
                indices
                    .iter()
                    .all(|&index| (first..first + VERTICES_PER_FACE as u32).contains(&index))
            })
    }
}
