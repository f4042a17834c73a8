//! Helpers shared by the integration tests.

#![allow(dead_code)]

use cgmath::{EuclideanSpace, InnerSpace, Vector3};
use voxel_flood_mesher::{BlockSide, Chunk, Mesh, INDICES_PER_FACE, VERTICES_PER_FACE};

/// Counts solid faces that border an empty or out-of-chunk voxel, without
/// any reachability check.
pub fn naive_exposed_faces(chunk: &Chunk) -> usize {
    let n = chunk.dimension() as i64;
    let solid_at = |x: i64, y: i64, z: i64| {
        (0..n).contains(&x)
            && (0..n).contains(&y)
            && (0..n).contains(&z)
            && chunk.is_block_solid(x as usize, y as usize, z as usize)
    };

    let mut faces = 0;
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                if !solid_at(x, y, z) {
                    continue;
                }
                for side in BlockSide::all() {
                    let step = side.normal();
                    if !solid_at(x + step.x as i64, y + step.y as i64, z + step.z as i64) {
                        faces += 1;
                    }
                }
            }
        }
    }
    faces
}

/// For every face of `mesh`, the voxel it belongs to and the cell its
/// first triangle's normal points into, both as integer voxel coordinates.
///
/// Voxel centres sit on integer coordinates and face corners at ±0.5, so
/// stepping half a unit from the face centroid lands on a cell centre.
pub fn face_cells(mesh: &Mesh) -> Vec<([i64; 3], [i64; 3])> {
    mesh.indices
        .chunks_exact(INDICES_PER_FACE)
        .zip(mesh.vertices.chunks_exact(VERTICES_PER_FACE))
        .map(|(indices, corners)| {
            let point = |i: u32| mesh.vertices[i as usize].point().to_vec();
            let (a, b, c) = (point(indices[0]), point(indices[1]), point(indices[2]));
            let normal = (b - a).cross(c - a).normalize();

            let centroid = corners
                .iter()
                .fold(Vector3::new(0.0, 0.0, 0.0), |sum, v| sum + v.point().to_vec())
                / VERTICES_PER_FACE as f32;

            let cell = |v: Vector3<f32>| [v.x.round() as i64, v.y.round() as i64, v.z.round() as i64];
            (cell(centroid - normal * 0.5), cell(centroid + normal * 0.5))
        })
        .collect()
}

/// Whether `cell` is a solid voxel of `chunk`; anything outside is empty.
pub fn solid_cell(chunk: &Chunk, cell: [i64; 3]) -> bool {
    let n = chunk.dimension() as i64;
    cell.iter().all(|c| (0..n).contains(c))
        && chunk.is_block_solid(cell[0] as usize, cell[1] as usize, cell[2] as usize)
}
