//! Behaviour of `mesh_chunk` on hand-built chunks.

mod common;

use cgmath::Point3;
use common::{face_cells, naive_exposed_faces, solid_cell};
use voxel_flood_mesher::{
    mesh_chunk, BlockSide, Chunk, Mesh, MeshError, MeshPath, Occupancy, DIRT_BROWN, GRASS_GREEN,
};

fn origin() -> Point3<i32> {
    Point3::new(0, 0, 0)
}

fn mesh(chunk: &Chunk) -> Mesh {
    mesh_chunk(chunk, chunk.dimension(), Some(chunk.solid_count())).unwrap()
}

/// Every face lies on a solid voxel and points into a cell that is not solid.
fn assert_faces_point_outward(chunk: &Chunk, mesh: &Mesh) {
    for (inside, outside) in face_cells(mesh) {
        assert!(solid_cell(chunk, inside), "face owned by non-solid cell {inside:?}");
        assert!(!solid_cell(chunk, outside), "face points into solid cell {outside:?}");
    }
}

#[test]
fn zero_sized_chunk_is_rejected() {
    let chunk = Chunk::empty(&origin(), 0);
    assert_eq!(mesh_chunk(&chunk, 0, Some(0)), Err(MeshError::ZeroChunkSize));
}

#[test]
fn empty_chunk_has_no_geometry() {
    for n in [1, 4, 16] {
        let mesh = mesh(&Chunk::empty(&origin(), n));
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
        assert_eq!(mesh.stats.path, MeshPath::Empty);
    }
}

#[test]
fn full_chunk_is_its_outer_shell() {
    for n in [1, 2, 7, 16] {
        let chunk = Chunk::solid(&origin(), n);
        let mesh = mesh(&chunk);
        assert_eq!(mesh.face_count(), 6 * n * n);
        assert_eq!(mesh.vertices.len(), 24 * n * n);
        assert_eq!(mesh.indices.len(), 36 * n * n);
        for side in BlockSide::all() {
            assert_eq!(mesh.faces_on_side(side), n * n);
        }
        assert_faces_point_outward(&chunk, &mesh);
    }
}

#[test]
fn isolated_voxel_gets_six_outward_faces() {
    let chunk = Chunk::from_fn(&origin(), 5, |x, y, z| (x, y, z) == (2, 2, 2));
    let mesh = mesh(&chunk);
    assert_eq!(mesh.face_count(), 6);
    for side in BlockSide::all() {
        assert_eq!(mesh.faces_on_side(side), 1);
    }
    assert_faces_point_outward(&chunk, &mesh);
}

#[test]
fn carved_centre_is_not_meshed() {
    for n in [3, 5] {
        let centre = n / 2;
        let mut chunk = Chunk::solid(&origin(), n);
        chunk.set(centre, centre, centre, Occupancy::Empty);

        let mesh = mesh(&chunk);
        assert_eq!(mesh.stats.path, MeshPath::FloodFill);
        assert_eq!(mesh.face_count(), 6 * n * n);
        assert_eq!(naive_exposed_faces(&chunk), 6 * n * n + 6);
        for (_, outside) in face_cells(&mesh) {
            assert_ne!(outside, [centre as i64; 3]);
        }
    }
}

#[test]
fn tunnel_into_a_cavity_exposes_it() {
    let mut chunk = Chunk::hollow_shell(&origin(), 5, 1);
    chunk.set(2, 4, 2, Occupancy::Empty);

    let mesh = mesh(&chunk);
    assert_eq!(mesh.face_count(), naive_exposed_faces(&chunk));
    assert_faces_point_outward(&chunk, &mesh);
}

#[test]
fn terrain_matches_the_naive_count() {
    let chunk = Chunk::from_fn(&origin(), 8, |x, y, z| y <= (x * 3 + z * 5) % 7);
    let mesh = mesh(&chunk);
    assert_eq!(mesh.face_count(), naive_exposed_faces(&chunk));
    assert!(mesh.is_consistent());
    assert_faces_point_outward(&chunk, &mesh);
}

#[test]
fn only_top_faces_are_green() {
    let chunk = Chunk::from_fn(&origin(), 4, |_, y, _| y < 2);
    let mesh = mesh(&chunk);
    let green = mesh.vertices.iter().filter(|v| v.color == GRASS_GREEN).count();
    let brown = mesh.vertices.iter().filter(|v| v.color == DIRT_BROWN).count();
    assert_eq!(green, 4 * mesh.faces_on_side(BlockSide::TOP));
    assert_eq!(green + brown, mesh.vertices.len());
    assert_eq!(mesh.faces_on_side(BlockSide::TOP), 16);
}

#[test]
fn closures_can_supply_occupancy() {
    let source = |x: usize, y: usize, z: usize| x == 0 && y == 0 && z == 0;
    let mesh = mesh_chunk(&source, 3, None).unwrap();
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.stats.iterations, 5 * 5 * 5 - 1);
}

#[test]
fn unknown_count_never_takes_a_shortcut() {
    let chunk = Chunk::solid(&origin(), 3);
    let flooded = mesh_chunk(&chunk, 3, None).unwrap();
    let shortcut = mesh(&chunk);
    assert_eq!(flooded.stats.path, MeshPath::FloodFill);
    assert_eq!(shortcut.stats.path, MeshPath::FullChunk);
    assert_eq!(flooded.face_count(), shortcut.face_count());
    assert_eq!(flooded.stats.faces_per_side, shortcut.stats.faces_per_side);
}

#[test]
fn upload_bytes_cover_every_element() {
    let mesh = mesh(&Chunk::solid(&origin(), 2));
    assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * 32);
    assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
}
