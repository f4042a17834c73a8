//! Face emitters.
//!
//! One function per cube face. Each appends the four corners of a unit quad
//! centred on a voxel (offset ±0.5 along the two in-plane axes, fixed at
//! ±0.5 along the normal) and six indices whose winding is counter-clockwise
//! when seen from outside the voxel.

use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;

use super::mesh::Mesh;

/// Colour of upward-facing faces.
pub const GRASS_GREEN: [f32; 3] = [0.0, 0.75, 0.0];
/// Colour of every other face.
pub const DIRT_BROWN: [f32; 3] = [0.588, 0.31, 0.008];

/// Corners in the order 0-1-2, 2-3-0.
const WINDING_FORWARD: [u32; 6] = [0, 1, 2, 2, 3, 0];
/// Corners in the order 0-3-2, 2-1-0.
const WINDING_REVERSED: [u32; 6] = [0, 3, 2, 2, 1, 0];

/// Appends the face on `side` of the voxel at `position`.
pub fn emit_face(side: BlockSide, position: Point3<usize>, mesh: &mut Mesh) {
    let position = position.cast::<f32>().unwrap_or(Point3::new(0.0, 0.0, 0.0));
    match side {
        BlockSide::FRONT => emit_front(position, mesh),
        BlockSide::BACK => emit_back(position, mesh),
        BlockSide::BOTTOM => emit_bottom(position, mesh),
        BlockSide::TOP => emit_top(position, mesh),
        BlockSide::LEFT => emit_left(position, mesh),
        BlockSide::RIGHT => emit_right(position, mesh),
    }
}

#[inline]
fn corner(p: Point3<f32>, dx: f32, dy: f32, dz: f32, color: [f32; 3], u: f32, v: f32) -> Vertex {
    Vertex::new(Point3::new(p.x + dx, p.y + dy, p.z + dz), color, u, v)
}

/// Front face, +Z.
pub fn emit_front(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, -0.5, 0.5, 0.5, DIRT_BROWN, 1.0, 1.0),
        corner(p, -0.5, -0.5, 0.5, DIRT_BROWN, 1.0, 1.0),
        corner(p, 0.5, -0.5, 0.5, DIRT_BROWN, 1.0, 1.0),
        corner(p, 0.5, 0.5, 0.5, DIRT_BROWN, 1.0, 1.0),
    ];
    mesh.push_face(BlockSide::FRONT, corners, WINDING_FORWARD);
}

/// Back face, -Z.
pub fn emit_back(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, -0.5, 0.5, -0.5, DIRT_BROWN, 0.0, 0.0),
        corner(p, -0.5, -0.5, -0.5, DIRT_BROWN, 1.0, 1.0),
        corner(p, 0.5, -0.5, -0.5, DIRT_BROWN, 0.0, 1.0),
        corner(p, 0.5, 0.5, -0.5, DIRT_BROWN, 1.0, 0.0),
    ];
    mesh.push_face(BlockSide::BACK, corners, WINDING_REVERSED);
}

/// Top face, +Y. The only face drawn in green.
pub fn emit_top(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, -0.5, 0.5, -0.5, GRASS_GREEN, 0.0, 0.0),
        corner(p, -0.5, 0.5, 0.5, GRASS_GREEN, 1.0, 1.0),
        corner(p, 0.5, 0.5, 0.5, GRASS_GREEN, 1.0, 0.0),
        corner(p, 0.5, 0.5, -0.5, GRASS_GREEN, 0.0, 1.0),
    ];
    mesh.push_face(BlockSide::TOP, corners, WINDING_FORWARD);
}

/// Bottom face, -Y.
pub fn emit_bottom(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, -0.5, -0.5, -0.5, DIRT_BROWN, 0.0, 0.0),
        corner(p, -0.5, -0.5, 0.5, DIRT_BROWN, 1.0, 0.0),
        corner(p, 0.5, -0.5, 0.5, DIRT_BROWN, 0.0, 1.0),
        corner(p, 0.5, -0.5, -0.5, DIRT_BROWN, 1.0, 1.0),
    ];
    mesh.push_face(BlockSide::BOTTOM, corners, WINDING_REVERSED);
}

/// Right face, +X.
pub fn emit_right(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, 0.5, 0.5, 0.5, DIRT_BROWN, 0.0, 0.0),
        corner(p, 0.5, -0.5, 0.5, DIRT_BROWN, 0.0, 1.0),
        corner(p, 0.5, -0.5, -0.5, DIRT_BROWN, 1.0, 0.0),
        corner(p, 0.5, 0.5, -0.5, DIRT_BROWN, 1.0, 1.0),
    ];
    mesh.push_face(BlockSide::RIGHT, corners, WINDING_FORWARD);
}

/// Left face, -X.
pub fn emit_left(p: Point3<f32>, mesh: &mut Mesh) {
    let corners = [
        corner(p, -0.5, 0.5, -0.5, DIRT_BROWN, 0.0, 0.0),
        corner(p, -0.5, -0.5, -0.5, DIRT_BROWN, 0.0, 1.0),
        corner(p, -0.5, -0.5, 0.5, DIRT_BROWN, 1.0, 0.0),
        corner(p, -0.5, 0.5, 0.5, DIRT_BROWN, 1.0, 1.0),
    ];
    mesh.push_face(BlockSide::LEFT, corners, WINDING_FORWARD);
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector3};

    use super::*;
    use crate::engine_state::rendering::meshing::mesh::MeshPath;

    fn triangle_normal(mesh: &Mesh, triangle: &[u32]) -> Vector3<f32> {
        let a = mesh.vertices[triangle[0] as usize].point();
        let b = mesh.vertices[triangle[1] as usize].point();
        let c = mesh.vertices[triangle[2] as usize].point();
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn every_face_winds_outward() {
        for side in BlockSide::all() {
            let mut mesh = Mesh::new(MeshPath::FloodFill);
            emit_face(side, Point3::new(2, 3, 4), &mut mesh);

            let expected = side.normal().cast::<f32>().unwrap();
            for triangle in mesh.indices.chunks_exact(3) {
                let normal = triangle_normal(&mesh, triangle);
                assert!((normal - expected).magnitude() < 1e-5, "{side:?}: {normal:?}");
            }
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        let center = Point3::new(2.0f32, 3.0, 4.0);
        for side in BlockSide::all() {
            let mut mesh = Mesh::new(MeshPath::FloodFill);
            emit_face(side, Point3::new(2, 3, 4), &mut mesh);

            let normal = side.normal().cast::<f32>().unwrap();
            for vertex in &mesh.vertices {
                let offset = vertex.point() - center;
                assert!((offset.dot(normal) - 0.5).abs() < 1e-6);
                assert!(offset.x.abs() == 0.5 || normal.x != 0.0);
                assert!(offset.y.abs() == 0.5 || normal.y != 0.0);
                assert!(offset.z.abs() == 0.5 || normal.z != 0.0);
            }
        }
    }

    #[test]
    fn only_top_is_green() {
        for side in BlockSide::all() {
            let mut mesh = Mesh::new(MeshPath::FloodFill);
            emit_face(side, Point3::new(0, 0, 0), &mut mesh);

            let expected = if side == BlockSide::TOP { GRASS_GREEN } else { DIRT_BROWN };
            assert!(mesh.vertices.iter().all(|v| v.color == expected));
        }
    }
}
