//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher and the
//! buffer layout the rendering pipeline uses to read it.

use cgmath::Point3;

/// A vertex of a meshed voxel face.
///
/// Every quad owns four private vertices; nothing is shared between faces,
/// so colour and texture coordinates can differ per face.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Color: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk space
    pub position: [f32; 3],
    /// Linear RGB colour
    pub color: [f32; 3],
    /// UV texture coordinates (0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - Position of the vertex in chunk space
    /// * `color` - Linear RGB colour
    /// * `u`, `v` - Texture coordinates
    pub fn new(pos: Point3<f32>, color: [f32; 3], u: f32, v: f32) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            color,
            tex_coords: [u, v],
        }
    }

    /// Position as a point.
    pub fn point(&self) -> Point3<f32> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: color (vec3<f32>)
    /// - `location = 2`: tex_coords (vec2<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
