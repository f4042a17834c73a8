//! Task for generating mesh data for chunks in a background thread.
//!
//! The task reads the chunk under a shared lock, runs the flood-fill mesher
//! on it and hands the finished mesh back to the main thread, where it is
//! stored in the `MeshManager`.

use cgmath::Point3;
use log::{debug, error};
use web_time::Instant;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::meshing::{mesh_chunk, Mesh, MeshManager},
        task_management::task::{Task, TaskResult},
        voxels::chunk::Chunk,
    },
    error::MeshError,
};

/// A task that meshes one chunk on a worker thread.
pub struct ChunkMeshGenerationTask {
    /// The chunk that needs mesh generation
    chunk: MtResource<Chunk>,
}

impl ChunkMeshGenerationTask {
    /// Creates a new chunk mesh generation task.
    pub fn new(chunk: MtResource<Chunk>) -> Self {
        ChunkMeshGenerationTask { chunk }
    }
}

impl Task for ChunkMeshGenerationTask {
    /// Meshes the chunk.
    ///
    /// The chunk's own solid count is passed along so empty and fully solid
    /// chunks skip the flood fill.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let chunk = self.chunk.get();
        let position = chunk.position;

        let start = Instant::now();
        let mesh = mesh_chunk(&*chunk, chunk.dimension(), Some(chunk.solid_count()));
        let elapsed = start.elapsed();

        if let Ok(mesh) = &mesh {
            debug!(
                "Meshed chunk {:?} via {:?}: {} faces, {} iterations in {:?}",
                position,
                mesh.stats.path,
                mesh.face_count(),
                mesh.stats.iterations,
                elapsed
            );
        }

        Box::new(ChunkMeshGenerationTaskResult { position, mesh })
    }
}

/// The outcome of meshing one chunk.
pub struct ChunkMeshGenerationTaskResult {
    /// Chunk position the mesh belongs to
    position: Point3<i32>,
    /// The finished mesh, or why the chunk could not be meshed
    mesh: Result<Mesh, MeshError>,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    /// Stores the mesh, or records the failure. Never spawns follow-ups.
    fn handle_result(self: Box<Self>, mesh_manager: &mut MeshManager) -> Vec<Box<dyn Task + Send>> {
        match self.mesh {
            Ok(mesh) => {
                mesh_manager.store_mesh(self.position, mesh);
            }
            Err(err) => {
                error!("Meshing chunk {:?} failed: {}", self.position, err);
                mesh_manager.record_failure(self.position, &err);
            }
        }
        Vec::new()
    }
}
