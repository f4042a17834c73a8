//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, which generates a chunk on
//! a worker thread and then schedules that chunk's mesh.

use cgmath::Point3;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::{meshing::MeshManager, tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask},
        task_management::task::{Task, TaskResult},
        voxels::{chunk::Chunk, world::World},
    },
};

/// A task that generates chunk data on a worker thread.
///
/// This task is responsible for:
/// 1. Generating the chunk data at the specified position
/// 2. Adding the chunk to the world
/// 3. Scheduling mesh generation for the chunk
pub struct ChunkGenerationTask {
    /// The world the chunk is added to
    world: MtResource<World>,
    /// The position of the chunk to generate (in chunk coordinates)
    position: Point3<i32>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    pub fn new(world: MtResource<World>, position: Point3<i32>) -> Self {
        ChunkGenerationTask { world, position }
    }
}

impl Task for ChunkGenerationTask {
    /// Generates the chunk outside the world lock, then inserts it.
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let existing = self.world.get().get_chunk_at(self.position);
        let chunk = match existing {
            Some(chunk) => chunk,
            None => {
                let settings = *self.world.get().settings();
                let generated = settings.generate(&self.position);
                let mut world = self.world.get_mut();
                match world.get_chunk_at(self.position) {
                    Some(chunk) => chunk,
                    None => world.insert_chunk(generated),
                }
            }
        };

        Box::new(ChunkGenerationTaskResult { chunk })
    }
}

/// The result of a chunk generation task.
pub struct ChunkGenerationTaskResult {
    /// The generated chunk
    chunk: MtResource<Chunk>,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Schedules mesh generation for the chunk.
    fn handle_result(self: Box<Self>, _mesh_manager: &mut MeshManager) -> Vec<Box<dyn Task + Send>> {
        vec![Box::new(ChunkMeshGenerationTask::new(self.chunk))]
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::engine_state::rendering::meshing::Mesh;
    use crate::engine_state::voxels::world::{GenerationMethod, GenerationSettings};

    #[test]
    fn generates_into_the_world_and_schedules_a_mesh() {
        let world = MtResource::new(World::new(GenerationSettings {
            method: GenerationMethod::Solid,
            chunk_dimension: 3,
            ..GenerationSettings::default()
        }));
        let position = Point3::new(0, 1, 0);
        let mut mesh_manager = MeshManager::new(NonZeroUsize::new(2).unwrap());

        let follow_ups = ChunkGenerationTask::new(world.clone(), position)
            .process()
            .handle_result(&mut mesh_manager);

        assert_eq!(world.get().chunk_count(), 1);
        assert_eq!(follow_ups.len(), 1);

        let mesh_result = follow_ups[0].process();
        mesh_result.handle_result(&mut mesh_manager);
        assert_eq!(mesh_manager.get_mesh(position).map(Mesh::face_count), Some(54));
    }
}
