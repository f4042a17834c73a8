//! # Engine State Module
//!
//! The core engine module that ties the voxel world, the worker pool and
//! the mesh store together.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `rendering` - The mesher, the mesh store and the vertex layout
//! * `task_management` - Manages asynchronous tasks and worker threads
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Architecture
//!
//! The main thread owns the `EngineState`. Workers only ever see the world
//! and individual chunks, both shared through `MtResource`. Finished meshes
//! travel back as task results and are stored on the main thread, so the
//! `MeshManager` needs no lock.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use cgmath::Point3;
use log::{error, info};
use task_management::TaskManager;
use voxels::{
    chunk::Chunk,
    tasks::chunk_generation_task::ChunkGenerationTask,
    world::{GenerationSettings, World},
};

use crate::core::MtResource;
use rendering::{
    meshing::{MeshManager, MeshingSummary},
    tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask,
};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// How long `run_until_idle` waits between polls when no result arrived.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use cgmath::Point3;
/// use voxel_flood_mesher::{EngineState, GenerationMethod, GenerationSettings};
///
/// let settings = GenerationSettings {
///     method: GenerationMethod::Solid,
///     chunk_dimension: 4,
///     ..GenerationSettings::default()
/// };
/// let mut engine = EngineState::new(settings, 2, NonZeroUsize::new(64).unwrap());
/// engine.load_region(Point3::new(0, 0, 0), 1);
/// let summary = engine.run_until_idle();
/// assert_eq!(summary.chunks_meshed, 27);
/// assert_eq!(summary.full_chunks, 27);
/// ```
pub struct EngineState {
    /// Holds task and result channels, dispatches work to workers
    pub task_manager: TaskManager,
    /// Chunks generated so far
    pub world: MtResource<World>,
    /// Finished meshes and totals
    pub mesh_manager: MeshManager,
}

impl EngineState {
    /// Creates an engine with an empty world and `workers` worker threads.
    pub fn new(
        generation: GenerationSettings,
        workers: usize,
        mesh_cache_capacity: NonZeroUsize,
    ) -> Self {
        Self {
            task_manager: TaskManager::new(workers),
            world: MtResource::new(World::new(generation)),
            mesh_manager: MeshManager::new(mesh_cache_capacity),
        }
    }

    /// Schedules generation and meshing of every chunk within `radius`
    /// chunks of `center` on each axis.
    ///
    /// # Returns
    ///
    /// The number of chunks scheduled, `(2 * radius + 1)³`.
    pub fn load_region(&mut self, center: Point3<i32>, radius: u32) -> usize {
        let radius = radius as i32;
        let mut scheduled = 0;

        for x in -radius..=radius {
            for y in -radius..=radius {
                for z in -radius..=radius {
                    let position = Point3::new(center.x + x, center.y + y, center.z + z);
                    self.task_manager
                        .publish_task(Box::new(ChunkGenerationTask::new(self.world.clone(), position)));
                    scheduled += 1;
                }
            }
        }

        info!("Scheduled {} chunks around {:?}", scheduled, center);
        scheduled
    }

    /// Adds a ready-made chunk to the world and schedules its mesh.
    pub fn submit_chunk(&mut self, chunk: Chunk) {
        let chunk = self.world.get_mut().insert_chunk(chunk);
        self.task_manager
            .publish_task(Box::new(ChunkMeshGenerationTask::new(chunk)));
    }

    /// Handles finished results and feeds queued tasks to free workers.
    ///
    /// # Returns
    ///
    /// The number of results handled.
    pub fn process_tasks(&mut self) -> usize {
        let handled = self
            .task_manager
            .process_completed_tasks(&mut self.mesh_manager);
        self.task_manager.process_queued_tasks();
        handled
    }

    /// Processes tasks until no work is queued or in flight.
    ///
    /// Stops early, with an error logged, if every worker has gone away while
    /// work is still outstanding.
    pub fn run_until_idle(&mut self) -> MeshingSummary {
        while !self.task_manager.is_idle() {
            if self.task_manager.live_worker_count() == 0 && self.task_manager.tasks_in_flight() == 0 {
                error!(
                    "No live workers left, abandoning {} queued task(s)",
                    self.task_manager.queued_task_count()
                );
                break;
            }
            if self.process_tasks() == 0 {
                thread::sleep(IDLE_POLL_INTERVAL);
            }
        }
        *self.mesh_manager.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::world::GenerationMethod;

    fn engine(method: GenerationMethod, workers: usize) -> EngineState {
        let settings = GenerationSettings {
            method,
            chunk_dimension: 6,
            ..GenerationSettings::default()
        };
        EngineState::new(settings, workers, NonZeroUsize::new(1000).unwrap())
    }

    #[test]
    fn region_is_generated_and_meshed() {
        let mut engine = engine(GenerationMethod::HollowShell, 3);
        assert_eq!(engine.load_region(Point3::new(5, 0, -5), 1), 27);

        let summary = engine.run_until_idle();
        assert_eq!(engine.world.get().chunk_count(), 27);
        assert_eq!(summary.chunks_meshed, 27);
        assert_eq!(summary.faces, 27 * 6 * 36);
        assert!(engine.mesh_manager.is_chunk_meshed(Point3::new(4, 1, -6)));
    }

    #[test]
    fn overlapping_regions_do_not_regenerate_chunks() {
        let mut engine = engine(GenerationMethod::Empty, 2);
        engine.load_region(Point3::new(0, 0, 0), 1);
        engine.load_region(Point3::new(1, 0, 0), 1);
        engine.run_until_idle();
        assert_eq!(engine.world.get().chunk_count(), 36);
        assert_eq!(engine.mesh_manager.meshed_chunk_count(), 36);
    }

    #[test]
    fn submitted_chunks_are_meshed() {
        let mut engine = engine(GenerationMethod::Empty, 1);
        let position = Point3::new(0, 0, 0);
        engine.submit_chunk(Chunk::from_fn(&position, 3, |x, y, z| (x, y, z) == (1, 1, 1)));
        engine.run_until_idle();
        let mesh = engine.mesh_manager.get_mesh(position).unwrap();
        assert_eq!(mesh.face_count(), 6);
    }

    #[test]
    fn without_workers_the_run_gives_up() {
        let mut engine = engine(GenerationMethod::Solid, 0);
        engine.load_region(Point3::new(0, 0, 0), 0);
        let summary = engine.run_until_idle();
        assert_eq!(summary.chunks_meshed, 0);
    }
}
