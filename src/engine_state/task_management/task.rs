//! # Task System Core Traits
//!
//! ## Core Components
//! - `Task`: a unit of work executed on a worker thread
//! - `TaskResult`: what the worker hands back to the main thread
//!
//! ## Task Lifecycle
//! 1. A `Task` is scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method runs on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` runs on the main thread
//! 5. The result can store meshes and spawn follow-up tasks

use crate::engine_state::rendering::meshing::MeshManager;

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own (or share through `MtResource`) all the data they need,
/// so that nothing on the main thread has to be borrowed while they run.
pub trait Task: Send {
    /// Performs the work and returns a result for the main thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`, consumed on the main thread.
pub trait TaskResult: Send {
    /// Applies the result and returns any follow-up tasks to schedule.
    fn handle_result(self: Box<Self>, mesh_manager: &mut MeshManager) -> Vec<Box<dyn Task + Send>>;
}
