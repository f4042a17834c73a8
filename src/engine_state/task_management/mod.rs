//! # Task Management System
//!
//! A small worker pool for running chunk generation and meshing off the main
//! thread.
//!
//! ## Architecture Overview
//! - `TaskManager`: central coordinator for task distribution and worker management
//! - `Task`: a unit of work executed on a worker
//! - `TaskResult`: the result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: communication channel between the main thread and one worker
//!
//! Each worker has a dedicated task channel and result channel. Tasks are
//! handed out round-robin, at most `MAX_TASKS_IN_FLIGHT` per worker; anything
//! that does not fit waits in a FIFO queue.
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager sends them to available workers or queues them
//! 3. Workers process tasks and send results back
//! 4. Results are handled on the main thread in `process_completed_tasks()`
//! 5. Results can store meshes and spawn new tasks
//! 6. The cycle continues until `is_idle()` reports no outstanding work
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new(num_workers);
//! task_manager.publish_task(Box::new(MyTask::new(...)));
//!
//! while !task_manager.is_idle() {
//!     task_manager.process_completed_tasks(&mut mesh_manager);
//!     task_manager.process_queued_tasks();
//! }
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{error, info, warn};
use task::{Task, TaskResult};

use super::rendering::meshing::MeshManager;

/// A communication channel between the main thread and a worker thread.
///
/// # Fields
/// - `task_sender`: sends tasks from main thread to worker (dropped on shutdown)
/// - `result_receiver`: receives task results from worker
/// - `num_tasks_in_flight`: tasks sent but not yet returned
/// - `alive`: cleared once the worker disconnects
/// - `worker`: handle joined on shutdown
pub struct TaskChannel {
    task_sender: Option<Sender<Box<dyn Task + Send>>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    alive: bool,
    worker: Option<JoinHandle<()>>,
}

impl TaskChannel {
    fn accepts_tasks(&self) -> bool {
        self.alive && self.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
    }
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating and joining worker threads
/// - Distributing tasks across available workers
/// - Collecting and handling task results
/// - Queuing tasks when all workers are busy
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// Kept at 1 so a worker only ever holds the task it is working on and the
/// queue stays the single place where waiting work lives.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with `num_workers` worker threads.
    ///
    /// A worker that cannot be spawned is logged and left out of the pool.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        info!(
            "Starting {} workers (available parallelism: {:?})",
            num_workers,
            thread::available_parallelism()
        );

        for worker_idx in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = match thread::Builder::new()
                .name(format!("mesher-worker-{worker_idx}"))
                .spawn(task_closure)
            {
                Ok(worker) => worker,
                Err(err) => {
                    error!("Failed to spawn worker {}: {}", worker_idx, err);
                    continue;
                }
            };

            channels.push(TaskChannel {
                task_sender: Some(task_tx),
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                alive: true,
                worker: Some(worker),
            });
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of workers that are still accepting work.
    pub fn live_worker_count(&self) -> usize {
        self.channels.iter().filter(|channel| channel.alive).count()
    }

    /// Number of tasks waiting for a free worker.
    pub fn queued_task_count(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Number of tasks sent to workers whose results have not been handled.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels
            .iter()
            .map(|channel| channel.num_tasks_in_flight)
            .sum()
    }

    /// Whether there is no queued or in-flight work left.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.tasks_in_flight() == 0
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was handed to the worker
    /// - `Err(task)` if the worker is gone; the channel is marked dead
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        let Some(sender) = channel.task_sender.as_ref() else {
            return Err(task);
        };
        match sender.send(task) {
            Ok(()) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(err) => {
                warn!("Worker {} disconnected, no longer scheduling on it", channel_idx);
                channel.alive = false;
                Err(err.0)
            }
        }
    }

    /// Finds a channel that can accept a new task, round-robin from the
    /// last used channel.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|offset| (self.current_channel + offset) % len)
            .find(|&idx| self.channels[idx].accepts_tasks())
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately sent to a worker
    /// - `false` if the task was queued because all workers are busy
    pub fn publish_task(&mut self, mut task: Box<dyn Task + Send>) -> bool {
        while let Some(channel_idx) = self.find_available_channel() {
            match self.try_send_task(task, channel_idx) {
                Ok(()) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    return true;
                }
                Err(returned) => task = returned,
            }
        }

        if self.live_worker_count() == 0 {
            warn!("No live workers, task left in the queue");
        }
        self.queued_tasks.push_back(task);
        false
    }

    /// Moves queued tasks onto workers while any have room.
    ///
    /// Tasks are taken in FIFO order; processing stops at the first task that
    /// cannot be placed.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(()) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Handles every result the workers have produced so far.
    ///
    /// Follow-up tasks returned by the results are published afterwards. A
    /// worker whose result channel disconnects is marked dead and its
    /// in-flight tasks are written off.
    ///
    /// # Returns
    /// The number of results handled.
    pub fn process_completed_tasks(&mut self, mesh_manager: &mut MeshManager) -> usize {
        let mut tasks_to_queue = Vec::new();
        let mut handled = 0;

        for (channel_idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight = channel.num_tasks_in_flight.saturating_sub(1);
                        tasks_to_queue.extend(result.handle_result(mesh_manager));
                        handled += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if channel.alive || channel.num_tasks_in_flight > 0 {
                            error!(
                                "Worker {} disconnected with {} task(s) in flight",
                                channel_idx, channel.num_tasks_in_flight
                            );
                        }
                        channel.alive = false;
                        channel.num_tasks_in_flight = 0;
                        break;
                    }
                }
            }
        }

        for task in tasks_to_queue {
            self.publish_task(task);
        }
        handled
    }

    /// Stops accepting work and joins every worker.
    ///
    /// Queued tasks are dropped. Workers finish the task they are on first.
    pub fn shutdown(&mut self) {
        if !self.queued_tasks.is_empty() {
            warn!("Dropping {} queued task(s) on shutdown", self.queued_tasks.len());
            self.queued_tasks.clear();
        }
        for channel in &mut self.channels {
            channel.task_sender = None;
            channel.alive = false;
        }
        for (channel_idx, channel) in self.channels.iter_mut().enumerate() {
            if let Some(worker) = channel.worker.take() {
                if worker.join().is_err() {
                    error!("Worker {} panicked", channel_idx);
                }
            }
            channel.num_tasks_in_flight = 0;
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
