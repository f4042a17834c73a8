use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` hands the same chunk to the worker that generated it, to the
/// worker that meshes it, and to the world that keeps it. Many mesh tasks may
/// read chunks concurrently; only generation takes the write lock.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use voxel_flood_mesher::MtResource;
///
/// let counter = MtResource::new(0);
/// let counter_clone = counter.clone();
///
/// let handle = thread::spawn(move || {
///     *counter_clone.get_mut() += 1;
/// });
///
/// handle.join().unwrap();
/// assert_eq!(*counter.get(), 1);
/// ```
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Wraps `resource` for shared access.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read guard over the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned, which only happens when a writer
    /// panicked while holding it.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().expect("MtResource lock poisoned")
    }

    /// Returns a write guard over the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().expect("MtResource lock poisoned")
    }

    /// Number of handles currently sharing this resource.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
