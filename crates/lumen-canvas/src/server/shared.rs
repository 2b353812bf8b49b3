use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::scene::CanvasScene;

/// Lock-guarded scene handle.
///
/// Every registry mutation and every render pass read goes through the one
/// lock. Clones share the same scene.
#[derive(Debug, Clone)]
pub struct SharedScene(Arc<Mutex<CanvasScene>>);

impl SharedScene {
    pub fn new(scene: CanvasScene) -> Self {
        Self(Arc::new(Mutex::new(scene)))
    }

    /// Locks the scene. A poisoned lock is recovered; scene operations leave
    /// the graph consistent at every step.
    pub fn lock(&self) -> MutexGuard<'_, CanvasScene> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with the scene locked.
    pub fn with<T>(&self, f: impl FnOnce(&mut CanvasScene) -> T) -> T {
        f(&mut self.lock())
    }
}
