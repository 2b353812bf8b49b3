use std::sync::mpsc::{self, Receiver, Sender};

use super::NativeTexture;

/// Creates a connected release queue.
pub fn release_queue() -> (ReleaseSender, ReleaseQueue) {
    let (tx, rx) = mpsc::channel();
    (ReleaseSender(tx), ReleaseQueue(rx))
}

/// Posting side, held by every [`Texture`](super::Texture).
#[derive(Debug, Clone)]
pub struct ReleaseSender(Sender<NativeTexture>);

impl ReleaseSender {
    pub(crate) fn post(&self, native: NativeTexture) {
        // A closed queue means the rasterizer is gone along with its images.
        if self.0.send(native).is_err() {
            log::debug!("release queue closed; dropping {native:?}");
        }
    }
}

/// Receiving side, drained by the thread that owns the rasterizer.
#[derive(Debug)]
pub struct ReleaseQueue(Receiver<NativeTexture>);

impl ReleaseQueue {
    /// Returns every native image released since the last drain.
    pub fn drain(&self) -> impl Iterator<Item = NativeTexture> + '_ {
        self.0.try_iter()
    }
}
