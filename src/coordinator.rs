use std::sync::Arc;

use log::info;

use crate::assets::AssetSource;
use crate::context::RenderBackend;
use crate::surface::{SurfaceRef, SurfaceSize};
use crate::worker::{RenderWorker, WorkerState};

/// Reconciles surface lifecycle callbacks with the render worker's life.
///
/// One worker per surface generation: created spawns it, destroyed stops and
/// joins it before returning, so the platform never reclaims a surface the
/// render thread still touches. Callbacks must arrive in created/destroyed
/// pairs on the same thread; a violated pairing is a caller bug and panics
/// rather than limping on with a stale worker.
pub struct SurfaceCoordinator<B: RenderBackend> {
    backend: Arc<B>,
    assets: AssetSource,
    worker: Option<RenderWorker>,
}

impl<B: RenderBackend> SurfaceCoordinator<B> {
    pub fn new(backend: B, assets: AssetSource) -> SurfaceCoordinator<B> {
        SurfaceCoordinator { backend: Arc::new(backend), assets, worker: None }
    }

    /// A fresh surface is ready: spawn the render worker for it.
    pub fn surface_created(&mut self, surface: SurfaceRef, size: SurfaceSize) {
        assert!(
            self.worker.is_none(),
            "surface created while the previous render worker is still owned"
        );
        info!("Surface created: {}x{}", size.width, size.height);
        let worker =
            RenderWorker::spawn(self.backend.clone(), surface, size, self.assets.clone());
        self.worker = Some(worker);
    }

    /// A live render thread keeps the extent it was started with; new sizes
    /// are only logged. The next created/destroyed cycle picks them up.
    pub fn surface_changed(&self, size: SurfaceSize) {
        info!(
            "Surface changed: {}x{} (render thread keeps its initial extent)",
            size.width, size.height
        );
    }

    /// The surface is about to go away: stop the worker and block until its
    /// thread is gone. After this returns the platform may reclaim the
    /// surface memory.
    pub fn surface_destroyed(&mut self) {
        let mut worker = self
            .worker
            .take()
            .expect("surface destroyed but no render worker is owned");
        worker.stop();
        worker.join();
        info!("Render worker released");
    }

    /// True between a created callback and the matching destroyed.
    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    pub fn worker_state(&self) -> Option<WorkerState> {
        self.worker.as_ref().map(RenderWorker::state)
    }
}
