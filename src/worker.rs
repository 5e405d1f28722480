use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use log::{error, info, warn};

use crate::assets::AssetSource;
use crate::context::{FrameError, RenderBackend, RenderContext};
use crate::surface::{SurfaceRef, SurfaceSize};

const RENDER_THREAD_NAME: &str = "render_thread";

/// Where the render thread currently is in its life.
///
/// `Idle -> Starting -> Running -> Stopping -> Idle`, with `Running` skipped
/// when initialization fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Starting,
    Running,
    Stopping,
}

struct WorkerShared {
    /// Run flag. The mutex guards only this boolean: the UI thread clears it
    /// in [`RenderWorker::stop`], the render thread reads it once per frame.
    run: Mutex<bool>,
    state: Mutex<WorkerState>,
    /// Signalled when the render thread marks itself [`WorkerState::Idle`].
    exited: Condvar,
}

/// Owns the dedicated render thread for one surface generation.
///
/// The thread drives exactly one context through initialize, the frame loop
/// and shutdown. `stop` only requests an exit; `join` is the hard guarantee
/// that the thread is gone before the surface is released to the platform.
pub struct RenderWorker {
    shared: Arc<WorkerShared>,
    thread: Option<JoinHandle<()>>,
}

impl RenderWorker {
    /// Starts the render thread for `surface`. Panics if the OS refuses to
    /// spawn a thread, same as `std::thread::spawn`.
    pub fn spawn<B: RenderBackend>(
        backend: Arc<B>,
        surface: SurfaceRef,
        size: SurfaceSize,
        assets: AssetSource,
    ) -> RenderWorker {
        let shared = Arc::new(WorkerShared {
            run: Mutex::new(true),
            state: Mutex::new(WorkerState::Starting),
            exited: Condvar::new(),
        });
        let thread_shared = shared.clone();
        let thread = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || render_thread_main(thread_shared, backend, surface, size, assets))
            .expect("failed to spawn render thread");

        RenderWorker { shared, thread: Some(thread) }
    }

    /// Asks the render thread to leave its frame loop. Returns immediately; a
    /// frame already in flight still completes. Safe to call repeatedly.
    pub fn stop(&self) {
        let mut run = self.shared.run.lock().unwrap();
        if *run {
            info!("Render stop requested");
        }
        *run = false;
    }

    /// Blocks until the render thread has fully exited, shutdown included.
    /// There is no timeout: a wedged renderer blocks the caller. Returns even
    /// if the thread panicked. Safe to call repeatedly.
    pub fn join(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            while *state != WorkerState::Idle {
                // Condvar waits wake spuriously; keep waiting until the
                // render thread has really signalled its exit.
                state = self.shared.exited.wait(state).unwrap();
            }
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Render thread panicked during its run");
            }
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.shared.state.lock().unwrap()
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
            self.join();
        }
    }
}

/// Marks the worker exited even when the context code unwinds. Without this a
/// panicking renderer would leave the state stuck and [`RenderWorker::join`]
/// would stall the UI thread forever.
struct ExitGuard(Arc<WorkerShared>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let mut state = self.0.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = WorkerState::Idle;
        drop(state);
        self.0.exited.notify_all();
    }
}

fn set_state(shared: &WorkerShared, state: WorkerState) {
    *shared.state.lock().unwrap() = state;
}

fn render_thread_main<B: RenderBackend>(
    shared: Arc<WorkerShared>,
    backend: Arc<B>,
    surface: SurfaceRef,
    size: SurfaceSize,
    assets: AssetSource,
) {
    info!("Render thread started! ({}x{})", size.width, size.height);
    let _exit_guard = ExitGuard(shared.clone());
    let mut context = backend.create_context();

    match context.initialize(&surface, size, &assets) {
        Ok(()) => {
            set_state(&shared, WorkerState::Running);
            loop {
                if !*shared.run.lock().unwrap() {
                    info!("Render stop observed, leaving frame loop");
                    break;
                }
                match context.render_frame() {
                    Ok(()) => {}
                    Err(FrameError::DeviceLost) => {
                        warn!("Device lost, leaving frame loop");
                        break;
                    }
                    Err(e) => {
                        error!("Frame failed: {e}");
                        break;
                    }
                }
            }
        }
        Err(e) => error!("Renderer initialization failed: {e}"),
    }

    set_state(&shared, WorkerState::Stopping);
    if let Err(e) = context.shutdown() {
        warn!("Renderer shutdown failed: {e}");
    }
    info!("Render thread exiting");
}
