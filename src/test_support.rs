use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};

use crate::assets::AssetSource;
use crate::context::{FrameError, InitError, RenderBackend, RenderContext, ShutdownError};
use crate::surface::{SurfaceRef, SurfaceSize};

/// Window stand-in with no real handles; the mock contexts never look at it.
pub(crate) struct StubSurface;

impl HasWindowHandle for StubSurface {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for StubSurface {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

pub(crate) fn stub_surface() -> SurfaceRef {
    SurfaceRef::new(Arc::new(StubSurface))
}

/// One recorded call into a mock render context. Generations count from 1 in
/// context creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContextCall {
    Initialize { generation: u64, width: u32, height: u32 },
    Frame { generation: u64 },
    Shutdown { generation: u64 },
}

#[derive(Default)]
pub(crate) struct CallLog(Mutex<Vec<ContextCall>>);

impl CallLog {
    fn push(&self, call: ContextCall) {
        self.0.lock().unwrap().push(call);
    }

    pub(crate) fn snapshot(&self) -> Vec<ContextCall> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn init_count(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|c| matches!(c, ContextCall::Initialize { .. }))
            .count()
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|c| matches!(c, ContextCall::Frame { .. }))
            .count()
    }

    pub(crate) fn shutdown_count(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|c| matches!(c, ContextCall::Shutdown { .. }))
            .count()
    }
}

/// Scripted [`RenderBackend`]: hands out one mock context per surface
/// generation and records every context call in a shared log.
pub(crate) struct MockBackend {
    pub(crate) log: Arc<CallLog>,
    generation: AtomicU64,
    fail_init: bool,
    device_lost_after: Option<u32>,
    steps: Mutex<Option<mpsc::Receiver<()>>>,
}

impl MockBackend {
    fn new() -> MockBackend {
        MockBackend {
            log: Arc::new(CallLog::default()),
            generation: AtomicU64::new(0),
            fail_init: false,
            device_lost_after: None,
            steps: Mutex::new(None),
        }
    }

    /// Contexts render successfully until told to stop.
    pub(crate) fn reliable() -> MockBackend {
        MockBackend::new()
    }

    /// Every context fails `initialize`.
    pub(crate) fn failing_init() -> MockBackend {
        MockBackend { fail_init: true, ..MockBackend::new() }
    }

    /// Contexts render `frames` frames, then report a lost device.
    pub(crate) fn device_lost_after(frames: u32) -> MockBackend {
        MockBackend { device_lost_after: Some(frames), ..MockBackend::new() }
    }

    /// The first context paces itself on `steps`: each frame blocks until the
    /// test sends one step, free-running once the sender is dropped.
    pub(crate) fn stepped(steps: mpsc::Receiver<()>) -> MockBackend {
        MockBackend { steps: Mutex::new(Some(steps)), ..MockBackend::new() }
    }
}

impl RenderBackend for MockBackend {
    type Context = MockContext;

    fn create_context(&self) -> MockContext {
        MockContext {
            log: self.log.clone(),
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            fail_init: self.fail_init,
            device_lost_after: self.device_lost_after,
            frames: 0,
            steps: self.steps.lock().unwrap().take(),
        }
    }
}

pub(crate) struct MockContext {
    log: Arc<CallLog>,
    generation: u64,
    fail_init: bool,
    device_lost_after: Option<u32>,
    frames: u32,
    steps: Option<mpsc::Receiver<()>>,
}

impl RenderContext for MockContext {
    fn initialize(
        &mut self,
        _surface: &SurfaceRef,
        size: SurfaceSize,
        _assets: &AssetSource,
    ) -> Result<(), InitError> {
        self.log.push(ContextCall::Initialize {
            generation: self.generation,
            width: size.width,
            height: size.height,
        });
        if self.fail_init {
            return Err(InitError::NoCompatibleDevice);
        }
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), FrameError> {
        self.frames += 1;
        if let Some(limit) = self.device_lost_after {
            if self.frames > limit {
                return Err(FrameError::DeviceLost);
            }
        }
        self.log.push(ContextCall::Frame { generation: self.generation });
        if let Some(steps) = &self.steps {
            let _ = steps.recv();
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), ShutdownError> {
        self.log.push(ContextCall::Shutdown { generation: self.generation });
        Ok(())
    }
}
