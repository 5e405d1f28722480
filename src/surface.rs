use std::fmt;
use std::sync::Arc;

use raw_window_handle::{DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle};

/// Pixel extent of the drawable surface, as reported by the windowing system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> SurfaceSize {
        SurfaceSize { width, height }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> SurfaceSize {
        SurfaceSize::new(size.width, size.height)
    }
}

/// Anything that can stand in for the platform window: raw window/display
/// handles plus the thread-safety needed to hand it over to the render
/// thread. A winit `Window` qualifies as-is.
pub trait SurfaceSource: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T: HasWindowHandle + HasDisplayHandle + Send + Sync> SurfaceSource for T {}

/// Shared reference to the platform drawable surface.
///
/// Only valid between the windowing system's created and destroyed callbacks
/// for one surface generation. Once a render worker is started with it, the
/// render thread is the only user until the worker has been joined.
#[derive(Clone)]
pub struct SurfaceRef {
    source: Arc<dyn SurfaceSource>,
}

impl SurfaceRef {
    pub fn new<S: SurfaceSource + 'static>(source: Arc<S>) -> SurfaceRef {
        SurfaceRef { source }
    }
}

impl HasWindowHandle for SurfaceRef {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.source.window_handle()
    }
}

impl HasDisplayHandle for SurfaceRef {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.source.display_handle()
    }
}

impl fmt::Debug for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRef").finish_non_exhaustive()
    }
}
