use raw_window_handle::HandleError;
use thiserror::Error;

use crate::assets::AssetSource;
use crate::surface::{SurfaceRef, SurfaceSize};

#[derive(Error, Debug)]
pub enum InitError {
    #[error("surface handle unavailable: {0}")]
    Surface(#[from] HandleError),
    #[error("window system not supported by the renderer")]
    UnsupportedWindowSystem,
    #[error("no compatible graphics device")]
    NoCompatibleDevice,
    #[error("renderer init failed (code {0})")]
    Native(i32),
}

#[derive(Error, Debug)]
pub enum FrameError {
    /// The device or surface went away. Recoverable at the surface level by
    /// tearing the worker down and starting a fresh one.
    #[error("graphics device or surface lost")]
    DeviceLost,
    #[error("draw call failed (code {0})")]
    Native(i32),
}

#[derive(Error, Debug)]
#[error("render context teardown failed: {0}")]
pub struct ShutdownError(pub String);

/// One renderer instance bound to one surface generation.
///
/// All three calls happen on the render thread, in this order: `initialize`
/// once, `render_frame` zero or more times (only after a successful
/// `initialize`), `shutdown` exactly once. The context never migrates off the
/// thread it was created on, so implementations are free to keep
/// thread-confined state.
pub trait RenderContext {
    /// Binds the renderer to the surface. On `Err` the context skips straight
    /// to `shutdown` without rendering a single frame.
    fn initialize(
        &mut self,
        surface: &SurfaceRef,
        size: SurfaceSize,
        assets: &AssetSource,
    ) -> Result<(), InitError>;

    /// Draws and presents one frame.
    fn render_frame(&mut self) -> Result<(), FrameError>;

    /// Releases everything `initialize` acquired. Called exactly once, even
    /// after a failed `initialize`, after which the context is dead.
    fn shutdown(&mut self) -> Result<(), ShutdownError>;
}

/// Factory for [`RenderContext`] values, one per surface generation.
///
/// The factory is shared across generations and threads, the contexts it
/// creates are not: each one is constructed and driven entirely on the render
/// thread that asked for it.
pub trait RenderBackend: Send + Sync + 'static {
    type Context: RenderContext;

    fn create_context(&self) -> Self::Context;
}
