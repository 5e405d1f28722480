use std::sync::Arc;

use log::{info, warn};
use sparkles::FinalizeGuard;
use sparkles_macro::range_event_start;
use winit::application::ApplicationHandler;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::NamedKey;
use winit::window::{Window, WindowAttributes, WindowId};
use winit::{event::WindowEvent, event_loop::EventLoop, keyboard};

#[cfg(target_os = "android")]
pub use winit::platform::android::activity::AndroidApp;

use crate::assets::AssetSource;
use crate::context::RenderBackend;
use crate::coordinator::SurfaceCoordinator;
use crate::surface::SurfaceRef;

pub struct HostOptions {
    pub window_title: String,
    pub assets: AssetSource,
}

impl Default for HostOptions {
    fn default() -> Self {
        HostOptions {
            window_title: "vulkan-host".into(),
            assets: AssetSource::empty(),
        }
    }
}

#[cfg(target_os = "android")]
pub fn run_android<B: RenderBackend>(backend: B, mut options: HostOptions, app: AndroidApp) {
    // Assets always come out of the APK on Android, whatever the caller set.
    options.assets = AssetSource::from_asset_manager(app.asset_manager());
    let event_loop = crate::android::android_event_loop(app);
    let mut host = WinitHost::new(backend, options);
    event_loop.run_app(&mut host).unwrap();
}

#[cfg(not(target_os = "android"))]
pub fn run<B: RenderBackend>(backend: B, options: HostOptions) {
    let event_loop = EventLoop::new().unwrap();
    let mut host = WinitHost::new(backend, options);
    event_loop.run_app(&mut host).unwrap();
}

/// Winit adapter: translates the event loop's lifecycle into surface
/// callbacks on the [`SurfaceCoordinator`].
///
/// The window is created once and kept across suspend/resume; on Android the
/// surface behind it comes and goes with every cycle, which is exactly what
/// the created/destroyed callbacks carry.
pub struct WinitHost<B: RenderBackend> {
    options: HostOptions,
    coordinator: SurfaceCoordinator<B>,
    window: Option<Arc<Window>>,
    g: FinalizeGuard,
}

impl<B: RenderBackend> WinitHost<B> {
    pub fn new(backend: B, options: HostOptions) -> Self {
        let g = sparkles::init_default();
        let coordinator = SurfaceCoordinator::new(backend, options.assets.clone());
        Self { options, coordinator, window: None, g }
    }

    fn teardown_surface(&mut self) {
        if self.coordinator.is_active() {
            self.coordinator.surface_destroyed();
        }
    }
}

impl<B: RenderBackend> ApplicationHandler for WinitHost<B> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let g = range_event_start!("[WINIT] resumed");
        info!("\t\t*** APP RESUMED ***");
        if self.coordinator.is_active() {
            warn!("Resumed with the surface already active, ignoring");
            return;
        }
        let window = match &self.window {
            Some(window) => window.clone(),
            None => {
                let window = event_loop
                    .create_window(
                        WindowAttributes::default().with_title(self.options.window_title.clone()),
                    )
                    .unwrap();
                let window = Arc::new(window);
                self.window = Some(window.clone());
                window
            }
        };
        let size = window.inner_size();
        self.coordinator
            .surface_created(SurfaceRef::new(window), size.into());
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        let g = range_event_start!("[WINIT] suspended");
        info!("\t\t*** APP SUSPENDED ***");
        self.teardown_surface();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        logical_key: keyboard::Key::Named(NamedKey::GoBack | NamedKey::BrowserBack),
                        state: winit::event::ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let g = range_event_start!("[WINIT] Close requested");
                info!("Close requested...");
                self.teardown_surface();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if self.coordinator.is_active() {
                    self.coordinator.surface_changed(size.into());
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let g = range_event_start!("[WINIT] Exiting");
        info!("\t\t*** APP EXITING ***");
        self.teardown_surface();
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        let g = range_event_start!("[WINIT] Memory warning");
        info!("\t\t*** APP MEMORY WARNING ***");
    }
}
