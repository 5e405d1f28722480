use std::thread;
use std::time::{Duration, Instant};

use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use vulkan_host::app::{run, HostOptions};
use vulkan_host::assets::AssetSource;
use vulkan_host::context::{FrameError, InitError, RenderBackend, RenderContext, ShutdownError};
use vulkan_host::surface::{SurfaceRef, SurfaceSize};

/// Stand-in renderer so the host runs without the native library: draws
/// nothing, just paces a frame loop and reports FPS.
struct DemoBackend;

impl RenderBackend for DemoBackend {
    type Context = DemoContext;

    fn create_context(&self) -> DemoContext {
        DemoContext { frame_cnt: 0, last_sec: Instant::now() }
    }
}

struct DemoContext {
    frame_cnt: i32,
    last_sec: Instant,
}

impl RenderContext for DemoContext {
    fn initialize(
        &mut self,
        _surface: &SurfaceRef,
        size: SurfaceSize,
        _assets: &AssetSource,
    ) -> Result<(), InitError> {
        info!("Demo renderer up ({}x{})", size.width, size.height);
        Ok(())
    }

    fn render_frame(&mut self) -> Result<(), FrameError> {
        thread::sleep(Duration::from_millis(16));

        self.frame_cnt += 1;
        if self.last_sec.elapsed().as_secs() >= 1 {
            info!("FPS: {}", self.frame_cnt);
            self.frame_cnt = 0;
            self.last_sec = Instant::now();
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), ShutdownError> {
        info!("Demo renderer down");
        Ok(())
    }
}

fn main() {
    SimpleLogger::new()
        .with_utc_timestamps()
        .with_colors(true)
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    run(DemoBackend, HostOptions::default());
}
