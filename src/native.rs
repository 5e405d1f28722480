//! Backend that drives the external native renderer library over its C ABI.
//!
//! The library keeps thread-confined global state behind four entry points:
//! a one-time process startup, then init/draw/destroy per surface generation.
//! Every call returns a status code, zero for success.

use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr;
use std::sync::OnceLock;

use log::info;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};

use crate::assets::AssetSource;
use crate::context::{FrameError, InitError, RenderBackend, RenderContext, ShutdownError};
use crate::surface::{SurfaceRef, SurfaceSize};

const STATUS_OK: i32 = 0;
const STATUS_DEVICE_LOST: i32 = -2;
const STATUS_NO_DEVICE: i32 = -3;

#[link(name = "vulkan_native")]
extern "C" {
    fn vulkan_native_startup() -> i32;
    fn vulkan_native_init(
        window: *mut c_void,
        display: *mut c_void,
        width: u32,
        height: u32,
        assets: *mut c_void,
    ) -> i32;
    fn vulkan_native_draw() -> i32;
    fn vulkan_native_destroy() -> i32;
}

static STARTUP: OnceLock<i32> = OnceLock::new();

/// Process-wide binding of the renderer library. Runs at most once; repeat
/// calls return the first outcome.
fn ensure_started() -> Result<(), InitError> {
    let code = *STARTUP.get_or_init(|| {
        info!("Binding native renderer library");
        unsafe { vulkan_native_startup() }
    });
    if code == STATUS_OK {
        Ok(())
    } else {
        Err(InitError::Native(code))
    }
}

pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Result<NativeBackend, InitError> {
        ensure_started()?;
        Ok(NativeBackend)
    }
}

impl RenderBackend for NativeBackend {
    type Context = NativeContext;

    fn create_context(&self) -> NativeContext {
        NativeContext { _thread_confined: PhantomData }
    }
}

pub struct NativeContext {
    // The library keeps its device state in thread-confined globals, so the
    // context must never migrate between threads.
    _thread_confined: PhantomData<*mut ()>,
}

impl RenderContext for NativeContext {
    fn initialize(
        &mut self,
        surface: &SurfaceRef,
        size: SurfaceSize,
        assets: &AssetSource,
    ) -> Result<(), InitError> {
        ensure_started()?;
        let window = raw_window_ptr(surface)?;
        let display = raw_display_ptr(surface)?;
        info!("Native renderer init {}x{}", size.width, size.height);
        let code = unsafe {
            vulkan_native_init(window, display, size.width, size.height, assets.native_handle())
        };
        match code {
            STATUS_OK => Ok(()),
            STATUS_NO_DEVICE => Err(InitError::NoCompatibleDevice),
            code => Err(InitError::Native(code)),
        }
    }

    fn render_frame(&mut self) -> Result<(), FrameError> {
        match unsafe { vulkan_native_draw() } {
            STATUS_OK => Ok(()),
            STATUS_DEVICE_LOST => Err(FrameError::DeviceLost),
            code => Err(FrameError::Native(code)),
        }
    }

    fn shutdown(&mut self) -> Result<(), ShutdownError> {
        info!("Native renderer destroy");
        match unsafe { vulkan_native_destroy() } {
            STATUS_OK => Ok(()),
            code => Err(ShutdownError(format!("native teardown returned {code}"))),
        }
    }
}

fn raw_window_ptr(surface: &SurfaceRef) -> Result<*mut c_void, InitError> {
    match surface.window_handle()?.as_raw() {
        RawWindowHandle::AndroidNdk(handle) => Ok(handle.a_native_window.as_ptr()),
        RawWindowHandle::Wayland(handle) => Ok(handle.surface.as_ptr()),
        RawWindowHandle::Xlib(handle) => Ok(handle.window as usize as *mut c_void),
        RawWindowHandle::Win32(handle) => Ok(handle.hwnd.get() as usize as *mut c_void),
        RawWindowHandle::AppKit(handle) => Ok(handle.ns_view.as_ptr()),
        _ => Err(InitError::UnsupportedWindowSystem),
    }
}

fn raw_display_ptr(surface: &SurfaceRef) -> Result<*mut c_void, InitError> {
    match surface.display_handle()?.as_raw() {
        // ANativeWindow carries everything the renderer needs.
        RawDisplayHandle::Android(_)
        | RawDisplayHandle::Windows(_)
        | RawDisplayHandle::AppKit(_) => Ok(ptr::null_mut()),
        RawDisplayHandle::Wayland(handle) => Ok(handle.display.as_ptr()),
        RawDisplayHandle::Xlib(handle) => {
            Ok(handle.display.map_or(ptr::null_mut(), |d| d.as_ptr()))
        }
        _ => Err(InitError::UnsupportedWindowSystem),
    }
}
