//! Hosts an opaque native renderer behind a platform window: a dedicated
//! render thread drives init/draw/destroy, and surface lifecycle callbacks
//! decide when that thread lives and dies.

pub mod app;
pub mod assets;
pub mod context;
pub mod coordinator;
pub mod surface;
pub mod worker;

#[cfg(feature = "native-backend")]
pub mod native;

#[cfg(target_os = "android")]
mod android;

#[cfg(test)]
mod test_support;

#[cfg(all(target_os = "android", feature = "native-backend"))]
static FIRST_RUN: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

#[cfg(all(target_os = "android", feature = "native-backend"))]
#[unsafe(no_mangle)]
fn android_main(app: app::AndroidApp) {
    // Android can relaunch into a reused process, but a winit event loop is
    // not restartable; bail out to force a fresh process instead.
    if !FIRST_RUN.swap(false, std::sync::atomic::Ordering::SeqCst) {
        std::process::exit(0);
    }
    let backend = native::NativeBackend::new().expect("Native renderer unavailable");
    app::run_android(backend, app::HostOptions::default(), app);
    std::process::exit(0);
}
