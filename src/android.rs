use log::info;
use winit::event_loop::{EventLoop, EventLoopBuilder};
use winit::platform::android::activity::AndroidApp;
use winit::platform::android::EventLoopBuilderExtAndroid;

pub(crate) fn android_event_loop(app: AndroidApp) -> EventLoop<()> {
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );
    info!("Android event loop starting");

    EventLoopBuilder::default()
        .with_android_app(app)
        .build()
        .unwrap()
}
