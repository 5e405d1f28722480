use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;

/// Read-only asset storage handed to the renderer during initialization.
///
/// Cloning is cheap; all clones read from the same storage. On desktop the
/// assets live in a directory next to the binary, on Android they come out of
/// the APK through the NDK asset manager.
#[derive(Clone)]
pub struct AssetSource {
    inner: Arc<Inner>,
}

enum Inner {
    None,
    Dir(PathBuf),
    #[cfg(target_os = "android")]
    Android(AndroidAssets),
}

#[cfg(target_os = "android")]
struct AndroidAssets(ndk::asset::AssetManager);

// SAFETY: AAssetManager is documented thread-safe; the NDK hands out one
// process-wide manager usable from any thread.
#[cfg(target_os = "android")]
unsafe impl Send for AndroidAssets {}
#[cfg(target_os = "android")]
unsafe impl Sync for AndroidAssets {}

impl AssetSource {
    /// Source with no assets behind it. Every read fails.
    pub fn empty() -> AssetSource {
        AssetSource { inner: Arc::new(Inner::None) }
    }

    pub fn from_dir(root: impl Into<PathBuf>) -> AssetSource {
        AssetSource { inner: Arc::new(Inner::Dir(root.into())) }
    }

    #[cfg(target_os = "android")]
    pub fn from_asset_manager(manager: ndk::asset::AssetManager) -> AssetSource {
        AssetSource { inner: Arc::new(Inner::Android(AndroidAssets(manager))) }
    }

    pub fn read(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        match &*self.inner {
            Inner::None => bail!("No asset source configured (wanted {path})"),
            Inner::Dir(root) => Ok(fs::read(root.join(path))?),
            #[cfg(target_os = "android")]
            Inner::Android(assets) => {
                use std::ffi::CString;
                use std::io::Read;

                let filename = CString::new(path)?;
                let mut asset = assets
                    .0
                    .open(&filename)
                    .ok_or_else(|| anyhow::anyhow!("Asset not found: {path}"))?;
                let mut buffer = Vec::new();
                asset.read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    /// Raw `AAssetManager` pointer for the native renderer, null when the
    /// source is not APK-backed.
    #[cfg(feature = "native-backend")]
    pub(crate) fn native_handle(&self) -> *mut std::ffi::c_void {
        match &*self.inner {
            #[cfg(target_os = "android")]
            Inner::Android(assets) => assets.0.ptr().as_ptr().cast(),
            _ => std::ptr::null_mut(),
        }
    }
}
