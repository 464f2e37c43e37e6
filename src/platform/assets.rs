//! Sprite image manifest and loading
//!
//! All images load concurrently; the load phase succeeds only when every one
//! of them does. Each image is bounded by the manifest timeout.

use serde::{Deserialize, Serialize};

use crate::consts::ASSET_TIMEOUT_MS;
use crate::error::AssetError;

/// Sprites the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Player,
    Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub key: SpriteKey,
    /// Path relative to the page
    pub path: String,
}

/// Images to fetch before the game can start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub images: Vec<ImageAsset>,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u32,
}

fn default_timeout() -> u32 {
    ASSET_TIMEOUT_MS
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            images: vec![
                ImageAsset {
                    key: SpriteKey::Player,
                    path: "./assets/player.png".to_string(),
                },
                ImageAsset {
                    key: SpriteKey::Platform,
                    path: "./assets/platform.png".to_string(),
                },
            ],
            timeout_ms: ASSET_TIMEOUT_MS,
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        serde_json::from_str(json).map_err(|e| AssetError::Loader(e.to_string()))
    }

    pub fn path(&self, key: SpriteKey) -> Option<&str> {
        self.images
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.path.as_str())
    }

    /// Check the settled statuses (in manifest order); the first failure wins
    pub fn check_statuses<S: AsRef<str>>(&self, statuses: &[S]) -> Result<(), AssetError> {
        if statuses.len() != self.images.len() {
            return Err(AssetError::Loader(format!(
                "expected {} load results, got {}",
                self.images.len(),
                statuses.len()
            )));
        }
        for (asset, status) in self.images.iter().zip(statuses) {
            let status = LoadStatus::parse(status.as_ref()).ok_or_else(|| {
                AssetError::Loader(format!("unknown load status {:?}", status.as_ref()))
            })?;
            status.into_result(&asset.path, self.timeout_ms)?;
        }
        Ok(())
    }
}

/// How a single image load settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Failed,
    TimedOut,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Loaded => "loaded",
            LoadStatus::Failed => "failed",
            LoadStatus::TimedOut => "timeout",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "loaded" => Some(LoadStatus::Loaded),
            "failed" => Some(LoadStatus::Failed),
            "timeout" => Some(LoadStatus::TimedOut),
            _ => None,
        }
    }

    pub fn into_result(self, path: &str, timeout_ms: u32) -> Result<(), AssetError> {
        match self {
            LoadStatus::Loaded => Ok(()),
            LoadStatus::Failed => Err(AssetError::NotFound {
                path: path.to_string(),
            }),
            LoadStatus::TimedOut => Err(AssetError::Timeout {
                path: path.to_string(),
                timeout_ms,
            }),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{LoadedImages, load_images};

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::{Array, Function, Promise};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlImageElement, Window};

    use super::{AssetManifest, LoadStatus, SpriteKey};
    use crate::error::AssetError;

    /// Decoded sprite images
    pub struct LoadedImages {
        player: HtmlImageElement,
        platform: HtmlImageElement,
    }

    impl LoadedImages {
        pub fn get(&self, key: SpriteKey) -> &HtmlImageElement {
            match key {
                SpriteKey::Player => &self.player,
                SpriteKey::Platform => &self.platform,
            }
        }
    }

    /// Fetch every image in the manifest concurrently and wait for all of them
    pub async fn load_images(manifest: &AssetManifest) -> Result<LoadedImages, AssetError> {
        let window = web_sys::window().ok_or_else(|| AssetError::Loader("no window".into()))?;

        let promises = Array::new();
        let mut elements = Vec::with_capacity(manifest.images.len());
        for asset in &manifest.images {
            let img = HtmlImageElement::new()
                .map_err(|e| AssetError::Loader(format!("{:?}", e)))?;
            promises.push(&settle_promise(&window, &img, &asset.path, manifest.timeout_ms));
            elements.push((asset.key, img));
        }

        log::info!("Loading {} images...", elements.len());
        let settled = JsFuture::from(Promise::all(&promises))
            .await
            .map_err(|e| AssetError::Loader(format!("{:?}", e)))?;
        let statuses: Vec<String> = Array::from(&settled)
            .iter()
            .map(|v| v.as_string().unwrap_or_default())
            .collect();
        manifest.check_statuses(&statuses)?;

        let take = |key: SpriteKey| {
            elements
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, img)| img.clone())
                .ok_or_else(|| AssetError::Loader(format!("manifest has no {:?} image", key)))
        };
        Ok(LoadedImages {
            player: take(SpriteKey::Player)?,
            platform: take(SpriteKey::Platform)?,
        })
    }

    /// A promise that always resolves, with the `LoadStatus` string of
    /// whichever of load / error / timeout happens first
    fn settle_promise(window: &Window, img: &HtmlImageElement, path: &str, timeout_ms: u32) -> Promise {
        let window = window.clone();
        let img = img.clone();
        let path = path.to_string();

        Promise::new(&mut |resolve: Function, _reject: Function| {
            let settle = |status: LoadStatus| {
                let resolve = resolve.clone();
                Closure::once_into_js(move || {
                    let _ = resolve.call1(&JsValue::NULL, &JsValue::from_str(status.as_str()));
                })
            };

            let on_load = settle(LoadStatus::Loaded);
            let on_error = settle(LoadStatus::Failed);
            let on_timeout = settle(LoadStatus::TimedOut);

            img.set_onload(Some(on_load.unchecked_ref()));
            img.set_onerror(Some(on_error.unchecked_ref()));
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    on_timeout.unchecked_ref(),
                    timeout_ms as i32,
                )
                .is_err()
            {
                log::warn!("Could not arm load timeout for {}", path);
            }
            img.set_src(&path);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.path(SpriteKey::Player), Some("./assets/player.png"));
        assert_eq!(manifest.path(SpriteKey::Platform), Some("./assets/platform.png"));
        assert_eq!(manifest.timeout_ms, 5000);
    }

    #[test]
    fn test_manifest_from_json_defaults_timeout() {
        let json = r#"{"images":[{"key":"Player","path":"hero.png"}]}"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.timeout_ms, ASSET_TIMEOUT_MS);
        assert_eq!(manifest.path(SpriteKey::Player), Some("hero.png"));
        assert_eq!(manifest.path(SpriteKey::Platform), None);
        assert!(AssetManifest::from_json("{").is_err());
    }

    #[test]
    fn test_all_loaded() {
        let manifest = AssetManifest::default();
        assert!(manifest.check_statuses(&["loaded", "loaded"]).is_ok());
    }

    #[test]
    fn test_first_failure_reported() {
        let manifest = AssetManifest::default();
        assert_eq!(
            manifest.check_statuses(&["loaded", "failed"]),
            Err(AssetError::NotFound {
                path: "./assets/platform.png".to_string()
            })
        );
        assert_eq!(
            manifest.check_statuses(&["timeout", "failed"]),
            Err(AssetError::Timeout {
                path: "./assets/player.png".to_string(),
                timeout_ms: 5000,
            })
        );
    }

    #[test]
    fn test_bad_status_list() {
        let manifest = AssetManifest::default();
        assert!(matches!(
            manifest.check_statuses(&["loaded"]),
            Err(AssetError::Loader(_))
        ));
        assert!(matches!(
            manifest.check_statuses(&["loaded", ""]),
            Err(AssetError::Loader(_))
        ));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [LoadStatus::Loaded, LoadStatus::Failed, LoadStatus::TimedOut] {
            assert_eq!(LoadStatus::parse(status.as_str()), Some(status));
        }
    }
}
