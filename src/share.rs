//! Copy-link action and its transient toast

use crate::config::PageConfig;
use crate::error::Result;

/// Inline style applied to toast elements
pub const TOAST_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "auto 16px 16px auto"),
    ("background", "rgba(0,0,0,.8)"),
    ("color", "#fff"),
    ("padding", "8px 10px"),
    ("border-radius", "10px"),
    ("z-index", "9999"),
];

/// A short-lived on-screen notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub duration_ms: u32,
}

impl Toast {
    /// Toast reporting the outcome of a clipboard write
    pub fn for_copy(config: &PageConfig, outcome: &Result<()>) -> Self {
        let text = match outcome {
            Ok(()) => &config.copied_message,
            Err(e) => {
                log::warn!("Copy link failed: {}", e);
                &config.copy_failed_message
            }
        };
        Self {
            text: text.clone(),
            duration_ms: config.toast_ms,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod js {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(inline_js = "
        export function write_clipboard(text) {
            return navigator.clipboard.writeText(text);
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        pub fn write_clipboard(text: &str) -> Result<js_sys::Promise, JsValue>;
    }
}

/// Write `text` to the clipboard (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    use crate::error::Error;

    let promise = js::write_clipboard(text).map_err(|e| Error::from_js("clipboard.writeText", e))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| Error::from_js("clipboard.writeText", e))
}
