//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - The document surface the emergency mode is rendered on
//! - Temporary object URLs for downloads

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::{KeyValueStore, MemoryStore};

use crate::error::Result;

/// Where emergency mode becomes visible: the page class and the toggle button.
pub trait ModeSurface {
    /// Whether the emergency class is currently applied to the document
    fn has_mode_class(&self) -> bool;
    /// Add or remove the emergency class
    fn set_mode_class(&self, on: bool);
    /// Update the toggle button's label and `aria-pressed` state
    fn set_toggle_button(&self, label: &str, pressed: bool);
    /// Request haptic feedback; platforms without vibration ignore it
    fn vibrate(&self, _ms: u32) {}
}

/// Factory for revocable temporary URLs backing downloadable files.
pub trait ObjectUrls {
    /// Wrap `body` in a blob of the given MIME type and return its URL
    fn create(&self, body: &str, mime: &str) -> Result<String>;
    /// Release a URL returned by [`ObjectUrls::create`]
    fn revoke(&self, url: &str);
}
