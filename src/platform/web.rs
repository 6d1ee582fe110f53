//! Browser implementations of the platform traits, plus small DOM helpers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, Storage, Url};

use super::{KeyValueStore, ModeSurface, ObjectUrls};
use crate::config::{PageConfig, Selectors};
use crate::error::{Error, Result};
use crate::share::{TOAST_STYLE, Toast};
use crate::vcard::PageSnapshot;

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::js("document", "unavailable"))
}

/// First element matching `selector`, if any
pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Trimmed text of the first match, or empty
pub fn text_of(root: &Document, selector: &str) -> String {
    query(root, selector)
        .and_then(|el| el.text_content())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// All elements matching `selector`, in document order
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn page_url() -> Result<String> {
    let window = web_sys::window().ok_or_else(|| Error::js("window", "unavailable"))?;
    window
        .location()
        .href()
        .map_err(|e| Error::from_js("location.href", e))
}

/// `window.localStorage`; reads as empty when storage is blocked
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable - preferences will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self.storage.as_ref().ok_or_else(|| Error::Storage {
            key: key.to_string(),
            message: "localStorage unavailable".into(),
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| Error::storage_from_js(key, e))
    }
}

/// `<html>` class plus the toggle button
#[derive(Clone)]
pub struct DomSurface {
    root: Element,
    button: Option<Element>,
    class: String,
}

impl DomSurface {
    pub fn new(document: &Document, config: &PageConfig) -> Result<Self> {
        let root = document
            .document_element()
            .ok_or_else(|| Error::MissingElement("html".into()))?;
        Ok(Self {
            root,
            button: query(document, &config.selectors.toggle),
            class: config.emergency_class.clone(),
        })
    }
}

impl ModeSurface for DomSurface {
    fn has_mode_class(&self) -> bool {
        self.root.class_list().contains(&self.class)
    }

    fn set_mode_class(&self, on: bool) {
        if let Err(e) = self.root.class_list().toggle_with_force(&self.class, on) {
            log::warn!("Could not set class '{}': {:?}", self.class, e);
        }
    }

    fn set_toggle_button(&self, label: &str, pressed: bool) {
        if let Some(button) = &self.button {
            button.set_text_content(Some(label));
            let _ = button.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        }
    }

    fn vibrate(&self, ms: u32) {
        if let Some(window) = web_sys::window() {
            window.navigator().vibrate_with_duration(ms);
        }
    }
}

/// `URL.createObjectURL` / `URL.revokeObjectURL` over text blobs
pub struct BlobUrls;

impl ObjectUrls for BlobUrls {
    fn create(&self, body: &str, mime: &str) -> Result<String> {
        let parts = js_sys::Array::of1(&JsValue::from_str(body));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| Error::from_js("Blob", e))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| Error::from_js("URL.createObjectURL", e))
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("revokeObjectURL failed: {:?}", e);
        }
    }
}

/// Click a detached `<a download>` pointing at `url`
pub fn click_download(document: &Document, url: &str, file_name: &str) -> Result<()> {
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| Error::from_js("createElement", e))?
        .dyn_into()
        .map_err(|_| Error::js("createElement", "not an anchor"))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

/// Read the contact fields currently visible on the page
pub fn read_snapshot(document: &Document, selectors: &Selectors, page_url: String) -> PageSnapshot {
    let primary = query_all(document, &selectors.contacts).into_iter().next();
    let link = |scheme: &str| -> String {
        primary
            .as_ref()
            .and_then(|c| c.query_selector(&format!("a[href^=\"{scheme}\"]")).ok().flatten())
            .and_then(|a| a.get_attribute("href"))
            .and_then(|href| href.strip_prefix(scheme).map(str::to_string))
            .unwrap_or_default()
    };

    let address = query_all(document, &selectors.address_cells)
        .last()
        .and_then(|el| el.text_content())
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let details = query_all(document, &selectors.details)
        .iter()
        .filter_map(|el| el.text_content())
        .collect::<Vec<_>>()
        .join("\n");

    PageSnapshot {
        name: text_of(document, &selectors.name),
        phone: link("tel:"),
        email: link("mailto:"),
        address,
        details,
        page_url,
    }
}

/// Show `toast` in the page's bottom-right corner, removing it after its duration
pub fn show_toast(document: &Document, toast: &Toast) -> Result<()> {
    let el: HtmlElement = document
        .create_element("div")
        .map_err(|e| Error::from_js("createElement", e))?
        .dyn_into()
        .map_err(|_| Error::js("createElement", "not an HTML element"))?;
    let style = el.style();
    for (prop, value) in TOAST_STYLE {
        let _ = style.set_property(prop, value);
    }
    let _ = el.set_attribute("role", "status");
    el.set_text_content(Some(&toast.text));

    let body = document.body().ok_or_else(|| Error::MissingElement("body".into()))?;
    body.append_child(&el)
        .map_err(|e| Error::from_js("appendChild", e))?;

    let window = web_sys::window().ok_or_else(|| Error::js("window", "unavailable"))?;
    let remove = Closure::once_into_js(move || el.remove());
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            toast.duration_ms as i32,
        )
        .map_err(|e| Error::from_js("setTimeout", e))?;
    Ok(())
}
