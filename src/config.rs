//! Page configuration
//!
//! Defaults match the stock ICE page markup. A page can override any subset
//! by embedding a JSON object in `<script type="application/json" id="ice-config">`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Element id of the optional inline JSON config block
pub const CONFIG_ELEMENT_ID: &str = "ice-config";

/// CSS selectors for every element the script touches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    /// `<time>` element receiving the last-updated stamp
    pub updated: String,
    /// Emergency mode toggle button
    pub toggle: String,
    /// Print button
    pub print: String,
    /// Copy-link button
    pub copy_url: String,
    /// QR `<img>`
    pub qr: String,
    /// Element showing the plain page URL
    pub url_text: String,
    /// Contact card download link/button
    pub save_vcard: String,
    /// Full name of the page owner
    pub name: String,
    /// Contact entries; the first supplies phone and email
    pub contacts: String,
    /// Cells inside contact entries; the last supplies the address
    pub address_cells: String,
    /// Free-text blocks scanned for blood type and date of birth
    pub details: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            updated: "#updated".into(),
            toggle: "#toggleEmergency".into(),
            print: "#printBtn".into(),
            copy_url: "#copyURL".into(),
            qr: "#qr".into(),
            url_text: "#urlText".into(),
            save_vcard: "#saveVcf".into(),
            name: ".name".into(),
            contacts: ".contacts .contact".into(),
            address_cells: ".contacts .contact div".into(),
            details: ".medical".into(),
        }
    }
}

/// Full page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub selectors: Selectors,

    // === Emergency mode ===
    /// LocalStorage key holding `"true"`/`"false"`
    pub storage_key: String,
    /// Class toggled on `<html>`
    pub emergency_class: String,
    /// Button label while emergency mode is off
    pub label_off: String,
    /// Button label while emergency mode is on
    pub label_on: String,
    /// Vibration on entering emergency mode (0 disables)
    pub vibrate_ms: u32,
    /// Single key that toggles emergency mode, if any
    pub toggle_shortcut: Option<String>,

    // === QR ===
    pub qr_endpoint: String,
    /// Edge length in pixels of the requested image
    pub qr_size: u32,

    // === Date stamp ===
    /// chrono format string for the visible date
    pub date_format: String,

    // === Toasts ===
    pub toast_ms: u32,
    pub copied_message: String,
    pub copy_failed_message: String,

    /// `log` level name for the console logger
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),

            storage_key: "emergencyMode".into(),
            emergency_class: "emergency-mode".into(),
            label_off: "Emergency mode".into(),
            label_on: "Exit emergency mode".into(),
            vibrate_ms: 50,
            toggle_shortcut: Some("e".into()),

            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/".into(),
            qr_size: 200,

            date_format: "%B %-d, %Y".into(),

            toast_ms: 1600,
            copied_message: "Link copied".into(),
            copy_failed_message: "Could not copy".into(),

            log_level: "info".into(),
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed log level, falling back to `Info` for unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Load config from the inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded page config from #{}", CONFIG_ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("{}; using defaults", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
