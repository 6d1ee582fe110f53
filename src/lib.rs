//! ICE Page - client-side behaviour for a static emergency contact page
//!
//! Core modules:
//! - `mode`: Emergency mode toggle and its persisted preference
//! - `print`: Print with emergency styling suppressed
//! - `qr`: QR image request URL for the page
//! - `stamp`: Last-updated date stamp
//! - `vcard`: Contact card built from visible page text
//! - `download`: Object URL lifecycle for generated files
//! - `share`: Copy-link action and toasts
//! - `platform`: Browser/native platform abstraction
//! - `config`: Page configuration

pub mod config;
pub mod download;
pub mod error;
pub mod mode;
pub mod platform;
pub mod print;
pub mod qr;
pub mod share;
pub mod stamp;
pub mod vcard;

pub use config::PageConfig;
pub use error::{Error, Result};
pub use mode::{EmergencyMode, ModeToggle};
pub use vcard::{ContactCard, PageSnapshot};
