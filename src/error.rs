//! Error types for the ICE page script.
//!
//! Nothing here is fatal to the page: handlers log these and carry on.

use thiserror::Error;

/// Errors raised while wiring or running page behaviour.
#[derive(Error, Debug)]
pub enum Error {
    /// A required element was not found for the given selector.
    #[error("no element matches selector '{0}'")]
    MissingElement(String),

    /// A browser API call rejected or threw.
    #[error("{api} failed: {message}")]
    Js {
        /// Name of the browser API that failed.
        api: &'static str,
        /// Message extracted from the thrown value.
        message: String,
    },

    /// Reading or writing the preference store failed.
    #[error("storage error for key '{key}': {message}")]
    Storage {
        /// Storage key involved.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The page-supplied configuration could not be parsed.
    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a failed browser call.
    pub fn js(api: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            api,
            message: message.into(),
        }
    }

    /// Wrap a thrown JS value, keeping only its message
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(api: &'static str, value: wasm_bindgen::JsValue) -> Self {
        Self::js(api, js_message(&value))
    }

    /// Storage failure for `key`, keeping only the thrown value's message
    #[cfg(target_arch = "wasm32")]
    pub fn storage_from_js(key: &str, value: wasm_bindgen::JsValue) -> Self {
        Self::Storage {
            key: key.to_string(),
            message: js_message(&value),
        }
    }
}

/// Message of a thrown JS value: the string itself, or its `message` property
#[cfg(target_arch = "wasm32")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = Error::MissingElement("#qr".to_string());
        assert_eq!(err.to_string(), "no element matches selector '#qr'");
    }

    #[test]
    fn test_storage_error_message() {
        let err = Error::Storage {
            key: "emergencyMode".to_string(),
            message: "QuotaExceededError".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "storage error for key 'emergencyMode': QuotaExceededError"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("invalid page configuration"));
    }
}
