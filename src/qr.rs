//! QR code image pointing back at the page
//!
//! Encoding is left to a third-party image endpoint; this only builds the
//! request URL.

use crate::config::PageConfig;

/// Image request URL for a QR code encoding `page_url`
pub fn qr_image_url(endpoint: &str, size: u32, page_url: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}size={size}x{size}&data={}",
        urlencoding::encode(page_url)
    )
}

/// Request URL using the configured endpoint and size
pub fn qr_image_url_for(config: &PageConfig, page_url: &str) -> String {
    qr_image_url(&config.qr_endpoint, config.qr_size, page_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_is_percent_encoded() {
        let url = qr_image_url_for(&PageConfig::default(), "https://example.com/page");
        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=https%3A%2F%2Fexample.com%2Fpage"
        );
    }

    #[test]
    fn test_query_and_fragment_encoded() {
        let url = qr_image_url("https://qr.test/gen", 120, "https://a.b/p?x=1&y=2#top");
        assert!(url.starts_with("https://qr.test/gen?size=120x120&data="));
        assert!(url.ends_with("https%3A%2F%2Fa.b%2Fp%3Fx%3D1%26y%3D2%23top"));
    }

    #[test]
    fn test_endpoint_with_existing_query() {
        let url = qr_image_url("https://qr.test/gen?format=svg", 64, "x");
        assert_eq!(url, "https://qr.test/gen?format=svg&size=64x64&data=x");
    }
}
