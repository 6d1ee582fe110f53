//! File downloads through temporary object URLs
//!
//! Each URL is revoked right after the synthetic click, so repeated exports
//! never accumulate blobs.

use crate::error::Result;
use crate::platform::ObjectUrls;
use crate::vcard::{ContactCard, VCARD_MIME};

/// A text file offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub name: String,
    pub mime: &'static str,
    pub body: String,
}

impl DownloadFile {
    pub fn vcard(card: &ContactCard) -> Self {
        Self {
            name: card.file_name(),
            mime: VCARD_MIME,
            body: card.to_vcard(),
        }
    }
}

/// Create an object URL for `file`, hand it to `click`, then revoke it.
///
/// The URL is revoked whether or not `click` succeeds.
pub fn offer_download<U, F>(urls: &U, file: &DownloadFile, click: F) -> Result<()>
where
    U: ObjectUrls,
    F: FnOnce(&str, &str) -> Result<()>,
{
    let url = urls.create(&file.body, file.mime)?;
    let clicked = click(&url, &file.name);
    urls.revoke(&url);
    if clicked.is_ok() {
        log::info!("Offered {} ({} bytes)", file.name, file.body.len());
    }
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    /// Tracks outstanding URLs and the high-water mark
    #[derive(Default)]
    struct CountingUrls {
        live: RefCell<HashSet<String>>,
        next: Cell<u32>,
        peak: Cell<usize>,
        bodies: RefCell<Vec<(String, String)>>,
    }

    impl ObjectUrls for CountingUrls {
        fn create(&self, body: &str, mime: &str) -> Result<String> {
            let id = self.next.get();
            self.next.set(id + 1);
            let url = format!("blob:test/{id}");
            let mut live = self.live.borrow_mut();
            live.insert(url.clone());
            self.peak.set(self.peak.get().max(live.len()));
            self.bodies
                .borrow_mut()
                .push((mime.to_string(), body.to_string()));
            Ok(url)
        }

        fn revoke(&self, url: &str) {
            self.live.borrow_mut().remove(url);
        }
    }

    fn sample_file() -> DownloadFile {
        let card = ContactCard {
            full_name: Some("Ada Lovelace".into()),
            ..ContactCard::default()
        };
        DownloadFile::vcard(&card)
    }

    #[test]
    fn test_url_revoked_after_click() {
        let urls = CountingUrls::default();
        let file = sample_file();
        let mut seen = None;

        offer_download(&urls, &file, |url, name| {
            assert!(urls.live.borrow().contains(url));
            seen = Some(name.to_string());
            Ok(())
        })
        .unwrap();

        assert_eq!(seen.as_deref(), Some("Ada_Lovelace.vcf"));
        assert!(urls.live.borrow().is_empty());
        assert_eq!(urls.peak.get(), 1);
        assert_eq!(urls.bodies.borrow()[0].0, "text/vcard");
        assert!(urls.bodies.borrow()[0].1.starts_with("BEGIN:VCARD\r\n"));
    }

    #[test]
    fn test_repeated_downloads_never_accumulate() {
        let urls = CountingUrls::default();
        let file = sample_file();
        for _ in 0..5 {
            offer_download(&urls, &file, |_, _| Ok(())).unwrap();
        }
        assert!(urls.live.borrow().is_empty());
        assert_eq!(urls.peak.get(), 1);
        assert_eq!(urls.next.get(), 5);
    }

    #[test]
    fn test_url_revoked_when_click_fails() {
        let urls = CountingUrls::default();
        let result = offer_download(&urls, &sample_file(), |_, _| {
            Err(Error::js("click", "detached anchor"))
        });
        assert!(result.is_err());
        assert!(urls.live.borrow().is_empty());
    }
}
