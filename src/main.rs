//! ICE page entry point
//!
//! Wires every page behaviour to the DOM on load.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent};

    use ice_page::download::{DownloadFile, offer_download};
    use ice_page::platform::web::{
        BlobUrls, DomSurface, LocalStore, click_download, document, page_url, query,
        read_snapshot, show_toast,
    };
    use ice_page::print::PrintSuppressor;
    use ice_page::qr::qr_image_url_for;
    use ice_page::share::{Toast, copy_to_clipboard};
    use ice_page::stamp::DateStamp;
    use ice_page::{ContactCard, Error, ModeToggle, PageConfig};

    type Toggle = ModeToggle<LocalStore, DomSurface>;

    pub fn run() -> Result<(), Error> {
        console_error_panic_hook::set_once();
        let config = PageConfig::load();
        if console_log::init_with_level(config.log_level()).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("ICE page starting...");

        let doc = document()?;
        let config = Rc::new(config);

        setup_date_stamp(&doc, &config);

        let surface = DomSurface::new(&doc, &config)?;
        let toggle = Rc::new(RefCell::new(ModeToggle::init(
            LocalStore::open(),
            surface.clone(),
            (*config).clone(),
        )));

        setup_toggle_button(&doc, &config, toggle.clone());
        setup_toggle_shortcut(&config, toggle);
        setup_print_button(&doc, &config, surface);
        setup_copy_button(&doc, config.clone());
        setup_qr(&doc, &config);
        setup_vcard_button(&doc, config);

        log::info!("ICE page ready");
        Ok(())
    }

    fn on_click<F>(el: &Element, handler: F)
    where
        F: FnMut(web_sys::MouseEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_date_stamp(document: &Document, config: &PageConfig) {
        let Some(el) = query(document, &config.selectors.updated) else {
            return;
        };
        match DateStamp::now(&config.date_format) {
            Some(stamp) => {
                el.set_text_content(Some(&stamp.text));
                let _ = el.set_attribute("datetime", &stamp.datetime);
            }
            None => log::warn!("Clock out of range; date stamp skipped"),
        }
    }

    fn flip(toggle: &RefCell<Toggle>) {
        match toggle.borrow_mut().toggle() {
            Ok(mode) => log::info!("Emergency mode: {}", mode.as_str()),
            Err(e) => log::warn!("{}", e),
        }
    }

    fn setup_toggle_button(document: &Document, config: &PageConfig, toggle: Rc<RefCell<Toggle>>) {
        if let Some(btn) = query(document, &config.selectors.toggle) {
            on_click(&btn, move |_event| flip(&toggle));
        }
    }

    fn setup_toggle_shortcut(config: &PageConfig, toggle: Rc<RefCell<Toggle>>) {
        let Some(shortcut) = config.toggle_shortcut.clone() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() || event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if !event.key().eq_ignore_ascii_case(&shortcut) || is_editable(&event) {
                return;
            }
            flip(&toggle);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keystrokes typed into form fields are not shortcuts
    fn is_editable(event: &KeyboardEvent) -> bool {
        let Some(el) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return false;
        };
        matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
            || el
                .dyn_ref::<HtmlElement>()
                .is_some_and(|el| el.is_content_editable())
    }

    fn setup_print_button(document: &Document, config: &PageConfig, surface: DomSurface) {
        let printer = Rc::new(PrintSuppressor::new(surface));

        // Also covers printing from the browser menu
        if let Some(window) = web_sys::window() {
            for (event, after) in [("beforeprint", false), ("afterprint", true)] {
                let printer = printer.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    if after {
                        printer.after_print();
                    } else {
                        printer.before_print();
                    }
                });
                let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = query(document, &config.selectors.print) {
            on_click(&btn, move |_event| {
                let result = printer.print(|| {
                    let window = web_sys::window().ok_or_else(|| Error::js("window", "unavailable"))?;
                    window
                        .print()
                        .map_err(|e| Error::from_js("print", e))
                });
                if let Err(e) = result {
                    log::warn!("{}", e);
                }
            });
        }
    }

    fn setup_copy_button(doc: &Document, config: Rc<PageConfig>) {
        let Some(btn) = query(doc, &config.selectors.copy_url) else {
            return;
        };
        on_click(&btn, move |_event| {
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match page_url() {
                    Ok(url) => copy_to_clipboard(&url).await,
                    Err(e) => Err(e),
                };
                let toast = Toast::for_copy(&config, &outcome);
                if let Err(e) = document().and_then(|d| show_toast(&d, &toast)) {
                    log::warn!("{}", e);
                }
            });
        });
    }

    fn setup_qr(document: &Document, config: &PageConfig) {
        let url = match page_url() {
            Ok(url) => url,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        if let Some(img) = query(document, &config.selectors.qr)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        {
            let hide = img.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                hide.set_hidden(true);
                log::warn!("QR image failed to load; hidden");
            });
            let _ = img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
            closure.forget();

            img.set_src(&qr_image_url_for(config, &url));
        }

        if let Some(el) = query(document, &config.selectors.url_text) {
            el.set_text_content(Some(&url));
        }
    }

    fn setup_vcard_button(doc: &Document, config: Rc<PageConfig>) {
        let Some(btn) = query(doc, &config.selectors.save_vcard) else {
            return;
        };
        on_click(&btn, move |event| {
            event.prevent_default();
            let result = document().and_then(|document| {
                let snapshot =
                    read_snapshot(&document, &config.selectors, page_url().unwrap_or_default());
                let file = DownloadFile::vcard(&ContactCard::from_snapshot(&snapshot));
                offer_download(&BlobUrls, &file, |url, name| {
                    click_download(&document, url, name)
                })
            });
            if let Err(e) = result {
                log::warn!("Contact card export failed: {}", e);
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_page::run() {
        log::error!("ICE page failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ice_page::qr::qr_image_url_for;
    use ice_page::{ContactCard, PageConfig, PageSnapshot};

    env_logger::init();
    log::info!("ICE page (native) starting...");
    log::info!("The page script runs in the browser - build for wasm32 and serve with `trunk serve`");

    let page_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com/ice".to_string());
    let config = PageConfig::default();

    let snapshot = PageSnapshot {
        name: "Jane Doe".into(),
        phone: "+15551234567".into(),
        email: "jane@example.com".into(),
        address: "12 High St, Springfield, IL 62701".into(),
        details: "Blood type: O+. Date of birth: May 26, 1999".into(),
        page_url: page_url.clone(),
    };
    let card = ContactCard::from_snapshot(&snapshot);

    println!("QR: {}", qr_image_url_for(&config, &page_url));
    println!("\n{}:\n{}", card.file_name(), card.to_vcard());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
