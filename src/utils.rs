//! Browser glue: fetching, downloads, local storage, theming and logging.

use leaderboard_viewer::prefs::{PreferenceStore, Preferences};
use log::{warn, Level, Log, Metadata, Record};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Blob, BlobPropertyBag, HtmlAnchorElement, Response, Storage, Url};

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let promise = gloo_utils::window().fetch_with_str(url);
    let response: Response = JsFuture::from(promise)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(format!("HTTP {} for {}", response.status(), url));
    }

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    body.as_string()
        .ok_or_else(|| format!("{} did not return text", url))
}

/// Offer `contents` to the user as a file download.
pub fn download_text(filename: &str, contents: &str, mime: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = gloo_utils::document()
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "could not create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)
}

/// `window.localStorage`, or nothing when storage is disabled.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = gloo_utils::window().local_storage().ok().flatten();
        if storage.is_none() {
            warn!("Local storage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("Could not save preference {}: {}", key, js_error(e));
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                warn!("Could not clear preference {}: {}", key, js_error(e));
            }
        }
    }
}

/// Reflect the colour scheme and palette on `<html>` for the stylesheet.
pub fn apply_theme(prefs: &Preferences) {
    if let Some(root) = gloo_utils::document().document_element() {
        let _ = root.set_attribute("data-theme", prefs.color_scheme());
        let _ = root.set_attribute("data-palette", &prefs.theme);
    }
}

pub fn rank_badge_class(rank: Option<u32>) -> &'static str {
    match rank {
        Some(1) => "gold",
        Some(2) => "silver",
        Some(3) => "bronze",
        _ => "",
    }
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` output to the browser console.
pub fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
