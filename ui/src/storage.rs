//! Browser local storage behind the key-value seam

use gloo_storage::{LocalStorage, Storage};
use tracing::warn;
use vitahealth_core::{KeyValueStore, StorageError};

/// `window.localStorage`, values stored as raw strings
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Io(format!("{:?}", err))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw().remove_item(key).map_err(js_error)
    }

    /// Dispatch a `storage` event so views in this tab re-read, the same
    /// event other tabs receive from the browser.
    fn notify_changed(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::Event::new("storage") {
            Ok(event) => {
                if let Err(e) = window.dispatch_event(&event) {
                    warn!(error = ?e, "Failed to dispatch storage event");
                }
            }
            Err(e) => warn!(error = ?e, "Failed to create storage event"),
        }
    }
}
