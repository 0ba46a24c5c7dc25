//! sessionStorage cache for fetched data.
//!
//! Version lists rarely change within a session, so caching them avoids
//! hammering the package metadata API while switching pickers. The browser
//! clears the cache when the tab closes.

use serde::{Serialize, de::DeserializeOwned};

use super::dom;

/// Read a cached value. `None` when the key is absent, the storage is
/// unavailable, or the stored JSON no longer matches `T`.
pub fn get<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = dom::session_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// Store a value, best-effort. A full or unavailable storage just means the
/// next read misses.
pub fn set<T: Serialize>(key: &str, data: &T) {
    let Some(storage) = dom::session_storage() else {
        return;
    };
    if let Ok(json) = serde_json::to_string(data) {
        let _ = storage.set_item(key, &json);
    }
}
