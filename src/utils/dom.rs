//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::{Storage, UrlSearchParams, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Get sessionStorage.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

// =============================================================================
// URL Query & Hash
// =============================================================================

/// Parsed query parameters of the current page URL.
///
/// Returns `None` outside a browser context.
pub fn query_params() -> Option<UrlSearchParams> {
    let search = window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}

/// Get the current URL hash (without the '#' prefix).
pub fn get_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}

/// Replace the URL hash without adding to browser history.
///
/// Used for share links so typing does not flood the back button history.
pub fn replace_hash(hash: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&format!("#{hash}")),
        );
    }
}

/// Full page URL including the current hash.
pub fn current_url() -> Option<String> {
    window()?.location().href().ok()
}

// =============================================================================
// User Interaction
// =============================================================================

/// Show a blocking confirmation dialog. Returns `false` outside a browser.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Show a blocking text prompt. Returns `None` when cancelled or outside a
/// browser.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()?
}

/// Copy text to the system clipboard (fire-and-forget).
pub fn copy_to_clipboard(text: &str) {
    if let Some(window) = window() {
        let _ = window.navigator().clipboard().write_text(text);
    }
}

/// Log a warning to the browser console.
pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// Trigger a browser download of `bytes` under `filename`.
///
/// Creates a temporary object URL on an off-screen anchor element and
/// clicks it, then revokes the URL.
pub fn save_blob(bytes: &[u8], filename: &str, mime: &str) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes).buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &options) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(element) = document.create_element("a") {
        use wasm_bindgen::JsCast;
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}
