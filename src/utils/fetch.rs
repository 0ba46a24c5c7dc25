//! JSON fetching over the browser Fetch API.
//!
//! The version-list requests feeding the pickers go through here: a GET
//! raced against a timeout, the body parsed as JSON, and the result
//! optionally cached in sessionStorage for the rest of the session.

use js_sys::{Array, Promise};
use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;
use crate::utils::cache;

/// Fetch `url` and parse the response body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|_| FetchError::RequestCreationFailed)?;

    let raced = race_timeout(&window, window.fetch_with_request(&request), FETCH_TIMEOUT_MS).await?;
    let response: Response = raced.dyn_into().map_err(|_| FetchError::InvalidContent)?;
    if !response.ok() {
        return Err(FetchError::HttpError(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    let text = body.as_string().ok_or(FetchError::InvalidContent)?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

/// Like [`fetch_json`], but consults the sessionStorage cache first and
/// stores a fresh result for the rest of the session.
pub async fn fetch_json_cached<T>(url: &str, cache_key: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned + Serialize,
{
    if let Some(cached) = cache::get::<T>(cache_key) {
        return Ok(cached);
    }

    let data = fetch_json::<T>(url).await?;
    cache::set(cache_key, &data);
    Ok(data)
}

/// Race `promise` against a timer via `Promise.race`; the timer resolves to
/// `undefined`, which the Fetch API never produces. The Fetch API has no
/// native timeout.
async fn race_timeout(
    window: &Window,
    promise: Promise,
    timeout_ms: i32,
) -> Result<JsValue, FetchError> {
    let timer = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let contenders = Array::new();
    contenders.push(&promise);
    contenders.push(&timer);

    match JsFuture::from(Promise::race(&contenders)).await {
        Ok(value) if value.is_undefined() => Err(FetchError::Timeout),
        Ok(value) => Ok(value),
        Err(e) => Err(FetchError::NetworkError(
            e.as_string().unwrap_or_else(|| "unknown error".to_string()),
        )),
    }
}
