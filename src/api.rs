/// Browser-side plumbing: the collection API request, dates and timers
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::config::Settings;
use crate::submission::{SubmitError, SubmitPayload, calendar_date, classify_response};

/// POST the payload to the collection endpoint and classify the response.
/// One attempt, no retry.
pub async fn submit(endpoint: &str, payload: &SubmitPayload) -> Result<Value, SubmitError> {
    let body = payload.to_body()?;

    log::info!("[Hot Content] Adding {:?} for {}", payload.urls, payload.date);

    let (status, text) = post_json(endpoint, &body)
        .await
        .map_err(|e| SubmitError::Network(format!("{:?}", e)))?;

    log::debug!("[Hot Content] API response status: {}", status);

    let outcome = classify_response(status, &text);
    match &outcome {
        Ok(data) => log::debug!("[Hot Content] API success: {}", data),
        Err(e) => log::error!("[Hot Content] API error: {} {}", e, text),
    }
    outcome
}

async fn post_json(endpoint: &str, body: &str) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok((response.status(), text))
}

/// Today's local calendar date as `YYYY-MM-DD`
pub fn today() -> String {
    let now = js_sys::Date::new_0();
    calendar_date(now.get_full_year(), now.get_month(), now.get_date())
}

/// Resolve after `ms` milliseconds
pub async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        match web_sys::window() {
            Some(window) => {
                if window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .is_err()
                {
                    let _ = resolve.call0(&JsValue::NULL);
                }
            }
            None => {
                let _ = resolve.call0(&JsValue::NULL);
            }
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Convert a chrome.storage result object into settings.
/// Missing or malformed values fall back to the defaults.
pub fn settings_from_js(value: JsValue) -> Settings {
    if value.is_null() || value.is_undefined() {
        return Settings::default();
    }

    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        log::warn!("[Hot Content] Ignoring unreadable settings: {:?}", e);
        Settings::default()
    })
}
