/// Content script for x.com / twitter.com pages
pub mod menu;
pub mod notify;
pub mod watcher;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use crate::api::settings_from_js;
use crate::config::Settings;
use crate::session::SessionState;
use watcher::PageWatcher;

/// Session state shared by every listener on the page
pub type SharedSession = Rc<RefCell<SessionState>>;

// Import JS bridge functions
#[wasm_bindgen(module = "/content.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSettings() -> Result<JsValue, JsValue>;
}

async fn load_settings() -> Settings {
    match getSettings().await {
        Ok(value) => settings_from_js(value),
        Err(e) => {
            log::warn!("[Hot Content] Could not read settings, using defaults: {:?}", e);
            Settings::default()
        }
    }
}

/// Load settings, scan the page and keep watching it
pub async fn start() -> Result<PageWatcher, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let settings = load_settings().await;
    let session = Rc::new(RefCell::new(SessionState::new(&settings)));
    log::debug!("[Hot Content] Using endpoint {}", session.borrow().endpoint);

    dom_ready(&document).await?;

    let watcher = PageWatcher::new(document, session);
    let instrumented = watcher.scan();
    log::debug!("[Hot Content] Initial scan instrumented {} posts", instrumented);

    watcher.observe()?;
    watcher.watch_navigation()?;
    Ok(watcher)
}

async fn dom_ready(document: &Document) -> Result<(), JsValue> {
    if document.ready_state() != "loading" {
        return Ok(());
    }

    let target = document.clone();
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let on_ready = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let _ = target.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    });
    JsFuture::from(promise).await?;
    Ok(())
}
