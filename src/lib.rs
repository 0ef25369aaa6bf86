/// Hot Content Quick Add - browser extension for saving posts to a hot content collection
/// Built with Rust + WASM + Yew

pub mod api;
pub mod config;
pub mod content;
pub mod manual;
pub mod markup;
pub mod post_link;
pub mod session;
pub mod submission;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Canonical URL for a post link, for JavaScript callers
#[wasm_bindgen]
pub fn canonical_post_url(href: &str) -> Option<String> {
    post_link::PostLink::from_href(href).map(|link| link.canonical_url())
}

// Start instrumenting the host page
#[wasm_bindgen]
pub fn start_content_script() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = content::start().await {
            log::error!("[Hot Content] Content script failed to start: {:?}", e);
        }
    });
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
