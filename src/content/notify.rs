/// Transient on-page notifications. At most one is visible at a time.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::api::sleep;
use crate::config::{NOTICE_DURATION_MS, NOTICE_FADE_MS, NOTICE_SHOW_DELAY_MS, selectors};
use crate::markup::{notification_class, notification_style};
use crate::submission::Notice;

pub fn show(document: &Document, notice: &Notice) {
    if let Err(e) = try_show(document, notice) {
        log::warn!("[Hot Content] Could not show notification: {:?}", e);
    }
}

fn try_show(document: &Document, notice: &Notice) -> Result<(), JsValue> {
    if let Some(existing) = document.query_selector(selectors::NOTIFICATION)? {
        existing.remove();
    }

    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let toast: HtmlElement = document.create_element("div")?.dyn_into()?;
    toast.set_class_name(&notification_class(notice.kind));
    toast.set_text_content(Some(notice.message));
    toast.set_attribute("style", &notification_style(notice.kind, false))?;
    body.append_child(&toast)?;

    let kind = notice.kind;
    spawn_local(async move {
        sleep(NOTICE_SHOW_DELAY_MS).await;
        let _ = toast.class_list().add_1("show");
        let _ = toast.set_attribute("style", &notification_style(kind, true));

        sleep(NOTICE_DURATION_MS).await;
        let _ = toast.class_list().remove_1("show");
        let _ = toast.set_attribute("style", &notification_style(kind, false));

        sleep(NOTICE_FADE_MS).await;
        toast.remove();
    });

    Ok(())
}
