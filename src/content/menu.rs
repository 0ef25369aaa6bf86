/// Menu Injector: adds our entry to a post's open action menu
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, MouseEvent, Node};

use super::{SharedSession, notify};
use crate::api;
use crate::config::selectors;
use crate::markup;
use crate::post_link::PostLink;
use crate::submission::{Activation, Trigger};

/// Insert an "Add to Hot Content" item into the currently open menu.
///
/// Returns `Ok(None)` when there is no open menu or it already carries our
/// item. Both are expected misses.
pub fn inject(document: &Document, session: &SharedSession, post: &PostLink) -> Result<Option<HtmlElement>, JsValue> {
    log::debug!("[Hot Content] Attempting to inject menu for tweet {}", post.id);

    let Some(menu) = document.query_selector(selectors::OPEN_MENU)? else {
        log::debug!("[Hot Content] No menu found");
        return Ok(None);
    };

    if menu.query_selector(selectors::INJECTED_ITEM)?.is_some() {
        log::debug!("[Hot Content] Menu item already exists");
        return Ok(None);
    }

    let list = match menu.query_selector(selectors::MENU_LIST)? {
        Some(list) => list,
        None => {
            log::debug!("[Hot Content] No dropdown container found, using the menu itself");
            menu
        }
    };

    let already_added = session.borrow().submitted.contains(&post.id);
    let item = build_item(document, session, post, already_added)?;

    let first = list.query_selector(selectors::MENU_ITEM)?;
    match first.as_ref().and_then(|first| first.parent_node().map(|parent| (first, parent))) {
        Some((first, parent)) => {
            let first: &Node = first;
            parent.insert_before(&item, Some(first))?;
            log::debug!("[Hot Content] Menu item inserted for tweet {}", post.id);
        }
        None => {
            list.append_child(&item)?;
            log::debug!("[Hot Content] Menu item appended for tweet {}", post.id);
        }
    }

    Ok(Some(item))
}

fn build_item(
    document: &Document,
    session: &SharedSession,
    post: &PostLink,
    already_added: bool,
) -> Result<HtmlElement, JsValue> {
    let item: HtmlElement = document.create_element("div")?.dyn_into()?;
    item.set_class_name(&markup::menu_item_class());
    item.set_attribute("role", "menuitem")?;
    item.set_attribute("tabindex", "0")?;

    let idle_body: Rc<str> = markup::menu_item_body(markup::menu_label(already_added)).into();
    item.set_inner_html(&idle_body);

    add_hover(&item)?;

    let trigger = Rc::new(RefCell::new(Trigger::new(post.clone())));
    let on_click = {
        let document = document.clone();
        let session = session.clone();
        let item = item.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            event.prevent_default();
            event.stop_propagation();
            close_host_menu(&document);
            activate(&document, &session, &trigger, &item, &idle_body);
        })
    };
    item.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(item)
}

fn add_hover(item: &HtmlElement) -> Result<(), JsValue> {
    let on_enter = {
        let item = item.clone();
        Closure::<dyn FnMut()>::new(move || {
            let _ = item.style().set_property("background-color", markup::MENU_ITEM_HOVER);
        })
    };
    let on_leave = {
        let item = item.clone();
        Closure::<dyn FnMut()>::new(move || {
            let _ = item.style().remove_property("background-color");
        })
    };

    item.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
    item.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_enter.forget();
    on_leave.forget();
    Ok(())
}

/// The host closes its menus on any click outside them
fn close_host_menu(document: &Document) {
    if let Some(body) = document.body() {
        body.click();
    }
}

fn activate(
    document: &Document,
    session: &SharedSession,
    trigger: &Rc<RefCell<Trigger>>,
    item: &HtmlElement,
    idle_body: &Rc<str>,
) {
    let activation = trigger
        .borrow_mut()
        .activate(&session.borrow().submitted, api::today());

    match activation {
        Activation::Ignored => {}
        Activation::AlreadySubmitted(notice) => notify::show(document, &notice),
        Activation::Submit(payload) => {
            render(item, &trigger.borrow(), idle_body);

            let endpoint = session.borrow().endpoint.clone();
            let document = document.clone();
            let session = session.clone();
            let trigger = trigger.clone();
            let item = item.clone();
            let idle_body = idle_body.clone();
            spawn_local(async move {
                let outcome = api::submit(&endpoint, &payload).await;
                if let Err(e) = &outcome {
                    log::error!("[Hot Content] Error adding to hot content: {}", e);
                }

                let notice = trigger
                    .borrow_mut()
                    .settle(&mut session.borrow_mut().submitted, &outcome);
                render(&item, &trigger.borrow(), &idle_body);
                notify::show(&document, &notice);
            });
        }
    }
}

/// Reflect the trigger state on the menu item
fn render(item: &HtmlElement, trigger: &Trigger, idle_body: &str) {
    let state = trigger.state();
    item.set_inner_html(&markup::trigger_body(state, idle_body));

    let classes = item.class_list();
    let _ = classes.remove_2("loading", "added");
    if let Some(class) = markup::trigger_class(state) {
        let _ = classes.add_1(class);
    }

    if trigger.is_disabled() {
        let _ = item.set_attribute("aria-disabled", "true");
    } else {
        let _ = item.remove_attribute("aria-disabled");
    }
}
