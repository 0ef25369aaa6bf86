/// Page Watcher: finds posts and attaches one menu listener to each
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, MouseEvent, MutationObserver, MutationObserverInit, Node};

use super::SharedSession;
use super::menu;
use crate::api::sleep;
use crate::config::{MENU_RENDER_DELAY_MS, NAVIGATION_SETTLE_DELAY_MS, selectors};
use crate::post_link::PostLink;
use crate::session::WatchRegistry;

#[derive(Clone)]
pub struct PageWatcher {
    document: Document,
    registry: Rc<RefCell<WatchRegistry<Element>>>,
    /// Shared by every more-actions button. Adding the same function twice
    /// to one element is a no-op in the DOM.
    on_more_click: Rc<Closure<dyn FnMut(MouseEvent)>>,
}

impl PageWatcher {
    pub fn new(document: Document, session: SharedSession) -> Self {
        let on_more_click = {
            let document = document.clone();
            Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let Some(link) = clicked_post_link(&event) else {
                    log::debug!("[Hot Content] More button clicked outside a known post");
                    return;
                };
                log::debug!("[Hot Content] More button clicked for tweet {}", link.id);

                let document = document.clone();
                let session = session.clone();
                spawn_local(async move {
                    // The host renders its menu after this click handler returns
                    sleep(MENU_RENDER_DELAY_MS).await;
                    if let Err(e) = menu::inject(&document, &session, &link) {
                        log::warn!("[Hot Content] Menu injection failed: {:?}", e);
                    }
                });
            })
        };

        PageWatcher {
            document,
            registry: Rc::new(RefCell::new(WatchRegistry::new())),
            on_more_click: Rc::new(on_more_click),
        }
    }

    /// Number of more-actions buttons currently carrying our listener
    pub fn watched_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Instrument every post that has no live listener yet.
    /// Returns how many posts got a new listener; zero on an unchanged page.
    pub fn scan(&self) -> usize {
        let dropped = self.registry.borrow_mut().prune(|button| button.is_connected());
        if dropped > 0 {
            log::debug!("[Hot Content] Forgot {} detached posts", dropped);
        }

        let posts = match self.document.query_selector_all(selectors::POST) {
            Ok(posts) => posts,
            Err(e) => {
                log::debug!("[Hot Content] Post query failed: {:?}", e);
                return 0;
            }
        };

        (0..posts.length())
            .filter_map(|i| posts.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter(|post| self.instrument(post))
            .count()
    }

    fn instrument(&self, post: &Element) -> bool {
        let Some(link) = find_post_link(post) else {
            log::debug!("[Hot Content] No tweet ID found");
            return false;
        };

        let more_button = match post.query_selector(selectors::MORE_BUTTON) {
            Ok(Some(button)) => button,
            _ => {
                log::debug!("[Hot Content] No more button found for tweet {}", link.id);
                return false;
            }
        };

        if !self.registry.borrow_mut().claim(&more_button) {
            return false;
        }

        let on_click: &Closure<dyn FnMut(MouseEvent)> = &self.on_more_click;
        match more_button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            Ok(()) => {
                log::debug!("[Hot Content] Attached listener to tweet {}", link.id);
                true
            }
            Err(e) => {
                log::warn!("[Hot Content] Failed to attach listener: {:?}", e);
                false
            }
        }
    }

    /// Rescan whenever the main content region changes
    pub fn observe(&self) -> Result<MutationObserver, JsValue> {
        let target: Node = match self.document.query_selector(selectors::MAIN)? {
            Some(main) => main.into(),
            None => self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .into(),
        };

        let watcher = self.clone();
        observe_subtree(&target, move || {
            watcher.scan();
        })
    }

    /// Rescan after single-page navigations, once the new view had time to render
    pub fn watch_navigation(&self) -> Result<MutationObserver, JsValue> {
        let location = self
            .document
            .location()
            .ok_or_else(|| JsValue::from_str("no location"))?;
        let last_url = RefCell::new(location.href()?);

        let watcher = self.clone();
        observe_subtree(&self.document, move || {
            let Ok(url) = location.href() else {
                return;
            };
            if *last_url.borrow() == url {
                return;
            }

            log::debug!("[Hot Content] Navigated to {}", url);
            *last_url.borrow_mut() = url;

            let watcher = watcher.clone();
            spawn_local(async move {
                sleep(NAVIGATION_SETTLE_DELAY_MS).await;
                watcher.scan();
            });
        })
    }
}

/// The post whose more-actions button received the click
fn clicked_post_link(event: &MouseEvent) -> Option<PostLink> {
    let button: Element = event.current_target()?.dyn_into().ok()?;
    let post = button.closest(selectors::POST).ok()??;
    find_post_link(&post)
}

/// Identifier and handle from the post's first status link
pub fn find_post_link(post: &Element) -> Option<PostLink> {
    let link = post.query_selector(selectors::STATUS_LINK).ok()??;
    let href = link.get_attribute("href")?;
    PostLink::from_href(&href)
}

fn observe_subtree(target: &Node, mut on_change: impl FnMut() + 'static) -> Result<MutationObserver, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| on_change(),
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;

    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(target, &init)?;

    callback.forget();
    Ok(observer)
}
