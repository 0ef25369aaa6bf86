/// HTML for the elements we insert into the host page
use crate::submission::{NoticeKind, TriggerState};

pub const MENU_ITEM_CLASS: &str = "hot-content-menu-item";
pub const NOTIFICATION_CLASS: &str = "hot-content-notification";

pub const LABEL_ADD: &str = "Add to Hot Content";
pub const LABEL_ALREADY_ADDED: &str = "✓ Added to Hot Content";

/// Host menu item classes, so our entry looks like its neighbours
const HOST_ITEM_CLASSES: &str =
    "css-175oi2r r-1loqt21 r-18u37iz r-1mmae3n r-3pj75a r-13qz1uu r-o7ynqc r-6416eg r-1ny4l3l";

pub const MENU_ITEM_HOVER: &str = "rgba(231, 233, 234, 0.1)";

pub fn menu_item_class() -> String {
    format!("{} {}", MENU_ITEM_CLASS, HOST_ITEM_CLASSES)
}

pub fn menu_label(already_added: bool) -> &'static str {
    if already_added { LABEL_ALREADY_ADDED } else { LABEL_ADD }
}

/// Icon and label laid out like a native menu entry
pub fn menu_item_body(label: &str) -> String {
    format!(
        r#"<div class="css-175oi2r r-1777fci r-faml9v">
    <svg viewBox="0 0 24 24" aria-hidden="true" class="r-4qtqp9 r-yyyyoo r-1xvli5t r-dnmrzs r-bnwqim r-lrvibr r-m6rgpd r-1nao33i r-1q142lx">
        <g><path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z"/></g>
    </svg>
</div>
<div class="css-175oi2r r-16y2uox r-1wbh5a2">
    <div dir="ltr" class="css-146c3p1 r-bcqeeo r-1ttztb7 r-qvutc0 r-37j5jr r-a023e6 r-rjixqe r-b88u0q" style="color: rgb(231, 233, 234);">
        <span class="css-1jxf684 r-bcqeeo r-1ttztb7 r-qvutc0 r-poiln3">{}</span>
    </div>
</div>"#,
        label
    )
}

pub const LOADING_BODY: &str = "<span>Adding...</span>";

pub const ADDED_BODY: &str = r#"<svg viewBox="0 0 24 24" width="18" height="18" fill="currentColor">
    <path d="M9 16.17L4.83 12l-1.42 1.41L9 19 21 7l-1.41-1.41z"/>
</svg>
<span>Added!</span>"#;

/// Content for a trigger in the given state. `idle_body` is what the
/// element showed before the first attempt.
pub fn trigger_body(state: TriggerState, idle_body: &str) -> String {
    match state {
        TriggerState::Idle | TriggerState::Failed => idle_body.to_string(),
        TriggerState::Loading => LOADING_BODY.to_string(),
        TriggerState::Added => ADDED_BODY.to_string(),
    }
}

/// Extra class on the trigger for each state
pub fn trigger_class(state: TriggerState) -> Option<&'static str> {
    match state {
        TriggerState::Idle | TriggerState::Failed => None,
        TriggerState::Loading => Some("loading"),
        TriggerState::Added => Some("added"),
    }
}

pub fn notification_class(kind: NoticeKind) -> String {
    format!("{} {}", NOTIFICATION_CLASS, kind.as_str())
}

/// Inline styles for the toast; `visible` toggles the fade
pub fn notification_style(kind: NoticeKind, visible: bool) -> String {
    let background = match kind {
        NoticeKind::Info => "#1d9bf0",
        NoticeKind::Success => "#00ba7c",
        NoticeKind::Error => "#f4212e",
    };
    format!(
        "position: fixed; bottom: 24px; left: 50%; transform: translateX(-50%); z-index: 10000; \
         padding: 12px 20px; border-radius: 8px; color: white; font-size: 15px; font-weight: 600; \
         background: {}; transition: opacity 0.3s ease; opacity: {};",
        background,
        if visible { 1 } else { 0 }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_label() {
        assert_eq!(menu_label(false), "Add to Hot Content");
        assert_eq!(menu_label(true), "✓ Added to Hot Content");
    }

    #[test]
    fn test_menu_item_body_contains_label() {
        let body = menu_item_body(LABEL_ADD);
        assert!(body.contains(">Add to Hot Content</span>"));
        assert!(body.contains("<svg"));
    }

    #[test]
    fn test_menu_item_class_is_findable() {
        let class = menu_item_class();
        assert!(class.split_whitespace().any(|c| c == MENU_ITEM_CLASS));
    }

    #[test]
    fn test_trigger_body_by_state() {
        let idle = menu_item_body(LABEL_ADD);
        assert_eq!(trigger_body(TriggerState::Idle, &idle), idle);
        assert_eq!(trigger_body(TriggerState::Failed, &idle), idle);
        assert_eq!(trigger_body(TriggerState::Loading, &idle), LOADING_BODY);
        assert!(trigger_body(TriggerState::Added, &idle).contains("Added!"));
    }

    #[test]
    fn test_notification_markup() {
        assert_eq!(notification_class(NoticeKind::Error), "hot-content-notification error");
        assert!(notification_style(NoticeKind::Success, false).contains("opacity: 0;"));
        assert!(notification_style(NoticeKind::Success, true).contains("opacity: 1;"));
    }
}
