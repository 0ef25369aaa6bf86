/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::manual::FormStatus;

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    #[prop_or_default]
    pub status: Option<FormStatus>,
}

/// Result of the last action in a form section
#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match &props.status {
        Some(FormStatus::Success(message)) => html! {
            <div class="message-top-margin">
                <Alert r#type={AlertType::Success} title={message.clone()} inline={true}>
                </Alert>
            </div>
        },
        Some(FormStatus::Error(message)) => html! {
            <div class="message-top-margin">
                <Alert r#type={AlertType::Danger} title={message.clone()} inline={true}>
                </Alert>
            </div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct DetectedHintProps {
    pub text: AttrValue,
}

#[function_component(DetectedHint)]
pub fn detected_hint(props: &DetectedHintProps) -> Html {
    html! {
        <div class="url-detected-hint">{props.text.clone()}</div>
    }
}
