/// Manual submission path: URL detection and the popup form state
use std::future::Future;

use serde_json::Value;

use crate::post_link::{ManualInputError, PostLink, detect_post_page, find_post_url, parse_post_url};
use crate::submission::{SubmitError, SubmitPayload};

pub const LABEL_IDLE: &str = "Add to Collection";
pub const LABEL_DETECTED: &str = "⭐ Add This Tweet";
pub const LABEL_BUSY: &str = "Adding...";

pub const MSG_ADDED: &str = "✓ Added to collection!";
pub const MSG_FAILED: &str = "✗ Failed to add. Check your API endpoint.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    Page,
    Clipboard,
}

/// A post URL found without the user typing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub post: PostLink,
    pub source: DetectionSource,
}

impl Detection {
    pub fn hint(&self) -> &'static str {
        match self.source {
            DetectionSource::Page => "✓ Tweet detected! Click to add",
            DetectionSource::Clipboard => "✓ URL from clipboard! Click to add",
        }
    }
}

/// Find a post URL to pre-fill.
///
/// The active tab wins; the clipboard is only read when the tab is not a
/// single-post view. `read_clipboard` yields `None` when access is denied.
pub async fn detect<F, Fut>(tab_url: Option<String>, read_clipboard: F) -> Option<Detection>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<String>>,
{
    if let Some(post) = tab_url.as_deref().and_then(detect_post_page) {
        return Some(Detection {
            post,
            source: DetectionSource::Page,
        });
    }

    let text = read_clipboard().await?;
    find_post_url(&text).map(|post| Detection {
        post,
        source: DetectionSource::Clipboard,
    })
}

/// Status line under a form section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Error(String),
}

/// State of the popup's quick-add form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualForm {
    pub input: String,
    pub detected: Option<Detection>,
    pub busy: bool,
}

impl ManualForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_detection(&mut self, detection: Detection) {
        self.input = detection.post.canonical_url();
        self.detected = Some(detection);
    }

    pub fn button_label(&self) -> &'static str {
        if self.busy {
            LABEL_BUSY
        } else if self.detected.is_some() {
            LABEL_DETECTED
        } else {
            LABEL_IDLE
        }
    }

    /// Validate the input and mark the form busy.
    ///
    /// Validation failures leave the form untouched and must not lead to a
    /// request.
    pub fn begin(&mut self, date: String) -> Result<SubmitPayload, ManualInputError> {
        let post = parse_post_url(&self.input)?;
        self.busy = true;
        Ok(SubmitPayload::new(date, post.canonical_url()))
    }

    pub fn finish(&mut self, outcome: &Result<Value, SubmitError>) -> FormStatus {
        self.busy = false;
        self.detected = None;
        match outcome {
            Ok(_) => {
                self.input.clear();
                FormStatus::Success(MSG_ADDED.to_string())
            }
            Err(_) => FormStatus::Error(MSG_FAILED.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::classify_response;
    use std::cell::Cell;
    use std::future::ready;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    /// Drive a future that never actually suspends
    fn run_ready<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(output) => output,
            Poll::Pending => panic!("future was not ready"),
        }
    }

    #[test]
    fn test_detect_prefers_active_tab() {
        let clipboard_reads = Cell::new(0);
        let detection = run_ready(detect(Some("https://x.com/alice/status/12345?s=20".to_string()), || {
            clipboard_reads.set(clipboard_reads.get() + 1);
            ready(Some("https://x.com/bob/status/1".to_string()))
        }));

        let detection = detection.unwrap();
        assert_eq!(detection.source, DetectionSource::Page);
        assert_eq!(detection.post, PostLink::new("alice", "12345"));
        assert_eq!(clipboard_reads.get(), 0);
    }

    #[test]
    fn test_detect_falls_back_to_clipboard() {
        let detection = run_ready(detect(Some("https://x.com/home".to_string()), || {
            ready(Some("copied: https://twitter.com/bob/status/77 !".to_string()))
        }));

        let detection = detection.unwrap();
        assert_eq!(detection.source, DetectionSource::Clipboard);
        assert_eq!(detection.post.canonical_url(), "https://x.com/bob/status/77");
        assert_eq!(detection.hint(), "✓ URL from clipboard! Click to add");
    }

    #[test]
    fn test_detect_clipboard_denied() {
        assert_eq!(run_ready(detect(None, || ready(None))), None);
        assert_eq!(run_ready(detect(None, || ready(Some("hello".to_string())))), None);
    }

    #[test]
    fn test_labels() {
        let mut form = ManualForm::new();
        assert_eq!(form.button_label(), LABEL_IDLE);

        form.apply_detection(Detection {
            post: PostLink::new("alice", "1"),
            source: DetectionSource::Page,
        });
        assert_eq!(form.input, "https://x.com/alice/status/1");
        assert_eq!(form.button_label(), LABEL_DETECTED);

        form.busy = true;
        assert_eq!(form.button_label(), LABEL_BUSY);
    }

    #[test]
    fn test_bad_input_never_submits() {
        let mut form = ManualForm::new();
        form.input = "not-a-url".to_string();

        assert_eq!(form.begin("2024-03-07".to_string()), Err(ManualInputError::Invalid));
        assert!(!form.busy);

        form.input = "  ".to_string();
        let err = form.begin("2024-03-07".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a tweet URL");
    }

    #[test]
    fn test_successful_submission_clears_input() {
        let mut form = ManualForm::new();
        form.input = "https://twitter.com/alice/status/12345?s=20".to_string();

        let payload = form.begin("2024-03-07".to_string()).unwrap();
        assert_eq!(payload.urls, vec!["https://x.com/alice/status/12345".to_string()]);
        assert!(form.busy);

        let status = form.finish(&classify_response(200, r#"{"success":true}"#));
        assert_eq!(status, FormStatus::Success(MSG_ADDED.to_string()));
        assert!(form.input.is_empty());
        assert_eq!(form.button_label(), LABEL_IDLE);
    }

    #[test]
    fn test_server_error_restores_button() {
        let mut form = ManualForm::new();
        form.apply_detection(Detection {
            post: PostLink::new("alice", "12345"),
            source: DetectionSource::Clipboard,
        });

        form.begin("2024-03-07".to_string()).unwrap();
        assert_eq!(form.button_label(), LABEL_BUSY);

        let status = form.finish(&classify_response(500, "Internal Server Error"));
        assert_eq!(status, FormStatus::Error(MSG_FAILED.to_string()));
        assert_eq!(form.button_label(), "Add to Collection");
        assert_eq!(form.input, "https://x.com/alice/status/12345");
        assert!(!form.busy);
    }
}
