/// Submission Controller: request payload, response handling and the
/// per-trigger state machine
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::post_link::PostLink;
use crate::session::SubmissionRecord;

pub const MSG_ALREADY_ADDED: &str = "Already added to collection";
pub const MSG_ADDED: &str = "✓ Added to hot content!";
pub const MSG_FAILED: &str = "✗ Failed to add. Please try again.";

/// Body of the collection API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub date: String,
    pub urls: Vec<String>,
}

impl SubmitPayload {
    pub fn new(date: impl Into<String>, url: impl Into<String>) -> Self {
        SubmitPayload {
            date: date.into(),
            urls: vec![url.into()],
        }
    }

    /// JSON request body
    pub fn to_body(&self) -> Result<String, SubmitError> {
        serde_json::to_string(self).map_err(|e| SubmitError::Encode(e.to_string()))
    }
}

/// Why a submission did not succeed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    #[error("response body is not JSON: {0}")]
    Body(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Network(String),
}

/// Format a calendar date as `YYYY-MM-DD`.
///
/// `month_index` is zero-based, as returned by `Date.getMonth()`.
pub fn calendar_date(year: u32, month_index: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month_index + 1, day)
}

/// Decide whether an API response counts as success: a 2xx status and a
/// body that parses as JSON.
pub fn classify_response(status: u16, body: &str) -> Result<Value, SubmitError> {
    if !(200..300).contains(&status) {
        return Err(SubmitError::Status {
            status,
            body: body.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| SubmitError::Body(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub const fn new(kind: NoticeKind, message: &'static str) -> Self {
        Notice { kind, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Loading,
    /// Terminal: the element stays disabled
    Added,
    /// Last attempt failed; shows the original content and accepts a retry
    Failed,
}

/// Result of activating a trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Disabled (in flight or already added here): nothing happens
    Ignored,
    /// The post was submitted earlier in this session; no request is made
    AlreadySubmitted(Notice),
    /// Send this payload, then call `Trigger::settle` with the outcome
    Submit(SubmitPayload),
}

/// An interactive control bound to one post
#[derive(Debug, Clone)]
pub struct Trigger {
    post: PostLink,
    state: TriggerState,
}

impl Trigger {
    pub fn new(post: PostLink) -> Self {
        Trigger {
            post,
            state: TriggerState::Idle,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, TriggerState::Loading | TriggerState::Added)
    }

    pub fn activate(&mut self, record: &SubmissionRecord, date: String) -> Activation {
        if self.is_disabled() {
            return Activation::Ignored;
        }

        if record.contains(&self.post.id) {
            return Activation::AlreadySubmitted(Notice::new(NoticeKind::Info, MSG_ALREADY_ADDED));
        }

        self.state = TriggerState::Loading;
        Activation::Submit(SubmitPayload::new(date, self.post.canonical_url()))
    }

    /// Apply the outcome of the request started by `activate`
    pub fn settle(&mut self, record: &mut SubmissionRecord, outcome: &Result<Value, SubmitError>) -> Notice {
        if self.state != TriggerState::Loading {
            log::warn!("Settling trigger for {} outside of a request", self.post.id);
        }

        match outcome {
            Ok(_) => {
                record.record(self.post.id.clone());
                self.state = TriggerState::Added;
                Notice::new(NoticeKind::Success, MSG_ADDED)
            }
            Err(_) => {
                self.state = TriggerState::Failed;
                Notice::new(NoticeKind::Error, MSG_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_trigger() -> Trigger {
        Trigger::new(PostLink::new("alice", "12345"))
    }

    fn submit_payload(activation: Activation) -> SubmitPayload {
        match activation {
            Activation::Submit(payload) => payload,
            other => panic!("expected a submission, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_date_padding() {
        assert_eq!(calendar_date(2024, 2, 7), "2024-03-07");
        assert_eq!(calendar_date(2024, 11, 31), "2024-12-31");
        assert_eq!(calendar_date(2025, 0, 1), "2025-01-01");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = SubmitPayload::new("2024-03-07", "https://x.com/alice/status/12345");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-07","urls":["https://x.com/alice/status/12345"]}"#
        );
    }

    #[test]
    fn test_payload_body() {
        let payload = SubmitPayload::new("2024-03-07", "https://x.com/alice/status/12345");
        assert_eq!(payload.to_body(), Ok(serde_json::to_string(&payload).unwrap()));
    }

    #[test]
    fn test_error_messages_name_the_cause() {
        let encode = SubmitError::Encode("key must be a string".to_string());
        assert_eq!(encode.to_string(), "could not encode request: key must be a string");

        let network = SubmitError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(network.to_string(), "request failed: TypeError: Failed to fetch");
        assert_ne!(encode, SubmitError::Network("key must be a string".to_string()));
    }

    #[test]
    fn test_classify_response() {
        assert!(classify_response(200, r#"{"ok":true}"#).is_ok());
        assert!(classify_response(201, "[]").is_ok());

        assert_eq!(
            classify_response(500, "boom"),
            Err(SubmitError::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
        assert!(matches!(classify_response(200, "<html>"), Err(SubmitError::Body(_))));
        assert!(matches!(classify_response(204, ""), Err(SubmitError::Body(_))));
        assert!(matches!(classify_response(302, "{}"), Err(SubmitError::Status { .. })));
    }

    #[test]
    fn test_activate_starts_loading() {
        let record = SubmissionRecord::new();
        let mut trigger = alice_trigger();

        let payload = submit_payload(trigger.activate(&record, "2024-03-07".to_string()));

        assert_eq!(payload.date, "2024-03-07");
        assert_eq!(payload.urls, vec!["https://x.com/alice/status/12345".to_string()]);
        assert_eq!(trigger.state(), TriggerState::Loading);
        assert!(trigger.is_disabled());
    }

    #[test]
    fn test_second_activation_while_loading_is_ignored() {
        let record = SubmissionRecord::new();
        let mut trigger = alice_trigger();

        submit_payload(trigger.activate(&record, "2024-03-07".to_string()));
        assert_eq!(trigger.activate(&record, "2024-03-07".to_string()), Activation::Ignored);
        assert_eq!(trigger.state(), TriggerState::Loading);
    }

    #[test]
    fn test_recorded_post_is_not_resubmitted() {
        let mut record = SubmissionRecord::new();
        record.record("12345");
        let mut trigger = alice_trigger();

        let activation = trigger.activate(&record, "2024-03-07".to_string());

        assert_eq!(
            activation,
            Activation::AlreadySubmitted(Notice::new(NoticeKind::Info, MSG_ALREADY_ADDED))
        );
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn test_success_records_and_locks() {
        let mut record = SubmissionRecord::new();
        let mut trigger = alice_trigger();
        submit_payload(trigger.activate(&record, "2024-03-07".to_string()));

        let notice = trigger.settle(&mut record, &classify_response(200, "{}"));

        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(trigger.state(), TriggerState::Added);
        assert!(record.contains("12345"));
        assert_eq!(trigger.activate(&record, "2024-03-07".to_string()), Activation::Ignored);
    }

    #[test]
    fn test_failure_allows_retry() {
        let mut record = SubmissionRecord::new();
        let mut trigger = alice_trigger();
        submit_payload(trigger.activate(&record, "2024-03-07".to_string()));

        let notice = trigger.settle(&mut record, &classify_response(500, "down"));

        assert_eq!(notice, Notice::new(NoticeKind::Error, MSG_FAILED));
        assert_eq!(trigger.state(), TriggerState::Failed);
        assert!(!trigger.is_disabled());
        assert!(record.is_empty());

        submit_payload(trigger.activate(&record, "2024-03-08".to_string()));
        let notice = trigger.settle(&mut record, &Err(SubmitError::Network("offline".to_string())));
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(record.is_empty());
    }

    #[test]
    fn test_menu_path_scenario() {
        let mut record = SubmissionRecord::new();
        let post = PostLink::from_href("/alice/status/12345").unwrap();
        let mut trigger = Trigger::new(post);

        let payload = submit_payload(trigger.activate(&record, calendar_date(2024, 2, 7)));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "date": "2024-03-07",
                "urls": ["https://x.com/alice/status/12345"]
            })
        );

        trigger.settle(&mut record, &classify_response(200, r#"{"added":1}"#));
        assert_eq!(trigger.state(), TriggerState::Added);
        assert!(record.contains("12345"));

        // A fresh menu for the same post must not send another request
        let mut reopened = Trigger::new(PostLink::new("alice", "12345"));
        assert!(matches!(
            reopened.activate(&record, calendar_date(2024, 2, 7)),
            Activation::AlreadySubmitted(_)
        ));
    }
}
