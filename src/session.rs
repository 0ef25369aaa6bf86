/// Page-session state: what has been submitted and which posts are instrumented
use std::collections::HashSet;

use crate::config::Settings;

/// Identifiers submitted successfully during this page session.
/// Append-only: there is no un-submit.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRecord {
    ids: HashSet<String>,
}

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns false if the id was already recorded
    pub fn record(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Everything a content script needs for the lifetime of the page
#[derive(Debug, Clone)]
pub struct SessionState {
    pub endpoint: String,
    pub submitted: SubmissionRecord,
}

impl SessionState {
    pub fn new(settings: &Settings) -> Self {
        SessionState {
            endpoint: settings.endpoint(),
            submitted: SubmissionRecord::new(),
        }
    }
}

/// Side table of trigger elements that already carry our click listener.
///
/// Entries are keyed by handle identity, so two live copies of the same
/// post are both instrumented. `prune` drops handles that left the page.
#[derive(Debug)]
pub struct WatchRegistry<H> {
    watched: Vec<H>,
}

impl<H: PartialEq + Clone> WatchRegistry<H> {
    pub fn new() -> Self {
        WatchRegistry { watched: Vec::new() }
    }

    /// Forget handles that are no longer live. Returns how many were dropped.
    pub fn prune(&mut self, is_live: impl Fn(&H) -> bool) -> usize {
        let before = self.watched.len();
        self.watched.retain(|handle| is_live(handle));
        before - self.watched.len()
    }

    /// Returns true when `handle` was not watched yet and the caller should
    /// attach a listener to it. Repeated claims of one handle return false.
    pub fn claim(&mut self, handle: &H) -> bool {
        if self.is_watched(handle) {
            return false;
        }
        self.watched.push(handle.clone());
        true
    }

    pub fn is_watched(&self, handle: &H) -> bool {
        self.watched.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }
}

impl<H: PartialEq + Clone> Default for WatchRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
