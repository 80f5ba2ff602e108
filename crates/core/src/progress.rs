//! Progress reporting for long-running searches.
//!
//! Progress state is process-wide: every media search resets the `search`
//! counter, so concurrent searches share (and race on) the same entry.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Named progress counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKey {
    Search,
}

/// Snapshot of one progress counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Whether the tracked operation is still running.
    pub active: bool,
    /// Completion percentage, 0-100.
    pub value: f32,
    /// Human-readable status line.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl ProgressState {
    fn started() -> Self {
        Self {
            active: true,
            value: 0.0,
            text: String::new(),
        }
    }
}

/// Sink for progress reports.
pub trait ProgressSink: Send + Sync {
    /// Reset the counter and mark it active.
    fn start(&self, key: ProgressKey);

    /// Report progress on an active counter.
    fn update(&self, key: ProgressKey, value: f32, text: &str);

    /// Mark the counter finished.
    fn end(&self, key: ProgressKey);
}

/// In-memory progress tracker.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    states: RwLock<HashMap<ProgressKey, ProgressState>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a counter, if it was ever started.
    pub fn get(&self, key: ProgressKey) -> Option<ProgressState> {
        self.states
            .read()
            .ok()
            .and_then(|states| states.get(&key).cloned())
    }
}

impl ProgressSink for ProgressTracker {
    fn start(&self, key: ProgressKey) {
        if let Ok(mut states) = self.states.write() {
            states.insert(key, ProgressState::started());
        }
    }

    fn update(&self, key: ProgressKey, value: f32, text: &str) {
        if let Ok(mut states) = self.states.write() {
            let state = states.entry(key).or_insert_with(ProgressState::started);
            state.value = value.clamp(0.0, 100.0);
            state.text = text.to_string();
        }
    }

    fn end(&self, key: ProgressKey) {
        if let Ok(mut states) = self.states.write() {
            if let Some(state) = states.get_mut(&key) {
                state.active = false;
                state.value = 100.0;
            }
        }
    }
}
