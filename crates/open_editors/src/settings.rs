use std::time::Duration;

use anyhow::Context as _;
use gpui::{Pixels, px};
use serde::{Deserialize, Serialize};

/// Tuning knobs of an open editors view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenEditorsSettings {
    /// How often the list is re-read from the host regardless of events.
    pub poll_interval_ms: u64,
    /// Quiet period before an event-triggered refresh runs.
    pub debounce_ms: u64,
    pub drag_threshold: f32,
    /// Host action ids whose completion should refresh the list.
    pub refresh_on_actions: Vec<String>,
}

impl Default for OpenEditorsSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            debounce_ms: 50,
            drag_threshold: 5.,
            refresh_on_actions: vec![
                "PinActiveTab".into(),
                "PinActiveTabToggle".into(),
                "PinActiveEditorTab".into(),
            ],
        }
    }
}

impl OpenEditorsSettings {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid open editors settings")
    }

    /// Zero would make the poll loop spin, so it means "use the default".
    pub fn poll_interval(&self) -> Duration {
        match self.poll_interval_ms {
            0 => Duration::from_millis(Self::default().poll_interval_ms),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn drag_threshold(&self) -> Pixels {
        if self.drag_threshold.is_finite() && self.drag_threshold >= 0. {
            px(self.drag_threshold)
        } else {
            crate::drag::DRAG_THRESHOLD
        }
    }

    pub fn refreshes_on(&self, action_id: &str) -> bool {
        self.refresh_on_actions.iter().any(|id| id == action_id)
    }
}
