//! Scheduling handoff shown on the confirm step.

use serde::Serialize;

/// Load state of the embedded scheduling widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedStatus {
    #[default]
    Hidden,
    Loading,
    Ready,
}

/// The external scheduling widget. The host loads `url` and reports back
/// once it has rendered; that signal only clears the loading indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingEmbed {
    url: String,
    status: EmbedStatus,
}

impl SchedulingEmbed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: EmbedStatus::Hidden,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> EmbedStatus {
        self.status
    }

    /// Show the widget. No-op if it is already showing.
    pub fn open(&mut self) {
        if self.status == EmbedStatus::Hidden {
            self.status = EmbedStatus::Loading;
        }
    }

    /// Host reports the widget finished loading. Ignored while hidden.
    pub fn mark_ready(&mut self) -> bool {
        if self.status == EmbedStatus::Loading {
            self.status = EmbedStatus::Ready;
            true
        } else {
            false
        }
    }
}
