//! Weekly visit status

use serde::{Deserialize, Serialize};
use std::fmt;

const DONE_MARKER: &str = "تمت";
const POSTPONED_MARKER: &str = "مؤجل";

/// Weekly visit status of a customer.
///
/// The label is what gets stored locally, sent to the remote mirror and
/// written to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisitStatus {
    /// Not visited yet this week
    #[default]
    NotDone,
    /// Visited
    Done,
    /// Visit postponed
    Postponed,
}

impl VisitStatus {
    /// Every status, in display order
    pub const ALL: [Self; 3] = [Self::NotDone, Self::Done, Self::Postponed];

    /// Stored/display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotDone => "لم تتم",
            Self::Done => DONE_MARKER,
            Self::Postponed => POSTPONED_MARKER,
        }
    }

    /// Exact label lookup
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == label.trim())
    }

    /// Classify free text by marker containment.
    ///
    /// Text containing the "done" marker is `Done`, text containing the
    /// "postponed" marker is `Postponed`, anything else is `NotDone`.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        if text.contains(DONE_MARKER) {
            Self::Done
        } else if text.contains(POSTPONED_MARKER) {
            Self::Postponed
        } else {
            Self::NotDone
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for VisitStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value).unwrap_or_else(|| Self::classify(&value))
    }
}

impl From<VisitStatus> for String {
    fn from(value: VisitStatus) -> Self {
        value.label().to_string()
    }
}
