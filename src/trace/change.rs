use super::call_site::CallSite;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Resolved outcome of one pending write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Decision {
    Commit,
    Drop,
    Abort,
}

/// Result of a write that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[must_use]
pub enum WriteOutcome {
    Committed,
    Dropped,
}

impl WriteOutcome {
    pub fn is_committed(self) -> bool {
        self == Self::Committed
    }
}

/// A write waiting for its decision.
#[derive(Debug, Clone, Copy)]
pub struct PendingChange<'a, T> {
    pub target: &'a str,
    pub attribute: &'a str,
    pub current: &'a T,
    pub proposed: &'a T,
    pub call_site: &'a CallSite,
}

impl<T: Debug> PendingChange<'_, T> {
    /// Flattens the change into the record handed to decision sources and
    /// renderers.
    pub fn message(&self) -> ChangeMessage {
        ChangeMessage {
            target_repr: self.target.to_string(),
            attribute_name: self.attribute.to_string(),
            old_value: format!("{:?}", self.current),
            new_value: format!("{:?}", self.proposed),
            filename: self.call_site.file.clone(),
            line_number: self.call_site.line,
            function_name: self.call_site.function.clone(),
            source_text: self.call_site.source.clone(),
        }
    }
}

/// Message record describing a pending change, values already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeMessage {
    pub target_repr: String,
    pub attribute_name: String,
    pub old_value: String,
    pub new_value: String,
    pub filename: String,
    pub line_number: u32,
    pub function_name: String,
    pub source_text: String,
}
