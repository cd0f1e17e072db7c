pub mod console;

pub use console::ConsolePrompt;

use crate::trace::{ChangeMessage, Decision};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Resolves a pending change to exactly one [`Decision`].
///
/// Sources are interchangeable: interactive prompts, scripted replays and
/// test doubles all sit behind this trait.
pub trait Decider: Send + Sync {
    fn decide(&self, message: &ChangeMessage) -> Decision;

    fn name(&self) -> &str {
        "decider"
    }
}

impl<F> Decider for F
where
    F: Fn(&ChangeMessage) -> Decision + Send + Sync,
{
    fn decide(&self, message: &ChangeMessage) -> Decision {
        self(message)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// What to do with input that is not one of `y`, `d` or `q`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UnrecognizedInput {
    /// Resolve to `Drop` without asking again.
    #[default]
    Drop,
    /// Print a hint and read another line.
    Reprompt,
}

/// Maps one line of user input to a decision, ignoring case and surrounding
/// whitespace. Returns `None` for anything unrecognized, including empty
/// input.
#[must_use]
pub fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" => Some(Decision::Commit),
        "d" => Some(Decision::Drop),
        "q" => Some(Decision::Abort),
        _ => None,
    }
}

/// Always answers with the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecider {
    decision: Decision,
}

impl FixedDecider {
    pub const fn new(decision: Decision) -> Self {
        Self { decision }
    }

    pub const fn commit_all() -> Self {
        Self::new(Decision::Commit)
    }

    pub const fn drop_all() -> Self {
        Self::new(Decision::Drop)
    }
}

impl Decider for FixedDecider {
    fn decide(&self, message: &ChangeMessage) -> Decision {
        tracing::debug!(
            attribute = %message.attribute_name,
            decision = %self.decision,
            "decision.fixed"
        );
        self.decision
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Replays a queue of decisions and keeps every message it was shown.
///
/// Once the queue runs dry every further change is dropped.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    queue: VecDeque<Decision>,
    seen: Vec<ChangeMessage>,
}

impl ScriptedDecider {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            state: Mutex::new(ScriptState {
                queue: decisions.into_iter().collect(),
                seen: Vec::new(),
            }),
        }
    }

    /// Scripts raw input lines, mapped the way the console prompt maps them
    /// with the default `drop` policy.
    pub fn from_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            inputs
                .into_iter()
                .map(|line| parse_decision(line.as_ref()).unwrap_or(Decision::Drop)),
        )
    }

    pub fn remaining(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn seen(&self) -> Vec<ChangeMessage> {
        self.lock().seen.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Decider for ScriptedDecider {
    fn decide(&self, message: &ChangeMessage) -> Decision {
        let mut state = self.lock();
        state.seen.push(message.clone());
        state.queue.pop_front().unwrap_or_else(|| {
            tracing::debug!(
                attribute = %message.attribute_name,
                "decision.script_exhausted"
            );
            Decision::Drop
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
