use crate::decision::UnrecognizedInput;
use crate::trace::OnAbort;
use crate::ui::{ColorChoice, MessageFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Path the config was loaded from - not serialized
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub abort: AbortConfig,

    #[serde(default)]
    pub log: LogConfig,
}

// ── Prompt ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// "styled" (default), "plain" or "json"
    #[serde(default)]
    pub format: MessageFormat,
    /// "auto" (default), "always" or "never"
    #[serde(default)]
    pub color: ColorChoice,
    /// What an answer other than y/d/q does: "drop" (default) or "reprompt"
    #[serde(default)]
    pub on_unrecognized: UnrecognizedInput,
}

// ── Abort ─────────────────────────────────────────────────────────

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
pub enum AbortAction {
    /// Surface the abort as an error to the caller.
    #[default]
    Propagate,
    /// Terminate the process on the spot.
    Exit,
}

pub const DEFAULT_EXIT_CODE: u8 = 130;

fn default_exit_code() -> u8 {
    DEFAULT_EXIT_CODE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortConfig {
    #[serde(default)]
    pub action: AbortAction,
    /// Exit status for an aborted write, whichever action handles it
    #[serde(default = "default_exit_code")]
    pub exit_code: u8,
}

impl Default for AbortConfig {
    fn default() -> Self {
        Self {
            action: AbortAction::default(),
            exit_code: DEFAULT_EXIT_CODE,
        }
    }
}

impl AbortConfig {
    pub fn on_abort(&self) -> OnAbort {
        match self.action {
            AbortAction::Propagate => OnAbort::Propagate,
            AbortAction::Exit => OnAbort::Exit(self.exit_code),
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────

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
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}
