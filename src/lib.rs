#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod decision;
pub mod error;
#[doc(hidden)]
pub mod observability;
pub mod trace;
pub mod ui;

pub use config::TracerConfig;
pub use decision::{ConsolePrompt, Decider, FixedDecider, ScriptedDecider, UnrecognizedInput};
pub use error::TraceError;
pub use trace::{
    CallSite, ChangeMessage, Decision, Interceptor, OnAbort, TracedAttribute, TracedClass,
    WriteOutcome,
};
