use crate::trace::CallSite;
use thiserror::Error;

// ─── Core error hierarchy ────────────────────────────────────────────────────

/// Errors surfaced by the tracing core.
///
/// Instrumentation-time variants propagate to the code building the traced
/// object. `Aborted` is the only per-write variant: it carries a user's `q`
/// decision up through every frame until a driver decides what it means.
#[derive(Debug, Error)]
pub enum TraceError {
    // ── Instrumentation ─────────────────────────────────────────────────
    #[error("invalid attribute name {name:?}: {reason}")]
    InvalidAttributeName { name: String, reason: &'static str },

    #[error("attribute {name:?} on {target} collides with reserved shadow key {shadow_key:?}")]
    AttributeNameCollision {
        target: String,
        name: String,
        shadow_key: String,
    },

    #[error("cannot reinstall tracing for {expected:?} over traced attribute {found:?}")]
    AttributeMismatch { expected: String, found: String },

    // ── Per-write ───────────────────────────────────────────────────────
    #[error("write to {attribute:?} aborted at {call_site}")]
    Aborted {
        attribute: String,
        call_site: CallSite,
    },
}

impl TraceError {
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}
