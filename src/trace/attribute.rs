use super::call_site::{CallSite, UNKNOWN_FUNCTION};
use super::change::{Decision, WriteOutcome};
use super::hooks::{HookPolicy, WriteRequest};
use super::locator;
use crate::error::TraceError;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

/// What an `Abort` decision does once the write hook returns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnAbort {
    /// Return [`TraceError::Aborted`] so the caller can unwind with `?`.
    #[default]
    Propagate,
    /// Exit the process immediately with this code.
    Exit(u8),
}

/// A traced attribute: the shadow cell plus its hook policy.
///
/// Built by [`Interceptor::install`](super::Interceptor::install) and stored
/// as a field of the owning struct in place of the plain value.
pub struct TracedAttribute<T> {
    name: String,
    shadow_key: String,
    target: String,
    shadow: T,
    hooks: HookPolicy<T>,
    on_abort: OnAbort,
}

impl<T> TracedAttribute<T> {
    pub(crate) fn new(
        name: String,
        shadow_key: String,
        target: String,
        seed: T,
        hooks: HookPolicy<T>,
        on_abort: OnAbort,
    ) -> Self {
        Self {
            name,
            shadow_key,
            target,
            shadow: seed,
            hooks,
            on_abort,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shadow_key(&self) -> &str {
        &self.shadow_key
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn on_abort(&self) -> OnAbort {
        self.on_abort
    }

    /// The visible value, as produced by the read hook.
    pub fn get(&self) -> T {
        self.hooks.read.read(&self.shadow)
    }

    /// The shadow cell's value, bypassing the read hook.
    pub fn committed(&self) -> &T {
        &self.shadow
    }

    pub fn into_committed(self) -> T {
        self.shadow
    }

    /// Proposes `value`. File, line and source text are the caller's; the
    /// function is the innermost `trace_scope!` frame when the caller lies in
    /// its body, `<unknown>` otherwise.
    #[track_caller]
    pub fn set(&mut self, value: T) -> Result<WriteOutcome, TraceError> {
        let caller = Location::caller();
        let function =
            locator::enclosing_function(caller).unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());
        let call_site = CallSite::from_location(caller, function);
        self.set_at(value, call_site)
    }

    /// Proposes `value` on behalf of the call site [`locator::locate`]
    /// resolves for `skip_frames`.
    #[track_caller]
    pub fn set_located(&mut self, value: T, skip_frames: usize) -> Result<WriteOutcome, TraceError> {
        let call_site = locator::locate(skip_frames);
        self.set_at(value, call_site)
    }

    /// Proposes `value` on behalf of an explicit call site.
    pub fn set_at(&mut self, value: T, call_site: CallSite) -> Result<WriteOutcome, TraceError> {
        let request = WriteRequest::new(
            &self.target,
            &self.name,
            &mut self.shadow,
            value,
            &call_site,
        );
        let decision = self.hooks.write.write(request);

        tracing::debug!(
            target_repr = %self.target,
            attribute = %self.name,
            decision = %decision,
            call_site = %call_site,
            "trace.write.decided"
        );

        match decision {
            Decision::Commit => Ok(WriteOutcome::Committed),
            Decision::Drop => Ok(WriteOutcome::Dropped),
            Decision::Abort => Err(self.abort(call_site)),
        }
    }

    fn abort(&self, call_site: CallSite) -> TraceError {
        match self.on_abort {
            OnAbort::Exit(code) => {
                tracing::warn!(
                    attribute = %self.name,
                    call_site = %call_site,
                    exit_code = code,
                    "write aborted; exiting"
                );
                let _ = io::stdout().flush();
                std::process::exit(i32::from(code));
            }
            OnAbort::Propagate => {
                tracing::info!(
                    attribute = %self.name,
                    call_site = %call_site,
                    "write aborted"
                );
                TraceError::Aborted {
                    attribute: self.name.clone(),
                    call_site,
                }
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TracedAttribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedAttribute")
            .field("name", &self.name)
            .field("shadow_key", &self.shadow_key)
            .field("target", &self.target)
            .field("shadow", &self.shadow)
            .field("on_abort", &self.on_abort)
            .finish_non_exhaustive()
    }
}
