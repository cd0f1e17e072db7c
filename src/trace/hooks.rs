use super::call_site::CallSite;
use super::change::{Decision, PendingChange};
use crate::decision::Decider;
use std::fmt::Debug;
use std::sync::Arc;

/// Produces the visible value of a traced attribute.
///
/// Implementations may ignore `shadow` entirely, e.g. to expose a derived
/// value.
pub trait ReadHook<T>: Send + Sync {
    fn read(&self, shadow: &T) -> T;
}

impl<T, F> ReadHook<T> for F
where
    F: Fn(&T) -> T + Send + Sync,
{
    fn read(&self, shadow: &T) -> T {
        self(shadow)
    }
}

/// Governs whether and how a proposed value reaches the shadow cell.
pub trait WriteHook<T>: Send + Sync {
    fn write(&self, request: WriteRequest<'_, T>) -> Decision;
}

impl<T, F> WriteHook<T> for F
where
    F: Fn(WriteRequest<'_, T>) -> Decision + Send + Sync,
{
    fn write(&self, request: WriteRequest<'_, T>) -> Decision {
        self(request)
    }
}

/// One write attempt as seen by a [`WriteHook`].
///
/// The shadow cell only changes through [`commit`](Self::commit) or
/// [`commit_value`](Self::commit_value); both report [`Decision::Commit`].
pub struct WriteRequest<'a, T> {
    target: &'a str,
    attribute: &'a str,
    shadow: &'a mut T,
    proposed: T,
    call_site: &'a CallSite,
}

impl<'a, T> WriteRequest<'a, T> {
    pub(crate) fn new(
        target: &'a str,
        attribute: &'a str,
        shadow: &'a mut T,
        proposed: T,
        call_site: &'a CallSite,
    ) -> Self {
        Self {
            target,
            attribute,
            shadow,
            proposed,
            call_site,
        }
    }

    pub fn pending(&self) -> PendingChange<'_, T> {
        PendingChange {
            target: self.target,
            attribute: self.attribute,
            current: &*self.shadow,
            proposed: &self.proposed,
            call_site: self.call_site,
        }
    }

    pub fn current(&self) -> &T {
        &*self.shadow
    }

    pub fn proposed(&self) -> &T {
        &self.proposed
    }

    pub fn call_site(&self) -> &CallSite {
        self.call_site
    }

    pub fn commit(self) -> Decision {
        *self.shadow = self.proposed;
        Decision::Commit
    }

    /// Commits `value` in place of the proposed one.
    pub fn commit_value(self, value: T) -> Decision {
        *self.shadow = value;
        Decision::Commit
    }

    pub fn drop_change(self) -> Decision {
        Decision::Drop
    }

    pub fn abort(self) -> Decision {
        Decision::Abort
    }
}

/// Default read hook: a copy of the shadow value, no decision involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowRead;

impl<T: Clone> ReadHook<T> for ShadowRead {
    fn read(&self, shadow: &T) -> T {
        shadow.clone()
    }
}

/// Default write hook: asks a [`Decider`] and commits only on `Commit`.
#[derive(Clone)]
pub struct PromptedWrite {
    decider: Arc<dyn Decider>,
}

impl PromptedWrite {
    pub fn new(decider: Arc<dyn Decider>) -> Self {
        Self { decider }
    }
}

impl<T: Debug> WriteHook<T> for PromptedWrite {
    fn write(&self, request: WriteRequest<'_, T>) -> Decision {
        let message = request.pending().message();
        let decision = self.decider.decide(&message);
        tracing::debug!(
            decider = self.decider.name(),
            attribute = %message.attribute_name,
            %decision,
            "trace.write.prompted"
        );
        match decision {
            Decision::Commit => request.commit(),
            Decision::Drop => request.drop_change(),
            Decision::Abort => request.abort(),
        }
    }
}

/// The read/write pair bound to one traced attribute.
pub struct HookPolicy<T> {
    pub(crate) read: Box<dyn ReadHook<T>>,
    pub(crate) write: Box<dyn WriteHook<T>>,
}

impl<T> HookPolicy<T> {
    pub fn new(read: impl ReadHook<T> + 'static, write: impl WriteHook<T> + 'static) -> Self {
        Self {
            read: Box::new(read),
            write: Box::new(write),
        }
    }
}

impl<T: Clone + Debug> HookPolicy<T> {
    /// Shadow reads plus the full decision protocol.
    pub fn prompted(decider: Arc<dyn Decider>) -> Self {
        Self::new(ShadowRead, PromptedWrite::new(decider))
    }
}
