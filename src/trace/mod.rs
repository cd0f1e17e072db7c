pub mod attribute;
pub mod call_site;
pub mod change;
pub mod hooks;
pub mod interceptor;
pub mod locator;

pub use attribute::{OnAbort, TracedAttribute};
pub use call_site::CallSite;
pub use change::{ChangeMessage, Decision, PendingChange, WriteOutcome};
pub use hooks::{HookPolicy, PromptedWrite, ReadHook, ShadowRead, WriteHook, WriteRequest};
pub use interceptor::{Interceptor, SHADOW_PREFIX, TracedClass, shadow_key};
pub use locator::{FrameGuard, locate};
