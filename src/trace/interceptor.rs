use super::attribute::{OnAbort, TracedAttribute};
use super::hooks::{HookPolicy, PromptedWrite, ReadHook, ShadowRead, WriteHook};
use crate::config::TracerConfig;
use crate::decision::{ConsolePrompt, Decider};
use crate::error::TraceError;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Prefix that turns an attribute name into its shadow key.
pub const SHADOW_PREFIX: &str = "_";

#[must_use]
pub fn shadow_key(name: &str) -> String {
    format!("{SHADOW_PREFIX}{name}")
}

/// Instrumentation state of one owning type.
///
/// Tracks which attribute names are traced so shadow keys never collide,
/// and carries the decision source and abort policy handed to every
/// attribute it installs.
pub struct TracedClass {
    target: String,
    traced: BTreeSet<String>,
    decider: Arc<dyn Decider>,
    on_abort: OnAbort,
}

impl TracedClass {
    /// Class named after `O`'s short type name, prompting on stdio.
    pub fn of<O: ?Sized>() -> Self {
        Self::named(short_type_name(std::any::type_name::<O>()))
    }

    pub fn named(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            traced: BTreeSet::new(),
            decider: Arc::new(ConsolePrompt::stdio()),
            on_abort: OnAbort::default(),
        }
    }

    /// Interactive stdio class shaped by `config` (rendering, unrecognized
    /// input, abort policy).
    pub fn from_config(target: impl Into<String>, config: &TracerConfig) -> Self {
        let prompt = ConsolePrompt::stdio()
            .with_format(config.prompt.format)
            .with_unrecognized(config.prompt.on_unrecognized);
        Self::named(target)
            .with_decider(Arc::new(prompt))
            .with_on_abort(config.abort.on_abort())
    }

    #[must_use]
    pub fn with_decider(mut self, decider: Arc<dyn Decider>) -> Self {
        self.decider = decider;
        self
    }

    #[must_use]
    pub fn with_on_abort(mut self, on_abort: OnAbort) -> Self {
        self.on_abort = on_abort;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_traced(&self, name: &str) -> bool {
        self.traced.contains(name)
    }

    pub fn traced_names(&self) -> impl Iterator<Item = &str> {
        self.traced.iter().map(String::as_str)
    }

    /// Registers `name` for tracing and returns the builder that installs it.
    ///
    /// Tracing a name twice is allowed. A name that equals the shadow key of
    /// a traced attribute, or whose shadow key is a traced name, is rejected.
    pub fn trace<T>(&mut self, name: &str) -> Result<Interceptor<T>, TraceError> {
        validate_name(name)?;
        let key = shadow_key(name);

        if !self.traced.contains(name) {
            if self.traced.contains(&key) {
                return Err(self.collision(name, key));
            }
            if self.traced.iter().any(|traced| shadow_key(traced) == name) {
                return Err(self.collision(name, name.to_string()));
            }
            self.traced.insert(name.to_string());
        }

        tracing::debug!(
            target_repr = %self.target,
            attribute = name,
            shadow_key = %key,
            "trace.registered"
        );

        Ok(Interceptor {
            name: name.to_string(),
            shadow_key: key,
            target: self.target.clone(),
            decider: Arc::clone(&self.decider),
            on_abort: self.on_abort,
            read: None,
            write: None,
        })
    }

    fn collision(&self, name: &str, shadow_key: String) -> TraceError {
        TraceError::AttributeNameCollision {
            target: self.target.clone(),
            name: name.to_string(),
            shadow_key,
        }
    }
}

/// Builder for one traced attribute. Unset hooks fall back to shadow reads
/// and the prompted write.
pub struct Interceptor<T> {
    name: String,
    shadow_key: String,
    target: String,
    decider: Arc<dyn Decider>,
    on_abort: OnAbort,
    read: Option<Box<dyn ReadHook<T>>>,
    write: Option<Box<dyn WriteHook<T>>>,
}

impl<T> Interceptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shadow_key(&self) -> &str {
        &self.shadow_key
    }

    #[must_use]
    pub fn read_hook(mut self, hook: impl ReadHook<T> + 'static) -> Self {
        self.read = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn write_hook(mut self, hook: impl WriteHook<T> + 'static) -> Self {
        self.write = Some(Box::new(hook));
        self
    }

    /// Overrides the class-wide decision source for this attribute only.
    #[must_use]
    pub fn decider(mut self, decider: Arc<dyn Decider>) -> Self {
        self.decider = decider;
        self
    }

    #[must_use]
    pub fn on_abort(mut self, on_abort: OnAbort) -> Self {
        self.on_abort = on_abort;
        self
    }
}

impl<T: Clone + Debug> Interceptor<T> {
    /// Installs the attribute with `seed` as the shadow cell's first value.
    pub fn install(self, seed: T) -> TracedAttribute<T> {
        let Self {
            name,
            shadow_key,
            target,
            decider,
            on_abort,
            read,
            write,
        } = self;

        let hooks = HookPolicy {
            read: read.unwrap_or_else(|| Box::new(ShadowRead)),
            write: write.unwrap_or_else(|| Box::new(PromptedWrite::new(decider))),
        };

        tracing::debug!(
            target_repr = %target,
            attribute = %name,
            seed = ?seed,
            "trace.installed"
        );

        TracedAttribute::new(name, shadow_key, target, seed, hooks, on_abort)
    }

    /// Replaces the hooks of `previous`, reseeding from its visible value.
    /// The old hooks are discarded, never wrapped.
    pub fn reinstall(self, previous: TracedAttribute<T>) -> Result<TracedAttribute<T>, TraceError> {
        if previous.name() != self.name {
            return Err(TraceError::AttributeMismatch {
                expected: self.name,
                found: previous.name().to_string(),
            });
        }
        let seed = previous.get();
        Ok(self.install(seed))
    }
}

fn validate_name(name: &str) -> Result<(), TraceError> {
    let invalid = |reason| TraceError::InvalidAttributeName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name is empty"));
    };
    if !(first == '_' || first.is_alphabetic()) {
        return Err(invalid("name must start with a letter or underscore"));
    }
    if !chars.all(|c| c == '_' || c.is_alphanumeric()) {
        return Err(invalid("name may only contain letters, digits and underscores"));
    }
    Ok(())
}

/// `a::b::Widget<c::Item>` -> `Widget<c::Item>`.
fn short_type_name(full: &str) -> String {
    let (path, generics) = full.find('<').map_or((full, ""), |at| full.split_at(at));
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{base}{generics}")
}
