use attr_tracers::{TraceError, TracedAttribute, TracedClass, trace_scope, traced_set};

/// Showcase owner: `attr` is traced from the moment the widget exists.
pub struct Widget {
    attr: TracedAttribute<i64>,
}

impl Widget {
    /// Seeds `attr` with 0, then writes it three times: through
    /// `traced_set!`, through a plain `set`, and from [`Self::change_attr`].
    pub fn new(class: &mut TracedClass, last: i64) -> Result<Self, TraceError> {
        trace_scope!();
        let mut widget = Self {
            attr: class.trace::<i64>("attr")?.install(0),
        };

        let _ = traced_set!(widget.attr, 2)?;

        let _ = widget.attr.set(1)?;

        widget.change_attr(last)?;
        Ok(widget)
    }

    fn change_attr(&mut self, value: i64) -> Result<(), TraceError> {
        trace_scope!();
        let outcome = self.attr.set(value)?;
        tracing::debug!(%outcome, "demo.change_attr");
        Ok(())
    }

    pub fn attr(&self) -> i64 {
        self.attr.get()
    }
}

/// Builds the widget and returns the final visible value of `attr`.
pub fn run(class: &mut TracedClass, last: i64) -> Result<i64, TraceError> {
    Widget::new(class, last).map(|widget| widget.attr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attr_tracers::{Decision, ScriptedDecider};
    use std::sync::Arc;

    fn class(decider: &Arc<ScriptedDecider>) -> TracedClass {
        TracedClass::named("Widget").with_decider(decider.clone())
    }

    #[test]
    fn accepting_everything_keeps_last_value() {
        let decider = Arc::new(ScriptedDecider::from_inputs(["y", "y", "y"]));
        assert_eq!(run(&mut class(&decider), 7).expect("no abort"), 7);

        let seen = decider.seen();
        let functions: Vec<_> = seen.iter().map(|m| m.function_name.as_str()).collect();
        assert_eq!(functions, ["new", "new", "change_attr"]);
        assert_eq!(seen[0].source_text, "widget.attr = 2");
        assert_eq!(seen[2].old_value, "1");
    }

    #[test]
    fn dropping_last_write_keeps_previous() {
        let decider = Arc::new(ScriptedDecider::from_inputs(["y", "y", "d"]));
        assert_eq!(run(&mut class(&decider), 9).expect("no abort"), 1);
    }

    #[test]
    fn quitting_stops_remaining_writes() {
        let decider = Arc::new(ScriptedDecider::new([Decision::Abort]));
        let err = run(&mut class(&decider), 9).err().expect("abort propagates");
        assert!(err.is_abort());
        assert_eq!(decider.seen().len(), 1);
    }

    #[test]
    fn unanswered_writes_leave_seed() {
        let decider = Arc::new(ScriptedDecider::default());
        assert_eq!(run(&mut class(&decider), 3).expect("no abort"), 0);
        assert_eq!(decider.seen().len(), 3);
    }
}
