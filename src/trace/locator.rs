//! Explicit call-context stack.
//!
//! Functions that want to be named in a trace register a frame with
//! [`trace_scope!`](crate::trace_scope). [`locate`] then walks outward from the
//! innermost registered frame instead of inspecting the machine stack, so the
//! number of frames to skip is an argument rather than a hidden constant.

use super::call_site::{CallSite, TOP_LEVEL_FUNCTION, UNKNOWN_FUNCTION};
use std::cell::RefCell;
use std::fs;
use std::marker::PhantomData;
use std::panic::Location;

thread_local! {
    static FRAMES: RefCell<Vec<CallSite>> = const { RefCell::new(Vec::new()) };
}

/// Pops its frame (and anything pushed above it) when dropped.
#[must_use = "the frame is popped as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FrameGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| frames.borrow_mut().truncate(self.depth));
    }
}

/// Pushes `site` as the innermost frame of the current thread.
pub fn enter(site: CallSite) -> FrameGuard {
    FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        let depth = frames.len();
        frames.push(site);
        FrameGuard {
            depth,
            _not_send: PhantomData,
        }
    })
}

/// Number of frames registered on the current thread.
pub fn depth() -> usize {
    FRAMES.with(|frames| frames.borrow().len())
}

/// Function name of the innermost registered frame, provided `location`
/// lies in that frame's body.
///
/// The location must be in the frame's file, at or after its scope entry,
/// with no `fn` item declared in between. A write from an unscoped helper
/// therefore yields `None` rather than the name of its caller.
pub fn enclosing_function(location: &Location<'_>) -> Option<String> {
    FRAMES.with(|frames| {
        let frames = frames.borrow();
        let frame = frames.last()?;
        if frame.file != location.file() || frame.line > location.line() {
            return None;
        }
        if declares_fn_between(&frame.file, frame.line, location.line()) {
            return None;
        }
        Some(frame.function.clone())
    })
}

/// Whether any line in `(after, upto]` of `file` starts a `fn` item.
/// An unreadable file counts as no.
fn declares_fn_between(file: &str, after: u32, upto: u32) -> bool {
    let Ok(contents) = fs::read_to_string(file) else {
        return false;
    };
    contents
        .lines()
        .zip(1_u32..)
        .skip_while(|(_, number)| *number <= after)
        .take_while(|(_, number)| *number <= upto)
        .any(|(text, _)| starts_fn_item(text))
}

fn starts_fn_item(line: &str) -> bool {
    line.split_whitespace()
        .find(|word| {
            !matches!(*word, "const" | "async" | "unsafe" | "extern" | "\"C\"")
                && *word != "pub"
                && !word.starts_with("pub(")
        })
        .is_some_and(|word| word == "fn")
}

/// Resolves the call site `skip_frames` registered frames out.
///
/// `locate(0)` is the caller's own location (file, line and source text)
/// named after the innermost frame when the caller lies in its body, and
/// [`UNKNOWN_FUNCTION`] otherwise. For `skip_frames >= 1` the result is the
/// stored frame: its line is where that frame's `trace_scope!` ran, and it
/// carries no source text. Walking past the outermost frame yields the
/// outermost frame. With no registered frames the caller's location is
/// reported under [`TOP_LEVEL_FUNCTION`]. Never fails.
#[track_caller]
pub fn locate(skip_frames: usize) -> CallSite {
    let caller = Location::caller();
    if depth() == 0 {
        tracing::trace!(skip_frames, "locator.no_frames");
        return CallSite::from_location(caller, TOP_LEVEL_FUNCTION);
    }
    if skip_frames == 0 {
        let function = enclosing_function(caller).unwrap_or_else(|| UNKNOWN_FUNCTION.to_string());
        return CallSite::from_location(caller, function);
    }
    FRAMES.with(|frames| {
        let frames = frames.borrow();
        let index = frames
            .len()
            .checked_sub(skip_frames.saturating_add(1))
            .unwrap_or(0);
        frames
            .get(index)
            .cloned()
            .unwrap_or_else(|| CallSite::from_location(caller, TOP_LEVEL_FUNCTION))
    })
}

/// Registers the enclosing function as a frame until the end of the block.
#[macro_export]
macro_rules! trace_scope {
    () => {
        let _trace_frame = $crate::trace::locator::enter($crate::call_site!());
    };
}
