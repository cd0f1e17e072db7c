use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::panic::Location;

/// Function name used when a write happens outside any registered frame.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Function name used by the locator when no frame was ever registered.
pub const TOP_LEVEL_FUNCTION: &str = "<top-level>";

/// Snapshot of where a write originated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub function: String,
    /// Literal text of the responsible statement; empty when unavailable.
    pub source: String,
}

impl CallSite {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        function: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
            source: source.into(),
        }
    }

    /// Builds a call site from a compiler-provided location, reading the
    /// statement text back from the source file when it is reachable.
    pub fn from_location(location: &Location<'_>, function: impl Into<String>) -> Self {
        let source = source_line(location.file(), location.line()).unwrap_or_default();
        Self::new(location.file(), location.line(), function, source)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.file, self.line, self.function)
    }
}

/// Reads line `line` (1-based) of `file`, trimmed.
///
/// Paths recorded by `file!()` are relative to the package root, so this
/// resolves when the binary runs from there (tests, `cargo run`).
pub fn source_line(file: &str, line: u32) -> Option<String> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    let contents = fs::read_to_string(file).ok()?;
    contents.lines().nth(index).map(|text| text.trim().to_string())
}

/// Reduces the type name of a marker fn nested in a function body to the
/// enclosing function's own name.
#[doc(hidden)]
pub fn function_name(type_name: &'static str) -> &'static str {
    let mut path = type_name.strip_suffix("::__here").unwrap_or(type_name);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Captures the current file, line and enclosing function name.
///
/// `call_site!()` leaves the source text empty; `call_site!(text)` records
/// `text` as the statement.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::call_site!("")
    };
    ($source:expr) => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::trace::CallSite::new(
            file!(),
            line!(),
            $crate::trace::call_site::function_name(__type_name_of(__here)),
            $source,
        )
    }};
}

/// Writes through a traced attribute, recording the statement literally.
///
/// `traced_set!(widget.attr, 5)` behaves like `widget.attr.set(5)` but the
/// call site carries the source text `widget.attr = 5`.
#[macro_export]
macro_rules! traced_set {
    ($target:expr, $value:expr $(,)?) => {
        $target.set_at(
            $value,
            $crate::call_site!(concat!(
                stringify!($target),
                " = ",
                stringify!($value)
            )),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_in_named_function() -> CallSite {
        crate::call_site!("lookup()")
    }

    #[test]
    fn macro_captures_enclosing_function() {
        let site = captured_in_named_function();
        assert_eq!(site.function, "captured_in_named_function");
        assert_eq!(site.source, "lookup()");
        assert!(site.file.ends_with("call_site.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn macro_inside_closure_reports_outer_function() {
        let capture = || crate::call_site!();
        let site = capture();
        assert_eq!(site.function, "macro_inside_closure_reports_outer_function");
        assert!(site.source.is_empty());
    }

    #[test]
    fn function_name_strips_marker_and_closures() {
        assert_eq!(function_name("app::demo::Widget::change_attr::__here"), "change_attr");
        assert_eq!(function_name("app::run::{{closure}}::{{closure}}::__here"), "run");
        assert_eq!(function_name("plain"), "plain");
    }

    #[test]
    fn from_location_reads_back_source_text() {
        let site = CallSite::from_location(Location::caller(), UNKNOWN_FUNCTION);
        assert!(site.file.ends_with("call_site.rs"));
        assert_eq!(site.function, UNKNOWN_FUNCTION);
        assert_eq!(
            site.source,
            "let site = CallSite::from_location(Location::caller(), UNKNOWN_FUNCTION);"
        );
    }

    #[test]
    fn source_line_missing_file_is_none() {
        assert!(source_line("does/not/exist.rs", 3).is_none());
        assert!(source_line("src/trace/call_site.rs", 0).is_none());
    }

    #[test]
    fn display_is_file_line_function() {
        let site = CallSite::new("src/lib.rs", 7, "main", "x = 1");
        assert_eq!(site.to_string(), "src/lib.rs:7 in main");
    }

    #[test]
    fn call_site_round_trips_through_json() {
        let site = CallSite::new("src/lib.rs", 7, "main", "x = 1");
        let json = serde_json::to_string(&site).expect("serialize call site");
        let decoded: CallSite = serde_json::from_str(&json).expect("deserialize call site");
        assert_eq!(site, decoded);
    }
}
