use console::style;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Grey on dark grey: attribute names, targets and source text
pub fn code<D: Display>(text: D) -> String {
    style(text).color256(246).on_color256(236).to_string()
}

/// Light orange on dark grey: the value being replaced
pub fn old_value<D: Display>(text: D) -> String {
    style(text).color256(173).on_color256(236).to_string()
}

/// Orange on dark grey: the proposed value, file names
pub fn new_value<D: Display>(text: D) -> String {
    style(text).color256(208).on_color256(236).to_string()
}

/// Light orange: line numbers
pub fn line_number<D: Display>(text: D) -> String {
    style(text).color256(173).to_string()
}

/// Bold orange: the accept key
pub fn accept_key<D: Display>(text: D) -> String {
    style(text).color256(208).bold().to_string()
}

/// Bold muted rose: the drop key
pub fn drop_key<D: Display>(text: D) -> String {
    style(text).color256(138).bold().to_string()
}

/// Bold salmon: the quit key
pub fn quit_key<D: Display>(text: D) -> String {
    style(text).color256(210).bold().to_string()
}

/// When styled output is emitted.
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
pub enum ColorChoice {
    /// Colors when the stream is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Applies `choice` process-wide. `Auto` keeps the terminal detection of
/// the `console` crate.
pub fn apply_color_choice(choice: ColorChoice) {
    match choice {
        ColorChoice::Auto => {}
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
    }
}
