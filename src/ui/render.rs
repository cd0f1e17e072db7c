use super::style;
use crate::trace::ChangeMessage;
use serde::{Deserialize, Serialize};

/// How a change message is linearized for the output channel.
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
pub enum MessageFormat {
    /// Colored text; degrades to plain text when colors are disabled.
    #[default]
    Styled,
    Plain,
    /// One JSON object per message.
    Json,
}

/// Renders `message`. Pure formatting: no decision logic lives here.
pub fn render_message(message: &ChangeMessage, format: MessageFormat) -> String {
    match format {
        MessageFormat::Styled => styled(message),
        MessageFormat::Plain => console::strip_ansi_codes(&styled(message)).into_owned(),
        MessageFormat::Json => serde_json::to_string(message).unwrap_or_default(),
    }
}

fn styled(message: &ChangeMessage) -> String {
    let source = if message.source_text.is_empty() {
        "<unavailable>"
    } else {
        message.source_text.as_str()
    };

    format!(
        "\nAttribute {} of {} changing from {} to {}!\n\
         Set by: {}:{} in method {}\n\
         Code: {}\n\
         Press {} to accept changes, {} to drop changes and {} to quit.",
        style::code(&message.attribute_name),
        style::code(&message.target_repr),
        style::old_value(&message.old_value),
        style::new_value(&message.new_value),
        style::new_value(&message.filename),
        style::line_number(message.line_number),
        style::code(&message.function_name),
        style::code(source),
        style::accept_key("Y"),
        style::drop_key("D"),
        style::quit_key("Q"),
    )
}
