use super::TracerConfig;
use std::str::FromStr;

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_parse_valid(key, |_| true)
}

/// Parses `key`, warning about any non-empty value that fails to parse or
/// is rejected by `valid`.
fn env_parse_valid<T: FromStr>(key: &str, valid: impl Fn(&T) -> bool) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = raw.trim().parse().ok().filter(|value| valid(value));
    if parsed.is_none() && !raw.is_empty() {
        tracing::warn!(key, value = %raw, "ignoring invalid environment override");
    }
    parsed
}

impl TracerConfig {
    pub fn apply_env_overrides(&mut self) {
        if let Some(format) = env_parse("ATTR_TRACERS_FORMAT") {
            self.prompt.format = format;
        }

        if let Some(color) = env_parse("ATTR_TRACERS_COLOR") {
            self.prompt.color = color;
        }

        if let Some(policy) = env_parse("ATTR_TRACERS_ON_UNRECOGNIZED") {
            self.prompt.on_unrecognized = policy;
        }

        if let Some(action) = env_parse("ATTR_TRACERS_ABORT") {
            self.abort.action = action;
        }

        if let Some(code) = env_parse_valid("ATTR_TRACERS_EXIT_CODE", |code: &u8| *code != 0) {
            self.abort.exit_code = code;
        }

        if let Some(level) = env_parse("ATTR_TRACERS_LOG") {
            self.log.level = level;
        }
    }
}
