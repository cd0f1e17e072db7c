mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
mod test_env;

pub use loader::CONFIG_ENV;
pub use schema::{
    AbortAction, AbortConfig, DEFAULT_EXIT_CODE, LogConfig, LogLevel, PromptConfig, TracerConfig,
};
