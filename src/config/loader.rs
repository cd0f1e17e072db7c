use super::TracerConfig;
use anyhow::{Context, Result, bail};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Names an explicit config file when `--config` is absent.
pub const CONFIG_ENV: &str = "ATTR_TRACERS_CONFIG";

impl TracerConfig {
    /// `~/.attr-tracers/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".attr-tracers").join("config.toml"))
    }

    /// Resolves the config file (`explicit`, then `ATTR_TRACERS_CONFIG`,
    /// then the default path), applies env overrides and validates.
    ///
    /// Only the default file may be missing; it then yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match named_path(explicit) {
            Some(path) => Self::load_from(&path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "config.default_missing");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// The file `load` would read, or `config init` would write.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match named_path(explicit) {
            Some(path) => Ok(path),
            None => Self::default_path(),
        }
    }

    /// Parses one file without env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file {} does not exist", path.display());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_str = self.to_toml()?;
        fs::write(path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        if self.abort.exit_code == 0 {
            bail!("abort.exit_code must be non-zero so an aborted run is distinguishable");
        }
        Ok(())
    }
}

fn named_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_env::ScopedEnv;
    use crate::config::{AbortAction, LogLevel};
    use crate::ui::MessageFormat;
    use tempfile::TempDir;

    #[test]
    fn load_from_reads_sections() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[prompt]\nformat = \"plain\"\n\n[abort]\naction = \"exit\"\nexit_code = 3\n",
        )
        .expect("write config");

        let config = TracerConfig::load_from(&path).expect("valid config");
        assert_eq!(config.prompt.format, MessageFormat::Plain);
        assert_eq!(config.abort.action, AbortAction::Exit);
        assert_eq!(config.abort.exit_code, 3);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let _env = ScopedEnv::lock().unset(CONFIG_ENV);
        let dir = TempDir::new().expect("tempdir");
        let err = TracerConfig::load(Some(&dir.path().join("absent.toml")))
            .expect_err("explicit path must exist");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn env_path_is_used_without_flag() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("env.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").expect("write config");
        let _env = ScopedEnv::lock()
            .set(CONFIG_ENV, path.to_str().expect("utf-8 path"))
            .unset("ATTR_TRACERS_LOG");

        let config = TracerConfig::load(None).expect("env config loads");
        assert_eq!(config.log.level, LogLevel::Debug);
    }

    #[test]
    fn flag_wins_over_env_path() {
        let _env = ScopedEnv::lock().set(CONFIG_ENV, "/from/env.toml");
        let flag = Path::new("/from/flag.toml");
        assert_eq!(
            TracerConfig::resolve_path(Some(flag)).expect("resolves"),
            flag.to_path_buf()
        );
        assert_eq!(
            TracerConfig::resolve_path(None).expect("resolves"),
            PathBuf::from("/from/env.toml")
        );
    }

    #[test]
    fn zero_exit_code_fails_validation() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[abort]\nexit_code = 0\n").expect("write config");
        let config = TracerConfig::load_from(&path).expect("parses");
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = TracerConfig::default();
        config.abort.exit_code = 42;
        config.save(&path).expect("save");

        let loaded = TracerConfig::load_from(&path).expect("load");
        assert_eq!(loaded.abort.exit_code, 42);
        assert_eq!(loaded.prompt, config.prompt);
    }
}
