use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::command::CommandSpec;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub terminal: TerminalConfig,
    pub status: StatusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssistantConfig {
    /// Assistant command prefix, e.g. "claude". Per-action arguments are
    /// appended to it.
    pub command: Option<String>,
}

impl AssistantConfig {
    pub fn base_command(&self) -> &str {
        self.command.as_deref().unwrap_or(CommandSpec::DEFAULT_ASSISTANT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TerminalConfig {
    /// Preferred terminal program name, consulted before the built-in
    /// probe order.
    pub command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Re-poll cadence for `status --watch`.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("claude-menu").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get a config value by dot-separated key path
    pub fn get_value(&self, key: &str) -> Result<String> {
        match key {
            "assistant.command" => Ok(self.assistant.command.clone().unwrap_or_default()),
            "terminal.command" => Ok(self.terminal.command.clone().unwrap_or_default()),
            "status.poll_interval" => {
                Ok(humantime::format_duration(self.status.poll_interval).to_string())
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
    }

    /// Set a config value by dot-separated key path
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "assistant.command" => {
                self.assistant.command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "terminal.command" => {
                self.terminal.command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "status.poll_interval" => {
                self.status.poll_interval = humantime::parse_duration(value)
                    .with_context(|| format!("Invalid duration: {value}"))?;
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_tables() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.assistant.base_command(), "claude");
        assert!(config.terminal.command.is_none());
        assert_eq!(config.status.poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.assistant.command = Some("claude-dev".into());
        config.status.poll_interval = Duration::from_secs(5);

        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.assistant.base_command(), "claude-dev");
        assert_eq!(back.status.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn get_and_set_by_key() {
        let mut config = Config::default();
        config.set_value("terminal.command", "wezterm").unwrap();
        assert_eq!(config.get_value("terminal.command").unwrap(), "wezterm");

        config.set_value("status.poll_interval", "10s").unwrap();
        assert_eq!(config.get_value("status.poll_interval").unwrap(), "10s");

        config.set_value("terminal.command", "").unwrap();
        assert!(config.terminal.command.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = Config::default();
        assert!(config.get_value("nope").is_err());
        assert!(config.set_value("open.editor", "true").is_err());
        assert!(config.set_value("status.poll_interval", "soon").is_err());
    }
}
