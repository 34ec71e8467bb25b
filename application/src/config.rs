//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::notification::Trigger;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Remote service configuration.
    #[serde(default)]
    pub remote: Remote,

    /// Validation configuration.
    #[serde(default)]
    pub validation: Validation,

    /// Notification configuration.
    #[serde(default)]
    pub notification: Notification,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Returns the [`service::Config`] described by this [`Config`].
    #[must_use]
    pub fn service(&self) -> service::Config {
        service::Config {
            timeout: self.remote.timeout,
            rules: self.validation.into(),
            notification: self.notification.into(),
        }
    }
}

/// Remote service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Remote {
    /// Base URL of the remote service.
    #[default("http://127.0.0.1:8080".to_owned())]
    pub base_url: String,

    /// Time limit of a single remote call.
    #[default(Some(time::Duration::from_secs(30)))]
    #[serde(with = "humantime_serde")]
    pub timeout: Option<time::Duration>,
}

/// Validation configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Validation {
    /// Whether contact details are checked for well-formedness.
    pub contact: bool,
}

impl From<Validation> for service::validation::Rules {
    fn from(value: Validation) -> Self {
        let Validation { contact } = value;
        Self { contact }
    }
}

/// Notification configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Notification {
    /// Delay before showing a notification.
    #[default(Trigger::DEFAULT_DELAY)]
    #[serde(with = "humantime_serde")]
    pub delay: time::Duration,
}

impl From<Notification> for Trigger {
    fn from(value: Notification) -> Self {
        Self::Delay(value.delay)
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
