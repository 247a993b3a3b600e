//! Error types for the Bootstrap widgets.

use easytag::ConfigError;
use thiserror::Error;

/// The style profile could not be determined.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No profile was configured.
    #[error("BOOTSTRAP_TEMPLATETAGS_STYLE is unset; please use 'bootstrap2' or 'bootstrap3'")]
    Unset,

    /// The configured profile is not one we ship fragments for.
    #[error("unknown style '{0}'; please use 'bootstrap2' or 'bootstrap3'")]
    InvalidStyle(String),

    /// A settings document failed to parse.
    #[error("invalid settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Any error raised while setting up the widget library.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
