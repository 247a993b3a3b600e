//! Which Bootstrap generation the widgets render for.
//!
//! The profile is process-wide: it picks the fragment directory and decides
//! which widget options are allowed. It can come from the environment or from
//! a YAML document:
//!
//! ```yaml
//! style: bootstrap3
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Environment variable holding the style profile.
pub const STYLE_ENV: &str = "BOOTSTRAP_TEMPLATETAGS_STYLE";

/// A Bootstrap generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Bootstrap2,
    Bootstrap3,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Bootstrap2 => "bootstrap2",
            Style::Bootstrap3 => "bootstrap3",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bootstrap2" => Ok(Style::Bootstrap2),
            "bootstrap3" => Ok(Style::Bootstrap3),
            other => Err(SettingsError::InvalidStyle(other.to_string())),
        }
    }
}

/// Widget settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub style: Style,
}

impl Settings {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Reads the profile from [`STYLE_ENV`].
    pub fn from_env() -> Result<Self, SettingsError> {
        let raw = env::var(STYLE_ENV).map_err(|_| SettingsError::Unset)?;
        Ok(Self::new(raw.parse()?))
    }

    /// Parses settings from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_style_names() {
        assert_eq!("bootstrap2".parse::<Style>().unwrap(), Style::Bootstrap2);
        assert_eq!(" bootstrap3 ".parse::<Style>().unwrap(), Style::Bootstrap3);
        assert_eq!(Style::Bootstrap3.to_string(), "bootstrap3");
        assert!(matches!(
            "bootstrap4".parse::<Style>(),
            Err(SettingsError::InvalidStyle(ref s)) if s == "bootstrap4"
        ));
    }

    #[test]
    fn test_from_yaml() {
        let settings = Settings::from_yaml("style: bootstrap2\n").unwrap();
        assert_eq!(settings.style, Style::Bootstrap2);

        assert!(matches!(
            Settings::from_yaml("style: foundation\n"),
            Err(SettingsError::Yaml(_))
        ));
        assert!(matches!(Settings::from_yaml("{}"), Err(SettingsError::Yaml(_))));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var(STYLE_ENV, "bootstrap3");
        assert_eq!(Settings::from_env().unwrap().style, Style::Bootstrap3);

        env::set_var(STYLE_ENV, "bootstrap9");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::InvalidStyle(_))
        ));

        env::remove_var(STYLE_ENV);
        let err = Settings::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "BOOTSTRAP_TEMPLATETAGS_STYLE is unset; please use 'bootstrap2' or 'bootstrap3'"
        );
    }
}
