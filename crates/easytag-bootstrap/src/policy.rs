//! Guards for options that only exist in some Bootstrap generations.

use easytag::PolicyViolation;
use serde_json::Value;

use crate::settings::{Settings, Style};

/// An option as the template supplied it, next to its untouched default.
#[derive(Debug, Clone, Copy)]
pub struct UsedOption<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    pub default: &'a Value,
}

impl<'a> UsedOption<'a> {
    pub fn new(name: &'a str, value: &'a Value, default: &'a Value) -> Self {
        Self {
            name,
            value,
            default,
        }
    }
}

/// Fails when the active profile is `profile` and any option left its default.
///
/// The first offending option, in the order given, is reported.
pub fn stop_unsupported_use(
    tag: &str,
    settings: &Settings,
    profile: Style,
    options: &[UsedOption<'_>],
) -> Result<(), PolicyViolation> {
    if settings.style != profile {
        return Ok(());
    }

    match options.iter().find(|opt| opt.value != opt.default) {
        Some(opt) => Err(PolicyViolation {
            tag: tag.to_string(),
            option: opt.name.to_string(),
            profile: profile.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BS2: Settings = Settings {
        style: Style::Bootstrap2,
    };
    const BS3: Settings = Settings {
        style: Style::Bootstrap3,
    };

    #[test]
    fn test_defaults_always_pass() {
        let style = json!("default");
        let options = [UsedOption::new("style", &style, &style)];
        assert!(stop_unsupported_use("acc", &BS2, Style::Bootstrap2, &options).is_ok());
    }

    #[test]
    fn test_other_profile_passes() {
        let used = json!("primary");
        let default = json!("default");
        let options = [UsedOption::new("style", &used, &default)];
        assert!(stop_unsupported_use("acc", &BS3, Style::Bootstrap2, &options).is_ok());
    }

    #[test]
    fn test_first_changed_option_is_reported() {
        let (style, style_default) = (json!("default"), json!("default"));
        let (title, title_default) = (json!("h3"), json!(false));
        let options = [
            UsedOption::new("style", &style, &style_default),
            UsedOption::new("use_title", &title, &title_default),
        ];

        let err = stop_unsupported_use("bootstrap_accordion", &BS2, Style::Bootstrap2, &options)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "bootstrap_accordion's 'use_title' option not available for bootstrap2"
        );
    }
}
