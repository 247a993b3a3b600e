//! Slugs and HTML attribute helpers.

use std::collections::BTreeMap;

use deunicode::deunicode;
use minijinja::HtmlEscape;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use easytag::value::display;

static UNSAFE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Turns a label into an identifier usable as an HTML id.
///
/// Non-ASCII text is transliterated, punctuation is dropped, and runs of
/// whitespace or hyphens become a single hyphen.
///
/// ```rust
/// use easytag_bootstrap::util::slugify;
///
/// assert_eq!(slugify("Crème Brûlée!"), "creme-brulee");
/// assert_eq!(slugify("  Tab -- two  "), "tab-two");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let cleaned = UNSAFE_RE.replace_all(&ascii, "");
    let joined = SEPARATOR_RE.replace_all(&cleaned, "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// A 1-based position from a template value.
///
/// Integers and integral floats count; anything else matches no position.
pub fn as_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Renders attributes as ` key="value"` pairs, sorted by key.
///
/// `true` renders the bare key; `false` and `null` leave the attribute out.
pub fn flatatt(attrs: &BTreeMap<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        match value {
            Value::Bool(true) => {
                out.push(' ');
                out.push_str(key);
            }
            Value::Bool(false) | Value::Null => {}
            other => {
                out.push_str(&format!(r#" {}="{}""#, key, HtmlEscape(&display(other))));
            }
        }
    }
    out
}

/// Keyword names to HTML attribute names: `data_toggle` becomes `data-toggle`.
pub fn data_attrs(extra: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    extra
        .iter()
        .map(|(key, value)| (key.replace('_', "-"), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Home"), "home");
        assert_eq!(slugify("My Profile"), "my-profile");
        assert_eq!(slugify("-_ edge _-"), "edge");
        assert_eq!(slugify("a_b c"), "a_b-c");
        assert_eq!(slugify("Ünïcödé"), "unicode");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_flatatt() {
        let attrs: BTreeMap<String, Value> = [
            ("data-target".to_string(), json!("#x")),
            ("data-n".to_string(), json!(2)),
            ("hidden".to_string(), json!(true)),
            ("disabled".to_string(), json!(false)),
            ("title".to_string(), json!("a \"b\" <c>")),
            ("none".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            flatatt(&attrs),
            r##" data-n="2" data-target="#x" hidden title="a &quot;b&quot; &lt;c&gt;""##
        );
        assert_eq!(flatatt(&BTreeMap::new()), "");
    }

    #[test]
    fn test_flatatt_escapes_values() {
        let attrs: BTreeMap<String, Value> =
            [("title".to_string(), json!("Tom & Jerry's"))].into_iter().collect();
        assert_eq!(flatatt(&attrs), r#" title="Tom &amp; Jerry&#x27;s""#);
    }

    #[test]
    fn test_as_index() {
        assert_eq!(as_index(&json!(2)), Some(2));
        assert_eq!(as_index(&json!(3.0)), Some(3));
        assert_eq!(as_index(&json!(2.5)), None);
        assert_eq!(as_index(&json!("2")), None);
        assert_eq!(as_index(&Value::Null), None);
    }

    #[test]
    fn test_data_attrs() {
        let extra: BTreeMap<String, Value> =
            [("data_toggle_me".to_string(), json!("x"))].into_iter().collect();
        let attrs = data_attrs(&extra);
        assert_eq!(attrs.keys().collect::<Vec<_>>(), ["data-toggle-me"]);
    }

    proptest! {
        #[test]
        fn slugs_are_url_safe(text in "\\PC{0,40}") {
            let slug = slugify(&text);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
