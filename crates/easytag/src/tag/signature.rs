//! Declared handler parameters.

use serde_json::Value;

/// One declared parameter of a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    default: Option<Value>,
}

impl Param {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value used when the template does not supply one.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The parameters a handler accepts from the template, in positional order.
///
/// The render context, the per-pass state and the content block are always
/// handed to the handler and are never part of the signature.
///
/// # Example
///
/// ```rust
/// use easytag::tag::Signature;
///
/// let sig = Signature::new()
///     .required("heading")
///     .optional("style", "default")
///     .extra_keywords();
///
/// assert_eq!(sig.params().len(), 2);
/// assert!(sig.accepts_extra_keywords());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
    extra_keywords: bool,
}

impl Signature {
    /// A signature with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter that the template must supply.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Adds a parameter with a default value.
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Accepts keyword arguments beyond the declared parameters.
    pub fn extra_keywords(mut self) -> Self {
        self.extra_keywords = true;
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn accepts_extra_keywords(&self) -> bool {
        self.extra_keywords
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_keep_declaration_order() {
        let sig = Signature::new()
            .required("id")
            .optional("active_panel", 1)
            .optional("use_title", false);

        let names: Vec<_> = sig.params().iter().map(Param::name).collect();
        assert_eq!(names, ["id", "active_panel", "use_title"]);
        assert_eq!(sig.position("use_title"), Some(2));
        assert_eq!(sig.position("nope"), None);
    }

    #[test]
    fn test_defaults() {
        let sig = Signature::new().required("label").optional("id", Value::Null);
        assert!(sig.params()[0].is_required());
        assert_eq!(sig.params()[1].default(), Some(&Value::Null));
        assert_eq!(
            Signature::new().optional("style", "default").params()[0].default(),
            Some(&json!("default"))
        );
    }
}
