//! Error types for tag definition, compilation and rendering.
//!
//! Errors are split by the phase that raises them, so callers can tell a
//! broken tag definition from a broken document or a failing render:
//!
//! - [`ConfigError`]: a tag definition is incomplete. Raised when the
//!   definition is built, before any document is compiled.
//! - [`CompileError`]: a document is malformed (unexpected marker, unclosed
//!   tag, wrong arguments). Raised while compiling, before rendering starts.
//! - [`RenderError`]: a handler or a variable lookup failed while rendering.
//!   Propagated unchanged to the caller.
//!
//! [`Error`] wraps all three for APIs that span phases.

use thiserror::Error;

/// A tag definition is missing something it needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The definition never declared a tag name.
    #[error("tag definition must declare a name")]
    MissingName,

    /// A marker is declared (opening or intermediate) but has no handler.
    #[error("'{tag}' declares marker '{marker}' but has no handler for it")]
    MissingHandler { tag: String, marker: String },

    /// Two handlers were registered for the same marker.
    #[error("'{tag}' registers more than one handler for '{marker}'")]
    DuplicateHandler { tag: String, marker: String },
}

/// A document could not be compiled.
///
/// Every variant carries the 1-based line of the offending markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// `{% %}` with nothing inside.
    #[error("line {line}: empty block tag")]
    EmptyTag { line: usize },

    /// `{{ }}` with nothing usable inside.
    #[error("line {line}: invalid variable '{text}'")]
    InvalidVariable { text: String, line: usize },

    /// A block tag that no registered tag knows about.
    #[error("line {line}: invalid block tag '{name}'{}", expected_suffix(.expected))]
    InvalidBlockTag {
        name: String,
        expected: Vec<String>,
        line: usize,
    },

    /// A marker the tag does not declare turned up between its markers.
    #[error("line {line}: '{tag}' did not expect marker '{marker}'")]
    UnexpectedMarker {
        tag: String,
        marker: String,
        line: usize,
    },

    /// The document ended before the tag's end marker.
    #[error("line {line}: unclosed tag '{tag}', expected '{expected}'")]
    Unclosed {
        tag: String,
        expected: String,
        line: usize,
    },

    /// A keyword argument that the handler does not declare.
    #[error("line {line}: '{tag}' received unexpected keyword argument '{param}'")]
    UnexpectedKeyword {
        tag: String,
        param: String,
        line: usize,
    },

    /// The same parameter was supplied twice.
    #[error("line {line}: '{tag}' received multiple values for keyword argument '{param}'")]
    MultipleValues {
        tag: String,
        param: String,
        line: usize,
    },

    /// A positional argument followed a keyword argument.
    #[error(
        "line {line}: '{tag}' received some positional argument(s) after some keyword argument(s)"
    )]
    PositionalAfterKeyword { tag: String, line: usize },

    /// More positional arguments than declared parameters.
    #[error("line {line}: '{tag}' received too many positional arguments")]
    TooManyPositional { tag: String, line: usize },

    /// Parameters without defaults that received no value.
    #[error("line {line}: '{tag}' did not receive value(s) for the argument(s): {missing}")]
    MissingArguments {
        tag: String,
        missing: String,
        line: usize,
    },

    /// An argument that is neither a literal nor a variable reference.
    #[error("line {line}: '{tag}' received malformed argument '{bit}'")]
    MalformedArgument {
        tag: String,
        bit: String,
        line: usize,
    },
}

fn expected_suffix(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected one of: {}", expected.join(", "))
    }
}

/// A tag option was used under a style profile that does not support it.
///
/// This depends on process-wide configuration rather than document structure,
/// so it is reported at render time, separately from [`CompileError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{tag}'s '{option}' option not available for {profile}")]
pub struct PolicyViolation {
    pub tag: String,
    pub option: String,
    pub profile: String,
}

/// Rendering failed.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A widget option is not allowed under the active profile.
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// A resolved argument could not be converted to the type a handler asked for.
    #[error("argument '{param}' of '{marker}' is invalid: {reason}")]
    InvalidArgument {
        marker: String,
        param: String,
        reason: String,
    },

    /// A handler asked for an argument its signature never declared.
    #[error("'{marker}' has no declared argument '{param}'")]
    UndeclaredArgument { marker: String, param: String },

    /// A markup fragment failed to render.
    #[error("fragment '{name}' failed to render: {message}")]
    Fragment { name: String, message: String },

    /// The render context could not be built or converted.
    #[error("context error: {0}")]
    Context(String),

    /// A handler reported a failure of its own.
    #[error("{0}")]
    Handler(String),
}

impl RenderError {
    /// Create a handler error.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }

    /// Create a fragment error.
    pub fn fragment(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fragment {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Context(err.to_string())
    }
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for easytag operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_violation_message() {
        let err = PolicyViolation {
            tag: "bootstrap_accordion".into(),
            option: "style".into(),
            profile: "bootstrap2".into(),
        };
        assert_eq!(
            err.to_string(),
            "bootstrap_accordion's 'style' option not available for bootstrap2"
        );
    }

    #[test]
    fn test_invalid_block_tag_lists_expected_markers() {
        let err = CompileError::InvalidBlockTag {
            name: "pannel".into(),
            expected: vec!["panel".into(), "endaccordion".into()],
            line: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("'pannel'"));
        assert!(msg.contains("panel, endaccordion"));
    }

    #[test]
    fn test_invalid_block_tag_without_expectation() {
        let err = CompileError::InvalidBlockTag {
            name: "nope".into(),
            expected: vec![],
            line: 1,
        };
        assert_eq!(err.to_string(), "line 1: invalid block tag 'nope'");
    }

    #[test]
    fn test_policy_converts_into_render_error() {
        let err: RenderError = PolicyViolation {
            tag: "t".into(),
            option: "o".into(),
            profile: "p".into(),
        }
        .into();
        assert!(matches!(err, RenderError::Policy(_)));
    }

    #[test]
    fn test_phase_errors_wrap_into_error() {
        let err: Error = ConfigError::MissingName.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingName)));
        assert_eq!(err.to_string(), "tag definition must declare a name");
    }
}
