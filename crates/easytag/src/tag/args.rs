//! Binding template arguments to handler signatures.
//!
//! The raw text after a marker name is split into bits, each bit is bound to a
//! declared parameter at compile time, and the bound values are resolved
//! against the render context only when the handler runs. Binding mistakes
//! (unknown keyword, too many positionals, missing required value) are
//! compile errors, never render errors.
//!
//! Argument syntax:
//!
//! | Bit | Meaning |
//! |-----|---------|
//! | `"text"` / `'text'` | string literal |
//! | `3`, `-1`, `2.5` | number literal |
//! | `True` / `False` / `None` | boolean / null literal (lowercase also accepted) |
//! | `user.name` | variable, looked up at render time |
//! | `key=value` | keyword form of any of the above |

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::context::Context;
use crate::error::{CompileError, RenderError};
use crate::value::{display, is_truthy};

use super::signature::Signature;
use super::stream::MarkerToken;

static KWARG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^(\w+)=(.+)$").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());
static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*(\.\w+)*$").unwrap());

/// An argument as written in the template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A value fixed at compile time.
    Literal(Value),
    /// A dotted path resolved against the context at render time.
    Variable(String),
}

impl Arg {
    /// Parses one argument value. Returns `None` for malformed input.
    pub fn parse(text: &str) -> Option<Arg> {
        if text.starts_with('"') || text.starts_with('\'') {
            return parse_quoted(text).map(|s| Arg::Literal(Value::String(s)));
        }

        match text {
            "True" | "true" => return Some(Arg::Literal(Value::Bool(true))),
            "False" | "false" => return Some(Arg::Literal(Value::Bool(false))),
            "None" | "null" => return Some(Arg::Literal(Value::Null)),
            _ => {}
        }

        if NUMBER_RE.is_match(text) {
            if let Ok(int) = text.parse::<i64>() {
                return Some(Arg::Literal(Value::Number(int.into())));
            }
            return text
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(|n| Arg::Literal(Value::Number(n)));
        }

        if VARIABLE_RE.is_match(text) {
            return Some(Arg::Variable(text.to_string()));
        }

        None
    }

    /// Produces the value this argument has in `ctx` right now.
    pub fn resolve(&self, ctx: &Context) -> Value {
        match self {
            Arg::Literal(value) => value.clone(),
            Arg::Variable(path) => ctx.resolve(path),
        }
    }
}

/// Strips matching quotes and unescapes `\x` sequences.
fn parse_quoted(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    if text.len() < 2 || !text.ends_with(quote) {
        return None;
    }

    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // A trailing backslash escapes the closing quote
            out.push(chars.next()?);
        } else if ch == quote {
            return None;
        } else {
            out.push(ch);
        }
    }
    Some(out)
}

/// Splits marker arguments on whitespace, keeping quoted sections intact.
///
/// ```rust
/// use easytag::tag::split_bits;
///
/// assert_eq!(
///     split_bits(r#"heading="First panel" style=primary"#),
///     vec![r#"heading="First panel""#, "style=primary"],
/// );
/// ```
pub fn split_bits(text: &str) -> Vec<&str> {
    let mut bits = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                bits.push(&text[s..i]);
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            if ch == '"' || ch == '\'' {
                quote = Some(ch);
            }
        }
    }

    if let Some(s) = start {
        bits.push(&text[s..]);
    }
    bits
}

/// Arguments bound to a handler's signature, not yet resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    params: Vec<(String, Arg)>,
    extra: BTreeMap<String, Arg>,
}

impl BoundArgs {
    /// Resolves every argument against `ctx`.
    pub fn resolve(&self, marker: &str, ctx: &Context) -> ResolvedArgs {
        ResolvedArgs {
            marker: marker.to_string(),
            values: self
                .params
                .iter()
                .map(|(name, arg)| (name.clone(), arg.resolve(ctx)))
                .collect(),
            extra: self
                .extra
                .iter()
                .map(|(name, arg)| (name.clone(), arg.resolve(ctx)))
                .collect(),
        }
    }

    /// The bound argument for a declared parameter.
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.params
            .iter()
            .find_map(|(n, arg)| (n == name).then_some(arg))
    }

    /// Keyword arguments collected by a signature that accepts extras.
    pub fn extra(&self) -> &BTreeMap<String, Arg> {
        &self.extra
    }
}

/// Binds the arguments on `token` to `signature`.
///
/// `tag` names the marker in error messages.
pub fn bind(tag: &str, signature: &Signature, token: &MarkerToken) -> Result<BoundArgs, CompileError> {
    let line = token.line;
    let mut slots: Vec<Option<Arg>> = vec![None; signature.params().len()];
    let mut extra = BTreeMap::new();
    let mut seen_keyword = false;
    let mut next_positional = 0;

    for bit in token.bits() {
        if let Some(caps) = KWARG_RE.captures(bit) {
            let name = &caps[1];
            let arg = parse_arg(tag, &caps[2], line)?;
            seen_keyword = true;

            match signature.position(name) {
                Some(idx) if slots[idx].is_some() => {
                    return Err(CompileError::MultipleValues {
                        tag: tag.to_string(),
                        param: name.to_string(),
                        line,
                    });
                }
                Some(idx) => slots[idx] = Some(arg),
                None if signature.accepts_extra_keywords() => {
                    if extra.insert(name.to_string(), arg).is_some() {
                        return Err(CompileError::MultipleValues {
                            tag: tag.to_string(),
                            param: name.to_string(),
                            line,
                        });
                    }
                }
                None => {
                    return Err(CompileError::UnexpectedKeyword {
                        tag: tag.to_string(),
                        param: name.to_string(),
                        line,
                    });
                }
            }
        } else {
            if seen_keyword {
                return Err(CompileError::PositionalAfterKeyword {
                    tag: tag.to_string(),
                    line,
                });
            }
            if next_positional >= slots.len() {
                return Err(CompileError::TooManyPositional {
                    tag: tag.to_string(),
                    line,
                });
            }
            slots[next_positional] = Some(parse_arg(tag, bit, line)?);
            next_positional += 1;
        }
    }

    let mut params = Vec::with_capacity(slots.len());
    let mut missing = Vec::new();
    for (param, slot) in signature.params().iter().zip(slots) {
        match slot.or_else(|| param.default().cloned().map(Arg::Literal)) {
            Some(arg) => params.push((param.name().to_string(), arg)),
            None => missing.push(param.name()),
        }
    }

    if !missing.is_empty() {
        return Err(CompileError::MissingArguments {
            tag: tag.to_string(),
            missing: missing.join(", "),
            line,
        });
    }

    Ok(BoundArgs { params, extra })
}

fn parse_arg(tag: &str, bit: &str, line: usize) -> Result<Arg, CompileError> {
    Arg::parse(bit).ok_or_else(|| CompileError::MalformedArgument {
        tag: tag.to_string(),
        bit: bit.to_string(),
        line,
    })
}

/// Argument values as seen by a handler during one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgs {
    marker: String,
    values: Vec<(String, Value)>,
    extra: BTreeMap<String, Value>,
}

impl ResolvedArgs {
    /// The value of a declared parameter.
    pub fn value(&self, name: &str) -> Result<&Value, RenderError> {
        self.values
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
            .ok_or_else(|| RenderError::UndeclaredArgument {
                marker: self.marker.clone(),
                param: name.to_string(),
            })
    }

    /// Deserializes a declared parameter into `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, RenderError> {
        let value = self.value(name)?.clone();
        serde_json::from_value(value).map_err(|err| RenderError::InvalidArgument {
            marker: self.marker.clone(),
            param: name.to_string(),
            reason: err.to_string(),
        })
    }

    /// A declared parameter formatted as text.
    pub fn string(&self, name: &str) -> Result<String, RenderError> {
        self.value(name).map(display)
    }

    /// Like [`string`](Self::string), but `null` gives `None`.
    pub fn opt_string(&self, name: &str) -> Result<Option<String>, RenderError> {
        self.value(name).map(|v| match v {
            Value::Null => None,
            other => Some(display(other)),
        })
    }

    /// Template truthiness of a declared parameter.
    pub fn is_truthy(&self, name: &str) -> Result<bool, RenderError> {
        self.value(name).map(is_truthy)
    }

    /// Extra keyword arguments, sorted by name.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
