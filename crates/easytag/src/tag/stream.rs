//! The seam between the block engine and the host template language.
//!
//! The engine never reads source text itself. It asks a [`TokenStream`] to
//! parse forward until one of its markers appears, and to hand over the
//! marker token that stopped the scan. Whatever the stream parsed in between
//! comes back as an opaque [`ContentBlock`] that the engine renders on demand.

use crate::context::Context;
use crate::error::{CompileError, RenderError};

use super::args::split_bits;

/// A marker occurrence: its name, its raw argument text, and where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerToken {
    pub name: String,
    pub args: String,
    pub line: usize,
}

impl MarkerToken {
    pub fn new(name: impl Into<String>, args: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            line,
        }
    }

    /// Splits tag contents such as `panel heading="x"` into name and arguments.
    ///
    /// Returns `None` for blank contents.
    pub fn parse(contents: &str, line: usize) -> Option<Self> {
        let contents = contents.trim();
        if contents.is_empty() {
            return None;
        }

        let (name, args) = match contents.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (contents, ""),
        };
        Some(Self::new(name, args, line))
    }

    /// The arguments split into bits, quoted sections kept whole.
    pub fn bits(&self) -> Vec<&str> {
        split_bits(&self.args)
    }
}

/// Something compiled from the document that renders to a string.
pub trait ContentBlock {
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError>;
}

/// A single-owner cursor over a host document.
pub trait TokenStream {
    type Block: ContentBlock;

    /// Parses forward, stopping just before a marker whose name is in `markers`.
    ///
    /// Reaching the end of the document is not an error here; the caller
    /// notices it when [`next_marker`](Self::next_marker) returns `None`.
    fn parse_until(&mut self, markers: &[String]) -> Result<Self::Block, CompileError>;

    /// Consumes and returns the marker the last scan stopped at.
    fn next_marker(&mut self) -> Option<MarkerToken>;
}
