//! A small Django-style template language hosting the block tags.
//!
//! Supports literal text, `{{ variable.path }}` output, `{# comments #}` and
//! `{% block tags %}` registered in a [`Library`]. There are no filters and
//! no built-in tags; everything between `{% %}` comes from the library.

mod lexer;
mod library;
mod nodes;
mod parser;

use serde::Serialize;

use crate::context::Context;
use crate::error::{CompileError, RenderError};
use crate::tag::ContentBlock;

pub use library::Library;
pub use nodes::{Node, NodeList, TextNode, VariableNode};
pub use parser::Parser;

/// A compiled template.
#[derive(Debug)]
pub struct Template {
    nodes: NodeList,
}

impl Template {
    /// Compiles `source` against the tags in `library`.
    pub fn new(source: &str, library: &Library) -> Result<Self, CompileError> {
        let nodes = Parser::new(source, library).parse(&[])?;
        Ok(Self { nodes })
    }

    /// Renders against `ctx`.
    ///
    /// Tags may push or insert into the context while rendering; the
    /// template itself only reads from it.
    pub fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        ContentBlock::render(&self.nodes, ctx)
    }

    /// Renders against a fresh context built from `data`.
    pub fn render_data<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, RenderError> {
        let mut ctx = Context::from_serialize(data)?;
        self.render(&mut ctx)
    }
}
