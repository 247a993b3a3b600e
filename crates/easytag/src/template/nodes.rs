//! Compiled template nodes.

use std::fmt;

use crate::context::Context;
use crate::error::RenderError;
use crate::tag::{Arg, BlockNode, ContentBlock};
use crate::value::display;

/// A piece of a compiled template.
pub trait Node: Send + Sync {
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError>;
}

/// Literal text copied to the output.
#[derive(Debug, Clone)]
pub struct TextNode(pub String);

impl Node for TextNode {
    fn render(&self, _ctx: &mut Context) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

/// `{{ path }}`: a value looked up at render time.
///
/// Missing variables and `null` render as an empty string.
#[derive(Debug, Clone)]
pub struct VariableNode(pub Arg);

impl Node for VariableNode {
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        Ok(display(&self.0.resolve(ctx)))
    }
}

impl<S, B> Node for BlockNode<S, B>
where
    S: Default + 'static,
    B: ContentBlock + Send + Sync + 'static,
{
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        BlockNode::render(self, ctx)
    }
}

/// A sequence of nodes rendered one after another.
#[derive(Default)]
pub struct NodeList {
    nodes: Vec<Box<dyn Node>>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: impl Node + 'static) {
        self.nodes.push(Box::new(node));
    }

    pub(crate) fn push_boxed(&mut self, node: Box<dyn Node>) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentBlock for NodeList {
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        let mut output = String::new();
        for node in &self.nodes {
            output.push_str(&node.render(ctx)?);
        }
        Ok(output)
    }
}

impl Node for NodeList {
    fn render(&self, ctx: &mut Context) -> Result<String, RenderError> {
        ContentBlock::render(self, ctx)
    }
}

impl fmt::Debug for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeList")
            .field("len", &self.nodes.len())
            .finish()
    }
}
