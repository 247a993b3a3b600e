//! Compiled block tags and their render pass.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::context::Context;
use crate::error::RenderError;

use super::definition::{BoundHandler, Invocation, TagDefinition};
use super::stream::ContentBlock;

/// One compiled occurrence of a block tag.
///
/// Holds the bound handlers in document order, each paired with the content
/// block that followed its marker (`None` for markers without a body, such as
/// the end marker). The list always starts with the opening handler and does
/// not change after compilation.
pub struct BlockNode<S, B> {
    definition: Arc<TagDefinition<S>>,
    nodelists: Vec<(BoundHandler<S>, Option<B>)>,
}

impl<S, B> BlockNode<S, B> {
    pub(crate) fn new(
        definition: Arc<TagDefinition<S>>,
        nodelists: Vec<(BoundHandler<S>, Option<B>)>,
    ) -> Self {
        debug_assert!(!nodelists.is_empty());
        Self {
            definition,
            nodelists,
        }
    }

    /// Markers in render order.
    pub fn markers(&self) -> Vec<&str> {
        self.nodelists.iter().map(|(h, _)| h.marker()).collect()
    }

    /// `(marker, has content)` pairs in render order.
    pub fn segments(&self) -> impl Iterator<Item = (&str, bool)> {
        self.nodelists
            .iter()
            .map(|(h, block)| (h.marker(), block.is_some()))
    }

    pub fn len(&self) -> usize {
        self.nodelists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodelists.is_empty()
    }
}

impl<S, B: ContentBlock> BlockNode<S, B> {
    /// Renders with a fresh per-pass state.
    pub fn render(&self, ctx: &mut Context) -> Result<String, RenderError>
    where
        S: Default,
    {
        let mut state = S::default();
        self.render_into(ctx, &mut state)
    }

    /// Renders using `state` as the per-pass state.
    ///
    /// Lets the caller inspect what the handlers recorded once the pass is
    /// over. Handlers run in marker order; their outputs are joined and then
    /// passed through the tag's finish step, if it has one.
    pub fn render_into(&self, ctx: &mut Context, state: &mut S) -> Result<String, RenderError> {
        let tag = self.definition.name();
        let mut output = String::new();

        for (bound, block) in &self.nodelists {
            // Variables resolve now, so earlier handlers' effects are visible
            let args = bound.args.resolve(&bound.marker, ctx);
            trace!(tag, marker = %bound.marker, "invoking handler");

            let content = block.as_ref().map(|b| b as &dyn ContentBlock);
            let mut invocation = Invocation::new(ctx, state, args, tag, &bound.marker, content);
            output.push_str(&bound.handler.call(&mut invocation)?);
        }

        match self.definition.finish() {
            Some(finish) => finish(output, state, ctx),
            None => Ok(output),
        }
    }
}

impl<S, B> fmt::Debug for BlockNode<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockNode")
            .field("tag", &self.definition.name())
            .field("markers", &self.markers())
            .finish()
    }
}
