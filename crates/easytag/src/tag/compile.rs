//! Compiling one block tag occurrence out of a token stream.

use std::sync::Arc;

use tracing::debug;

use crate::error::CompileError;

use super::args::bind;
use super::definition::TagDefinition;
use super::node::BlockNode;
use super::signature::Signature;
use super::stream::{MarkerToken, TokenStream};

/// Compiles the block opened by `token`.
///
/// The opening handler is bound to the arguments on `token`. For tags with an
/// end marker, the stream is then scanned segment by segment: each content
/// block is attached to the handler of the marker that introduced it, and each
/// terminating marker binds its own handler, until the end marker is reached.
/// The end marker's handler, if the tag defines one, is appended without
/// content. Tags without an end marker compile to their opening handler alone.
pub fn compile<S, T>(
    definition: &Arc<TagDefinition<S>>,
    token: &MarkerToken,
    stream: &mut T,
) -> Result<BlockNode<S, T::Block>, CompileError>
where
    T: TokenStream + ?Sized,
{
    let name = definition.name();
    let mut current = definition.bind(name, token)?;
    let mut nodelists = Vec::new();

    let Some(end_marker) = definition.end_marker() else {
        nodelists.push((current, None));
        debug!(tag = name, line = token.line, "compiled single-shot tag");
        return Ok(BlockNode::new(Arc::clone(definition), nodelists));
    };

    let terminators = definition.terminators();
    loop {
        let block = stream.parse_until(&terminators)?;
        nodelists.push((current, Some(block)));

        let next = stream.next_marker().ok_or_else(|| CompileError::Unclosed {
            tag: name.to_string(),
            expected: end_marker.clone(),
            line: token.line,
        })?;

        if next.name == end_marker {
            if definition.handler(&end_marker).is_some() {
                nodelists.push((definition.bind(&end_marker, &next)?, None));
            } else {
                bind(&end_marker, &Signature::new(), &next)?;
            }
            break;
        }

        if !definition.intermediate_tags().contains(&next.name) {
            return Err(CompileError::UnexpectedMarker {
                tag: name.to_string(),
                marker: next.name,
                line: next.line,
            });
        }
        current = definition.bind(&next.name, &next)?;
    }

    debug!(
        tag = name,
        line = token.line,
        segments = nodelists.len(),
        "compiled block tag"
    );
    Ok(BlockNode::new(Arc::clone(definition), nodelists))
}
