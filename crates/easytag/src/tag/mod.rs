//! The block tag engine.
//!
//! A block tag is a named region of a document delimited by markers:
//!
//! ```text
//! {% bootstrap_navtabs %}
//!   {% tab "Home" %} ... {% tab "Profile" %} ...
//! {% endbootstrap_navtabs %}
//! ```
//!
//! A [`TagDefinition`] declares the opening marker, the intermediate markers
//! that may recur inside the block, the end marker, and one handler per marker.
//! [`compile`] pulls the block out of a [`TokenStream`] and yields a
//! [`BlockNode`]: the handlers in document order, each bound to its arguments
//! and paired with the content that followed its marker. Rendering runs the
//! handlers in that order and concatenates what they return.
//!
//! ## Arguments
//!
//! Arguments are checked against the handler's [`Signature`] when the
//! template compiles, and resolved against the [`Context`](crate::Context)
//! only when the handler runs. A variable argument therefore sees whatever
//! earlier handlers in the same pass put into the context.
//!
//! ## Per-pass state
//!
//! Every definition carries a state type `S`. [`BlockNode::render`] starts
//! each pass from `S::default()` and hands it to every handler by `&mut`, so
//! counters and accumulators never leak between renders of the same node.

mod args;
mod compile;
mod definition;
mod node;
mod signature;
mod stream;

pub use args::{bind, split_bits, Arg, BoundArgs, ResolvedArgs};
pub use compile::compile;
pub use definition::{
    BoundHandler, EndTag, FinishFn, Handler, HandlerFn, Invocation, TagBuilder, TagDefinition,
};
pub use node::BlockNode;
pub use signature::{Param, Signature};
pub use stream::{ContentBlock, MarkerToken, TokenStream};
