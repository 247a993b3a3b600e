//! Tag definitions: names, markers and the handler table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::{CompileError, ConfigError, RenderError};

use super::args::{bind, BoundArgs, ResolvedArgs};
use super::signature::Signature;
use super::stream::{ContentBlock, MarkerToken};

/// Handler callable for one marker.
pub type HandlerFn<S> =
    dyn Fn(&mut Invocation<'_, S>) -> Result<String, RenderError> + Send + Sync;

/// Post-render step: receives the joined handler output and the pass state.
pub type FinishFn<S> =
    dyn Fn(String, &mut S, &mut Context) -> Result<String, RenderError> + Send + Sync;

/// How a block tag is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EndTag {
    /// No closing marker. The tag is single-shot and has no content block.
    #[default]
    None,
    /// Closed by `end` + the tag name, e.g. `endbootstrap_accordion`.
    Derived,
    /// Closed by a fixed marker.
    Named(String),
}

impl EndTag {
    /// The closing marker for a tag called `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<String> {
        match self {
            EndTag::None => None,
            EndTag::Derived => Some(format!("end{name}")),
            EndTag::Named(marker) => Some(marker.clone()),
        }
    }
}

impl From<bool> for EndTag {
    fn from(derived: bool) -> Self {
        if derived {
            EndTag::Derived
        } else {
            EndTag::None
        }
    }
}

impl From<&str> for EndTag {
    fn from(marker: &str) -> Self {
        EndTag::Named(marker.to_string())
    }
}

/// A handler plus the parameters it declares.
pub struct Handler<S> {
    signature: Signature,
    call: Arc<HandlerFn<S>>,
}

impl<S> Handler<S> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, invocation: &mut Invocation<'_, S>) -> Result<String, RenderError> {
        (self.call)(invocation)
    }
}

impl<S> Clone for Handler<S> {
    fn clone(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            call: Arc::clone(&self.call),
        }
    }
}

impl<S> fmt::Debug for Handler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A handler with its arguments bound for one marker occurrence.
#[derive(Debug, Clone)]
pub struct BoundHandler<S> {
    pub(crate) marker: String,
    pub(crate) handler: Handler<S>,
    pub(crate) args: BoundArgs,
}

impl<S> BoundHandler<S> {
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn args(&self) -> &BoundArgs {
        &self.args
    }
}

/// Everything a handler sees when it runs.
///
/// `state` is the per-pass state of the node being rendered. It starts from
/// `S::default()` at the beginning of every render pass and is dropped when
/// the pass ends, so handlers can keep counters and accumulators in it.
pub struct Invocation<'a, S> {
    pub context: &'a mut Context,
    pub state: &'a mut S,
    pub args: ResolvedArgs,
    tag: &'a str,
    marker: &'a str,
    content: Option<&'a dyn ContentBlock>,
}

impl<'a, S> Invocation<'a, S> {
    pub(crate) fn new(
        context: &'a mut Context,
        state: &'a mut S,
        args: ResolvedArgs,
        tag: &'a str,
        marker: &'a str,
        content: Option<&'a dyn ContentBlock>,
    ) -> Self {
        Self {
            context,
            state,
            args,
            tag,
            marker,
            content,
        }
    }

    /// Name of the tag this handler belongs to.
    pub fn tag(&self) -> &str {
        self.tag
    }

    /// The marker that introduced this segment.
    pub fn marker(&self) -> &str {
        self.marker
    }

    /// Renders the content block that follows this marker.
    ///
    /// Segments without content render as an empty string.
    pub fn render_content(&mut self) -> Result<String, RenderError> {
        match self.content {
            Some(block) => block.render(self.context),
            None => Ok(String::new()),
        }
    }
}

/// A block tag: its markers and a handler per marker.
///
/// Definitions are built with [`TagDefinition::builder`], which checks that
/// the tag is named and that every declared marker has a handler. `S` is the
/// per-pass state handed to every handler.
///
/// # Example
///
/// ```rust
/// use easytag::tag::{EndTag, Signature, TagDefinition};
///
/// #[derive(Default)]
/// struct Count(usize);
///
/// let tag = TagDefinition::<Count>::builder()
///     .name("list")
///     .intermediate(["item"])
///     .end_tag(EndTag::Derived)
///     .handler("list", Signature::new(), |inv| inv.render_content())
///     .handler("item", Signature::new().required("label"), |inv| {
///         inv.state.0 += 1;
///         Ok(format!("{}. {}", inv.state.0, inv.args.string("label")?))
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(tag.end_marker().as_deref(), Some("endlist"));
/// ```
pub struct TagDefinition<S> {
    name: String,
    intermediate_tags: Vec<String>,
    end_tag: EndTag,
    handlers: HashMap<String, Handler<S>>,
    finish: Option<Arc<FinishFn<S>>>,
}

impl<S> TagDefinition<S> {
    pub fn builder() -> TagBuilder<S> {
        TagBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intermediate_tags(&self) -> &[String] {
        &self.intermediate_tags
    }

    pub fn end_tag(&self) -> &EndTag {
        &self.end_tag
    }

    /// The resolved closing marker, if the tag has one.
    pub fn end_marker(&self) -> Option<String> {
        self.end_tag.resolve(&self.name)
    }

    /// Markers that end a content block: intermediates plus the end marker.
    ///
    /// Empty for tags without an end marker.
    pub fn terminators(&self) -> Vec<String> {
        match self.end_marker() {
            Some(end) => self
                .intermediate_tags
                .iter()
                .cloned()
                .chain(std::iter::once(end))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn handler(&self, marker: &str) -> Option<&Handler<S>> {
        self.handlers.get(marker)
    }

    pub(crate) fn finish(&self) -> Option<&FinishFn<S>> {
        self.finish.as_deref()
    }

    /// Binds the handler for `marker` to the arguments on `token`.
    pub(crate) fn bind(
        &self,
        marker: &str,
        token: &MarkerToken,
    ) -> Result<BoundHandler<S>, CompileError> {
        let handler = self
            .handlers
            .get(marker)
            .ok_or_else(|| CompileError::UnexpectedMarker {
                tag: self.name.clone(),
                marker: marker.to_string(),
                line: token.line,
            })?;

        Ok(BoundHandler {
            marker: marker.to_string(),
            handler: handler.clone(),
            args: bind(marker, handler.signature(), token)?,
        })
    }
}

impl<S> fmt::Debug for TagDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut markers: Vec<_> = self.handlers.keys().collect();
        markers.sort();
        f.debug_struct("TagDefinition")
            .field("name", &self.name)
            .field("intermediate_tags", &self.intermediate_tags)
            .field("end_tag", &self.end_tag)
            .field("handlers", &markers)
            .field("finish", &self.finish.is_some())
            .finish()
    }
}

/// Builder for [`TagDefinition`].
pub struct TagBuilder<S> {
    name: Option<String>,
    intermediate_tags: Vec<String>,
    end_tag: EndTag,
    handlers: HashMap<String, Handler<S>>,
    duplicate: Option<String>,
    finish: Option<Arc<FinishFn<S>>>,
}

impl<S> TagBuilder<S> {
    fn new() -> Self {
        Self {
            name: None,
            intermediate_tags: Vec::new(),
            end_tag: EndTag::None,
            handlers: HashMap::new(),
            duplicate: None,
            finish: None,
        }
    }

    /// Sets the marker that opens the block.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds markers that may recur between the opening and the end marker.
    pub fn intermediate<I, T>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for marker in markers {
            let marker = marker.into();
            if !self.intermediate_tags.contains(&marker) {
                self.intermediate_tags.push(marker);
            }
        }
        self
    }

    pub fn end_tag(mut self, end_tag: impl Into<EndTag>) -> Self {
        self.end_tag = end_tag.into();
        self
    }

    /// Registers the handler for `marker`.
    pub fn handler<F>(mut self, marker: impl Into<String>, signature: Signature, f: F) -> Self
    where
        F: Fn(&mut Invocation<'_, S>) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        let marker = marker.into();
        let handler = Handler {
            signature,
            call: Arc::new(f),
        };
        if self.handlers.insert(marker.clone(), handler).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(marker);
        }
        self
    }

    /// Sets a step that post-processes the joined handler output.
    pub fn finish<F>(mut self, f: F) -> Self
    where
        F: Fn(String, &mut S, &mut Context) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.finish = Some(Arc::new(f));
        self
    }

    /// Validates and builds the definition.
    pub fn build(self) -> Result<TagDefinition<S>, ConfigError> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingName)?;

        if let Some(marker) = self.duplicate {
            return Err(ConfigError::DuplicateHandler { tag: name, marker });
        }

        let declared = std::iter::once(&name).chain(&self.intermediate_tags);
        for marker in declared {
            if !self.handlers.contains_key(marker) {
                return Err(ConfigError::MissingHandler {
                    tag: name.clone(),
                    marker: marker.clone(),
                });
            }
        }

        Ok(TagDefinition {
            name,
            intermediate_tags: self.intermediate_tags,
            end_tag: self.end_tag,
            handlers: self.handlers,
            finish: self.finish,
        })
    }
}
