//! Tag registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::CompileError;
use crate::tag::{compile, MarkerToken, TagDefinition};

use super::nodes::Node;
use super::parser::Parser;

/// Compiles one tag occurrence into a template node.
pub(crate) trait TagCompiler: Send + Sync {
    fn compile(
        &self,
        token: &MarkerToken,
        parser: &mut Parser<'_>,
    ) -> Result<Box<dyn Node>, CompileError>;
}

impl<S: Default + 'static> TagCompiler for Arc<TagDefinition<S>> {
    fn compile(
        &self,
        token: &MarkerToken,
        parser: &mut Parser<'_>,
    ) -> Result<Box<dyn Node>, CompileError> {
        Ok(Box::new(compile(self, token, parser)?))
    }
}

/// The set of block tags a template may use.
///
/// # Example
///
/// ```rust
/// use easytag::tag::{EndTag, Signature, TagDefinition};
/// use easytag::template::{Library, Template};
/// use easytag::Context;
///
/// let shout = TagDefinition::<()>::builder()
///     .name("shout")
///     .end_tag(EndTag::Derived)
///     .handler("shout", Signature::new(), |inv| {
///         Ok(inv.render_content()?.to_uppercase())
///     })
///     .build()
///     .unwrap();
///
/// let mut library = Library::new();
/// library.register(shout);
///
/// let template = Template::new("{% shout %}hi {{ name }}{% endshout %}", &library).unwrap();
/// let mut ctx = Context::new();
/// ctx.insert("name", "ada");
/// assert_eq!(template.render(&mut ctx).unwrap(), "HI ADA");
/// ```
#[derive(Clone, Default)]
pub struct Library {
    tags: HashMap<String, Arc<dyn TagCompiler>>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tag under its name, replacing any tag already registered
    /// with that name.
    pub fn register<S: Default + 'static>(&mut self, definition: TagDefinition<S>) -> &mut Self {
        let name = definition.name().to_string();
        let replaced = self
            .tags
            .insert(name.clone(), Arc::new(Arc::new(definition)))
            .is_some();
        debug!(tag = %name, replaced, "registered block tag");
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<dyn TagCompiler>> {
        self.tags.get(name)
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("tags", &self.names())
            .finish()
    }
}
