//! # EasyTag - Multi-part Block Tags
//!
//! `easytag` lets a template language grow block tags made of several
//! markers, such as an accordion with panels or a tab strip with tabs,
//! without writing a parser for each one. A tag is declared once as a set of
//! markers with one handler each; the engine pulls the block out of the
//! document, binds every marker's arguments and, at render time, runs the
//! handlers in document order and joins their output.
//!
//! ## Core Concepts
//!
//! - [`tag::TagDefinition`]: markers, handlers, and an optional finish step
//! - [`tag::compile`]: turns one tag occurrence into a [`tag::BlockNode`]
//! - [`tag::TokenStream`] / [`tag::ContentBlock`]: the seam to the host
//!   template language
//! - [`Context`]: scoped variables that arguments resolve against
//! - [`template`]: a minimal host language with `{{ }}`, `{# #}` and `{% %}`
//!
//! ## Quick Start
//!
//! ```rust
//! use easytag::tag::{EndTag, Signature, TagDefinition};
//! use easytag::template::{Library, Template};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct Steps {
//!     count: usize,
//! }
//!
//! let steps = TagDefinition::<Steps>::builder()
//!     .name("steps")
//!     .intermediate(["step"])
//!     .end_tag(EndTag::Derived)
//!     .handler("steps", Signature::new(), |inv| inv.render_content())
//!     .handler("step", Signature::new().required("label"), |inv| {
//!         inv.state.count += 1;
//!         let label = inv.args.string("label")?;
//!         let body = inv.render_content()?;
//!         Ok(format!("<li>{}. {}: {}</li>", inv.state.count, label, body))
//!     })
//!     .finish(|body, _, _| Ok(format!("<ol>{body}</ol>")))
//!     .build()
//!     .unwrap();
//!
//! let mut library = Library::new();
//! library.register(steps);
//!
//! let template = Template::new(
//!     "{% steps %}{% step 'Mix' %}flour{% step next %}oven{% endsteps %}",
//!     &library,
//! )
//! .unwrap();
//!
//! let html = template.render_data(&json!({"next": "Bake"})).unwrap();
//! assert_eq!(html, "<ol><li>1. Mix: flour</li><li>2. Bake: oven</li></ol>");
//! ```
//!
//! Rendering the same template again starts the counter over: per-pass state
//! is created fresh for each render.

pub mod context;
pub mod error;
pub mod tag;
pub mod template;
pub mod value;

pub use context::Context;
pub use error::{CompileError, ConfigError, Error, PolicyViolation, RenderError, Result};
