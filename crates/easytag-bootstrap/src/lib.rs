//! # EasyTag Bootstrap - Accordion and Nav Tabs Tags
//!
//! Two Bootstrap widgets written as [`easytag`] block tags:
//!
//! - `{% bootstrap_accordion %}` with `{% panel %}` sections
//! - `{% bootstrap_navtabs %}` with `{% tab %}` sections
//!
//! Both render through small HTML fragments, one set per Bootstrap
//! generation. The generation is chosen by [`Settings`], usually from the
//! `BOOTSTRAP_TEMPLATETAGS_STYLE` environment variable.
//!
//! ## Quick Start
//!
//! ```rust
//! use easytag::template::Template;
//! use easytag_bootstrap::{bootstrap_library, Settings, Style};
//!
//! let library = bootstrap_library(Settings::new(Style::Bootstrap3)).unwrap();
//! let template = Template::new(
//!     r#"{% bootstrap_accordion id="faq" %}{% panel heading="Why?" %}Because.{% endbootstrap_accordion %}"#,
//!     &library,
//! )
//! .unwrap();
//!
//! let html = template.render(&mut easytag::Context::new()).unwrap();
//! assert!(html.starts_with(r#"<div class="panel-group" id="faq">"#));
//! assert!(html.contains(r#"<div class="panel-body">Because.</div>"#));
//! ```

pub mod accordion;
pub mod error;
pub mod fragments;
pub mod navtabs;
pub mod policy;
pub mod settings;
pub mod util;

use std::sync::Arc;

use easytag::template::Library;
use easytag::ConfigError;

pub use accordion::AccordionState;
pub use error::{Error, SettingsError};
pub use fragments::Fragments;
pub use navtabs::{NavTabsState, TabRecord};
pub use settings::{Settings, Style};

/// A library with both widgets, rendering the shipped fragments.
pub fn bootstrap_library(settings: Settings) -> Result<Library, ConfigError> {
    bootstrap_library_with(settings, Fragments::new())
}

/// A library with both widgets, rendering `fragments`.
pub fn bootstrap_library_with(
    settings: Settings,
    fragments: Fragments,
) -> Result<Library, ConfigError> {
    let mut library = Library::new();
    register(&mut library, settings, fragments)?;
    Ok(library)
}

/// Adds both widgets to an existing library.
pub fn register(
    library: &mut Library,
    settings: Settings,
    fragments: Fragments,
) -> Result<(), ConfigError> {
    let fragments = Arc::new(fragments);
    library
        .register(accordion::definition(settings, Arc::clone(&fragments))?)
        .register(navtabs::definition(settings, fragments)?);
    Ok(())
}

/// Like [`bootstrap_library`], with settings read from the environment.
pub fn bootstrap_library_from_env() -> Result<Library, Error> {
    let settings = Settings::from_env()?;
    Ok(bootstrap_library(settings)?)
}
