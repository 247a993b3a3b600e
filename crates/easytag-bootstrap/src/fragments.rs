//! HTML fragments the widgets are assembled from.
//!
//! Each widget renders a handful of small MiniJinja templates named
//! `{style}/{widget}/{part}.html`, e.g. `bootstrap3/accordion/panel.html`.
//! The stock set is compiled into the crate; [`Fragments::from_dir`] lets a
//! project override any of them from disk.
//!
//! Fragment names end in `.html`, so MiniJinja auto-escapes plain values.
//! Markup produced by other fragments or by the document is passed in with
//! [`safe`] to keep it from being escaped twice.

use std::path::Path;

use minijinja::{Environment, Value};

use easytag::RenderError;

use crate::settings::Style;

macro_rules! embed {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $name)))),*]
    };
}

static EMBEDDED: &[(&str, &str)] = embed![
    "bootstrap2/accordion/body.html",
    "bootstrap2/accordion/heading.html",
    "bootstrap2/accordion/panel.html",
    "bootstrap2/accordion/wrapper.html",
    "bootstrap2/navtabs/panel.html",
    "bootstrap2/navtabs/panels_wrapper.html",
    "bootstrap2/navtabs/tab.html",
    "bootstrap2/navtabs/wrapper.html",
    "bootstrap3/accordion/body.html",
    "bootstrap3/accordion/heading.html",
    "bootstrap3/accordion/panel.html",
    "bootstrap3/accordion/wrapper.html",
    "bootstrap3/navtabs/panel.html",
    "bootstrap3/navtabs/panels_wrapper.html",
    "bootstrap3/navtabs/tab.html",
    "bootstrap3/navtabs/wrapper.html",
];

fn embedded(name: &str) -> Option<String> {
    EMBEDDED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| source.to_string())
}

/// Marks already-rendered markup as safe for interpolation.
pub fn safe(html: impl Into<String>) -> Value {
    Value::from_safe_string(html.into())
}

/// Fragment name for one widget part.
pub fn fragment_name(style: Style, widget: &str, part: &str) -> String {
    format!("{style}/{widget}/{part}.html")
}

/// The fragment environment.
pub struct Fragments {
    env: Environment<'static>,
}

impl Fragments {
    /// The fragments shipped with the crate.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| Ok(embedded(name)));
        Self { env }
    }

    /// Fragments looked up in `dir` first, falling back to the shipped ones.
    ///
    /// `dir` mirrors the embedded layout: `dir/bootstrap3/accordion/panel.html`
    /// replaces the stock Bootstrap 3 accordion panel.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let from_disk = minijinja::path_loader(dir.as_ref().to_path_buf());
        let mut env = Environment::new();
        env.set_loader(move |name| match from_disk(name)? {
            Some(source) => Ok(Some(source)),
            None => Ok(embedded(name)),
        });
        Self { env }
    }

    /// Renders `widget`'s `part` fragment for `style`.
    pub fn render(
        &self,
        style: Style,
        widget: &str,
        part: &str,
        ctx: Value,
    ) -> Result<String, RenderError> {
        let name = fragment_name(style, widget, part);
        self.env
            .get_template(&name)
            .and_then(|template| template.render(ctx))
            .map_err(|err| RenderError::fragment(name, err.to_string()))
    }

    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

impl Default for Fragments {
    fn default() -> Self {
        Self::new()
    }
}
