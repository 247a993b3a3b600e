//! `{% bootstrap_accordion %}`: a group of collapsible panels.
//!
//! ```text
//! {% bootstrap_accordion id="faq" active_panel=2 %}
//!     {% panel heading="Shipping" %} ...
//!     {% panel heading="Returns" style="info" %} ...
//! {% endbootstrap_accordion %}
//! ```
//!
//! Panels are numbered from 1 in document order; the panel whose number is
//! `active_panel` starts expanded. A non-numeric `active_panel` expands none. `style` and `use_title` only exist for
//! Bootstrap 3, as does a per-panel `style`.

use std::sync::Arc;

use minijinja::context;
use serde_json::{json, Value};
use tracing::warn;

use easytag::tag::{EndTag, Invocation, Signature, TagDefinition};
use easytag::value::{display, is_truthy};
use easytag::{ConfigError, RenderError};

use crate::fragments::{safe, Fragments};
use crate::policy::{stop_unsupported_use, UsedOption};
use crate::settings::{Settings, Style};
use crate::util::as_index;

pub const TAG: &str = "bootstrap_accordion";
const WIDGET: &str = "accordion";

/// Per-render bookkeeping for one accordion.
#[derive(Debug, Default)]
pub struct AccordionState {
    pub id: String,
    pub active_panel: Option<i64>,
    /// Panel style used when a panel does not set its own.
    pub style: String,
    pub use_title: Value,
    /// Panels rendered so far.
    pub counter: i64,
}

/// Builds the accordion tag for `settings`.
pub fn definition(
    settings: Settings,
    fragments: Arc<Fragments>,
) -> Result<TagDefinition<AccordionState>, ConfigError> {
    let panel_fragments = Arc::clone(&fragments);
    let group_fragments = Arc::clone(&fragments);

    TagDefinition::<AccordionState>::builder()
        .name(TAG)
        .intermediate(["group", "panel"])
        .end_tag(EndTag::Derived)
        .handler(
            TAG,
            Signature::new()
                .required("id")
                .optional("active_panel", 1)
                .optional("style", "default")
                .optional("use_title", false),
            move |inv| open(inv, &settings),
        )
        .handler(
            "panel",
            Signature::new().required("heading").optional("style", Value::Null),
            move |inv| {
                let style = inv.args.value("style")?.clone();
                stop_unsupported_use(
                    TAG,
                    &settings,
                    Style::Bootstrap2,
                    &[UsedOption::new("style", &style, &Value::Null)],
                )?;
                let style = is_truthy(&style).then(|| display(&style));
                render_panel(inv, &settings, &panel_fragments, style)
            },
        )
        .handler(
            "group",
            Signature::new().required("heading").optional("style", "default"),
            move |inv| {
                warn!(tag = inv.tag(), "the group marker is deprecated; use panel instead");
                let style = inv.args.value("style")?.clone();
                stop_unsupported_use(
                    TAG,
                    &settings,
                    Style::Bootstrap2,
                    &[UsedOption::new("style", &style, &json!("default"))],
                )?;
                let style = is_truthy(&style).then(|| display(&style));
                render_panel(inv, &settings, &group_fragments, style)
            },
        )
        .finish(move |content, state, _| {
            fragments.render(
                settings.style,
                WIDGET,
                "wrapper",
                context! { id => state.id.clone(), content => safe(content) },
            )
        })
        .build()
}

fn open(
    inv: &mut Invocation<'_, AccordionState>,
    settings: &Settings,
) -> Result<String, RenderError> {
    let style = inv.args.value("style")?.clone();
    let use_title = inv.args.value("use_title")?.clone();
    stop_unsupported_use(
        TAG,
        settings,
        Style::Bootstrap2,
        &[
            UsedOption::new("style", &style, &json!("default")),
            UsedOption::new("use_title", &use_title, &json!(false)),
        ],
    )?;

    inv.state.id = inv.args.string("id")?;
    inv.state.active_panel = as_index(inv.args.value("active_panel")?);
    inv.state.style = display(&style);
    inv.state.use_title = use_title;
    inv.render_content()
}

fn render_panel(
    inv: &mut Invocation<'_, AccordionState>,
    settings: &Settings,
    fragments: &Fragments,
    style: Option<String>,
) -> Result<String, RenderError> {
    let heading = inv.args.string("heading")?;
    let body = inv.render_content()?;

    inv.state.counter += 1;
    let state = &*inv.state;
    let i = state.counter;
    let active = if state.active_panel == Some(i) { "in" } else { "" };
    let style = style.unwrap_or_else(|| state.style.clone());

    let panel_heading = fragments.render(
        settings.style,
        WIDGET,
        "heading",
        context! {
            id => state.id.clone(),
            i => i,
            heading => heading,
            use_title => state.use_title.clone(),
        },
    )?;
    let panel_body = fragments.render(
        settings.style,
        WIDGET,
        "body",
        context! {
            id => state.id.clone(),
            i => i,
            active => active,
            body => safe(body),
        },
    )?;
    fragments.render(
        settings.style,
        WIDGET,
        "panel",
        context! {
            id => state.id.clone(),
            i => i,
            style => style,
            panel_heading => safe(panel_heading),
            panel_body => safe(panel_body),
        },
    )
}
