//! `{% bootstrap_navtabs %}`: a tab strip with one content pane per tab.
//!
//! ```text
//! {% bootstrap_navtabs active_tab=2 %}
//!     {% tab "Home" %} ...
//!     {% tab "Settings" id="prefs" data_target="#prefs" %} ...
//!     {% tab "Admin" show=is_admin %} ...
//! {% endbootstrap_navtabs %}
//! ```
//!
//! Tab headers render inline, in order. Tab bodies are kept aside while the
//! headers render and are emitted afterwards, inside a separate
//! `tab-content` container that follows the tab strip.
//!
//! A tab with `show` false renders neither a header nor a pane. If it would
//! have been active, either because `active_tab` pointed at it or because it
//! was marked `active`, the pointer moves on by one tab, so a run of hidden
//! tabs hands activity to the first visible tab after it. An `active_tab`
//! that is not a whole number activates nothing.

use std::sync::Arc;

use minijinja::context;

use easytag::tag::{EndTag, Invocation, Signature, TagDefinition};
use easytag::value::{display, is_truthy};
use easytag::{ConfigError, RenderError};

use crate::fragments::{safe, Fragments};
use crate::settings::Settings;
use crate::util::{as_index, data_attrs, flatatt, slugify};

pub const TAG: &str = "bootstrap_navtabs";
const WIDGET: &str = "navtabs";

/// What a render pass recorded about one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRecord {
    pub tab_id: String,
    pub active: bool,
    pub show: bool,
    /// The rendered tab body.
    pub content: String,
}

/// Per-render bookkeeping for one tab strip.
#[derive(Debug, Default)]
pub struct NavTabsState {
    /// 1-based number of the tab to activate.
    pub active_index: Option<i64>,
    /// Tabs seen so far.
    pub counter: i64,
    pub tabs: Vec<TabRecord>,
}

impl NavTabsState {
    /// Records of the tabs that render, in order.
    pub fn visible(&self) -> impl Iterator<Item = &TabRecord> {
        self.tabs.iter().filter(|tab| tab.show)
    }

    /// Records of the tabs hidden with `show` false, in order.
    pub fn hidden(&self) -> impl Iterator<Item = &TabRecord> {
        self.tabs.iter().filter(|tab| !tab.show)
    }
}

fn active_class(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        ""
    }
}

/// Builds the nav tabs tag for `settings`.
pub fn definition(
    settings: Settings,
    fragments: Arc<Fragments>,
) -> Result<TagDefinition<NavTabsState>, ConfigError> {
    let tab_fragments = Arc::clone(&fragments);

    TagDefinition::<NavTabsState>::builder()
        .name(TAG)
        .intermediate(["tab"])
        .end_tag(EndTag::Derived)
        .handler(
            TAG,
            Signature::new().optional("active_tab", 1),
            |inv| {
                inv.state.active_index = as_index(inv.args.value("active_tab")?);
                inv.render_content()
            },
        )
        .handler(
            "tab",
            Signature::new()
                .required("label")
                .optional("id", serde_json::Value::Null)
                .optional("show", true)
                .optional("active", false)
                .extra_keywords(),
            move |inv| tab(inv, &settings, &tab_fragments),
        )
        .finish(move |content, state, _| {
            let style = settings.style;
            let tabs = fragments.render(
                style,
                WIDGET,
                "wrapper",
                context! { content => safe(content) },
            )?;

            let mut panels = String::new();
            for tab in state.visible() {
                panels.push_str(&fragments.render(
                    style,
                    WIDGET,
                    "panel",
                    context! {
                        tab_id => tab.tab_id.clone(),
                        active => active_class(tab.active),
                        content => safe(tab.content.clone()),
                    },
                )?);
            }
            let panels = fragments.render(
                style,
                WIDGET,
                "panels_wrapper",
                context! { content => safe(panels) },
            )?;

            Ok(tabs + &panels)
        })
        .build()
}

fn tab(
    inv: &mut Invocation<'_, NavTabsState>,
    settings: &Settings,
    fragments: &Fragments,
) -> Result<String, RenderError> {
    inv.state.counter += 1;
    let i = inv.state.counter;

    let label = inv.args.string("label")?;
    let id = inv.args.value("id")?;
    let tab_id = if is_truthy(id) {
        display(id)
    } else {
        slugify(&label)
    };
    let show = inv.args.is_truthy("show")?;

    let wants_active = inv.state.active_index == Some(i) || inv.args.is_truthy("active")?;
    if wants_active && !show {
        if let Some(index) = inv.state.active_index.as_mut() {
            *index += 1;
        }
    }
    let active = show && wants_active;

    let content = inv.render_content()?;
    inv.state.tabs.push(TabRecord {
        tab_id: tab_id.clone(),
        active,
        show,
        content,
    });

    if !show {
        return Ok(String::new());
    }

    let attrs = flatatt(&data_attrs(inv.args.extra()));
    fragments.render(
        settings.style,
        WIDGET,
        "tab",
        context! {
            label => label,
            active => active_class(active),
            tab_id => tab_id,
            data_attrs => safe(attrs),
        },
    )
}
