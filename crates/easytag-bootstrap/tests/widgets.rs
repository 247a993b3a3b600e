use easytag::template::Template;
use easytag::Context;
use easytag_bootstrap::settings::STYLE_ENV;
use easytag_bootstrap::{bootstrap_library, bootstrap_library_from_env, Error, Settings, SettingsError, Style};
use proptest::prelude::*;
use serde_json::json;
use serial_test::serial;

fn render(style: Style, source: &str, data: serde_json::Value) -> String {
    let library = bootstrap_library(Settings::new(style)).unwrap();
    let template = Template::new(source, &library).unwrap();
    let mut ctx = Context::from_value(data).unwrap();
    template.render(&mut ctx).unwrap()
}

const PRIMARY_ACCORDION: &str = r#"
    {% bootstrap_accordion id="my_accordion" style="primary" %}
        {% panel heading="First heading" %}
            {{ title }}
        {% panel heading="Second heading" %}
            Second panel content
    {% endbootstrap_accordion %}
"#;

mod accordion {
    use super::*;

    #[test]
    fn wraps_panels_in_a_panel_group() {
        let out = render(Style::Bootstrap3, PRIMARY_ACCORDION, json!({"title": "my_title"}));

        assert!(out.contains("my_title"));
        assert!(out.contains(r#"<div class="panel-group" id="my_accordion">"#));
        assert!(out.contains(r#"<div class="panel panel-primary">"#));
        assert!(out.contains(
            r##"<a href="#my_accordion-panel-1" data-toggle="collapse" data-parent="#my_accordion" class="accordion-toggle">"##
        ));
        assert!(out.contains("Second panel content"));
    }

    #[test]
    fn two_panels_in_order() {
        let out = render(
            Style::Bootstrap3,
            r#"{% bootstrap_accordion id="acc" %}{% panel heading="a" %}Alpha{% panel heading="b" %}Beta{% endbootstrap_accordion %}"#,
            json!({}),
        );
        insta::assert_snapshot!(out, @r##"
<div class="panel-group" id="acc">
<div class="panel panel-default">
<div class="panel-heading">
<a href="#acc-panel-1" data-toggle="collapse" data-parent="#acc" class="accordion-toggle">a</a>
</div>
<div id="acc-panel-1" class="panel-collapse collapse in">
<div class="panel-body">Alpha</div>
</div>
</div><div class="panel panel-default">
<div class="panel-heading">
<a href="#acc-panel-2" data-toggle="collapse" data-parent="#acc" class="accordion-toggle">b</a>
</div>
<div id="acc-panel-2" class="panel-collapse collapse">
<div class="panel-body">Beta</div>
</div>
</div>
</div>
"##);
    }

    #[test]
    fn id_can_come_from_the_context() {
        let out = render(
            Style::Bootstrap2,
            "{% bootstrap_accordion widget_id %}{% panel 'x' %}{% endbootstrap_accordion %}",
            json!({"widget_id": "from_ctx"}),
        );
        assert!(out.starts_with(r#"<div class="accordion" id="from_ctx">"#));
        assert!(out.contains(r##"href="#from_ctx-panel-1""##));
    }

    #[test]
    fn bootstrap2_rejects_style() {
        let library = bootstrap_library(Settings::new(Style::Bootstrap2)).unwrap();
        let template = Template::new(PRIMARY_ACCORDION, &library).unwrap();
        let err = template.render(&mut Context::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "bootstrap_accordion's 'style' option not available for bootstrap2"
        );
    }
}

mod navtabs {
    use super::*;

    #[test]
    fn headers_then_panes() {
        let out = render(
            Style::Bootstrap3,
            r#"{% bootstrap_navtabs %}{% tab label="a" %}Alpha{% tab label="b" %}Beta{% endbootstrap_navtabs %}"#,
            json!({}),
        );
        insta::assert_snapshot!(out, @r##"
<ul class="nav nav-tabs" role="tablist">
<li role="presentation" class="active"><a href="#a" role="tab" data-toggle="tab">a</a></li><li role="presentation"><a href="#b" role="tab" data-toggle="tab">b</a></li>
</ul><div class="tab-content">
<div role="tabpanel" class="tab-pane active" id="a">Alpha</div><div role="tabpanel" class="tab-pane" id="b">Beta</div>
</div>
"##);
    }

    #[test]
    fn hidden_tab_is_left_out() {
        let out = render(
            Style::Bootstrap2,
            "{% bootstrap_navtabs %}{% tab 'Public' %}open{% tab 'Private' show=is_admin %}closed{% endbootstrap_navtabs %}",
            json!({"is_admin": false}),
        );
        assert!(out.contains(r##"<li class="active"><a href="#public" data-toggle="tab">Public</a></li>"##));
        assert!(!out.contains("private"));
        assert!(!out.contains("closed"));

        let out = render(
            Style::Bootstrap2,
            "{% bootstrap_navtabs %}{% tab 'Public' %}open{% tab 'Private' show=is_admin %}closed{% endbootstrap_navtabs %}",
            json!({"is_admin": true}),
        );
        assert!(out.contains(r#"<div class="tab-pane" id="private">closed</div>"#));
    }

    #[test]
    fn nested_accordion_inside_a_tab() {
        let out = render(
            Style::Bootstrap3,
            concat!(
                "{% bootstrap_navtabs %}{% tab 'Help' %}",
                "{% bootstrap_accordion 'faq' %}{% panel 'Q' %}A{% endbootstrap_accordion %}",
                "{% endbootstrap_navtabs %}"
            ),
            json!({}),
        );
        assert!(out.contains(r#"<div role="tabpanel" class="tab-pane active" id="help"><div class="panel-group" id="faq">"#));
    }
}

mod settings {
    use super::*;

    #[test]
    #[serial]
    fn library_from_env() {
        std::env::set_var(STYLE_ENV, "bootstrap2");
        let library = bootstrap_library_from_env().unwrap();
        let template = Template::new(
            "{% bootstrap_accordion 'e' %}{% endbootstrap_accordion %}",
            &library,
        )
        .unwrap();
        assert_eq!(
            template.render(&mut Context::new()).unwrap(),
            "<div class=\"accordion\" id=\"e\">\n\n</div>"
        );

        std::env::remove_var(STYLE_ENV);
        assert!(matches!(
            bootstrap_library_from_env(),
            Err(Error::Settings(SettingsError::Unset))
        ));
    }
}

proptest! {
    /// Exactly the panel numbered `active_panel` is expanded, if it exists.
    #[test]
    fn accordion_expands_the_active_panel(panels in 1usize..10, active in 0i64..12) {
        let mut source = format!("{{% bootstrap_accordion 'p' active_panel={active} %}}");
        for i in 1..=panels {
            source.push_str(&format!("{{% panel 'h{i}' %}}body{i}"));
        }
        source.push_str("{% endbootstrap_accordion %}");

        let out = render(Style::Bootstrap3, &source, json!({}));
        let expanded = out.matches("collapse in").count();

        if active >= 1 && active as usize <= panels {
            prop_assert_eq!(expanded, 1);
            let marker = format!(r#"<div id="p-panel-{active}" class="panel-collapse collapse in">"#);
            prop_assert!(out.contains(&marker));
        } else {
            prop_assert_eq!(expanded, 0);
        }
    }

    /// The active tab is the first visible tab at or after `active_tab`.
    #[test]
    fn navtabs_activate_first_visible_from_pointer(
        shows in prop::collection::vec(any::<bool>(), 1..10),
        active in 1usize..12,
    ) {
        let mut source = format!("{{% bootstrap_navtabs active_tab={active} %}}");
        for (i, show) in shows.iter().enumerate() {
            let show = if *show { "True" } else { "False" };
            source.push_str(&format!("{{% tab 't{}' show={show} %}}", i + 1));
        }
        source.push_str("{% endbootstrap_navtabs %}");

        let out = render(Style::Bootstrap2, &source, json!({}));
        let expected = (active..=shows.len()).find(|n| shows[n - 1]);

        match expected {
            Some(n) => {
                let header = format!(r##"<li class="active"><a href="#t{n}""##);
                prop_assert!(out.contains(&header));
                prop_assert_eq!(out.matches(r#"<li class="active">"#).count(), 1);
            }
            None => prop_assert!(!out.contains(r#"class="active""#)),
        }
    }
}
