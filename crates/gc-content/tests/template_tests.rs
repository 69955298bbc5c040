use gc_content::template::{JinjaTemplateEngine, TemplateEvaluator};
use gc_content::{Error, TemplateErrorKind};
use rstest::rstest;
use serde_json::{Value, json};

fn device() -> Value {
    json!({
        "obj": {
            "name": "ams01-rtr-01",
            "platform": {"slug": "cisco_ios"},
            "site": {"slug": "ams01", "region": {"slug": "nl", "parent": {"slug": "ams"}}},
            "managed": true,
        }
    })
}

#[rstest]
#[case("{{ obj.site.region.parent.slug }}", "ams")]
#[case("{{obj.site.slug}}/{{obj.name}}.cfg", "ams01/ams01-rtr-01.cfg")]
#[case("/backups/{{ obj.name | upper }}.cfg", "/backups/AMS01-RTR-01.cfg")]
#[case("{{ obj.site['slug'] }}", "ams01")]
#[case("{{ obj.name | replace('ams01', 'AMS') }}", "AMS-rtr-01")]
#[case("{% if obj.site %}{{ obj.site.slug }}{% endif %}.cfg", "ams01.cfg")]
#[case("{% if obj.managed %}managed{% else %}unmanaged{% endif %}", "managed")]
#[case("{{ obj.platform.slug }}/{{ obj.name | lower }}", "cisco_ios/ams01-rtr-01")]
fn test_renders(#[case] template: &str, #[case] expected: &str) {
    let rendered = JinjaTemplateEngine::strict().render(template, &device()).unwrap();
    assert_eq!(rendered, expected);
}

#[rstest]
#[case("{{ obj.fake }}", TemplateErrorKind::Undefined)]
#[case("{{ obj.site.region.fake }}", TemplateErrorKind::Undefined)]
#[case("{{ device.name }}", TemplateErrorKind::Undefined)]
#[case("{{ obj.fake }", TemplateErrorKind::Syntax)]
#[case("{{ }}", TemplateErrorKind::Syntax)]
#[case("{{ obj..name }}", TemplateErrorKind::Syntax)]
#[case("{% if obj.name %}unterminated", TemplateErrorKind::Syntax)]
#[case("{{ obj.name + 1 }}", TemplateErrorKind::Render)]
fn test_failures(#[case] template: &str, #[case] expected: TemplateErrorKind) {
    match JinjaTemplateEngine::strict().render(template, &device()) {
        Err(Error::TemplateRender { kind, template: named, .. }) => {
            assert_eq!(kind, expected);
            assert_eq!(named, template);
        }
        other => panic!("expected a template error, got {other:?}"),
    }
}

#[test]
fn test_engine_is_reusable() {
    let engine = JinjaTemplateEngine::strict();
    for _ in 0..2 {
        assert_eq!(engine.render("{{ obj.site.slug }}", &device()).unwrap(), "ams01");
    }
}

#[test]
fn test_engine_is_object_safe() {
    let engine: Box<dyn TemplateEvaluator> = Box::new(JinjaTemplateEngine::default());
    assert_eq!(engine.render("{{ obj.name }}", &device()).unwrap(), "ams01-rtr-01");
}
