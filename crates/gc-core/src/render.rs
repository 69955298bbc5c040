//! Rendering settings templates against devices

use gc_content::{JinjaTemplateEngine, TemplateEvaluator};
use gc_meta::Device;

use crate::Result;

/// Render a template against a device with strict-undefined semantics.
pub fn render(template: &str, device: &Device) -> Result<String> {
    render_with(&JinjaTemplateEngine::strict(), template, device)
}

/// Render a template against a device with a specific engine.
pub fn render_with(
    engine: &dyn TemplateEvaluator,
    template: &str,
    device: &Device,
) -> Result<String> {
    Ok(engine.render(template, &device.template_context())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_device_attributes() {
        let device = Device::new("1", "cisco_ios")
            .with_name("ams01-rtr-01")
            .with_attribute("site", json!({"slug": "ams01"}));
        assert_eq!(
            render("{{ obj.site.slug }}/{{ obj.name }}.cfg", &device).unwrap(),
            "ams01/ams01-rtr-01.cfg"
        );
    }

    #[test]
    fn test_render_undefined_is_device_local() {
        let device = Device::new("1", "cisco_ios");
        let err = render("{{ obj.site.slug }}", &device).unwrap_err();
        assert!(err.is_device_local());
    }
}
