//! Selecting the devices a job runs against

use gc_content::JinjaTemplateEngine;

use crate::{Device, Error, Result};

/// Device scope for a job. Empty criteria select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub names: Vec<String>,
    pub platforms: Vec<String>,
    /// `(attribute path, expected value)` pairs, all of which must match.
    pub attributes: Vec<(String, String)>,
}

impl DeviceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_platforms(
        mut self,
        platforms: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.platforms.extend(platforms.into_iter().map(Into::into));
        self
    }

    /// Add an attribute criterion written as `path=value` (`site.slug=ams01`).
    pub fn with_attribute_expr(mut self, expr: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidFilter {
            filter: expr.to_string(),
            message: message.to_string(),
        };
        let (path, value) = expr
            .split_once('=')
            .ok_or_else(|| invalid("expected <attribute>=<value>"))?;
        let path = path.trim();
        JinjaTemplateEngine::strict()
            .check(&format!("{{{{ {path} }}}}"))
            .map_err(|e| invalid(&e.to_string()))?;
        self.attributes.push((path.to_string(), value.trim().to_string()));
        Ok(self)
    }

    pub fn matches(&self, device: &Device) -> bool {
        let name_ok = self.names.is_empty()
            || self
                .names
                .iter()
                .any(|name| name == device.display_name() || *name == device.id);
        let platform_ok = self.platforms.is_empty()
            || device
                .platform
                .as_ref()
                .is_some_and(|platform| self.platforms.contains(platform));
        name_ok
            && platform_ok
            && self
                .attributes
                .iter()
                .all(|(path, want)| attribute_equals(device, path, want))
    }

    /// The matching devices, in input order.
    ///
    /// Fails when any selected device has no platform, naming all of them.
    pub fn select(&self, devices: &[Device]) -> Result<Vec<Device>> {
        let selected: Vec<Device> = devices.iter().filter(|d| self.matches(d)).cloned().collect();

        let without_platform: Vec<String> = selected
            .iter()
            .filter(|d| d.platform.as_deref().is_none_or(str::is_empty))
            .map(|d| d.display_name().to_string())
            .collect();
        if !without_platform.is_empty() {
            return Err(Error::MissingPlatform {
                devices: without_platform,
            });
        }

        Ok(selected)
    }
}

/// Attribute paths are evaluated the way templates see `obj`.
fn attribute_equals(device: &Device, path: &str, want: &str) -> bool {
    matches!(
        JinjaTemplateEngine::strict().evaluate(path, &device.to_value()),
        Ok(Some(have)) if have == want
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn devices() -> Vec<Device> {
        vec![
            Device::new("1", "cisco_ios")
                .with_name("ams01-rtr-01")
                .with_attribute("site", json!({"slug": "ams01"})),
            Device::new("2", "juniper_junos")
                .with_name("nyc01-rtr-01")
                .with_attribute("site", json!({"slug": "nyc01"})),
            Device::new("3", "cisco_ios")
                .with_name("nyc01-rtr-02")
                .with_attribute("site", json!({"slug": "nyc01"})),
        ]
    }

    fn names(selected: &[Device]) -> Vec<&str> {
        selected.iter().map(|d| d.display_name()).collect()
    }

    #[test]
    fn test_empty_filter_selects_all() {
        assert_eq!(DeviceFilter::new().select(&devices()).unwrap().len(), 3);
    }

    #[test]
    fn test_platform_and_attribute() {
        let filter = DeviceFilter::new()
            .with_platforms(["cisco_ios"])
            .with_attribute_expr("site.slug=nyc01")
            .unwrap();
        assert_eq!(names(&filter.select(&devices()).unwrap()), vec!["nyc01-rtr-02"]);
    }

    #[test]
    fn test_name_or_id() {
        let filter = DeviceFilter::new().with_names(["ams01-rtr-01", "2"]);
        assert_eq!(
            names(&filter.select(&devices()).unwrap()),
            vec!["ams01-rtr-01", "nyc01-rtr-01"]
        );
    }

    #[test]
    fn test_missing_platform_lists_every_device() {
        let mut all = devices();
        all[0].platform = None;
        all[2].platform = Some(String::new());
        let err = DeviceFilter::new().select(&all).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following device(s) ams01-rtr-01, nyc01-rtr-02 have no platform defined. \
             Platform is required."
        );
    }

    #[test]
    fn test_subscript_and_platform_slug() {
        let filter = DeviceFilter::new()
            .with_attribute_expr("site['slug']=nyc01")
            .unwrap()
            .with_attribute_expr("platform.slug=juniper_junos")
            .unwrap();
        assert_eq!(names(&filter.select(&devices()).unwrap()), vec!["nyc01-rtr-01"]);
    }

    #[test]
    fn test_bad_attribute_expr() {
        assert!(DeviceFilter::new().with_attribute_expr("site").is_err());
        assert!(DeviceFilter::new().with_attribute_expr("site..slug=x").is_err());
    }
}
