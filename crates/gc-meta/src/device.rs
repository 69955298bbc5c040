//! Devices under compliance evaluation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A network device as seen by templates and the orchestrator.
///
/// Any attribute beyond `id`, `name` and `platform` is kept verbatim and is
/// reachable from templates as `obj.<attribute>`. The platform is exposed
/// as `obj.platform.slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "platform_slug")]
    pub platform: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Device {
    pub fn new(id: impl Into<String>, platform: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            platform: Some(platform.into()),
            attributes: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Name for logs and summaries; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }

    /// The device as a JSON object, attributes merged in.
    pub fn to_value(&self) -> Value {
        let mut object = self.attributes.clone();
        object.insert("id".into(), Value::String(self.id.clone()));
        object.insert("name".into(), Value::String(self.display_name().to_string()));
        let platform = match &self.platform {
            Some(slug) => json!({ "slug": slug }),
            None => Value::Null,
        };
        object.insert("platform".into(), platform);
        Value::Object(object)
    }

    /// Context templates are rendered against: the device bound to `obj`.
    pub fn template_context(&self) -> Value {
        json!({ "obj": self.to_value() })
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
