//! Input records for golden-config.
//!
//! Devices, compliance rules and the settings value object are owned by
//! external administration; this crate only describes, validates and
//! loads them.

pub mod device;
pub mod error;
pub mod filter;
pub mod loader;
pub mod rule;
pub mod settings;

pub use device::Device;
pub use error::{Error, Result};
pub use filter::DeviceFilter;
pub use rule::{ComplianceRule, ConfigType};
pub use settings::{GoldenConfigSettings, RepositoryKind};
