//! Compliance orchestration for golden-config
//!
//! `gc-core` sits above the Layer 0 crates and below the CLI:
//!
//! ```text
//!                      gc-cli
//!                        |
//!                     gc-core
//!                        |
//!     +----------+-------+-------+----------+
//!     |          |               |          |
//!   gc-fs    gc-content       gc-git     gc-meta
//! ```
//!
//! - [`resolver`]: picks the backup and intended repository for a device
//! - [`rules`]: the per-platform rule index, built once per run
//! - [`engine`]: the per-device state machine driving resolve, load,
//!   evaluate and persist
//! - [`store`]: where compliance and run records go
//! - [`logger`]: the job log side-channel

pub mod engine;
pub mod error;
pub mod logger;
pub mod pairs;
pub mod records;
pub mod render;
pub mod resolver;
pub mod rules;
pub mod store;
pub mod summary;

pub use engine::{ComplianceOrchestrator, DeviceOutcome, DeviceState};
pub use error::{Error, Result};
pub use logger::{JobLogger, LogEntry, LogLevel, MemoryJobLogger, TracingJobLogger};
pub use records::{ConfigComplianceRecord, GoldenConfigRecord};
pub use resolver::{RepositoryResolver, ResolvedRepository};
pub use rules::{IndexedRule, RuleIndex};
pub use store::{ComplianceStore, FileStore, MemoryStore};
pub use summary::JobSummary;
