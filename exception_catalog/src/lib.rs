//! # Exception Catalog
//!
//! Error-code message catalog. Four property files (message, debug,
//! solution, http-status) are merged into one code → pattern registry at
//! startup; each error occurrence is then rendered by substituting `${var}`
//! placeholders from a caller-supplied context.

pub mod codes;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod loader;
pub mod properties;
pub mod registry;
pub mod resolver;
pub mod status;
pub mod template;

// Re-export key types for library consumers
pub use codes::{default_entry, DynamicCode, ExceptionCode, ExceptionDescriptor};
pub use config::CatalogConfig;
pub use context::{PatternContext, PatternVars, Variables};
pub use entity::{PatternEntity, ResolvedEntity};
pub use error::{ConfigError, ConfigResult, LoadError, LoadResult};
pub use loader::{LoadReport, SourceOutcome, SourceReport};
pub use registry::{FieldUpdate, PatternRegistry, PatternSource, RegistrySlot};
pub use resolver::MessageResolver;
