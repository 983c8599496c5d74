//! Exception message resolution
//!
//! [`MessageResolver`] owns a [`PatternRegistry`] populated once at
//! construction and turns an error occurrence (descriptor + context) into a
//! [`ResolvedEntity`]. Resolution never fails.
//!
//! Status fallbacks differ between the two query paths: the default entity
//! falls back to 500, while a registered code without a configured status
//! falls back to 200 OK.

use std::sync::Arc;

use http::StatusCode;

use crate::codes::{default_entry, ExceptionDescriptor};
use crate::config::CatalogConfig;
use crate::context::PatternContext;
use crate::entity::{PatternEntity, ResolvedEntity};
use crate::loader::{self, LoadReport};
use crate::registry::{PatternRegistry, RegistrySlot};
use crate::template::substitute;

/// Resolves error codes against a catalog loaded from property files
#[derive(Debug)]
pub struct MessageResolver {
    registry: PatternRegistry,
    report: LoadReport,
}

impl MessageResolver {
    /// Seed the default entry, then merge every configured source
    ///
    /// Missing or broken sources are logged and skipped.
    pub fn new(config: &CatalogConfig) -> Self {
        let registry = PatternRegistry::with_default_entry();
        let report = loader::load_into(&registry, config);
        Self { registry, report }
    }

    /// Build over an in-memory registry, adding the default entry if absent
    pub fn from_registry(registry: PatternRegistry) -> Self {
        if !registry.contains(default_entry::CODE) {
            registry.insert(PatternEntity::default_entry());
        }
        Self {
            registry,
            report: LoadReport::default(),
        }
    }

    /// Per-source outcome of the load performed by [`MessageResolver::new`]
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Entity for the default code, patterns used verbatim
    pub fn default_exception(&self) -> ResolvedEntity {
        let entity = match self.registry.lookup(default_entry::CODE) {
            RegistrySlot::Configured(entity) => Some(entity),
            RegistrySlot::Reserved | RegistrySlot::Missing => None,
        };
        let entity = entity.as_deref();
        let verbatim = |pattern: Option<&String>, fallback: &str| match pattern {
            Some(pattern) => pattern.clone(),
            None => fallback.to_string(),
        };

        ResolvedEntity {
            code: default_entry::CODE.to_string(),
            message: verbatim(
                entity.and_then(|e| e.message_pattern.as_ref()),
                default_entry::MESSAGE_INFO,
            ),
            debug: verbatim(
                entity.and_then(|e| e.debug_pattern.as_ref()),
                default_entry::DEBUG_INFO,
            ),
            solution: verbatim(
                entity.and_then(|e| e.solution_pattern.as_ref()),
                default_entry::SOLUTION_INFO,
            ),
            http_status: entity
                .and_then(|e| e.http_status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Render the configured patterns for `descriptor`'s code
    ///
    /// - unregistered code: code and 200 OK only, no text
    /// - reserved code with a text context: the default entity, carrying the
    ///   descriptor's code and the text (or default value) as message
    /// - otherwise: each pattern rendered against the context's variables;
    ///   message and debug fall back to the default value, solution to the
    ///   default solution text, status to 200 OK
    pub fn resolve<D, C>(&self, descriptor: &D, context: C) -> ResolvedEntity
    where
        D: ExceptionDescriptor + ?Sized,
        C: Into<PatternContext>,
    {
        let context = context.into();
        let code = descriptor.error_code();

        let entity = match self.registry.lookup(code) {
            RegistrySlot::Missing => {
                log::debug!("No patterns configured for code '{}'", code);
                return ResolvedEntity::bare(code, StatusCode::OK);
            }
            RegistrySlot::Reserved => match context.as_text() {
                Some(text) => return self.reserved_with_text(descriptor, text),
                None => Arc::new(PatternEntity::new(code)),
            },
            RegistrySlot::Configured(entity) => entity,
        };

        let vars = context.pattern_vars();
        let render = |pattern: &Option<String>, fallback: &str| match pattern {
            Some(pattern) => substitute(pattern, &vars),
            None => fallback.to_string(),
        };

        ResolvedEntity {
            code: code.to_string(),
            message: render(&entity.message_pattern, descriptor.default_value()),
            debug: render(&entity.debug_pattern, descriptor.default_value()),
            solution: render(&entity.solution_pattern, default_entry::SOLUTION_INFO),
            http_status: entity.http_status.unwrap_or(StatusCode::OK),
        }
    }

    fn reserved_with_text<D>(&self, descriptor: &D, text: &str) -> ResolvedEntity
    where
        D: ExceptionDescriptor + ?Sized,
    {
        let mut resolved = self.default_exception();
        let message = if is_blank(text) {
            descriptor.default_value()
        } else {
            text
        };
        if !is_blank(message) {
            resolved.message = message.to_string();
        }
        resolved.code = descriptor.error_code().to_string();
        resolved
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn contains(&self, code: &str) -> bool {
        self.registry.contains(code)
    }

    /// Registered codes, sorted
    pub fn codes(&self) -> Vec<String> {
        self.registry.codes()
    }

    /// Stored patterns for `code`, if any
    pub fn pattern(&self, code: &str) -> Option<PatternEntity> {
        match self.registry.lookup(code) {
            RegistrySlot::Configured(entity) => Some(PatternEntity::clone(&entity)),
            RegistrySlot::Reserved | RegistrySlot::Missing => None,
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
