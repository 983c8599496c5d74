//! Code → pattern registry
//!
//! Written while sources are merged, read concurrently afterwards. Each slot
//! either holds a pattern entity or is reserved (the code is known but no
//! entity is attached).

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use http::StatusCode;
use serde::Serialize;

use crate::entity::PatternEntity;

// ============================================================================
// SOURCES AND FIELD UPDATES
// ============================================================================

/// The four parallel property sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    Message,
    Debug,
    Solution,
    HttpStatus,
}

impl PatternSource {
    /// Load order
    pub const ALL: [PatternSource; 4] = [
        PatternSource::Message,
        PatternSource::Debug,
        PatternSource::Solution,
        PatternSource::HttpStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternSource::Message => "message",
            PatternSource::Debug => "debug",
            PatternSource::Solution => "solution",
            PatternSource::HttpStatus => "http-status",
        }
    }
}

impl std::fmt::Display for PatternSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field contributed by one source for one code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Message(String),
    Debug(String),
    Solution(String),
    HttpStatus(StatusCode),
}

impl FieldUpdate {
    fn apply(self, entity: &mut PatternEntity) {
        match self {
            FieldUpdate::Message(pattern) => entity.message_pattern = Some(pattern),
            FieldUpdate::Debug(pattern) => entity.debug_pattern = Some(pattern),
            FieldUpdate::Solution(pattern) => entity.solution_pattern = Some(pattern),
            FieldUpdate::HttpStatus(status) => entity.http_status = Some(status),
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Result of looking a code up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySlot {
    /// Code not registered
    Missing,
    /// Code registered without a pattern entity
    Reserved,
    /// Code registered with its patterns
    Configured(Arc<PatternEntity>),
}

/// Thread-safe mapping from error code to pattern entity
#[derive(Debug, Default)]
pub struct PatternRegistry {
    slots: RwLock<HashMap<String, Option<Arc<PatternEntity>>>>,
}

impl PatternRegistry {
    /// Empty registry, without the default entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the default entry
    pub fn with_default_entry() -> Self {
        let registry = Self::new();
        registry.insert(PatternEntity::default_entry());
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Option<Arc<PatternEntity>>>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Option<Arc<PatternEntity>>>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a whole entity
    pub fn insert(&self, entity: PatternEntity) {
        self.write().insert(entity.code.clone(), Some(Arc::new(entity)));
    }

    /// Register `code` without patterns; returns false if it already exists
    pub fn reserve(&self, code: impl Into<String>) -> bool {
        let mut slots = self.write();
        let code = code.into();
        if slots.contains_key(&code) {
            return false;
        }
        slots.insert(code, None);
        true
    }

    /// Apply field updates, creating entities for unseen codes
    ///
    /// Returns the number of updates applied.
    pub fn merge<I>(&self, updates: I) -> usize
    where
        I: IntoIterator<Item = (String, FieldUpdate)>,
    {
        let mut slots = self.write();
        let mut applied = 0;

        for (code, update) in updates {
            let slot = slots.entry(code.clone()).or_insert(None);
            let entity = slot.get_or_insert_with(|| Arc::new(PatternEntity::new(code)));
            update.apply(Arc::make_mut(entity));
            applied += 1;
        }

        applied
    }

    pub fn lookup(&self, code: &str) -> RegistrySlot {
        match self.read().get(code) {
            None => RegistrySlot::Missing,
            Some(None) => RegistrySlot::Reserved,
            Some(Some(entity)) => RegistrySlot::Configured(Arc::clone(entity)),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.read().contains_key(code)
    }

    /// All registered codes, sorted
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.read().keys().cloned().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::default_entry;
    use assert_matches::assert_matches;

    fn configured(registry: &PatternRegistry, code: &str) -> Arc<PatternEntity> {
        match registry.lookup(code) {
            RegistrySlot::Configured(entity) => entity,
            other => panic!("expected configured slot for {code}, got {other:?}"),
        }
    }

    #[test]
    fn test_default_entry_seeded() {
        let registry = PatternRegistry::with_default_entry();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(default_entry::CODE));
        assert_eq!(
            *configured(&registry, default_entry::CODE),
            PatternEntity::default_entry()
        );
    }

    #[test]
    fn test_merge_creates_and_updates() {
        let registry = PatternRegistry::new();

        let applied = registry.merge(vec![
            ("foo.bar".to_string(), FieldUpdate::Message("Hello ${name}".into())),
            ("foo.baz".to_string(), FieldUpdate::Debug("trace".into())),
        ]);
        assert_eq!(applied, 2);

        registry.merge(vec![(
            "foo.bar".to_string(),
            FieldUpdate::HttpStatus(StatusCode::NOT_FOUND),
        )]);

        let foo_bar = configured(&registry, "foo.bar");
        assert_eq!(foo_bar.code, "foo.bar");
        assert_eq!(foo_bar.message_pattern.as_deref(), Some("Hello ${name}"));
        assert_eq!(foo_bar.http_status, Some(StatusCode::NOT_FOUND));

        let foo_baz = configured(&registry, "foo.baz");
        assert_eq!(foo_baz.code, "foo.baz");
        assert_eq!(foo_baz.debug_pattern.as_deref(), Some("trace"));
        assert_eq!(foo_baz.message_pattern, None);
    }

    #[test]
    fn test_merge_overrides_default_fields() {
        let registry = PatternRegistry::with_default_entry();
        registry.merge(vec![(
            default_entry::CODE.to_string(),
            FieldUpdate::Message("Custom outage text".into()),
        )]);

        let entity = configured(&registry, default_entry::CODE);
        assert_eq!(entity.message_pattern.as_deref(), Some("Custom outage text"));
        assert_eq!(entity.debug_pattern.as_deref(), Some(default_entry::DEBUG_INFO));
    }

    #[test]
    fn test_lookup_does_not_observe_later_merges() {
        let registry = PatternRegistry::new();
        registry.merge(vec![("a".to_string(), FieldUpdate::Message("one".into()))]);

        let before = configured(&registry, "a");
        registry.merge(vec![("a".to_string(), FieldUpdate::Message("two".into()))]);

        assert_eq!(before.message_pattern.as_deref(), Some("one"));
        assert_eq!(configured(&registry, "a").message_pattern.as_deref(), Some("two"));
    }

    #[test]
    fn test_reserved_slot() {
        let registry = PatternRegistry::new();

        assert!(registry.reserve("placeholder"));
        assert!(!registry.reserve("placeholder"));
        assert_matches!(registry.lookup("placeholder"), RegistrySlot::Reserved);
        assert_matches!(registry.lookup("absent"), RegistrySlot::Missing);

        registry.merge(vec![(
            "placeholder".to_string(),
            FieldUpdate::Solution("fill in".into()),
        )]);
        assert_eq!(configured(&registry, "placeholder").code, "placeholder");
    }

    #[test]
    fn test_codes_sorted() {
        let registry = PatternRegistry::new();
        registry.reserve("b");
        registry.reserve("a");
        registry.reserve("c");

        assert_eq!(registry.codes(), vec!["a", "b", "c"]);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_source_names() {
        let names: Vec<String> = PatternSource::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["message", "debug", "solution", "http-status"]);
    }

    #[test]
    fn test_concurrent_readers() {
        let registry = Arc::new(PatternRegistry::with_default_entry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.contains(default_entry::CODE))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
