//! Merging the four property sources into a registry
//!
//! Every source is attempted once. A missing file is skipped, any other
//! failure is logged and recorded; neither stops the remaining sources.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CatalogConfig;
use crate::error::{LoadError, LoadResult};
use crate::properties::{self, Properties};
use crate::registry::{FieldUpdate, PatternRegistry, PatternSource};
use crate::status::parse_status;

// ============================================================================
// LOAD REPORT
// ============================================================================

/// What happened to one source during load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Merged { entries: usize },
    Missing,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: PatternSource,
    pub path: PathBuf,
    pub outcome: SourceOutcome,
}

/// Per-source summary of a catalog load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub sources: Vec<SourceReport>,
}

impl LoadReport {
    pub fn outcome(&self, source: PatternSource) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|report| report.source == source)
            .map(|report| &report.outcome)
    }

    /// Total entries merged across all sources
    pub fn merged_entries(&self) -> usize {
        self.sources
            .iter()
            .map(|report| match report.outcome {
                SourceOutcome::Merged { entries } => entries,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources
            .iter()
            .filter(|report| matches!(report.outcome, SourceOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Merge every configured source into `registry`
pub fn load_into(registry: &PatternRegistry, config: &CatalogConfig) -> LoadReport {
    let mut report = LoadReport::default();

    for source in PatternSource::ALL {
        let path = config.file_path(source);
        let outcome = match load_source(registry, source, &path) {
            Ok(Some(entries)) => {
                log::debug!("Merged {} {} entries from {}", entries, source, path.display());
                SourceOutcome::Merged { entries }
            }
            Ok(None) => {
                log::debug!("No {} file at {}, skipping", source, path.display());
                SourceOutcome::Missing
            }
            Err(e) => {
                log::warn!("Skipping {} source: {}", source, e);
                SourceOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.sources.push(SourceReport {
            source,
            path,
            outcome,
        });
    }

    log::info!(
        "Exception catalog loaded: {} entries merged, {} codes registered",
        report.merged_entries(),
        registry.len()
    );
    report
}

/// Merge one source file; `Ok(None)` when the file does not exist
///
/// A source is applied all-or-nothing: if any entry is invalid, none of
/// its entries reach the registry.
pub fn load_source(
    registry: &PatternRegistry,
    source: PatternSource,
    path: &Path,
) -> LoadResult<Option<usize>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(LoadError::Io {
                source_kind: source,
                path: path.to_path_buf(),
                error,
            })
        }
    };

    let properties = read_properties(source, path, file)?;
    let updates = field_updates(source, path, properties)?;
    Ok(Some(registry.merge(updates)))
}

fn read_properties(source: PatternSource, path: &Path, file: File) -> LoadResult<Properties> {
    let parsed = properties::from_reader(BufReader::new(file)).map_err(|error| LoadError::Io {
        source_kind: source,
        path: path.to_path_buf(),
        error,
    })?;

    parsed.map_err(|error| LoadError::Syntax {
        source_kind: source,
        path: path.to_path_buf(),
        error,
    })
}

fn field_updates(
    source: PatternSource,
    path: &Path,
    properties: Properties,
) -> LoadResult<Vec<(String, FieldUpdate)>> {
    properties
        .into_iter()
        .map(|(code, value)| {
            let update = match source {
                PatternSource::Message => FieldUpdate::Message(value),
                PatternSource::Debug => FieldUpdate::Debug(value),
                PatternSource::Solution => FieldUpdate::Solution(value),
                PatternSource::HttpStatus => match parse_status(&value) {
                    Some(status) => FieldUpdate::HttpStatus(status),
                    None => {
                        return Err(LoadError::InvalidStatus {
                            path: path.to_path_buf(),
                            code,
                            value,
                        })
                    }
                },
            };
            Ok((code, update))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistrySlot;
    use assert_matches::assert_matches;
    use http::StatusCode;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PatternRegistry::new();

        let result = load_source(&registry, PatternSource::Message, &dir.path().join("none"));
        assert_matches!(result, Ok(None));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_message_source_merged() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "m.properties", "foo.bar=Hello ${name}\nfoo.baz=Bye\n");
        let registry = PatternRegistry::new();

        let merged = load_source(&registry, PatternSource::Message, &dir.path().join("m.properties"));
        assert_matches!(merged, Ok(Some(2)));
        assert_matches!(
            registry.lookup("foo.bar"),
            RegistrySlot::Configured(entity) if entity.message_pattern.as_deref() == Some("Hello ${name}")
        );
    }

    #[test]
    fn test_malformed_status_rejects_whole_source() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "s.properties", "a.ok=404\nfoo.bar=not_a_number\n");
        let registry = PatternRegistry::new();

        let result = load_source(&registry, PatternSource::HttpStatus, &dir.path().join("s.properties"));
        assert_matches!(
            result,
            Err(LoadError::InvalidStatus { ref code, ref value, .. })
                if code == "foo.bar" && value == "not_a_number"
        );
        assert!(!registry.contains("a.ok"));
        assert!(!registry.contains("foo.bar"));
    }

    #[test]
    fn test_bad_escape_is_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "d.properties", "x=\\uZZZZ\n");
        let registry = PatternRegistry::new();

        let result = load_source(&registry, PatternSource::Debug, &dir.path().join("d.properties"));
        let err = result.unwrap_err();
        assert_eq!(err.source_kind(), PatternSource::Debug);
        assert_matches!(err, LoadError::Syntax { .. });
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("solution.properties")).unwrap();
        let registry = PatternRegistry::new();

        let result = load_source(
            &registry,
            PatternSource::Solution,
            &dir.path().join("solution.properties"),
        );
        assert_matches!(result, Err(LoadError::Io { .. }));
    }

    #[test]
    fn test_load_into_report() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "message.properties", "foo.bar=Hello\n");
        write(dir.path(), "http_status.properties", "foo.bar=oops\n");
        write(dir.path(), "solution.properties", "foo.bar=Retry\nother=Wait\n");

        let registry = PatternRegistry::new();
        let report = load_into(&registry, &CatalogConfig::new(dir.path()));

        assert_eq!(report.sources.len(), 4);
        assert_eq!(
            report.outcome(PatternSource::Message),
            Some(&SourceOutcome::Merged { entries: 1 })
        );
        assert_eq!(report.outcome(PatternSource::Debug), Some(&SourceOutcome::Missing));
        assert_eq!(
            report.outcome(PatternSource::Solution),
            Some(&SourceOutcome::Merged { entries: 2 })
        );
        assert_matches!(
            report.outcome(PatternSource::HttpStatus),
            Some(SourceOutcome::Failed { .. })
        );
        assert_eq!(report.merged_entries(), 3);
        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);

        match registry.lookup("foo.bar") {
            RegistrySlot::Configured(entity) => {
                assert_eq!(entity.message_pattern.as_deref(), Some("Hello"));
                assert_eq!(entity.solution_pattern.as_deref(), Some("Retry"));
                assert_eq!(entity.http_status, None);
            }
            other => panic!("unexpected slot {other:?}"),
        }
    }

    #[test]
    fn test_valid_status_source() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "http_status.properties", "foo.bar=404\nbaz=503\n");

        let registry = PatternRegistry::new();
        load_into(&registry, &CatalogConfig::new(dir.path()));

        assert_matches!(
            registry.lookup("baz"),
            RegistrySlot::Configured(entity) if entity.http_status == Some(StatusCode::SERVICE_UNAVAILABLE)
        );
    }
}
