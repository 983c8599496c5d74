//! Catalog entry and resolution output types

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::codes::default_entry;

// ============================================================================
// PATTERN ENTITY
// ============================================================================

/// Templates configured for one error code
///
/// Each of the four sources contributes one field during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntity {
    pub code: String,
    pub message_pattern: Option<String>,
    pub debug_pattern: Option<String>,
    pub solution_pattern: Option<String>,
    pub http_status: Option<StatusCode>,
}

impl PatternEntity {
    /// Empty entry for `code`
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message_pattern: None,
            debug_pattern: None,
            solution_pattern: None,
            http_status: None,
        }
    }

    /// The built-in entry seeded into every catalog
    pub fn default_entry() -> Self {
        Self::new(default_entry::CODE)
            .with_message(default_entry::MESSAGE_INFO)
            .with_debug(default_entry::DEBUG_INFO)
            .with_solution(default_entry::SOLUTION_INFO)
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_message(mut self, pattern: impl Into<String>) -> Self {
        self.message_pattern = Some(pattern.into());
        self
    }

    pub fn with_debug(mut self, pattern: impl Into<String>) -> Self {
        self.debug_pattern = Some(pattern.into());
        self
    }

    pub fn with_solution(mut self, pattern: impl Into<String>) -> Self {
        self.solution_pattern = Some(pattern.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = Some(status);
        self
    }

    /// True when no source has contributed anything yet
    pub fn is_empty(&self) -> bool {
        self.message_pattern.is_none()
            && self.debug_pattern.is_none()
            && self.solution_pattern.is_none()
            && self.http_status.is_none()
    }
}

// ============================================================================
// RESOLVED ENTITY
// ============================================================================

/// Fully rendered message bundle for one error occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntity {
    pub code: String,
    pub message: String,
    pub debug: String,
    pub solution: String,
    #[serde(with = "crate::status::numeric")]
    pub http_status: StatusCode,
}

impl ResolvedEntity {
    /// Entity carrying only a code and a status, with no text
    pub fn bare(code: impl Into<String>, http_status: StatusCode) -> Self {
        Self {
            code: code.into(),
            message: String::new(),
            debug: String::new(),
            solution: String::new(),
            http_status,
        }
    }

    /// True when no message text was produced
    pub fn is_unconfigured(&self) -> bool {
        self.message.is_empty() && self.debug.is_empty() && self.solution.is_empty()
    }
}
