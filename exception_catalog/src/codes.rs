//! Error code descriptors and the built-in default entry
//!
//! Callers raise errors through anything implementing [`ExceptionDescriptor`].
//! Static code tables usually declare [`ExceptionCode`] constants grouped in
//! modules, the same way the catalog's own default code is declared below.

// ============================================================================
// DESCRIPTOR CONTRACT
// ============================================================================

/// Minimal capability the resolver needs from an error-raising caller
pub trait ExceptionDescriptor {
    /// Stable error code used as the catalog key
    fn error_code(&self) -> &str;

    /// Text used when no configured pattern supplies a better value
    fn default_value(&self) -> &str;
}

impl<T: ExceptionDescriptor + ?Sized> ExceptionDescriptor for &T {
    fn error_code(&self) -> &str {
        (**self).error_code()
    }

    fn default_value(&self) -> &str {
        (**self).default_value()
    }
}

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Const-constructible descriptor for static code tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExceptionCode {
    code: &'static str,
    default_value: &'static str,
}

impl ExceptionCode {
    pub const fn new(code: &'static str, default_value: &'static str) -> Self {
        Self {
            code,
            default_value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.code
    }
}

impl ExceptionDescriptor for ExceptionCode {
    fn error_code(&self) -> &str {
        self.code
    }

    fn default_value(&self) -> &str {
        self.default_value
    }
}

impl std::fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Owned descriptor for codes that only exist at runtime (CLI input, wire data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicCode {
    pub code: String,
    pub default_value: String,
}

impl DynamicCode {
    pub fn new(code: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            default_value: default_value.into(),
        }
    }
}

impl ExceptionDescriptor for DynamicCode {
    fn error_code(&self) -> &str {
        &self.code
    }

    fn default_value(&self) -> &str {
        &self.default_value
    }
}

// ============================================================================
// DEFAULT ENTRY
// ============================================================================

/// Code and fallback text of the entry seeded into every catalog
pub mod default_entry {
    use super::ExceptionCode;

    pub const CODE: &str = "takin_0000_S0000";
    pub const DEBUG_INFO: &str = "An unknown system exception occurred";
    pub const MESSAGE_INFO: &str = "The server ran into a small problem";
    pub const SOLUTION_INFO: &str = "Please contact the administrator";

    /// Descriptor form of the default code
    pub const DEFAULT: ExceptionCode = ExceptionCode::new(CODE, MESSAGE_INFO);
}
