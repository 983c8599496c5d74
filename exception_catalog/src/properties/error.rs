//! Property-file parse errors

pub type PropertiesResult<T> = Result<T, PropertiesError>;

/// Errors raised while reading a property file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertiesError {
    #[error("Malformed \\uxxxx encoding '{sequence}' at line {line}")]
    MalformedUnicodeEscape { line: usize, sequence: String },

    #[error("Property file is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

impl PropertiesError {
    /// Line the error was detected on, when it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            PropertiesError::MalformedUnicodeEscape { line, .. } => Some(*line),
            PropertiesError::InvalidUtf8 { .. } => None,
        }
    }
}
