//! HTTP status handling for catalog entries

use http::StatusCode;

/// Parse a status value from a status source
///
/// Only registered status codes (those with a canonical reason phrase) are
/// accepted.
pub fn parse_status(value: &str) -> Option<StatusCode> {
    let code: u16 = value.trim().parse().ok()?;
    let status = StatusCode::from_u16(code).ok()?;
    status.canonical_reason().map(|_| status)
}

/// Serde adapter writing a status as its numeric code
pub mod numeric {
    use http::StatusCode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(<D::Error as serde::de::Error>::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registered_status() {
        assert_eq!(parse_status("404"), Some(StatusCode::NOT_FOUND));
        assert_eq!(parse_status(" 500 "), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(parse_status("200"), Some(StatusCode::OK));
    }

    #[test]
    fn test_reject_malformed_status() {
        assert_eq!(parse_status("not_a_number"), None);
        assert_eq!(parse_status(""), None);
        assert_eq!(parse_status("-1"), None);
        assert_eq!(parse_status("70000"), None);
        assert_eq!(parse_status("42"), None);
    }

    #[test]
    fn test_reject_unregistered_status() {
        assert_eq!(parse_status("599"), None);
        assert_eq!(parse_status("999"), None);
    }
}
