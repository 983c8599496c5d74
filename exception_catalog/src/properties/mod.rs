//! Property-file reading
//!
//! Flat `key=value` files in UTF-8 with the usual property-file escaping
//! rules: `#`/`!` comments, backslash line continuations, `=`/`:`/blank
//! separators and `\t \n \r \f \uXXXX` escapes.

pub mod error;
pub mod parser;

use std::collections::BTreeMap;
use std::io::Read;

pub use error::{PropertiesError, PropertiesResult};
pub use parser::{parse_bytes, parse_str};

/// Parsed property set; later duplicate keys replace earlier ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for Properties {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Read a whole stream and parse it
pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<PropertiesResult<Properties>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(parse_bytes(&buffer))
}
