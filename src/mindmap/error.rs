//! Error types for the converter crate.

use std::fmt;

#[derive(Debug, Clone)]
pub enum ConvertError {
    /// Archive entry resolves outside the extraction directory (ZIP-slip)
    PathTraversal(String),
    /// Open/create/read/write failure on the zip container or its entries
    Archive(String),
    /// Malformed dotMind JSON or missing required field
    JsonDecode(String),
    /// Malformed freemind XML or missing required element
    XmlDecode(String),
    /// Encode-side serialization failure
    Serialization(String),
    /// File I/O on the translated document or staged manifest file
    Io(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTraversal(msg) => write!(f, "path traversal in archive: {}", msg),
            Self::Archive(msg) => write!(f, "archive error: {}", msg),
            Self::JsonDecode(msg) => write!(f, "JSON decode error: {}", msg),
            Self::XmlDecode(msg) => write!(f, "XML decode error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

pub type ConvertResult<T> = Result<T, ConvertError>;

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<quick_xml::Error> for ConvertError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlDecode(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ConvertError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlDecode(e.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
