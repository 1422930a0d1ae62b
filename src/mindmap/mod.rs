//! # mind2mm — dotMind ⇄ FreeMind conversion
//!
//! Bidirectional conversion between two mind-map encodings:
//! - **dotMind** (`.mind`) — a zip archive holding one JSON payload, `map.json`
//! - **freemind** (`.mm`) — a plain XML outline document
//!
//! Architecture:
//! - `types` — the shared tree model (`MapDocument`, `MapNode`)
//! - `error` — converter error type and result alias
//! - `archive` — zip unpack (ZIP-slip safe) and pack (named entries)
//! - `json_codec` — dotMind `map.json` reader/writer
//! - `xml_parser` — freemind `.mm` reader (iterative, quick-xml events)
//! - `xml_writer` — freemind `.mm` writer (iterative, quick-xml events)
//! - `service` — the two conversion pipelines

pub mod archive;
pub mod error;
pub mod json_codec;
pub mod service;
pub mod types;
pub mod xml_parser;
pub mod xml_writer;

// Re-exports
pub use error::{ConvertError, ConvertResult};
pub use service::{
    ConvertOptions, Converter, DOTMIND_FORMAT_VERSION, FREEMIND_FORMAT_VERSION, MAP_ENTRY_NAME,
};
pub use types::{MapDocument, MapNode};
