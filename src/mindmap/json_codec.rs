//! JSON codec for the dotMind `map.json` payload.
//!
//! The wire shape is:
//! `{"map_version": "...", "root": {"title": "...", "children": [...]}}`
//!
//! `map_version` and `root` are required; a missing `title` or `children`
//! decodes to its empty value. Encoding always emits every field, so a
//! leaf node carries an explicit `"children": []`.

use super::error::{ConvertError, ConvertResult};
use super::types::MapDocument;

/// Decode a dotMind JSON payload.
///
/// serde_json's recursion limit bounds the nesting depth of hostile
/// inputs; anything past it is rejected as malformed.
pub fn decode_json(bytes: &[u8]) -> ConvertResult<MapDocument> {
    serde_json::from_slice(bytes).map_err(|e| ConvertError::JsonDecode(e.to_string()))
}

/// Encode a document as compact dotMind JSON.
pub fn encode_json(doc: &MapDocument) -> ConvertResult<Vec<u8>> {
    serde_json::to_vec(doc).map_err(ConvertError::from)
}
