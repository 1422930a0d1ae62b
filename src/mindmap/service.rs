//! High-level orchestrator for the two conversion pipelines.
//!
//! Each direction is a fixed pipeline with no branching on document
//! content: unpack/read → decode → stamp version → encode → write/pack.
//! All temporary state lives in scoped temp directories that are removed
//! on every exit path, success or failure.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::archive;
use super::error::{ConvertError, ConvertResult};
use super::json_codec;
use super::types::MapDocument;
use super::xml_parser;
use super::xml_writer;

/// Version marker stamped into every produced `.mm` document.
///
/// The two formats number versions on incompatible schemes, so the
/// source value is never forwarded; each direction stamps the canonical
/// marker its target format expects.
pub const FREEMIND_FORMAT_VERSION: &str = "1.0.1";

/// Version marker stamped into every produced dotMind payload.
pub const DOTMIND_FORMAT_VERSION: &str = "2.6";

/// The single well-known entry name inside a dotMind archive.
pub const MAP_ENTRY_NAME: &str = "map.json";

/// Per-conversion configuration, passed in explicitly so independent
/// conversions (and tests) never share process state.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Emit per-stage diagnostics about the decoded document.
    pub debug: bool,
}

/// Runs the two conversion pipelines.
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    /// dotMind → freemind: unpack the archive, decode `map.json`, stamp
    /// the freemind version marker, write `.mm` XML to `output`.
    pub fn dotmind_to_freemind(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let workdir = tempfile::tempdir().map_err(|e| ConvertError::Io(e.to_string()))?;
        archive::unpack_archive(input, workdir.path())?;

        let manifest = workdir.path().join(MAP_ENTRY_NAME);
        let bytes = fs::read(&manifest).map_err(|e| {
            ConvertError::Io(format!("cannot read {} from archive: {}", MAP_ENTRY_NAME, e))
        })?;

        let mut doc = json_codec::decode_json(&bytes)?;
        self.trace_document(&doc);
        doc.version = FREEMIND_FORMAT_VERSION.to_string();

        let xml = xml_writer::write_xml(&doc)?;
        fs::write(output, xml)
            .map_err(|e| ConvertError::Io(format!("cannot write {}: {}", output.display(), e)))?;

        Ok(())
    }

    /// freemind → dotMind: read the `.mm` XML, stamp the dotMind version
    /// marker, stage `map.json` in a temp dir, pack it into `output`.
    pub fn freemind_to_dotmind(&self, input: &Path, output: &Path) -> ConvertResult<()> {
        let bytes = fs::read(input)
            .map_err(|e| ConvertError::Io(format!("cannot read {}: {}", input.display(), e)))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ConvertError::XmlDecode(format!("input is not UTF-8: {}", e)))?;

        let mut doc = xml_parser::parse_xml(&content)?;
        self.trace_document(&doc);
        doc.version = DOTMIND_FORMAT_VERSION.to_string();

        let json = json_codec::encode_json(&doc)?;

        // Staged in a scoped temp dir so no map.json is left behind in
        // the working directory after packing.
        let workdir = tempfile::tempdir().map_err(|e| ConvertError::Io(e.to_string()))?;
        let manifest = workdir.path().join(MAP_ENTRY_NAME);
        fs::write(&manifest, json)?;

        archive::pack_archive(output, &[(manifest.as_path(), MAP_ENTRY_NAME)])
    }

    fn trace_document(&self, doc: &MapDocument) {
        if self.options.debug {
            debug!(
                version = %doc.version,
                root = %doc.root.text,
                nodes = doc.root.count(),
                "decoded document"
            );
        }
    }
}
