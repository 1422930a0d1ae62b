//! Library surface of the `mind2mm` converter.

pub mod mindmap;

pub use mindmap::{
    ConvertError, ConvertOptions, ConvertResult, Converter, MapDocument, MapNode,
    DOTMIND_FORMAT_VERSION, FREEMIND_FORMAT_VERSION, MAP_ENTRY_NAME,
};
