//! XML writer for the freemind `.mm` format.
//!
//! Emits `<map version="...">` wrapping the node tree, with leaves as
//! self-closing `<node .../>` elements. The tree is walked with an
//! explicit work stack rather than recursion, so document depth never
//! grows the call stack. Output is compact, matching what freemind
//! itself accepts (no XML declaration, no indentation).

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::error::{ConvertError, ConvertResult};
use super::types::{MapDocument, MapNode};

enum WriteStep<'a> {
    Open(&'a MapNode),
    Close,
}

/// Serialize a document to freemind XML.
pub fn write_xml(doc: &MapDocument) -> ConvertResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut map_elem = BytesStart::new("map");
    map_elem.push_attribute(("version", doc.version.as_str()));
    writer
        .write_event(Event::Start(map_elem))
        .map_err(|e| ConvertError::Serialization(e.to_string()))?;

    let mut stack = vec![WriteStep::Open(&doc.root)];
    while let Some(step) = stack.pop() {
        match step {
            WriteStep::Open(node) => {
                let mut elem = BytesStart::new("node");
                elem.push_attribute(("TEXT", node.text.as_str()));

                if node.children.is_empty() {
                    writer
                        .write_event(Event::Empty(elem))
                        .map_err(|e| ConvertError::Serialization(e.to_string()))?;
                } else {
                    writer
                        .write_event(Event::Start(elem))
                        .map_err(|e| ConvertError::Serialization(e.to_string()))?;
                    stack.push(WriteStep::Close);
                    // Children pushed in reverse so they pop in order.
                    for child in node.children.iter().rev() {
                        stack.push(WriteStep::Open(child));
                    }
                }
            }
            WriteStep::Close => {
                writer
                    .write_event(Event::End(BytesEnd::new("node")))
                    .map_err(|e| ConvertError::Serialization(e.to_string()))?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("map")))
        .map_err(|e| ConvertError::Serialization(e.to_string()))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ConvertError::Serialization(e.to_string()))
}
