//! XML parser for the freemind `.mm` format.
//!
//! Reads the outline tree from XML, handling:
//! - Root `<map>` element with its `version` attribute
//! - `<node TEXT="...">` elements, arbitrarily nested
//! - Self-closing `<node/>` leaves
//!
//! Parsing is iterative: open elements live on an explicit stack, so
//! nesting depth never grows the call stack. Depth past
//! `MAX_NODE_DEPTH` is rejected as malformed.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str;

use super::error::{ConvertError, ConvertResult};
use super::types::{MapDocument, MapNode};

/// Maximum `<node>` nesting depth accepted by the parser.
pub const MAX_NODE_DEPTH: usize = 128;

/// Parse a freemind `.mm` document from a string.
pub fn parse_xml(xml_content: &str) -> ConvertResult<MapDocument> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut version: Option<String> = None;
    let mut in_map = false;
    let mut root: Option<MapNode> = None;
    let mut stack: Vec<MapNode> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match tag_name(e)? {
                "map" => {
                    version = Some(parse_map_element(e)?);
                    in_map = true;
                }
                "node" => {
                    if !in_map {
                        return Err(ConvertError::XmlDecode(
                            "<node> element outside <map>".into(),
                        ));
                    }
                    if stack.len() >= MAX_NODE_DEPTH {
                        return Err(ConvertError::XmlDecode(format!(
                            "node nesting exceeds depth limit of {}",
                            MAX_NODE_DEPTH
                        )));
                    }
                    stack.push(parse_node_element(e)?);
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match tag_name(e)? {
                "map" => {
                    // <map/> never opens, so any node after it is
                    // outside the map; the missing root is reported
                    // after the event loop.
                    version = Some(parse_map_element(e)?);
                }
                "node" => {
                    if !in_map {
                        return Err(ConvertError::XmlDecode(
                            "<node> element outside <map>".into(),
                        ));
                    }
                    let node = parse_node_element(e)?;
                    attach(node, &mut stack, &mut root)?;
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"node" => {
                    if let Some(node) = stack.pop() {
                        attach(node, &mut stack, &mut root)?;
                    }
                }
                b"map" => {
                    in_map = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::XmlDecode(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    let version = version.ok_or_else(|| ConvertError::XmlDecode("missing <map> root element".into()))?;
    let root = root.ok_or_else(|| ConvertError::XmlDecode("missing root <node> element".into()))?;

    Ok(MapDocument { version, root })
}

/// Attach a completed node to its parent, or install it as the root.
fn attach(node: MapNode, stack: &mut Vec<MapNode>, root: &mut Option<MapNode>) -> ConvertResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(ConvertError::XmlDecode("multiple top-level <node> elements".into()));
    } else {
        *root = Some(node);
    }
    Ok(())
}

fn tag_name<'a>(e: &'a BytesStart) -> ConvertResult<&'a str> {
    str::from_utf8(e.name().into_inner())
        .map_err(|_| ConvertError::XmlDecode("invalid UTF-8 in tag name".into()))
}

/// Read the `version` attribute off the `<map>` element.
fn parse_map_element(e: &BytesStart) -> ConvertResult<String> {
    let mut version = String::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"version" {
            version = attr
                .unescape_value()
                .map_err(|e| ConvertError::XmlDecode(e.to_string()))?
                .into_owned();
        }
    }
    Ok(version)
}

/// Read a `<node>` element's `TEXT` attribute into a fresh `MapNode`.
fn parse_node_element(e: &BytesStart) -> ConvertResult<MapNode> {
    let mut node = MapNode::default();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"TEXT" {
            node.text = attr
                .unescape_value()
                .map_err(|e| ConvertError::XmlDecode(e.to_string()))?
                .into_owned();
        }
    }
    Ok(node)
}
