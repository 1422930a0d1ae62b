use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use mind2mm::{ConvertError, ConvertOptions, Converter, MAP_ENTRY_NAME};

fn converter() -> Converter {
    Converter::new(ConvertOptions::default())
}

/// Build a .mind archive holding the given bytes under the given entry name.
fn write_dotmind_entry(path: &Path, entry_name: &str, payload: &[u8]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file(entry_name, SimpleFileOptions::default()).unwrap();
    zip.write_all(payload).unwrap();
    zip.finish().unwrap();
}

fn write_dotmind(path: &Path, json: &str) {
    write_dotmind_entry(path, MAP_ENTRY_NAME, json.as_bytes());
}

/// Read the map.json payload back out of a produced .mind archive.
fn read_dotmind_payload(path: &Path) -> String {
    let file = File::open(path).unwrap();
    let mut zip = ZipArchive::new(file).unwrap();
    let mut entry = zip.by_name(MAP_ENTRY_NAME).unwrap();
    let mut payload = String::new();
    std::io::Read::read_to_string(&mut entry, &mut payload).unwrap();
    payload
}

const SAMPLE_JSON: &str = r#"{
    "map_version": "2.6",
    "root": {
        "title": "Root",
        "children": [
            {"title": "A", "children": [
                {"title": "A1", "children": []},
                {"title": "A2", "children": []}
            ]},
            {"title": "B", "children": []}
        ]
    }
}"#;

#[test]
fn test_dotmind_to_freemind_stamps_version() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mind");
    let output = dir.path().join("out.mm");
    write_dotmind(&input, r#"{"map_version":"9.9","root":{"title":"X","children":[]}}"#);

    converter().dotmind_to_freemind(&input, &output).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<map version="1.0.1">"#));
    assert!(!xml.contains("9.9"));
}

#[test]
fn test_freemind_to_dotmind_stamps_version() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mm");
    let output = dir.path().join("out.mind");
    fs::write(&input, r#"<map version="0.7.1"><node TEXT="X"/></map>"#).unwrap();

    converter().freemind_to_dotmind(&input, &output).unwrap();

    let payload = read_dotmind_payload(&output);
    assert!(payload.contains(r#""map_version":"2.6""#));
    assert!(!payload.contains("0.7.1"));
}

#[test]
fn test_round_trip_preserves_text_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let mind_in = dir.path().join("in.mind");
    let mm = dir.path().join("mid.mm");
    let mind_out = dir.path().join("out.mind");
    write_dotmind(&mind_in, SAMPLE_JSON);

    let conv = converter();
    conv.dotmind_to_freemind(&mind_in, &mm).unwrap();
    conv.freemind_to_dotmind(&mm, &mind_out).unwrap();

    let payload = read_dotmind_payload(&mind_out);
    let doc: serde_json::Value = serde_json::from_str(&payload).unwrap();

    assert_eq!(doc["map_version"], "2.6");
    assert_eq!(doc["root"]["title"], "Root");
    assert_eq!(doc["root"]["children"][0]["title"], "A");
    assert_eq!(doc["root"]["children"][0]["children"][0]["title"], "A1");
    assert_eq!(doc["root"]["children"][0]["children"][1]["title"], "A2");
    assert_eq!(doc["root"]["children"][1]["title"], "B");
}

#[test]
fn test_three_level_tree_fidelity_in_xml() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mind");
    let output = dir.path().join("out.mm");
    write_dotmind(&input, SAMPLE_JSON);

    converter().dotmind_to_freemind(&input, &output).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    let a1 = xml.find(r#"TEXT="A1""#).unwrap();
    let a2 = xml.find(r#"TEXT="A2""#).unwrap();
    let b = xml.find(r#"TEXT="B""#).unwrap();
    assert!(a1 < a2 && a2 < b, "sibling order must be preserved");
}

#[test]
fn test_empty_children_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mm");
    let output = dir.path().join("out.mind");
    fs::write(&input, r#"<map version="1.0.1"><node TEXT="Leaf"/></map>"#).unwrap();

    converter().freemind_to_dotmind(&input, &output).unwrap();

    let payload = read_dotmind_payload(&output);
    assert!(payload.contains(r#""children":[]"#), "children must be present, not absent");
}

#[test]
fn test_traversal_archive_fails_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("evil.mind");
    let output = dir.path().join("out.mm");
    write_dotmind_entry(&input, "../escape.txt", b"pwned");

    let err = converter().dotmind_to_freemind(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::PathTraversal(_)));
    assert!(!output.exists());
    assert!(!dir.path().join("escape.txt").exists());
}

#[test]
fn test_malformed_json_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.mind");
    let output = dir.path().join("out.mm");
    write_dotmind(&input, "definitely not json");

    let err = converter().dotmind_to_freemind(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::JsonDecode(_)));
    assert!(!output.exists());
}

#[test]
fn test_malformed_xml_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.mm");
    let output = dir.path().join("out.mind");
    fs::write(&input, "definitely not xml").unwrap();

    let err = converter().freemind_to_dotmind(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::XmlDecode(_)));
    assert!(!output.exists());
}

#[test]
fn test_archive_without_map_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("odd.mind");
    let output = dir.path().join("out.mm");
    write_dotmind_entry(&input, "other.json", b"{}");

    let err = converter().dotmind_to_freemind(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
    assert!(!output.exists());
}

#[test]
fn test_no_map_json_left_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mm");
    let output = dir.path().join("out.mind");
    fs::write(&input, r#"<map version="1.0.1"><node TEXT="X"/></map>"#).unwrap();

    converter().freemind_to_dotmind(&input, &output).unwrap();

    assert!(!Path::new(MAP_ENTRY_NAME).exists());
    assert!(!dir.path().join(MAP_ENTRY_NAME).exists());
}

#[test]
fn test_missing_text_becomes_empty_string() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.mind");
    let output = dir.path().join("out.mm");
    write_dotmind(&input, r#"{"map_version":"2.6","root":{"children":[]}}"#);

    converter().dotmind_to_freemind(&input, &output).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"<node TEXT=""/>"#));
}
