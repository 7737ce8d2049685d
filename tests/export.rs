use std::fs;
use std::path::Path;

use noteport::{export, FsSink, JsonDumpStore};

const RES: &str = "deadbeefdeadbeefdeadbeefdeadbee0";
const OTHER_NOTE: &str = "0123456789abcdef0123456789abcdef";

fn write_dump(dir: &Path) -> std::path::PathBuf {
    fs::create_dir_all(dir.join("blobs")).unwrap();
    fs::write(dir.join("blobs/photo.png"), b"\x89PNG fake").unwrap();

    let dump = serde_json::json!({
        "items": [
            {
                "type": "note",
                "id": "abc123",
                "parent_id": "F1",
                "title": "Hello \"World\"",
                "created_time": 1700000000000i64,
                "body": format!("![img](:/{})\n\nsee [other](:/{})", RES, OTHER_NOTE)
            },
            { "type": "folder", "id": "F1", "title": "Notes", "parent_id": "" },
            { "type": "resource", "id": RES, "location": "blobs/photo.png" },
            {
                "type": "note",
                "id": "root1",
                "parent_id": "",
                "title": "Top",
                "created_time": 0,
                "body": "# Already titled\n[site](https://example.com)"
            }
        ],
        "tags": { "abc123": ["x", "y"] }
    });
    let path = dir.join("dump.json");
    fs::write(&path, serde_json::to_string_pretty(&dump).unwrap()).unwrap();
    path
}

#[test]
fn exports_nested_note_with_rewritten_links() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let store = JsonDumpStore::open(write_dump(input.path())).unwrap();

    let (report, _) = export(&store, output.path(), FsSink).unwrap();
    assert_eq!(report.notes_written, 2);
    assert_eq!(report.resources_copied, 1);
    assert_eq!(report.note_links, 1);
    assert!(report.missing_resources.is_empty());

    let note = fs::read_to_string(output.path().join("Notes/abc123.md")).unwrap();
    let (front, body) = note
        .strip_prefix("---\n")
        .and_then(|rest| rest.split_once("---\n\n"))
        .unwrap();

    let yaml: serde_yaml::Value = serde_yaml::from_str(front).unwrap();
    assert_eq!(yaml["id"].as_str(), Some("abc123"));
    assert_eq!(yaml["title"].as_str(), Some("Hello \"World\""));
    assert_eq!(yaml["created"].as_str(), Some("2023-11-14T22:13:20.000Z"));
    assert_eq!(yaml["tags"][0].as_str(), Some("x"));
    assert_eq!(yaml["tags"][1].as_str(), Some("y"));
    assert!(front.contains("title: \"Hello \\\"World\\\"\"\n"));

    assert_eq!(
        body,
        format!(
            "# Hello \"World\"\n\n![img](../resources/photo.png)\n\nsee [[{}|other]]",
            OTHER_NOTE
        )
    );

    let copied = fs::read(output.path().join("resources/photo.png")).unwrap();
    assert_eq!(copied, b"\x89PNG fake");
}

#[test]
fn root_note_keeps_existing_heading() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let store = JsonDumpStore::open(write_dump(input.path())).unwrap();

    export(&store, output.path(), FsSink).unwrap();

    let note = fs::read_to_string(output.path().join("root1.md")).unwrap();
    assert!(note.contains("tags: []\n---\n\n# Already titled\n[site](https://example.com)"));
    assert!(!note.contains("# Top"));
}

#[test]
fn second_run_starts_fresh() {
    let input = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let store = JsonDumpStore::open(write_dump(input.path())).unwrap();

    let (a, _) = export(&store, first.path(), FsSink).unwrap();
    let (b, _) = export(&store, second.path(), FsSink).unwrap();
    assert_eq!(a.notes_written, b.notes_written);
    assert_eq!(
        fs::read_to_string(first.path().join("Notes/abc123.md")).unwrap(),
        fs::read_to_string(second.path().join("Notes/abc123.md")).unwrap()
    );
}

#[test]
fn missing_resource_file_aborts() {
    let output = tempfile::tempdir().unwrap();
    let dump = format!(
        r#"{{"items": [{{"type": "resource", "id": "{}", "location": "/definitely/not/here.png"}}]}}"#,
        RES
    );
    let store = JsonDumpStore::parse(&dump, Path::new("")).unwrap();
    let err = export(&store, output.path(), FsSink).unwrap_err();
    assert!(matches!(err, noteport::ExportError::CopyResource { .. }));
}
