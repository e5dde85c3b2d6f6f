//! Saved Docs API response through the whole pipeline.

#![cfg(feature = "gdocs")]
#![allow(clippy::unwrap_used)]

use quire::core::{DocumentId, DocumentSource, Value};
use quire::default_assembler;
use quire::gdocs::FileSource;

const FIXTURE: &str = "../quire-adapter-gdocs/tests/fixtures/document.json";

async fn load() -> quire::core::Document {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE);
    FileSource::new(path)
        .fetch(&DocumentId::new("doc-123"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_top_level_tabs() {
    let document = load().await;
    let records = default_assembler()
        .process_document(&document, false)
        .unwrap();

    assert_eq!(records.len(), 2);

    let main = &records[0].record;
    assert_eq!(main["headline"], Value::from("<strong>Polls close</strong>"));
    assert_eq!(
        main["races"],
        Value::Array(vec![Value::from("Governor"), Value::from("Senate")])
    );

    let results = &records[1].record;
    assert_eq!(results["intro"], Value::from("<p><strong>hi</strong></p>"));
    assert_eq!(results["status"], Value::from("final"));
}

#[tokio::test]
async fn test_child_tabs_included_depth_first() {
    let document = load().await;
    let records = default_assembler()
        .process_document(&document, true)
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["t.0", "t.child", "t.1"]);
    assert_eq!(records[1].record["note"], Value::from("internal"));
}
