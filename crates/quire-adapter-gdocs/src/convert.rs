//! Conversion from the API wire model to the core document model.

use quire_core::{Document, DocumentId, Paragraph, Tab, TextRun};

use crate::api;
use crate::error::{Error, Result};

/// Converts an API response into a [`Document`], keeping tab and paragraph
/// order.
///
/// Fails with [`Error::MissingTabs`] when the response carries no `tabs`
/// array, which happens when tab content was not requested.
pub fn convert_document(doc: api::Document) -> Result<Document> {
    let Some(tabs) = doc.tabs else {
        return Err(Error::MissingTabs {
            document: doc
                .document_id
                .or(doc.title)
                .unwrap_or_else(|| "<unknown>".to_string()),
        });
    };

    let tabs: Vec<Tab> = tabs.into_iter().map(convert_tab).collect();
    tracing::debug!(tabs = tabs.len(), "Converted document");

    Ok(Document {
        id: doc.document_id.map(DocumentId::new),
        title: doc.title,
        tabs,
    })
}

fn convert_tab(tab: api::Tab) -> Tab {
    let body = tab
        .document_tab
        .and_then(|dt| dt.body)
        .map(|body| {
            body.content
                .into_iter()
                .filter_map(|element| element.paragraph)
                .map(convert_paragraph)
                .collect()
        })
        .unwrap_or_default();

    let mut converted = Tab::new(tab.tab_properties.tab_id, tab.tab_properties.title, body);
    converted.children = tab.child_tabs.into_iter().map(convert_tab).collect();
    converted
}

fn convert_paragraph(paragraph: api::Paragraph) -> Paragraph {
    let runs = paragraph
        .elements
        .into_iter()
        .map(|element| match element.text_run {
            Some(run) => TextRun {
                text: run.content,
                bold: run.text_style.bold.unwrap_or(false),
            },
            None => TextRun::empty(),
        })
        .collect();

    Paragraph {
        is_bullet: paragraph.bullet.is_some(),
        runs,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/document.json");

    fn fixture() -> Document {
        let doc: api::Document = serde_json::from_str(FIXTURE).unwrap();
        convert_document(doc).unwrap()
    }

    #[test]
    fn test_document_metadata() {
        let doc = fixture();
        assert_eq!(doc.id, Some(DocumentId::new("doc-123")));
        assert_eq!(doc.title.as_deref(), Some("Election Night"));
    }

    #[test]
    fn test_tab_order_and_ids() {
        let doc = fixture();
        let ids: Vec<&str> = doc.tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t.0", "t.1"]);
        assert_eq!(doc.tabs[0].title, "Main");
    }

    #[test]
    fn test_non_paragraph_elements_skipped() {
        let doc = fixture();
        // section break and table contribute nothing
        assert_eq!(doc.tabs[0].body.len(), 5);
    }

    #[test]
    fn test_runs_and_bold() {
        let doc = fixture();
        let first = &doc.tabs[0].body[0];
        assert!(!first.is_bullet);
        assert_eq!(
            first.runs,
            vec![
                TextRun::plain("headline: "),
                TextRun::bold("Polls close"),
                TextRun::plain("\n"),
            ]
        );
    }

    #[test]
    fn test_bullets_and_non_text_elements() {
        let doc = fixture();
        let senate = &doc.tabs[0].body[3];
        assert!(senate.is_bullet);
        assert_eq!(senate.runs, vec![TextRun::empty(), TextRun::plain("Senate\n")]);
    }

    #[test]
    fn test_child_tabs() {
        let doc = fixture();
        assert_eq!(doc.tabs[0].children.len(), 1);
        assert_eq!(doc.tabs[0].children[0].id.as_str(), "t.child");

        let all: Vec<&str> = doc.flattened_tabs().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(all, ["t.0", "t.child", "t.1"]);
    }

    #[test]
    fn test_missing_tabs() {
        let doc: api::Document =
            serde_json::from_str(r#"{"documentId": "legacy", "body": {"content": []}}"#).unwrap();
        let err = convert_document(doc).unwrap_err();
        assert!(matches!(err, Error::MissingTabs { ref document } if document == "legacy"));
    }

    #[test]
    fn test_tab_without_body() {
        let doc: api::Document = serde_json::from_str(
            r#"{"tabs": [{"tabProperties": {"tabId": "t.0", "title": "Empty"}}]}"#,
        )
        .unwrap();
        let converted = convert_document(doc).unwrap();
        assert!(converted.tabs[0].body.is_empty());
    }
}
