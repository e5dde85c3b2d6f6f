//! Per-tab assembly: flatten, extract, parse, markdownify, merge.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;

use crate::error::Result;
use crate::extras::{Extraction, extract};
use crate::flatten::flatten;
use crate::markdownify::markdownify_record;
use crate::model::{Document, Tab, TabId};
use crate::traits::{MarkupRenderer, RecordParser};
use crate::value::{Record, Value};

/// Output key the final record is stored under by default.
pub const DEFAULT_RECORD_KEY: &str = "archie";

/// The processed form of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRecord {
    /// Tab label, unchanged.
    pub title: String,
    /// Tab identifier, unchanged.
    pub id: TabId,
    /// Markdownified record with rendered extras merged on top.
    pub record: Record,
}

impl TabRecord {
    /// Serializable view that stores the record under `record_key`.
    pub fn keyed<'a>(&'a self, record_key: &'a str) -> KeyedTabRecord<'a> {
        KeyedTabRecord {
            tab: self,
            record_key,
        }
    }
}

/// A [`TabRecord`] serialized as `{"title", "id", <record_key>}`.
#[derive(Debug, Clone, Copy)]
pub struct KeyedTabRecord<'a> {
    tab: &'a TabRecord,
    record_key: &'a str,
}

impl Serialize for KeyedTabRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("title", &self.tab.title)?;
        map.serialize_entry("id", &self.tab.id)?;
        map.serialize_entry(self.record_key, &self.tab.record)?;
        map.end()
    }
}

/// A sequence of tab records serialized as a JSON array.
#[derive(Debug, Clone, Copy)]
pub struct OutputDocument<'a> {
    tabs: &'a [TabRecord],
    record_key: &'a str,
}

impl<'a> OutputDocument<'a> {
    /// Wraps processed tabs for serialization.
    pub fn new(tabs: &'a [TabRecord], record_key: &'a str) -> Self {
        Self { tabs, record_key }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for OutputDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.tabs.len()))?;
        for tab in self.tabs {
            seq.serialize_element(&tab.keyed(self.record_key))?;
        }
        seq.end()
    }
}

/// Runs the tab pipeline with a given parser and renderer.
///
/// Holds no per-tab state, so one assembler can process any number of tabs,
/// from any number of threads.
#[derive(Clone)]
pub struct TabAssembler {
    parser: Arc<dyn RecordParser>,
    renderer: Arc<dyn MarkupRenderer>,
}

impl TabAssembler {
    /// Creates an assembler.
    pub fn new(parser: Arc<dyn RecordParser>, renderer: Arc<dyn MarkupRenderer>) -> Self {
        Self { parser, renderer }
    }

    /// Processes one tab.
    ///
    /// Any failing step aborts the tab; the error is wrapped with the tab's
    /// id and title.
    pub fn process_tab(&self, tab: &Tab) -> Result<TabRecord> {
        self.build_record(tab)
            .map(|record| TabRecord {
                title: tab.title.clone(),
                id: tab.id.clone(),
                record,
            })
            .map_err(|e| e.in_tab(tab.id.as_str(), tab.title.as_str()))
    }

    /// Processes tabs lazily, yielding one result per tab in input order.
    pub fn process_tabs<'a, I>(&'a self, tabs: I) -> impl Iterator<Item = Result<TabRecord>> + 'a
    where
        I: IntoIterator<Item = &'a Tab>,
        I::IntoIter: 'a,
    {
        tabs.into_iter().map(move |tab| self.process_tab(tab))
    }

    /// Processes every top-level tab, or every tab depth-first when
    /// `include_children` is set. Stops at the first failing tab.
    pub fn process_document(
        &self,
        document: &Document,
        include_children: bool,
    ) -> Result<Vec<TabRecord>> {
        if include_children {
            self.process_tabs(document.flattened_tabs()).collect()
        } else {
            self.process_tabs(&document.tabs).collect()
        }
    }

    fn build_record(&self, tab: &Tab) -> Result<Record> {
        let text = flatten(&tab.body);
        tracing::debug!(tab = %tab.id, chars = text.len(), "Flattened tab");

        let Extraction { remainder, extras } = extract(&text, self.renderer.as_ref())?;
        let parsed = self.parser.parse(&remainder)?;
        let mut record = markdownify_record(parsed, self.renderer.as_ref())?;

        for (name, html) in extras {
            if record.insert(name.clone(), Value::String(html)).is_some() {
                tracing::debug!(tab = %tab.id, key = %name, "Extra block replaced parsed key");
            }
        }

        tracing::debug!(tab = %tab.id, keys = record.len(), "Assembled tab record");
        Ok(record)
    }
}

impl std::fmt::Debug for TabAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabAssembler").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::{Paragraph, TextRun};

    /// Parses `key: value` lines; a line `!` is a grammar error.
    struct LineParser;

    impl RecordParser for LineParser {
        fn parse(&self, text: &str) -> Result<Record> {
            let mut record = Record::new();
            for (n, line) in text.lines().enumerate() {
                if line == "!" {
                    return Err(Error::grammar(n + 1, "bang"));
                }
                if let Some((k, v)) = line.split_once(':') {
                    record.insert(k.trim().to_string(), Value::from(v.trim()));
                }
            }
            Ok(record)
        }
    }

    /// Marks inline output with `i()` and block output with `b()`.
    struct MarkRenderer;

    impl MarkupRenderer for MarkRenderer {
        fn render_inline(&self, text: &str) -> Result<String> {
            Ok(format!("i({text})"))
        }

        fn render_block(&self, text: &str) -> Result<String> {
            Ok(format!("b({})", text.trim()))
        }
    }

    fn assembler() -> TabAssembler {
        TabAssembler::new(Arc::new(LineParser), Arc::new(MarkRenderer))
    }

    fn tab(id: &str, lines: &[&str]) -> Tab {
        let body = lines
            .iter()
            .map(|l| Paragraph::new(vec![TextRun::plain(*l)]))
            .collect();
        Tab::new(id, format!("Tab {id}"), body)
    }

    #[test]
    fn test_process_tab_merges_extras() {
        let t = tab("t.1", &["title: Hello\n", "+intro: welcome :end\n"]);
        let out = assembler().process_tab(&t).unwrap();

        assert_eq!(out.id, TabId::new("t.1"));
        assert_eq!(out.title, "Tab t.1");
        assert_eq!(out.record.get("title"), Some(&Value::from("i(Hello)")));
        assert_eq!(out.record.get("intro"), Some(&Value::from("b(welcome)")));
    }

    #[test]
    fn test_extra_overrides_parsed_key() {
        let t = tab("t.1", &["intro: parsed\n", "+intro: extra :end\n"]);
        let out = assembler().process_tab(&t).unwrap();
        assert_eq!(out.record.get("intro"), Some(&Value::from("b(extra)")));
        assert_eq!(out.record.len(), 1);
    }

    #[test]
    fn test_grammar_error_wrapped_with_tab() {
        let t = tab("t.9", &["a: 1\n", "!\n"]);
        let err = assembler().process_tab(&t).unwrap_err();
        match err {
            Error::Tab { id, title, source } => {
                assert_eq!(id, "t.9");
                assert_eq!(title, "Tab t.9");
                assert!(matches!(*source, Error::Grammar { line: 2, .. }));
            }
            other => unreachable!("expected Tab error, got {other:?}"),
        }
    }

    #[test]
    fn test_process_document_preserves_order() {
        let doc = Document::new(vec![tab("b", &["k: 1\n"]), tab("a", &["k: 2\n"])]);
        let out = assembler().process_document(&doc, false).unwrap();
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_process_document_with_children() {
        let mut parent = tab("p", &["k: 1\n"]);
        parent.children.push(tab("c", &["k: 2\n"]));
        let doc = Document::new(vec![parent]);

        assert_eq!(assembler().process_document(&doc, false).unwrap().len(), 1);
        let all = assembler().process_document(&doc, true).unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "c"]);
    }

    #[test]
    fn test_process_tabs_yields_each_result() {
        let tabs = [tab("ok", &["k: v\n"]), tab("bad", &["!\n"]), tab("ok2", &[])];
        let asm = assembler();
        let results: Vec<_> = asm.process_tabs(&tabs).collect();
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().record.is_empty());
    }

    #[test]
    fn test_output_document_shape() {
        let mut record = Record::new();
        record.insert("k".to_string(), Value::from("v"));
        let tabs = vec![TabRecord {
            title: "Intro".to_string(),
            id: TabId::new("t.0"),
            record,
        }];

        let json = serde_json::to_string(&OutputDocument::new(&tabs, DEFAULT_RECORD_KEY)).unwrap();
        assert_eq!(json, r#"[{"title":"Intro","id":"t.0","archie":{"k":"v"}}]"#);

        let json = serde_json::to_string(&OutputDocument::new(&tabs, "data")).unwrap();
        assert!(json.contains(r#""data":{"k":"v"}"#));
    }
}
