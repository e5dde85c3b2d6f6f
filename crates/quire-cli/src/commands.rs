//! `fetch` and `convert`: retrieve a document, process its tabs, write the
//! records.

use std::io::Write;
use std::path::Path;

use quire::auth::{ServiceAccountKey, TokenProvider};
use quire::core::assemble::OutputDocument;
use quire::core::{Document, DocumentId, DocumentSource, Error, Result, TabAssembler, TabRecord};
use quire::gdocs::{FileSource, GoogleDocsSource};

use crate::config::{OutputConfig, QuireConfig};

/// What a run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Tabs written to the output.
    pub written: usize,
    /// Tabs skipped because they failed (only with `keep_going`).
    pub failed: usize,
}

/// Fetches the configured document from Google Docs.
pub async fn cmd_fetch(config: &QuireConfig, keep_going: bool) -> Result<RunSummary> {
    config.validate_for_fetch()?;

    let key = ServiceAccountKey::from_file(&config.credentials.path, config.credentials.section())
        .map_err(|e| Error::config(e.to_string()))?;
    let tokens = TokenProvider::new(key, config.credentials.scopes.clone());
    let source = GoogleDocsSource::with_base_url(tokens, config.api.base_url.clone());

    let id = DocumentId::new(config.document.id.trim());
    run(&source, &id, config, keep_going).await
}

/// Processes a saved Docs API response.
pub async fn cmd_convert(config: &QuireConfig, input: &Path, keep_going: bool) -> Result<RunSummary> {
    config.validate()?;
    let source = FileSource::new(input);
    let id = DocumentId::new(input.display().to_string());
    run(&source, &id, config, keep_going).await
}

async fn run<S>(source: &S, id: &DocumentId, config: &QuireConfig, keep_going: bool) -> Result<RunSummary>
where
    S: DocumentSource + ?Sized,
{
    let document = source.fetch(id).await?;
    tracing::info!(
        document = %id,
        title = document.title.as_deref().unwrap_or(""),
        tabs = document.tabs.len(),
        "Document retrieved"
    );

    let assembler = quire::default_assembler();
    let (records, failed) = process(
        &assembler,
        &document,
        config.document.include_child_tabs,
        keep_going,
    )?;

    write_output(&records, &config.output)?;
    let summary = RunSummary {
        written: records.len(),
        failed,
    };
    tracing::info!(written = summary.written, failed = summary.failed, "Done");
    Ok(summary)
}

/// Processes every selected tab.
///
/// Without `keep_going` the first failing tab aborts with its error. With it,
/// failing tabs are logged and left out; the count of skipped tabs is
/// returned with the records.
pub fn process(
    assembler: &TabAssembler,
    document: &Document,
    include_children: bool,
    keep_going: bool,
) -> Result<(Vec<TabRecord>, usize)> {
    let tabs = if include_children {
        document.flattened_tabs()
    } else {
        document.tabs.iter().collect()
    };

    let mut records = Vec::with_capacity(tabs.len());
    let mut failed = 0;
    for result in assembler.process_tabs(tabs) {
        match result {
            Ok(record) => records.push(record),
            Err(e) if keep_going && e.is_tab_scoped() => {
                tracing::warn!(error = %e, "Skipping tab");
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok((records, failed))
}

/// Writes records as pretty JSON to the configured file or stdout.
pub fn write_output(records: &[TabRecord], output: &OutputConfig) -> Result<()> {
    let json = OutputDocument::new(records, &output.record_key).to_json_pretty()?;

    if output.is_stdout() {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        return Ok(());
    }

    if let Some(parent) = output.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output.path, json)?;
    tracing::info!(path = %output.path.display(), tabs = records.len(), "Wrote records");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
