//! Flattening a tab's paragraphs into a single markup string.

use crate::model::{Paragraph, TextRun};

/// Marker prepended to non-empty bullet paragraphs.
pub const BULLET_MARKER: &str = "* ";

const STRONG_OPEN: &str = "<strong>";
const STRONG_CLOSE: &str = "</strong>";

/// Flattens paragraphs into one string.
///
/// Paragraphs are concatenated with no separator. Empty paragraphs vanish
/// entirely, bullet marker included; line breaks only appear where the run
/// text itself contains them.
///
/// # Examples
///
/// ```
/// use quire_core::{flatten, Paragraph, TextRun};
///
/// let body = vec![
///     Paragraph::bullet(vec![TextRun::plain("a")]),
///     Paragraph::bullet(vec![TextRun::plain("b")]),
/// ];
/// assert_eq!(flatten(&body), "* a* b");
/// ```
pub fn flatten(paragraphs: &[Paragraph]) -> String {
    paragraphs.iter().map(flatten_paragraph).collect()
}

/// Flattens one paragraph; returns an empty string when it has no text.
pub fn flatten_paragraph(paragraph: &Paragraph) -> String {
    let text: String = paragraph
        .runs
        .iter()
        .map(run_markup)
        .filter(|fragment| !fragment.is_empty())
        .collect();

    if paragraph.is_bullet && !text.is_empty() {
        format!("{BULLET_MARKER}{text}")
    } else {
        text
    }
}

fn run_markup(run: &TextRun) -> String {
    if run.text.is_empty() {
        String::new()
    } else if run.bold {
        format!("{STRONG_OPEN}{}{STRONG_CLOSE}", run.text)
    } else {
        run.text.clone()
    }
}
