//! Extraction of named `+name: ... :end` blocks from flattened text.
//!
//! A block starts with `+` followed by a name made of ASCII letters, digits,
//! `-` or `_`, and a `:`. Its content runs up to the first following `:end`;
//! whitespace right before `:end` is not part of the content, and a single
//! line break right after `:end` is removed along with the block.
//!
//! ```text
//! +intro:
//! Some **markdown** here.
//! :end
//! ```
//!
//! Blocks do not nest: a start marker inside an open block is plain content.
//! A start marker with no `:end` after it is plain text.
//!
//! Removing a block can join the text around it into a new block, as in
//! `+a` `+x: 1 :end` `b: 2 :end`. Scanning repeats over the remainder until a
//! pass finds nothing, so the remainder never contains a block.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::traits::MarkupRenderer;

const START_SIGIL: char = '+';
const NAME_TERMINATOR: char = ':';
const END_MARKER: &str = ":end";

/// A named block as found in the text, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraBlock {
    /// Block name.
    pub name: String,
    /// Content between the start marker and `:end`.
    pub raw_content: String,
}

/// The text with all blocks removed, and the blocks in textual order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    /// Text left after removing every block.
    pub remainder: String,
    /// Blocks in the order found: left to right within a pass, earlier
    /// passes first. Names may repeat.
    pub blocks: Vec<ExtraBlock>,
}

/// Result of [`extract`]: the remainder and the rendered blocks by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Text left after removing every block.
    pub remainder: String,
    /// Block-rendered content keyed by block name; later blocks win.
    pub extras: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// Looking for the next `+`.
    Text,
    /// Just saw `+` at `marker`; reading the name.
    Name { marker: usize },
    /// Read a valid `+name:`; looking for `:end`.
    Content {
        marker: usize,
        name_end: usize,
        body_start: usize,
    },
}

/// Splits `text` into its remainder and the raw blocks it contains.
pub fn scan(text: &str) -> Scan {
    let mut out = scan_pass(text);
    let mut passes = 1;
    loop {
        let next = scan_pass(&out.remainder);
        if next.blocks.is_empty() {
            break;
        }
        passes += 1;
        out.remainder = next.remainder;
        out.blocks.extend(next.blocks);
    }
    if passes > 1 {
        tracing::trace!(passes, "Removed blocks formed by earlier removals");
    }
    out
}

/// One left-to-right pass over `text`.
fn scan_pass(text: &str) -> Scan {
    let mut out = Scan {
        remainder: String::with_capacity(text.len()),
        blocks: Vec::new(),
    };
    // `copied` is where the next uncopied slice of plain text starts;
    // `pos` is where the search for the next start marker resumes.
    let mut copied = 0;
    let mut pos = 0;
    let mut state = State::Text;

    loop {
        state = match state {
            State::Text => match text[pos..].find(START_SIGIL) {
                Some(offset) => State::Name {
                    marker: pos + offset,
                },
                None => break,
            },
            State::Name { marker } => {
                let name_start = marker + START_SIGIL.len_utf8();
                let name_end = text[name_start..]
                    .find(|c: char| !is_name_char(c))
                    .map_or(text.len(), |offset| name_start + offset);

                if name_end > name_start && text[name_end..].starts_with(NAME_TERMINATOR) {
                    State::Content {
                        marker,
                        name_end,
                        body_start: name_end + NAME_TERMINATOR.len_utf8(),
                    }
                } else {
                    pos = name_start;
                    State::Text
                }
            }
            State::Content {
                marker,
                name_end,
                body_start,
            } => match text[body_start..].find(END_MARKER) {
                Some(offset) => {
                    let body_end = body_start + offset;
                    let block_end = skip_line_break(text, body_end + END_MARKER.len());
                    let name = &text[marker + START_SIGIL.len_utf8()..name_end];

                    tracing::trace!(name = %name, "Found extra block");
                    out.remainder.push_str(&text[copied..marker]);
                    out.blocks.push(ExtraBlock {
                        name: name.to_string(),
                        raw_content: text[body_start..body_end].trim_end().to_string(),
                    });
                    copied = block_end;
                    pos = block_end;
                    State::Text
                }
                None => {
                    tracing::trace!(offset = marker, "Unterminated extra block left as text");
                    pos = marker + START_SIGIL.len_utf8();
                    State::Text
                }
            },
        };
    }

    out.remainder.push_str(&text[copied..]);
    out
}

/// Removes every block from `text` and renders each one in block mode.
///
/// When two blocks share a name, the later one's rendering is kept.
pub fn extract<R>(text: &str, renderer: &R) -> Result<Extraction>
where
    R: MarkupRenderer + ?Sized,
{
    let Scan { remainder, blocks } = scan(text);

    let mut extras = BTreeMap::new();
    for block in blocks {
        let html = renderer.render_block(&block.raw_content)?;
        if extras.insert(block.name.clone(), html).is_some() {
            tracing::debug!(name = %block.name, "Duplicate extra block, keeping the later one");
        }
    }

    Ok(Extraction { remainder, extras })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn skip_line_break(text: &str, at: usize) -> usize {
    let rest = &text[at..];
    if rest.starts_with("\r\n") {
        at + 2
    } else if rest.starts_with('\n') {
        at + 1
    } else {
        at
    }
}
