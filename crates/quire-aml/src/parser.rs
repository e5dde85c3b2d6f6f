//! The ArchieML line-by-line state machine.

use quire_core::{Error, Record, Result, Value};

use crate::line::{Bracket, Command, Line, classify};

/// One step of a path from the root object to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Seg {
    Key(String),
    Index(usize),
}

type Path = Vec<Seg>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayKind {
    /// Not decided until the first element.
    Unknown,
    /// `* item` strings.
    Strings,
    /// Objects delimited by a repeated first key.
    Objects,
}

#[derive(Debug, Clone)]
enum Frame {
    Object(Path),
    Array {
        path: Path,
        kind: ArrayKind,
        first_key: Option<String>,
    },
}

/// Where a multi-line value lands when `:end` arrives.
#[derive(Debug, Clone)]
enum Target {
    Key { object: Path, keys: Vec<String> },
    Item { array: Path, index: usize },
}

#[derive(Debug)]
struct Buffer {
    target: Target,
    text: String,
}

/// Parser state for one document.
pub(crate) struct Parser {
    root: Value,
    stack: Vec<Frame>,
    buffer: Option<Buffer>,
    /// Line number of the open `:skip`, if skipping.
    skipping: Option<usize>,
}

impl Parser {
    pub(crate) fn new() -> Self {
        Self {
            root: Value::Object(Record::new()),
            stack: Vec::new(),
            buffer: None,
            skipping: None,
        }
    }

    pub(crate) fn parse(mut self, text: &str) -> Result<Record> {
        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = classify(raw);

            if self.skipping.is_some() {
                if line == Line::Command(Command::EndSkip) {
                    self.skipping = None;
                }
                continue;
            }

            match line {
                Line::Command(Command::Ignore) => {
                    tracing::trace!(line = line_no, ":ignore reached");
                    break;
                }
                Line::Command(command) => self.command(command, line_no)?,
                Line::Key { path, key, value } if !self.in_string_array() => {
                    self.key(&path, key, value, line_no)?
                }
                Line::Item(value) if self.accepts_items() => self.item(value)?,
                Line::Scope {
                    bracket,
                    nested,
                    freeform,
                    path,
                } => self.scope(bracket, nested, freeform, &path, line_no)?,
                _ => self.text(raw),
            }
        }

        if let Some(line) = self.skipping {
            tracing::debug!(line, "Unclosed :skip runs to the end of the text");
        }

        match self.root {
            Value::Object(record) => Ok(record),
            other => Err(Error::grammar(0, format!("root became a {}", other.kind()))),
        }
    }

    // ------------------------------------------------------------------------
    // Line handlers
    // ------------------------------------------------------------------------

    fn command(&mut self, command: Command, line_no: usize) -> Result<()> {
        match command {
            Command::End => {
                if let Some(buffer) = self.buffer.take() {
                    let value = format_value(&buffer.text);
                    self.assign(buffer.target, value, line_no)?;
                }
            }
            Command::Skip => {
                self.buffer = None;
                self.skipping = Some(line_no);
            }
            Command::EndSkip | Command::Ignore => self.buffer = None,
        }
        Ok(())
    }

    fn key(&mut self, path: &[&str], key: &str, value: &str, line_no: usize) -> Result<()> {
        let keys: Vec<String> = path.iter().map(|s| s.to_string()).collect();

        if let Some(Frame::Array {
            kind, first_key, ..
        }) = self.stack.last_mut()
        {
            *kind = ArrayKind::Objects;
            let starts_item = match first_key {
                None => {
                    *first_key = Some(key.to_string());
                    true
                }
                Some(first) => first.as_str() == key,
            };
            if starts_item {
                self.push_item(Value::Object(Record::new()))?;
            }
        }

        let object = self.current_object_path();
        let target = Target::Key { object, keys };
        self.assign(target.clone(), format_value(value), line_no)?;
        self.buffer = Some(Buffer {
            target,
            text: format!("{value}\n"),
        });
        Ok(())
    }

    fn item(&mut self, value: &str) -> Result<()> {
        let Some(Frame::Array { path, kind, .. }) = self.stack.last_mut() else {
            return Ok(());
        };
        *kind = ArrayKind::Strings;
        let array = path.clone();

        let index = self.push_item(Value::String(format_value(value)))?;
        self.buffer = Some(Buffer {
            target: Target::Item { array, index },
            text: format!("{value}\n"),
        });
        Ok(())
    }

    fn scope(
        &mut self,
        bracket: Bracket,
        nested: bool,
        freeform: bool,
        path: &[&str],
        line_no: usize,
    ) -> Result<()> {
        self.buffer = None;

        if path.is_empty() {
            match bracket {
                Bracket::Object => self.stack.clear(),
                Bracket::Array => {
                    while let Some(frame) = self.stack.pop() {
                        if matches!(frame, Frame::Array { .. }) {
                            break;
                        }
                    }
                }
            }
            return Ok(());
        }

        if freeform {
            tracing::debug!(line = line_no, "Freeform array treated as a plain array");
        }

        let parent = if nested {
            if self.in_string_array() {
                return Ok(());
            }
            self.current_object_path()
        } else {
            self.stack.clear();
            Path::new()
        };

        let keys: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        let mut full = parent.clone();
        full.extend(keys.iter().cloned().map(Seg::Key));

        let frame = match bracket {
            Bracket::Object => {
                self.ensure(&parent, &keys, Value::Object(Record::new()), line_no)?;
                Frame::Object(full)
            }
            Bracket::Array => {
                self.ensure(&parent, &keys, Value::Array(Vec::new()), line_no)?;
                let kind = match self.resolve(&full).and_then(Value::as_array) {
                    Some(items) if items.iter().any(|v| v.as_object().is_some()) => {
                        ArrayKind::Objects
                    }
                    Some([_, ..]) => ArrayKind::Strings,
                    _ => ArrayKind::Unknown,
                };
                Frame::Array {
                    path: full,
                    kind,
                    first_key: None,
                }
            }
        };
        self.stack.push(frame);
        Ok(())
    }

    fn text(&mut self, raw: &str) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.text.push_str(raw);
            buffer.text.push('\n');
        }
    }

    // ------------------------------------------------------------------------
    // Scope helpers
    // ------------------------------------------------------------------------

    fn in_string_array(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame::Array {
                kind: ArrayKind::Strings,
                ..
            })
        )
    }

    fn accepts_items(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(Frame::Array {
                kind: ArrayKind::Unknown | ArrayKind::Strings,
                ..
            })
        )
    }

    /// Path of the object that key lines currently write into.
    fn current_object_path(&self) -> Path {
        match self.stack.last() {
            None => Path::new(),
            Some(Frame::Object(path)) => path.clone(),
            Some(Frame::Array { path, .. }) => {
                let len = self
                    .resolve(path)
                    .and_then(Value::as_array)
                    .map_or(0, <[Value]>::len);
                let mut item = path.clone();
                item.push(Seg::Index(len.saturating_sub(1)));
                item
            }
        }
    }

    /// Appends to the array of the top frame and returns the new index.
    fn push_item(&mut self, value: Value) -> Result<usize> {
        let path = match self.stack.last() {
            Some(Frame::Array { path, .. }) => path.clone(),
            _ => return Err(Error::grammar(0, "array element outside an array")),
        };
        let items = self
            .resolve_mut(&path)
            .and_then(Value::as_array_mut)
            .ok_or_else(|| Error::grammar(0, "array scope no longer holds an array"))?;
        items.push(value);
        Ok(items.len() - 1)
    }

    // ------------------------------------------------------------------------
    // Tree access
    // ------------------------------------------------------------------------

    fn resolve(&self, path: &[Seg]) -> Option<&Value> {
        path.iter().try_fold(&self.root, |node, seg| match seg {
            Seg::Key(k) => node.as_object()?.get(k),
            Seg::Index(i) => node.as_array()?.get(*i),
        })
    }

    fn resolve_mut(&mut self, path: &[Seg]) -> Option<&mut Value> {
        path.iter().try_fold(&mut self.root, |node, seg| match seg {
            Seg::Key(k) => node.as_object_mut()?.get_mut(k),
            Seg::Index(i) => node.as_array_mut()?.get_mut(*i),
        })
    }

    fn object_mut(&mut self, path: &[Seg], line_no: usize) -> Result<&mut Record> {
        match self.resolve_mut(path) {
            Some(Value::Object(record)) => Ok(record),
            _ => Err(Error::grammar(line_no, "current scope is not an object")),
        }
    }

    /// Makes sure `parent.keys` exists with the same variant as `empty`.
    fn ensure(&mut self, parent: &[Seg], keys: &[String], empty: Value, line_no: usize) -> Result<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Ok(());
        };
        let object = descend(self.object_mut(parent, line_no)?, parents, line_no)?;
        let slot = object.entry(last.clone()).or_insert_with(|| empty.clone());
        if std::mem::discriminant(slot) != std::mem::discriminant(&empty) {
            *slot = empty;
        }
        Ok(())
    }

    fn assign(&mut self, target: Target, value: String, line_no: usize) -> Result<()> {
        match target {
            Target::Key { object, keys } => {
                let Some((last, parents)) = keys.split_last() else {
                    return Ok(());
                };
                let object = descend(self.object_mut(&object, line_no)?, parents, line_no)?;
                object.insert(last.clone(), Value::String(value));
            }
            Target::Item { array, index } => {
                if let Some(slot) = self
                    .resolve_mut(&array)
                    .and_then(Value::as_array_mut)
                    .and_then(|items| items.get_mut(index))
                {
                    *slot = Value::String(value);
                }
            }
        }
        Ok(())
    }
}

/// Walks `keys` down from `object`, creating empty objects on the way.
///
/// A string or array in the way is replaced by an empty object.
fn descend<'a>(mut object: &'a mut Record, keys: &[String], line_no: usize) -> Result<&'a mut Record> {
    for key in keys {
        let slot = object
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Record::new()));
        if !matches!(slot, Value::Object(_)) {
            tracing::trace!(key = %key, replaced = slot.kind(), "Replacing value with an object");
            *slot = Value::Object(Record::new());
        }
        let Value::Object(next) = slot else {
            return Err(Error::grammar(line_no, format!("key '{key}' is not an object")));
        };
        object = next;
    }
    Ok(object)
}

/// Trims a value and removes a backslash escaping the start of any line.
pub(crate) fn format_value(raw: &str) -> String {
    let unescaped: Vec<String> = raw
        .split('\n')
        .map(|line| {
            let indent = line.len() - line.trim_start().len();
            let (lead, rest) = line.split_at(indent);
            match rest.strip_prefix('\\') {
                Some(unescaped) => format!("{lead}{unescaped}"),
                None => line.to_string(),
            }
        })
        .collect();
    unescaped.join("\n").trim().to_string()
}
