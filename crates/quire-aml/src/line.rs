//! Classification of single ArchieML lines.

/// A `:command` line. Matching is case-insensitive and ignores anything
/// after the command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `:end` closes a multi-line value.
    End,
    /// `:skip` starts an ignored region.
    Skip,
    /// `:endskip` ends an ignored region.
    EndSkip,
    /// `:ignore` stops parsing.
    Ignore,
}

/// Which bracket opened a scope line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `{...}` object scope.
    Object,
    /// `[...]` array scope.
    Array,
}

/// One classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `:command`
    Command(Command),
    /// `key: value`; `value` is the raw rest of the line.
    Key {
        /// Key segments split on `.`, empty segments dropped.
        path: Vec<&'a str>,
        /// The full key as written.
        key: &'a str,
        /// Everything after the colon, untrimmed.
        value: &'a str,
    },
    /// `* value`; `value` is the raw rest of the line.
    Item(&'a str),
    /// `{name}`, `{.name}`, `[name]`, `[.name]`, `{}` or `[]`.
    Scope {
        /// Opening bracket.
        bracket: Bracket,
        /// Leading `.`: nest inside the current scope.
        nested: bool,
        /// Leading `+`: freeform array.
        freeform: bool,
        /// Key segments of the scope name; empty for `{}` / `[]`.
        path: Vec<&'a str>,
    },
    /// Anything else.
    Text,
}

/// Classifies one line (without its line terminator).
pub fn classify(line: &str) -> Line<'_> {
    let body = line.trim_start();

    if let Some(command) = body.strip_prefix(':').and_then(command) {
        return Line::Command(command);
    }
    if let Some(key_line) = key_line(body) {
        return key_line;
    }
    if let Some(rest) = body.strip_prefix('*') {
        return Line::Item(rest);
    }
    if let Some(scope) = scope_line(body) {
        return scope;
    }
    Line::Text
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn split_path(key: &str) -> Vec<&str> {
    key.split('.').filter(|s| !s.is_empty()).collect()
}

fn command(rest: &str) -> Option<Command> {
    let word = rest.trim_start_matches(is_blank);
    let starts = |prefix: &str| {
        word.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    if starts("endskip") {
        Some(Command::EndSkip)
    } else if starts("ignore") {
        Some(Command::Ignore)
    } else if starts("skip") {
        Some(Command::Skip)
    } else if starts("end") {
        Some(Command::End)
    } else {
        None
    }
}

fn key_line(body: &str) -> Option<Line<'_>> {
    let key_end = body.find(|c: char| !is_key_char(c)).unwrap_or(body.len());
    if key_end == 0 {
        return None;
    }
    let key = &body[..key_end];
    let value = body[key_end..]
        .trim_start_matches(is_blank)
        .strip_prefix(':')?;
    let path = split_path(key);
    if path.is_empty() {
        return None;
    }
    Some(Line::Key { path, key, value })
}

fn scope_line(body: &str) -> Option<Line<'_>> {
    let bracket = match body.chars().next()? {
        '{' => Bracket::Object,
        '[' => Bracket::Array,
        _ => return None,
    };

    let mut rest = body[1..].trim_start_matches(is_blank);
    let flags_end = rest.find(|c: char| c != '.' && c != '+').unwrap_or(rest.len());
    let flags = &rest[..flags_end];
    rest = rest[flags_end..].trim_start_matches(is_blank);

    let name_end = rest.find(|c: char| !is_key_char(c)).unwrap_or(rest.len());
    let name = &rest[..name_end];
    rest = rest[name_end..].trim_start_matches(is_blank);

    if !rest.starts_with(['}', ']']) {
        return None;
    }

    Some(Line::Scope {
        bracket,
        nested: flags.contains('.'),
        freeform: flags.contains('+'),
        path: split_path(name),
    })
}
