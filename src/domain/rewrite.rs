//! Line-oriented rewriting of env file content
//!
//! All functions here are pure: they take the current file content and return
//! what the content should become. Reading and writing files is the job of
//! [`crate::application::EnvKeyManager`].
//!
//! Lines are matched by literal prefix:
//! - active entry: line starts with `KEY=`
//! - disabled entry: line starts with `#KEY=`
//!
//! When several lines carry the same key, the first one wins.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::key::{validate_value, KeyName, LineEnding, COMMENT_MARKER};
use crate::domain::DomainError;

/// What a mutation did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// An existing line was rewritten.
    Updated,
    /// A new entry was added at the end of the file.
    Appended,
    /// The key is already in the requested state.
    Unchanged,
    /// There is no entry for the key to act on.
    NotFound,
}

impl KeyOutcome {
    /// True if the file content changed and has to be written.
    pub fn changed(&self) -> bool {
        matches!(self, KeyOutcome::Updated | KeyOutcome::Appended)
    }
}

/// Whether a key is present, and in which form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Enabled,
    Disabled,
    Absent,
}

/// An entry found in an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

/// Result of a transform: the outcome plus the new content if it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub outcome: KeyOutcome,
    pub content: Option<String>,
}

impl Rewrite {
    fn unchanged() -> Self {
        Self {
            outcome: KeyOutcome::Unchanged,
            content: None,
        }
    }

    fn not_found() -> Self {
        Self {
            outcome: KeyOutcome::NotFound,
            content: None,
        }
    }

    fn changed(outcome: KeyOutcome, content: String) -> Self {
        Self {
            outcome,
            content: Some(content),
        }
    }
}

/// A physical line: its byte offset in the content and its text without terminator.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    text: &'a str,
}

impl Line<'_> {
    /// Replace this line's text in `content`, keeping the terminator.
    fn replace_in(&self, content: &str, new_text: &str) -> String {
        let end = self.start + self.text.len();
        let mut result = String::with_capacity(content.len() + new_text.len());
        result.push_str(&content[..self.start]);
        result.push_str(new_text);
        result.push_str(&content[end..]);
        result
    }
}

fn lines(content: &str) -> impl Iterator<Item = Line<'_>> {
    let mut start = 0;
    content.split_inclusive('\n').map(move |raw| {
        let text = match raw.strip_suffix('\n') {
            Some(t) => t.strip_suffix('\r').unwrap_or(t),
            None => raw,
        };
        let line = Line { start, text };
        start += raw.len();
        line
    })
}

fn find_line<'a>(content: &'a str, prefix: &str) -> Option<Line<'a>> {
    lines(content).find(|l| l.text.starts_with(prefix))
}

/// Set `key` to `value`, appending a new entry if there is no active one.
///
/// If no active entry exists but the literal text `KEY=value` already occurs
/// somewhere in the content, nothing is appended.
pub fn set_key(
    content: &str,
    key: &KeyName,
    value: &str,
    line_ending: LineEnding,
) -> Result<Rewrite, DomainError> {
    validate_value(key, value)?;
    let assignment = key.assignment(value);

    if let Some(line) = find_line(content, &key.active_prefix()) {
        if line.text == assignment {
            return Ok(Rewrite::unchanged());
        }
        return Ok(Rewrite::changed(
            KeyOutcome::Updated,
            line.replace_in(content, &assignment),
        ));
    }

    if content.contains(&assignment) {
        return Ok(Rewrite::unchanged());
    }

    let eol = line_ending.as_str();
    let mut result = String::with_capacity(content.len() + assignment.len() + 2 * eol.len());
    result.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        result.push_str(eol);
    }
    result.push_str(&assignment);
    result.push_str(eol);
    Ok(Rewrite::changed(KeyOutcome::Appended, result))
}

/// Comment out the active entry of `key`.
///
/// A disabled entry anywhere in the content short-circuits to `Unchanged`.
pub fn disable_key(content: &str, key: &KeyName) -> Rewrite {
    if find_line(content, &key.disabled_prefix()).is_some() {
        return Rewrite::unchanged();
    }

    match find_line(content, &key.active_prefix()) {
        Some(line) => {
            let disabled = format!("{}{}", COMMENT_MARKER, line.text);
            Rewrite::changed(KeyOutcome::Updated, line.replace_in(content, &disabled))
        }
        None => Rewrite::not_found(),
    }
}

/// Strip exactly one comment marker from the disabled entry of `key`.
pub fn enable_key(content: &str, key: &KeyName) -> Rewrite {
    match find_line(content, &key.disabled_prefix()) {
        Some(line) => {
            let enabled = &line.text[COMMENT_MARKER.len_utf8()..];
            Rewrite::changed(KeyOutcome::Updated, line.replace_in(content, enabled))
        }
        None if find_line(content, &key.active_prefix()).is_some() => Rewrite::unchanged(),
        None => Rewrite::not_found(),
    }
}

/// Value of the first active entry of `key`.
pub fn get_value(content: &str, key: &KeyName) -> Option<String> {
    let prefix = key.active_prefix();
    find_line(content, &prefix).map(|line| line.text[prefix.len()..].to_string())
}

/// Whether `key` has an active entry, only a disabled one, or none.
pub fn key_state(content: &str, key: &KeyName) -> KeyState {
    if find_line(content, &key.active_prefix()).is_some() {
        KeyState::Enabled
    } else if find_line(content, &key.disabled_prefix()).is_some() {
        KeyState::Disabled
    } else {
        KeyState::Absent
    }
}

fn entry_regex() -> &'static Regex {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    ENTRY.get_or_init(|| {
        Regex::new(r"^(#)?([A-Za-z_][A-Za-z0-9_.\-]*)=(.*)$").expect("entry pattern is valid")
    })
}

/// All recognisable entries, enabled or disabled, in file order.
///
/// Only keys that look like identifiers are reported, so prose comments such
/// as `# see docs=here` are skipped.
pub fn entries(content: &str) -> Vec<EnvEntry> {
    let re = entry_regex();
    lines(content)
        .filter_map(|line| re.captures(line.text))
        .map(|caps| EnvEntry {
            key: caps[2].to_string(),
            value: caps[3].to_string(),
            enabled: caps.get(1).is_none(),
        })
        .collect()
}
