//! Key-sorted properties written in the Java `.properties` format.
//!
//! [`SortedProperties`] is the digest manifest: a map from artifact key to
//! SHA-512 that always iterates, and is always stored, in key order so the
//! output does not depend on the order artifacts were attached in.
//!
//! Storage follows the escaping rules of `java.util.Properties::store` so the
//! file can be read back by the JVM tooling further down the release chain.
//! The timestamp comment that `store` appends after the header is not
//! written, which keeps the manifest reproducible.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// A string map that iterates and stores in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedProperties {
    entries: BTreeMap<String, String>,
}

impl SortedProperties {
    /// Create an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a property by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true when no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Write the properties to `writer`.
    ///
    /// The optional `comment` is written first as one or more `#` lines,
    /// followed by one `key=value` line per entry in key order.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn store<W: Write>(&self, mut writer: W, comment: Option<&str>) -> io::Result<()> {
        if let Some(text) = comment {
            writer.write_all(comment_lines(text).as_bytes())?;
        }
        for (key, value) in self.iter() {
            writeln!(
                writer,
                "{}={}",
                escape(key, EscapeSpace::All),
                escape(value, EscapeSpace::Leading)
            )?;
        }
        writer.flush()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EscapeSpace {
    /// Keys escape every space.
    All,
    /// Values only escape a space in first position.
    Leading,
}

fn escape(text: &str, spaces: EscapeSpace) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        match ch {
            ' ' if index == 0 || spaces == EscapeSpace::All => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => push_unicode_escapes(&mut out, ch),
        }
    }
    out
}

fn push_unicode_escapes(out: &mut String, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{unit:04X}"));
    }
}

/// Render a comment as `#` lines.
///
/// Embedded line breaks start a new comment line unless the text after the
/// break already begins with `#` or `!`.
fn comment_lines(text: &str) -> String {
    let mut out = String::from("#");
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                if !matches!(chars.peek(), Some('#' | '!')) {
                    out.push('#');
                }
            }
            ' '..='~' => out.push(ch),
            _ => push_unicode_escapes(&mut out, ch),
        }
    }
    out.push('\n');
    out
}
