/*
 * emit.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Deterministic serialization of the build output.
 *
 * The data file is consumed as a script include, so it is framed as a
 * `var data = {...}` assignment rather than bare JSON. Keys are sorted
 * (serde_json's default map is ordered), indentation is fixed at four
 * spaces, and every non-ASCII character is emitted as a `\uXXXX` escape
 * so the file survives any byte-level handling downstream.
 */

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Pretty formatter that escapes everything outside ASCII.
///
/// serde_json only escapes control characters and quotes; characters
/// above U+007F pass through as UTF-8. This wrapper intercepts the
/// string fragments and rewrites them as `\uXXXX` units, using surrogate
/// pairs for characters beyond the BMP.
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        // Control characters and quotes arrive via write_char_escape,
        // never here, so only the >U+007F range needs rewriting.
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            if start < index {
                writer.write_all(fragment[start..index].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize a value as sorted-key, 4-space-indented, ASCII-only JSON.
pub fn to_ascii_pretty(value: &Value) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, AsciiPrettyFormatter::new());
    value
        .serialize(&mut serializer)
        .context("failed to serialize theme data")?;
    String::from_utf8(out).context("serialized theme data was not valid UTF-8")
}

/// Write the data file, overwriting any previous contents.
///
/// The JSON object is emitted as the right-hand side of a `var data`
/// assignment so the file can be included directly as a script.
pub fn write_data_file(path: &Path, data: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let body = format!("var data = {}", to_ascii_pretty(data)?);
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ascii_passthrough() {
        let value = json!({"readme": "plain text"});
        let out = to_ascii_pretty(&value).unwrap();
        assert_eq!(out, "{\n    \"readme\": \"plain text\"\n}");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let value = json!({"readme": "héllo"});
        let out = to_ascii_pretty(&value).unwrap();
        assert!(out.contains("h\\u00e9llo"));
        assert!(out.is_ascii());
    }

    #[test]
    fn test_astral_plane_uses_surrogate_pair() {
        let value = json!({"readme": "🎉"});
        let out = to_ascii_pretty(&value).unwrap();
        assert!(out.contains("\\ud83c\\udf89"));
    }

    #[test]
    fn test_escapes_round_trip() {
        let original = "naïve — ✓ 🎉";
        let value = json!({ "text": original });
        let out = to_ascii_pretty(&value).unwrap();
        assert!(out.is_ascii());
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back["text"], original);
    }

    #[test]
    fn test_keys_are_sorted() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let out = to_ascii_pretty(&value).unwrap();
        let alpha = out.find("alpha").unwrap();
        let mid = out.find("mid").unwrap();
        let zeta = out.find("zeta").unwrap();
        assert!(alpha < mid && mid < zeta);
    }

    #[test]
    fn test_nested_indentation() {
        let value = json!({"outer": {"inner": [1, 2]}});
        let out = to_ascii_pretty(&value).unwrap();
        assert!(out.contains("\n    \"outer\""));
        assert!(out.contains("\n        \"inner\""));
    }

    #[test]
    fn test_data_file_framing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("output/theme_data.js");
        write_data_file(&path, &json!({"a": null})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("var data = {"));
        assert!(contents.ends_with('}'));
    }

    #[test]
    fn test_data_file_overwrites() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("theme_data.js");
        write_data_file(&path, &json!({"first": 1})).unwrap();
        write_data_file(&path, &json!({"second": 2})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("second"));
        assert!(!contents.contains("first"));
    }
}
