//! Strict-mode validation: report keys in a config file that the host type
//! does not consume.
//!
//! The unknown keys themselves are collected by `serde_ignored` during
//! decoding (see [`Format::decode`](crate::Format::decode)) and flattened into
//! key segments by [`key_segments`]; this module turns them into errors
//! carrying the file path and a best-effort line number.

use std::path::Path;

use crate::error::TreefigError;
use crate::format::Format;

/// Flatten an ignored-value path into the key segments written in the file.
///
/// `Option` and newtype layers leave no trace in the document, so they are
/// skipped: an unknown `typo` under an `Option<Database>` field comes out as
/// `["database", "typo"]`. Sequence positions become their index.
pub fn key_segments(path: &serde_ignored::Path<'_>) -> Vec<String> {
    let mut segments = Vec::new();
    push_segments(path, &mut segments);
    segments
}

fn push_segments(path: &serde_ignored::Path<'_>, out: &mut Vec<String>) {
    use serde_ignored::Path as P;

    match path {
        P::Root => {}
        P::Seq { parent, index } => {
            push_segments(parent, out);
            out.push(index.to_string());
        }
        P::Map { parent, key } => {
            push_segments(parent, out);
            out.push(key.clone());
        }
        P::Some { parent } | P::NewtypeStruct { parent } | P::NewtypeVariant { parent } => {
            push_segments(parent, out);
        }
    }
}

/// Fail with [`TreefigError::UnknownKeys`] if `unknown_keys` is non-empty.
pub fn reject_unknown_keys(
    unknown_keys: Vec<Vec<String>>,
    content: &str,
    path: &Path,
    format: Format,
) -> Result<(), TreefigError> {
    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<TreefigError> = unknown_keys
        .into_iter()
        .map(|segments| {
            let line = match format {
                Format::Toml => find_toml_key_line(content, &segments),
                Format::Json => find_json_key_line(content, &segments),
            };
            TreefigError::UnknownKey {
                key: segments.join("."),
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(TreefigError::UnknownKeys(errors))
}

/// Find the 1-indexed line assigning the leaf of `segments` inside the
/// `[section]` named by the remaining segments.
///
/// Bare and double-quoted keys are matched; inline tables and arrays of
/// tables are not. Returns 0 if the key cannot be located.
fn find_toml_key_line(content: &str, segments: &[String]) -> usize {
    let Some((leaf, section)) = segments.split_last() else {
        return 0;
    };

    let mut current_section: Vec<&str> = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('[') {
            if header.starts_with('[') {
                // Array of tables: leave the key lookup to the enclosing section.
                continue;
            }
            current_section = header
                .trim_end_matches(']')
                .split('.')
                .map(|s| s.trim().trim_matches('"'))
                .collect();
            continue;
        }

        if current_section != *section {
            continue;
        }

        let after_key = trimmed
            .strip_prefix(leaf.as_str())
            .or_else(|| trimmed.strip_prefix(format!("\"{leaf}\"").as_str()));
        if after_key.is_some_and(|rest| rest.trim_start().starts_with('=')) {
            return i + 1;
        }
    }
    0
}

/// Find the 1-indexed line of the leaf member of `segments` in JSON content.
///
/// Each segment is searched for at or after the line of the previous one, so
/// a leaf shared by several objects resolves under the right parent as long
/// as the document is pretty-printed one member per line. Sequence indices are
/// skipped. Returns 0 if any segment is not found.
fn find_json_key_line(content: &str, segments: &[String]) -> usize {
    let lines: Vec<&str> = content.lines().collect();
    let mut start = 0;
    let mut found = None;

    for segment in segments {
        if segment.parse::<usize>().is_ok() {
            continue;
        }
        let quoted = format!("\"{segment}\"");
        let offset = lines[start..].iter().position(|line| {
            line.trim()
                .strip_prefix(quoted.as_str())
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        });
        match offset {
            Some(offset) => {
                start += offset;
                found = Some(start);
            }
            None => return 0,
        }
    }
    found.map_or(0, |i| i + 1)
}
