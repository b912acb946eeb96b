//! Block-style YAML emitter with indented sequences.
//!
//! `serde_yaml`'s emitter writes sequence items in the same column as their
//! parent key. The combined rule file must keep list items visually nested
//! under the key that owns them, so this module walks a [`Value`] tree and
//! emits block YAML where every nested container is indented two spaces
//! under its parent. Flow style is used only for empty containers.
//!
//! Scalar quoting is conservative: a string that is not an obviously plain
//! YAML scalar is emitted as a JSON string, which any YAML parser reads as
//! a double-quoted scalar with identical content.

use serde_yaml::{Mapping, Value};

use crate::error::{CombineError, Result};

const INDENT: usize = 2;

/// Serialize a value as block-style YAML with indented sequences.
pub fn to_block_yaml(value: &Value) -> Result<String> {
    let mut out = String::new();
    match flow_token(value)? {
        Some(token) => {
            out.push_str(&token);
            out.push('\n');
        }
        None => match value {
            Value::Mapping(map) => emit_mapping(map, 0, false, &mut out)?,
            Value::Sequence(seq) => emit_sequence(seq, 0, &mut out)?,
            // flow_token returns Some for every other variant
            _ => {}
        },
    }
    Ok(out)
}

/// Emit a non-empty mapping, one `key: value` entry per line.
///
/// When `inline_first` is set the first entry is written without leading
/// indentation, continuing the line a sequence dash already started.
fn emit_mapping(map: &Mapping, indent: usize, inline_first: bool, out: &mut String) -> Result<()> {
    for (i, (key, value)) in map.iter().enumerate() {
        if !(inline_first && i == 0) {
            out.push_str(&" ".repeat(indent));
        }
        out.push_str(&key_token(key)?);
        out.push(':');

        match flow_token(value)? {
            Some(token) => {
                out.push(' ');
                out.push_str(&token);
                out.push('\n');
            }
            None => {
                out.push('\n');
                match value {
                    Value::Mapping(m) => emit_mapping(m, indent + INDENT, false, out)?,
                    Value::Sequence(s) => emit_sequence(s, indent + INDENT, out)?,
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Emit a non-empty sequence, one `- item` entry per line.
///
/// Mapping items continue on the dash line (`- key: value`); nested
/// sequences start on the following line, indented.
fn emit_sequence(seq: &[Value], indent: usize, out: &mut String) -> Result<()> {
    for item in seq {
        out.push_str(&" ".repeat(indent));
        out.push('-');

        match flow_token(item)? {
            Some(token) => {
                out.push(' ');
                out.push_str(&token);
                out.push('\n');
            }
            None => match item {
                Value::Mapping(m) => {
                    out.push(' ');
                    emit_mapping(m, indent + INDENT, true, out)?;
                }
                Value::Sequence(s) => {
                    out.push('\n');
                    emit_sequence(s, indent + INDENT, out)?;
                }
                _ => {}
            },
        }
    }
    Ok(())
}

/// Single-token form of a value, or `None` for non-empty containers that
/// need block layout.
fn flow_token(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(Some("null".to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(string_token(s)?)),
        Value::Sequence(s) if s.is_empty() => Ok(Some("[]".to_string())),
        Value::Mapping(m) if m.is_empty() => Ok(Some("{}".to_string())),
        Value::Sequence(_) | Value::Mapping(_) => Ok(None),
        Value::Tagged(t) => Err(CombineError::Serialize(format!(
            "tagged value {} is not supported",
            t.tag
        ))),
    }
}

/// Mapping keys must be scalars.
fn key_token(key: &Value) -> Result<String> {
    match key {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => string_token(s),
        _ => Err(CombineError::Serialize(
            "complex mapping keys are not supported".to_string(),
        )),
    }
}

fn string_token(s: &str) -> Result<String> {
    if is_plain(s) {
        Ok(s.to_string())
    } else {
        serde_json::to_string(s).map_err(|e| CombineError::Serialize(e.to_string()))
    }
}

/// Whether a string can be emitted unquoted without changing its meaning.
///
/// Deliberately strict: must start with a letter or underscore, contain
/// only word characters plus `- . / ` and inner spaces, and not collide
/// with a YAML keyword. Anything else gets double-quoted.
fn is_plain(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    if s.ends_with(' ') {
        return false;
    }
    const RESERVED: &[&str] = &[
        "true", "false", "null", "yes", "no", "on", "off", "nan", "inf",
    ];
    if RESERVED.iter().any(|r| s.eq_ignore_ascii_case(r)) {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ' '))
}
