//! Encode parsed values to output formats.
//!
//! This module converts a parsed tree into JSON for downstream
//! consumers, or back into canonical script form.

use crate::lexer::is_word_char;
use crate::value::Value;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON, two-space indent, keys in document order.
    Json,
    /// Canonical script form, which parses back to an equal tree.
    Script,
}

/// Encode a value to a string in the specified format.
pub fn encode(value: &Value, format: Format) -> String {
    match format {
        Format::Json => encode_json(value, 0),
        Format::Script => encode_script(value),
    }
}

// ============================================================================
// JSON Encoder
// ============================================================================

fn encode_json(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);

    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                "null".to_string() // JSON has no non-finite numbers
            } else {
                format!("{}", f)
            }
        }
        Value::String(s) => encode_json_string(s),
        Value::List(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = items
                    .iter()
                    .map(|v| format!("{}{}", pad1, encode_json(v, indent + 1)))
                    .collect();
                format!("[\n{}\n{}]", items.join(",\n"), pad)
            }
        }
        Value::Block(block) => {
            if block.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = block
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}{}: {}",
                            pad1,
                            encode_json_string(k),
                            encode_json(v, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{}}}", items.join(",\n"), pad)
            }
        }
        Value::Comparison(cmp) => {
            format!(
                "{{\n{}\"op\": {},\n{}\"value\": {}\n{}}}",
                pad1,
                encode_json_string(cmp.op.as_str()),
                pad1,
                encode_json(&cmp.value, indent + 1),
                pad
            )
        }
    }
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

// ============================================================================
// Script Encoder
// ============================================================================

fn encode_script(value: &Value) -> String {
    match value {
        Value::Block(block) => {
            let mut out = String::new();
            for (key, v) in block {
                encode_script_entry(&mut out, key, v, 0);
            }
            out
        }
        _ => encode_script_value(value, 0),
    }
}

/// Emit one `key = value` (or `key OP value`) line, including the
/// trailing newline.
///
/// A list holding comparisons can only have come from duplicate-key
/// promotion, and comparisons cannot appear bare inside braces, so such
/// a list is written back as repeated entries.
fn encode_script_entry(out: &mut String, key: &str, value: &Value, indent: usize) {
    match value {
        Value::List(items) if items.iter().any(|v| matches!(v, Value::Comparison(_))) => {
            for item in items {
                encode_script_entry(out, key, item, indent);
            }
        }
        Value::Comparison(cmp) => {
            out.push_str(&"\t".repeat(indent));
            out.push_str(&format!(
                "{} {} {}\n",
                script_key(key),
                cmp.op,
                encode_script_value(&cmp.value, indent)
            ));
        }
        _ => {
            out.push_str(&"\t".repeat(indent));
            out.push_str(&format!(
                "{} = {}\n",
                script_key(key),
                encode_script_value(value, indent)
            ));
        }
    }
}

fn encode_script_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => {
            // A whole-number float must keep its dot to re-read as a
            // float.
            if f.is_finite() && f.fract() == 0.0 {
                format!("{:.1}", f)
            } else {
                format!("{}", f)
            }
        }
        Value::String(s) => script_scalar(s),
        Value::List(items) => {
            if items.is_empty() {
                "{ }".to_string()
            } else if items.iter().all(is_scalar) {
                let parts: Vec<String> = items
                    .iter()
                    .map(|v| encode_script_value(v, indent))
                    .collect();
                format!("{{ {} }}", parts.join(" "))
            } else {
                let pad = "\t".repeat(indent + 1);
                let mut out = String::from("{\n");
                for item in items {
                    out.push_str(&pad);
                    out.push_str(&encode_script_value(item, indent + 1));
                    out.push('\n');
                }
                out.push_str(&"\t".repeat(indent));
                out.push('}');
                out
            }
        }
        Value::Block(block) => {
            if block.is_empty() {
                "{ }".to_string()
            } else {
                let mut out = String::from("{\n");
                for (key, v) in block {
                    encode_script_entry(&mut out, key, v, indent + 1);
                }
                out.push_str(&"\t".repeat(indent));
                out.push('}');
                out
            }
        }
        Value::Comparison(cmp) => {
            format!("{} {}", cmp.op, encode_script_value(&cmp.value, indent))
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_)
    )
}

/// Quote a key unless it reads back as one identifier token.
fn script_key(key: &str) -> String {
    if !key.is_empty() && key.chars().all(is_word_char) {
        key.to_string()
    } else {
        // The grammar has no escapes; an embedded quote cannot be
        // represented either way.
        format!("\"{}\"", key)
    }
}

/// Quote a string scalar unless it reads back as the very same string:
/// one identifier token that the coercer leaves alone.
fn script_scalar(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(is_word_char)
        && matches!(Value::from_token(s), Value::String(_));
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", s)
    }
}
