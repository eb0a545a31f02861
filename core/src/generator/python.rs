//! Python literal printing.
//!
//! JSON values are re-printed structurally (`True`, `False`, `None`, dict and
//! list displays) instead of patching the JSON text, so the output is always a
//! valid Python literal and no input is ever evaluated.

use std::fmt::Write;

use serde_json::Value;

/// A double-quoted Python string literal for `text`.
pub fn string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    push_string(&mut out, text);
    out
}

/// A Python literal equivalent to a JSON value.
pub fn literal(value: &Value) -> String {
    let mut out = String::new();
    push_literal(&mut out, value);
    out
}

fn push_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(number) => {
            let _ = write!(out, "{number}");
        }
        Value::String(text) => push_string(out, text),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                push_literal(out, item);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                push_string(out, key);
                out.push_str(": ");
                push_literal(out, item);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(string(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(string("l1\nl2\t\r\u{1}"), r#""l1\nl2\t\r\u0001""#);
    }

    #[test]
    fn keeps_non_ascii_text() {
        assert_eq!(string("héllo ✓"), "\"héllo ✓\"");
    }

    #[test]
    fn json_keywords_become_python_keywords() {
        let value = json!({"t": true, "f": false, "n": null});
        assert_eq!(literal(&value), r#"{"t": True, "f": False, "n": None}"#);
    }

    #[test]
    fn nested_values_and_numbers() {
        let value: Value =
            serde_json::from_str(r#"{"list":[1,-2.5,"x",[]],"obj":{},"big":1e3}"#).unwrap();
        assert_eq!(
            literal(&value),
            r#"{"list": [1, -2.5, "x", []], "obj": {}, "big": 1e3}"#
        );
    }

    #[test]
    fn strings_containing_keywords_are_untouched() {
        let value = json!({"note": "true or false or null"});
        assert_eq!(literal(&value), r#"{"note": "true or false or null"}"#);
    }
}
