//! Heuristic `curl` command parser.
//!
//! # Design
//! The parser is a fixed sequence of independent regex extractions over the
//! normalized command text: URL, method, headers, body, form fields. The
//! passes do not share state, so a token can in principle be claimed by more
//! than one of them; running them in a fixed order keeps the result
//! deterministic. Nothing here fails: missing or malformed pieces degrade to
//! empty or default values.
//!
//! Only `parse` is public, so a real tokenizer could replace the regex passes
//! without touching `RequestModel`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Body, FieldMap, Method, RequestModel};

/// Flags whose argument becomes the request body.
const DATA_FLAGS: &str = r"--data-raw|--data-binary|--data-ascii|--data|-d";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex pattern is valid")
}

static TOOL_NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^curl(?:\s+|$)"));

static LINE_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| compile(r"\\\r?\n"));

static QUOTED_URL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?:(?:-X|--request)\s+[A-Za-z]+\s+)?['"](https?://[^\s'"]+)['"]"#)
});

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| compile(r#"(https?://[^\s'">\\()]+)"#));

static METHOD_FLAG: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?:^|\s)(?:-X\s*|--request\s+)['"]?([A-Za-z]*)"#));

static HEAD_FLAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:^|\s)(?:-I|--head)(?:\s|$)"));

static BODY_FLAG: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?:^|\s)(?:{DATA_FLAGS}|--data-urlencode)(?:\s|$)")));

static FORM_FLAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:^|\s)(?:-F|--form)(?:\s|$)"));

/// `-H`, and the flags curl turns into a single well-known header.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"(?s)(?:^|\s)(-H|--header|-b|--cookie|-A|--user-agent)\s+(?:(\$)?'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#,
    )
});

static FORM_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?s)(?:^|\s)(?:-F|--form)\s+(?:(\$)?'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#)
});

/// Body patterns in priority order: single-quoted (optionally `$'...'`),
/// double-quoted, unquoted `{...}`, any other unquoted token.
static BODY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    let flag = format!(r"(?:^|\s)(?:{DATA_FLAGS})\s+");
    [
        compile(&format!(r#"(?s){flag}(\$)?'((?:[^'\\]|\\.)*)'"#)),
        compile(&format!(r#"(?s){flag}()"((?:[^"\\]|\\.)*)""#)),
        compile(&format!(r#"{flag}()(\{{[^}}]*\}})"#)),
        compile(&format!(r#"{flag}()([^\s'"]\S*)"#)),
    ]
});

/// Parse a shell-style `curl` command into a `RequestModel`.
///
/// Never fails; see the module docs for the degradation rules.
pub fn parse(command: &str) -> RequestModel {
    let text = normalize(command);

    let url = extract_url(&text);
    let method = extract_method(&text);
    let headers = extract_headers(&text);
    let body = extract_body(&text);
    let form_fields = extract_form_fields(&text);

    tracing::debug!(
        %method,
        url = %url,
        headers = headers.len(),
        body = body.is_some(),
        form_fields = form_fields.len(),
        "parsed curl command"
    );

    RequestModel {
        url,
        method,
        headers,
        body,
        form_fields,
    }
}

/// Trim, drop the leading tool name and join backslash-newline continuations.
fn normalize(command: &str) -> String {
    let trimmed = command.trim();
    let without_tool = TOOL_NAME.replace(trimmed, "");
    LINE_CONTINUATION.replace_all(&without_tool, " ").into_owned()
}

fn extract_url(text: &str) -> String {
    QUOTED_URL
        .captures(text)
        .or_else(|| BARE_URL.captures(text))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

fn extract_method(text: &str) -> Method {
    if let Some(caps) = METHOD_FLAG.captures(text) {
        return Method::from_token_or_get(&caps[1]);
    }
    if BODY_FLAG.is_match(text) || FORM_FLAG.is_match(text) {
        Method::Post
    } else if HEAD_FLAG.is_match(text) {
        Method::Head
    } else {
        Method::Get
    }
}

fn extract_headers(text: &str) -> FieldMap {
    let mut headers = FieldMap::new();
    for caps in HEADER.captures_iter(text) {
        let token = quoted_token(&caps, 2);
        let entry = match &caps[1] {
            "-b" | "--cookie" => Some(("Cookie", token.as_str())),
            "-A" | "--user-agent" => Some(("User-Agent", token.as_str())),
            _ => token.split_once(':'),
        };
        if let Some((key, value)) = entry {
            insert_field(&mut headers, key, value);
        }
    }
    headers
}

fn extract_body(text: &str) -> Option<Body> {
    BODY_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|caps| Body::classify(quoted_token(&caps, 1)))
}

fn extract_form_fields(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for caps in FORM_FIELD.captures_iter(text) {
        let token = quoted_token(&caps, 1);
        if let Some((key, value)) = token.split_once('=') {
            insert_field(&mut fields, key, value);
        }
    }
    fields
}

/// Read a quoted argument captured as `($)?'single'` or `"double"` starting
/// at group `first`, and undo its escaping.
fn quoted_token(caps: &Captures<'_>, first: usize) -> String {
    let ansi_c = caps.get(first).is_some_and(|m| m.as_str() == "$");
    let raw = caps
        .get(first + 1)
        .or_else(|| caps.get(first + 2))
        .map_or("", |m| m.as_str());
    if ansi_c {
        unescape_ansi_c(raw)
    } else {
        unescape_quotes(raw)
    }
}

fn unescape_quotes(raw: &str) -> String {
    raw.replace("\\\"", "\"").replace("\\'", "'")
}

/// Decode the escapes bash recognizes inside `$'...'`, as emitted by
/// browsers' "copy as cURL".
fn unescape_ansi_c(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(c @ ('\\' | '\'' | '"')) => out.push(c),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Trim and unquote both sides, then insert. Empty keys are dropped.
fn insert_field(map: &mut FieldMap, key: &str, value: &str) {
    let key = strip_quotes(key.trim());
    let value = strip_quotes(value.trim());
    if key.is_empty() {
        return;
    }
    map.insert(key.to_string(), value.to_string());
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(text: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = text.strip_prefix(quote).and_then(|t| t.strip_suffix(quote)) {
            return inner;
        }
    }
    text
}
