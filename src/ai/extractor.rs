//! Pulls a single JSON object out of free-form model output.
//!
//! Models are asked for bare JSON but routinely wrap it in markdown fences, prefix it with
//! chatter, or emit raw newlines and stray quotes inside string values. The extractor strips the
//! fences, keeps the span between the first `{` and the last `}`, escapes control characters
//! inside strings and parses. Interior-quote repair is attempted only when that parse fails.
//!
//! Known limitation: when the text holds more than one top-level object the first/last brace
//! span covers all of them and the parse will usually fail.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

pub type ParsedContent = Map<String, Value>;

static FENCE: OnceLock<Option<Regex>> = OnceLock::new();

fn fence() -> Option<&'static Regex> {
    FENCE
        .get_or_init(|| Regex::new(r"(?i)```(?:json)?\s*").ok())
        .as_ref()
}

pub fn extract_json(raw: &str) -> Result<ParsedContent> {
    let unfenced = match fence() {
        Some(re) => re.replace_all(raw, ""),
        None => raw.replace("```", "").into(),
    };
    let text = unfenced.trim();

    if text.is_empty() {
        return Err(AppError::MalformedCompletion("empty completion".to_string()));
    }

    let (start, end) = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(AppError::MalformedCompletion(format!(
                "no JSON object in: {}",
                text
            )))
        }
    };

    let slice = escape_control_chars(&text[start..=end]);
    tracing::debug!("Cleaned JSON text: {}", slice);

    match parse_object(&slice) {
        Ok(map) => Ok(map),
        Err(first_err) => {
            // an unescaped quote hides later control characters from the first pass
            let repaired = escape_control_chars(&repair_inner_quotes(&slice));
            if repaired == slice {
                return Err(first_err);
            }
            tracing::debug!("Retrying with repaired quotes: {}", repaired);
            parse_object(&repaired)
        }
    }
}

fn parse_object(slice: &str) -> Result<ParsedContent> {
    match serde_json::from_str::<Value>(slice) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::MalformedCompletion(format!(
            "not a JSON object: {}",
            slice
        ))),
        Err(e) => Err(AppError::MalformedCompletion(format!("{}: {}", e, slice))),
    }
}

/// Escapes raw control characters that occur inside string literals.
/// Whitespace between tokens is left alone since it is valid JSON.
pub fn escape_control_chars(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{08}' => out.push_str("\\b"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }

    out
}

/// Best-effort escaping of quotes that sit inside a string value.
///
/// A quote inside a string is taken as the closing quote only when the next non-whitespace
/// character is a structural one (`,` `:` `}` `]`) or the end of input. Anything else is
/// escaped. Values that legitimately contain `", ` will be mangled.
pub fn repair_inner_quotes(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len() + 8);
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
                if matches!(next, None | Some(',') | Some(':') | Some('}') | Some(']')) {
                    in_string = false;
                    out.push(c);
                } else {
                    out.push_str("\\\"");
                }
            }
            c => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_and_bare_json_parse_identically() {
        let bare = r##"{"title": "Five pipeline mistakes", "hashtags": ["#Data"]}"##;
        let fenced = format!("```json\n{}\n```", bare);
        let untagged = format!("```\n{}\n```", bare);

        let expected = extract_json(bare).unwrap();
        assert_eq!(extract_json(&fenced).unwrap(), expected);
        assert_eq!(extract_json(&untagged).unwrap(), expected);
        assert_eq!(expected["title"], json!("Five pipeline mistakes"));
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = "Sure! Here you go:\n{\"cta\": \"Follow for more\"}\nHope that helps.";
        let parsed = extract_json(raw).unwrap();
        assert_eq!(parsed["cta"], json!("Follow for more"));
    }

    #[test]
    fn literal_newlines_in_values_survive() {
        let raw = "{\n  \"body\": \"Line one\nLine two\r\n\tindented\u{0C}page\u{08}back\"\n}";
        let parsed = extract_json(raw).unwrap();
        assert_eq!(
            parsed["body"],
            json!("Line one\nLine two\r\n\tindented\u{0C}page\u{08}back")
        );
    }

    #[test]
    fn newline_after_stray_quote_is_escaped() {
        let raw = "{\"body\": \"Get a 27\" monitor\nfor coding\"}";
        let parsed = extract_json(raw).unwrap();
        assert_eq!(parsed["body"], json!("Get a 27\" monitor\nfor coding"));
    }

    #[test]
    fn already_escaped_sequences_are_untouched() {
        let raw = r#"{"body": "Say \"hi\"\nthen leave"}"#;
        let parsed = extract_json(raw).unwrap();
        assert_eq!(parsed["body"], json!("Say \"hi\"\nthen leave"));
    }

    #[test]
    fn unescaped_inner_quotes_are_repaired() {
        let raw = r#"{"title": "Why "data contracts" matter", "cta": "Agree?"}"#;
        let parsed = extract_json(raw).unwrap();
        assert_eq!(parsed["title"], json!("Why \"data contracts\" matter"));
        assert_eq!(parsed["cta"], json!("Agree?"));
    }

    #[test]
    fn missing_braces_is_malformed() {
        for raw in ["no json here", "only an opener {", "} backwards {", ""] {
            assert!(
                matches!(extract_json(raw), Err(AppError::MalformedCompletion(_))),
                "expected failure for {:?}",
                raw
            );
        }
    }

    #[test]
    fn fence_only_input_is_malformed() {
        assert!(matches!(
            extract_json("```json\n```"),
            Err(AppError::MalformedCompletion(_))
        ));
    }

    #[test]
    fn truncated_object_carries_the_slice() {
        let err = extract_json(r#"{"body": "cut off", "cta": }"#).unwrap_err();
        match err {
            AppError::MalformedCompletion(msg) => assert!(msg.contains("cut off")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn two_objects_are_a_known_failure() {
        let raw = r#"Example: {"body": "x"} Answer: {"body": "y"}"#;
        assert!(extract_json(raw).is_err());
    }

    #[test]
    fn control_chars_outside_strings_are_kept() {
        assert_eq!(escape_control_chars("{\n\"a\":\t1}"), "{\n\"a\":\t1}");
    }
}
