use serde_json::Value;

use crate::ai::extractor::ParsedContent;
use crate::error::{AppError, Result};
use crate::models::format_hashtag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    List { min_len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
}

/// Required keys, checked in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Schema(pub &'static [FieldSpec]);

pub const TITLES: Schema = Schema(&[FieldSpec {
    key: "titles",
    kind: FieldKind::List { min_len: 1 },
}]);

pub const BODY: Schema = Schema(&[FieldSpec {
    key: "body",
    kind: FieldKind::Text,
}]);

pub const CTA: Schema = Schema(&[FieldSpec {
    key: "cta",
    kind: FieldKind::Text,
}]);

pub const HASHTAGS: Schema = Schema(&[FieldSpec {
    key: "hashtags",
    kind: FieldKind::List { min_len: 1 },
}]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    pub fn take_text(self, key: &str) -> Result<String> {
        self.0
            .into_iter()
            .find_map(|(k, v)| match v {
                FieldValue::Text(s) if k == key => Some(s),
                _ => None,
            })
            .ok_or_else(|| AppError::MissingField(key.to_string()))
    }

    pub fn take_list(self, key: &str) -> Result<Vec<String>> {
        self.0
            .into_iter()
            .find_map(|(k, v)| match v {
                FieldValue::List(items) if k == key => Some(items),
                _ => None,
            })
            .ok_or_else(|| AppError::MissingField(key.to_string()))
    }
}

impl Schema {
    pub fn validate(&self, parsed: &ParsedContent) -> Result<Fields> {
        let mut fields = Vec::with_capacity(self.0.len());
        for spec in self.0 {
            let value = check_field(spec, parsed.get(spec.key))
                .ok_or_else(|| AppError::MissingField(spec.key.to_string()))?;
            fields.push((spec.key, value));
        }
        Ok(Fields(fields))
    }
}

fn check_field(spec: &FieldSpec, value: Option<&Value>) -> Option<FieldValue> {
    match (spec.kind, value?) {
        (FieldKind::Text, Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| FieldValue::Text(trimmed.to_string()))
        }
        (FieldKind::List { min_len }, Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                // a non-string element means the shape is wrong
                let s = item.as_str()?.trim();
                if !s.is_empty() {
                    out.push(s.to_string());
                }
            }
            (out.len() >= min_len).then_some(FieldValue::List(out))
        }
        _ => None,
    }
}

/// Prefixes `#` where missing. Applying it twice changes nothing.
pub fn normalize_hashtags(tags: Vec<String>) -> Vec<String> {
    tags.iter().map(|t| format_hashtag(t)).collect()
}
