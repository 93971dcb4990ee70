//! Response normalization — turns whatever the ranking or listing endpoint
//! returned into the canonical candidate list.
//!
//! Shape rule:
//! - JSON array   → one candidate per object element (non-objects dropped)
//! - JSON object  → a one-element list
//! - anything else → empty list
//!
//! Field rules (read-only views; the record itself is kept as received):
//! - `id`: non-empty string, or a number rendered as decimal text
//! - `score`: number, or a numeric string
//! - summary: first non-empty string among [`SUMMARY_FIELDS`], in order; when
//!   one is found the variants are collapsed into a single `summary` field

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::candidate::Candidate;

/// Summary spellings seen from the automation endpoints, highest precedence first.
pub const SUMMARY_FIELDS: [&str; 6] = [
    "summary",
    "ai summary",
    "AI SUMMARY",
    "AI Summary",
    "ai_summary",
    "aiSummary",
];

pub fn normalize_payload(payload: Value) -> Vec<Candidate> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(record) => Some(decode_candidate(record)),
                other => {
                    warn!("Dropping non-object candidate at index {index}: {other}");
                    None
                }
            })
            .collect(),
        Value::Object(record) => vec![decode_candidate(record)],
        _ => Vec::new(),
    }
}

pub fn decode_candidate(mut record: Map<String, Value>) -> Candidate {
    let id = match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let name = read_string(&record, "name").unwrap_or_default();
    let email = read_string(&record, "email").unwrap_or_default();
    let score = match record.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let summary = SUMMARY_FIELDS.iter().find_map(|field| match record.get(*field) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    });
    // Only the winning text survives, under the canonical name.
    if let Some(text) = &summary {
        for field in SUMMARY_FIELDS {
            record.remove(field);
        }
        record.insert("summary".to_string(), Value::String(text.clone()));
    }

    Candidate {
        id,
        name,
        email,
        score,
        summary,
        record,
    }
}

fn read_string(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}
