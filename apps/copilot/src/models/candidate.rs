use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One ranked applicant as returned by the ranking or listing endpoint.
///
/// Built once by `workflow::decode` and never mutated afterwards; a new fetch
/// replaces the whole list. Serializes as `record`, so scheduling forwards
/// exactly what the endpoint sent. The typed fields are read-only views used
/// for keys and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub email: String,
    #[serde(skip)]
    pub score: Option<f64>,
    /// Canonical summary, whichever spelling the endpoint used.
    #[serde(skip)]
    pub summary: Option<String>,
    /// The received object, summary variants collapsed into `summary`.
    #[serde(flatten)]
    pub record: Map<String, Value>,
}

impl Candidate {
    /// Score as it appears inside a fallback key: `91`, `91.5`, or empty.
    pub fn score_label(&self) -> String {
        self.score.map(|s| s.to_string()).unwrap_or_default()
    }
}

/// Identity of a candidate within the current canonical list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateKey(String);

impl CandidateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CandidateKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CandidateKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Derives the key for the candidate at `index`.
///
/// A non-empty `id` wins. Otherwise the key is `email-score-index`, which is
/// only stable for as long as the list keeps its order.
pub fn candidate_key(candidate: &Candidate, index: usize) -> CandidateKey {
    match candidate.id.as_deref() {
        Some(id) if !id.is_empty() => CandidateKey(id.to_string()),
        _ => CandidateKey(format!(
            "{}-{}-{}",
            candidate.email,
            candidate.score_label(),
            index
        )),
    }
}

/// Keys for a whole list, in list order.
pub fn candidate_keys(candidates: &[Candidate]) -> Vec<CandidateKey> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| candidate_key(candidate, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: Option<&str>, email: &str, score: Option<f64>) -> Candidate {
        Candidate {
            id: id.map(str::to_string),
            name: "Ann".to_string(),
            email: email.to_string(),
            score,
            summary: Some("Strong fit".to_string()),
            record: Map::new(),
        }
    }

    #[test]
    fn test_id_wins_regardless_of_index() {
        let c = candidate(Some("cand-7"), "a@x.com", Some(91.0));
        for index in [0, 1, 42] {
            assert_eq!(candidate_key(&c, index).as_str(), "cand-7");
        }
    }

    #[test]
    fn test_fallback_key_format() {
        let c = candidate(None, "a@x.com", Some(91.0));
        assert_eq!(candidate_key(&c, 0).as_str(), "a@x.com-91-0");
    }

    #[test]
    fn test_empty_id_falls_back() {
        let c = candidate(Some(""), "a@x.com", Some(91.0));
        assert_eq!(candidate_key(&c, 3).as_str(), "a@x.com-91-3");
    }

    #[test]
    fn test_fallback_key_changes_with_index() {
        let c = candidate(None, "a@x.com", Some(91.0));
        assert_ne!(candidate_key(&c, 0), candidate_key(&c, 1));
    }

    #[test]
    fn test_fractional_score_label() {
        let c = candidate(None, "b@x.com", Some(87.5));
        assert_eq!(candidate_key(&c, 2).as_str(), "b@x.com-87.5-2");
    }

    #[test]
    fn test_missing_score_renders_empty() {
        let c = candidate(None, "c@x.com", None);
        assert_eq!(candidate_key(&c, 0).as_str(), "c@x.com--0");
    }

    #[test]
    fn test_candidate_keys_follow_list_order() {
        let list = vec![
            candidate(None, "a@x.com", Some(91.0)),
            candidate(Some("id-2"), "b@x.com", Some(80.0)),
        ];
        let keys = candidate_keys(&list);
        assert_eq!(keys, vec![CandidateKey::from("a@x.com-91-0"), CandidateKey::from("id-2")]);
    }

    #[test]
    fn test_serializes_only_the_received_record() {
        let mut c = candidate(Some("cand-7"), "a@x.com", Some(91.0));
        c.record
            .insert("linkedin".to_string(), Value::String("in/ann".to_string()));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json, serde_json::json!({"linkedin": "in/ann"}));
    }
}
