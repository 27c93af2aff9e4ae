// src/api/schema.rs
//! Wire types for backend responses and the validated values built from them.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

static SERVER_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?span\b[^>]*>").unwrap());

/// Body of the extraction endpoints. `/extract` answers with `text`, `/`
/// with `highlighted_text` that already carries server-side `<span>` tags.
#[derive(Debug, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub diseases: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlighted_text: Option<String>,
}

/// Document text and the disease names detected in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub source_text: String,
    pub keywords: Vec<String>,
}

impl ExtractionResponse {
    pub fn validate(self) -> Result<ExtractionResult> {
        let source_text = match (self.text, self.highlighted_text) {
            (Some(text), _) => text,
            (None, Some(marked)) => strip_server_markup(&marked),
            (None, None) => return Err(Error::Decode("response carries no document text".to_string())),
        };
        Ok(ExtractionResult { source_text, keywords: self.diseases.unwrap_or_default() })
    }
}

impl ExtractionResult {
    /// Keywords for display: trimmed, without empty entries or
    /// case-insensitive repeats, in backend order.
    pub fn distinct_keywords(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

pub fn strip_server_markup(text: &str) -> String {
    SERVER_MARKUP.replace_all(text, "").into_owned()
}

/// A hospital or clinic returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default = "unknown", alias = "vicinity", alias = "formatted_address")]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// The backend sends a number, or `"N/A"` when the place has no rating.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Rating {
    Score(f64),
    #[default]
    Unavailable,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(s) => write!(f, "{:.1}", s),
            Rating::Unavailable => write!(f, "N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_f64() {
            Some(score) if score.is_finite() => Rating::Score(score),
            _ => Rating::Unavailable,
        })
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Rating::Score(s) => serializer.serialize_f64(*s),
            Rating::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HospitalSearchResponse {
    #[serde(default)]
    pub places: Option<Vec<Place>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HospitalSearch {
    pub places: Vec<Place>,
    pub message: Option<String>,
    pub map_url: Option<String>,
}

impl From<HospitalSearchResponse> for HospitalSearch {
    fn from(resp: HospitalSearchResponse) -> Self {
        HospitalSearch {
            places: resp.places.unwrap_or_default(),
            message: resp.message,
            map_url: resp.map_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub text: Option<String>,
}

impl SummaryResponse {
    pub fn validate(self) -> Result<String> {
        self.text
            .ok_or_else(|| Error::Decode("response carries no summary text".to_string()))
    }
}

/// Error body the backend sends with 4xx answers.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prefers_plain_text() {
        let resp: ExtractionResponse =
            serde_json::from_str(r#"{"text": "Fever noted.", "diseases": ["Fever"]}"#).unwrap();
        let result = resp.validate().unwrap();
        assert_eq!(result.source_text, "Fever noted.");
        assert_eq!(result.keywords, vec!["Fever"]);
    }

    #[test]
    fn test_extraction_strips_server_markup() {
        let body = r#"{"diseases": ["asthma"], "highlighted_text": "Has <span class=\"highlight\">asthma</span> and <b>x</b>"}"#;
        let result = serde_json::from_str::<ExtractionResponse>(body).unwrap().validate().unwrap();
        assert_eq!(result.source_text, "Has asthma and <b>x</b>");
    }

    #[test]
    fn test_extraction_without_text_is_decode_error() {
        let resp: ExtractionResponse = serde_json::from_str(r#"{"diseases": []}"#).unwrap();
        assert!(matches!(resp.validate(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_missing_diseases_means_none() {
        let resp: ExtractionResponse = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert!(resp.validate().unwrap().keywords.is_empty());
    }

    #[test]
    fn test_distinct_keywords_keep_backend_order() {
        let result = ExtractionResult {
            source_text: String::new(),
            keywords: vec!["flu".into(), "Diabetes".into(), " ".into(), "FLU".into(), "diabetes mellitus".into()],
        };
        assert_eq!(result.distinct_keywords(), vec!["flu", "Diabetes", "diabetes mellitus"]);
    }

    #[test]
    fn test_place_defaults_and_rating() {
        let body = r#"{"places": [
            {"name": "City Hospital", "rating": 4.26, "specialization": "Cardiologist", "address": "1 Main St", "lat": 1.5, "lng": 2.5},
            {"rating": "N/A", "specialization": "Dermatologist"}
        ]}"#;
        let search: HospitalSearch = serde_json::from_str::<HospitalSearchResponse>(body).unwrap().into();
        assert_eq!(search.places.len(), 2);
        assert_eq!(search.places[0].rating, Rating::Score(4.26));
        assert_eq!(search.places[0].rating.to_string(), "4.3");
        assert_eq!(search.places[1].name, "Unknown");
        assert_eq!(search.places[1].address, "Unknown");
        assert_eq!(search.places[1].rating.to_string(), "N/A");
        assert_eq!(search.map_url, None);
    }

    #[test]
    fn test_rating_serializes_like_backend() {
        assert_eq!(serde_json::to_string(&Rating::Unavailable).unwrap(), r#""N/A""#);
        assert_eq!(serde_json::to_string(&Rating::Score(3.5)).unwrap(), "3.5");
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "City name is required"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("City name is required"));
    }
}
