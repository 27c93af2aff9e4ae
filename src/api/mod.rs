// src/api/mod.rs
//! HTTP client for the healthcare backend.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{AppConfig, ExtractEndpoint};
use crate::error::{Error, Result};
use crate::intake::PatientIntake;

pub mod query;
pub mod schema;

pub use query::{parse_symptoms, HospitalQuery};
pub use schema::{ExtractionResult, HospitalSearch, Place, Rating};

const SUMMARY_PATH: &str = "/api/generate-summary";
const MAP_PAGE_PATH: &str = "/static/map.html";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    extract: ExtractEndpoint,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            extract: config.extract.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Uploads a PDF and returns the document text with the detected
    /// disease names.
    pub async fn extract_diseases(&self, path: &Path) -> Result<ExtractionResult> {
        let path = query::validate_upload(path)?;
        let bytes = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.pdf".to_string());

        tracing::info!(file = %path.display(), size = bytes.len(), "uploading document for extraction");

        let part = Part::bytes(bytes).file_name(file_name).mime_str("application/pdf")?;
        let form = Form::new().part(self.extract.field.clone(), part);
        let response = self.http.post(self.url(&self.extract.path)).multipart(form).send().await?;

        let result = decode::<schema::ExtractionResponse>(response).await?.validate()?;
        tracing::info!(keywords = result.keywords.len(), chars = result.source_text.len(), "extraction complete");
        Ok(result)
    }

    pub async fn nearby_hospitals(&self, latitude: f64, longitude: f64, symptoms: Vec<String>) -> Result<HospitalSearch> {
        self.search_hospitals(&HospitalQuery::nearby(latitude, longitude, symptoms)?).await
    }

    pub async fn city_hospitals(&self, city: &str, symptoms: Vec<String>) -> Result<HospitalSearch> {
        self.search_hospitals(&HospitalQuery::city(city, symptoms)?).await
    }

    pub async fn search_hospitals(&self, query: &HospitalQuery) -> Result<HospitalSearch> {
        tracing::info!(query = %query.describe(), "searching hospitals");
        let mut search: HospitalSearch = match query {
            HospitalQuery::Nearby(req) => self.post_json::<_, schema::HospitalSearchResponse>(query.path(), req).await?,
            HospitalQuery::City(req) => self.post_json::<_, schema::HospitalSearchResponse>(query.path(), req).await?,
        }
        .into();

        // The backend writes the map page for nearby searches but does not
        // return its location.
        if matches!(query, HospitalQuery::Nearby(_)) && search.map_url.is_none() {
            search.map_url = Some(self.url(MAP_PAGE_PATH));
        }
        tracing::info!(places = search.places.len(), "hospital search complete");
        Ok(search)
    }

    pub async fn generate_summary(&self, form: &PatientIntake) -> Result<String> {
        form.validate()?;
        tracing::info!("requesting patient summary");
        self.post_json::<_, schema::SummaryResponse>(SUMMARY_PATH, form).await?.validate()
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "backend response");
    decode_body(status.as_u16(), &body)
}

/// Maps a status and body to the expected schema, or to an `Api` error
/// carrying the backend's own message when it sent one.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<schema::ErrorBody>(body)
            .ok()
            .and_then(schema::ErrorBody::into_message)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() { "no details".to_string() } else { trimmed.chars().take(200).collect() }
            });
        tracing::warn!(status, %message, "backend returned an error");
        return Err(Error::Api { status, message });
    }
    serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))
}
