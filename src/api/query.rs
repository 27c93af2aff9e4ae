// src/api/query.rs
//! Request payloads, validated before anything goes on the wire.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Splits a comma separated symptom list, trimming each entry and dropping
/// empty ones.
pub fn parse_symptoms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_coordinate(input: &str, name: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::validation(format!("{} must be a number, got '{}'", name, input.trim())))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRequest {
    pub city: String,
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HospitalQuery {
    Nearby(NearbyRequest),
    City(CityRequest),
}

impl HospitalQuery {
    pub fn nearby(latitude: f64, longitude: f64, symptoms: Vec<String>) -> Result<Self> {
        require_symptoms(&symptoms)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::validation(format!("latitude {} is outside [-90, 90]", latitude)));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::validation(format!("longitude {} is outside [-180, 180]", longitude)));
        }
        Ok(HospitalQuery::Nearby(NearbyRequest { latitude, longitude, symptoms }))
    }

    pub fn city(city: &str, symptoms: Vec<String>) -> Result<Self> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::validation("Please enter a city name"));
        }
        require_symptoms(&symptoms)?;
        Ok(HospitalQuery::City(CityRequest { city: city.to_string(), symptoms }))
    }

    pub fn path(&self) -> &'static str {
        match self {
            HospitalQuery::Nearby(_) => "/map",
            HospitalQuery::City(_) => "/city_hospitals",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            HospitalQuery::Nearby(r) => format!("near {:.4}, {:.4}", r.latitude, r.longitude),
            HospitalQuery::City(r) => format!("in {}", r.city),
        }
    }
}

fn require_symptoms(symptoms: &[String]) -> Result<()> {
    if symptoms.is_empty() {
        return Err(Error::validation("Please enter at least one symptom"));
    }
    Ok(())
}

/// Checks that `path` names an existing PDF file.
pub fn validate_upload(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(Error::validation(format!("{} is not a file", path.display())));
    }
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(Error::validation("Please select a PDF file"));
    }
    Ok(path.to_path_buf())
}
