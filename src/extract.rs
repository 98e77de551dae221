//! Document Value Extraction Module
//!
//! Pulls the three numeric values (10th marks, 12th marks, annual income)
//! out of an applicant's uploaded documents. Rendering and text recognition
//! live behind the `DocumentReader` collaborator; every failure on this path
//! degrades to the 0.0 sentinel so the batch keeps moving.

use crate::types::{Applicant, ExtractedValues};
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::time::Duration;
use tracing::warn;

/// Renders a document reference and returns the recognized text of its
/// first page. Download, rendering, and recognition are all behind this
/// boundary.
pub trait DocumentReader {
    fn read_text(&self, url: &str) -> Result<String>;
}

/// Recognition service over HTTP: posts the document URL, receives the
/// recognized text of the first page.
pub struct HttpDocumentReader {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpDocumentReader {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build document reader client")?;

        Ok(HttpDocumentReader { client, endpoint })
    }

    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("OCR_URL").context("OCR_URL is not set")?;
        Self::new(endpoint)
    }
}

impl DocumentReader for HttpDocumentReader {
    fn read_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "url": url, "page": 1 }))
            .send()
            .with_context(|| format!("Recognition request failed for {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Recognition service returned {} for {}",
                response.status(),
                url
            ));
        }

        response.text().context("Failed to read recognition response")
    }
}

/// Extract the three document values for an applicant. Never fails: a
/// missing reference short-circuits to all zeros, and an unreadable or
/// unparsable document yields zero for that field only.
pub fn extract_values(reader: &dyn DocumentReader, applicant: &Applicant) -> ExtractedValues {
    let tenth_url = applicant.tenth_result.as_deref().unwrap_or("");
    let twelfth_url = applicant.twelfth_result.as_deref().unwrap_or("");
    let income_url = applicant.income_cert.as_deref().unwrap_or("");

    if tenth_url.is_empty() || twelfth_url.is_empty() || income_url.is_empty() {
        warn!(
            "Missing one or more document references for {}",
            applicant.user_id
        );
        return ExtractedValues::default();
    }

    ExtractedValues {
        tenth_marks: read_numeric(reader, tenth_url),
        twelfth_marks: read_numeric(reader, twelfth_url),
        income_amount: read_numeric(reader, income_url),
    }
}

fn read_numeric(reader: &dyn DocumentReader, url: &str) -> f64 {
    match reader.read_text(url) {
        Ok(text) => parse_numeric(&text),
        Err(e) => {
            warn!("Could not read document {}: {:#}", url, e);
            0.0
        }
    }
}

/// First number found in the text, commas stripped beforehand. Two to nine
/// integer digits with an optional decimal part; no match yields zero.
pub fn parse_numeric(text: &str) -> f64 {
    let cleaned = text.replace(',', "");

    if let Ok(re) = Regex::new(r"\d{2,9}(?:\.\d+)?") {
        if let Some(found) = re.find(&cleaned) {
            if let Ok(value) = found.as_str().parse::<f64>() {
                return value;
            }
        }
    }

    0.0
}
