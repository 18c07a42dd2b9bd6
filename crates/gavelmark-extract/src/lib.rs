// SPDX-License-Identifier: MIT
//
// gavelmark-extract — thin call-and-parse wrapper around the hosted Gemini
// model that reads an auction summary image into an `AuctionRecord`.
//
// This contributes no algorithmic logic of its own: one request, one parse.
// Any failure (missing credential, network error, unparseable response) is
// propagated opaquely to the caller; nothing is retried.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gavelmark_core::error::{GavelmarkError, Result};
use gavelmark_core::types::AuctionRecord;
use tracing::{debug, info, instrument};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const PROMPT: &str = "\
Analyze this real estate auction summary image. Extract the following \
information into a structured JSON object.

Fields to extract:
- caseNumber: The case number (e.g., 2024타경12345).
- saleDate: The auction date (format YYYY년 M월 D일).
- appraisalValue: The appraisal price (감정가).
- minimumPrice: The minimum bid price (최저가).
- minimumPercentage: The percentage of the minimum price relative to appraisal (e.g., 70%, 100%).
- landArea: Land area (대지권).
- buildingArea: Building area (건물면적/전용).
- address: Full address of the property.
- apartmentName: Name of the apartment or building complex.

If a field is not found, leave it as an empty string. \
Ensure the date format is clean.";

/// Client for the hosted field-extraction service.
pub struct ExtractionClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl ExtractionClient {
    /// Build a client with an explicit credential.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(GavelmarkError::MissingCredential);
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|err| GavelmarkError::Extraction(format!("http client: {err}")))?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(model: String) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| GavelmarkError::MissingCredential)?;
        Self::new(api_key, model)
    }

    /// Send one encoded image to the model and parse the filled record.
    ///
    /// Fields the model could not read come back as empty strings.
    #[instrument(skip_all, fields(model = %self.model, image_len = jpeg_bytes.len()))]
    pub async fn extract(&self, jpeg_bytes: &[u8]) -> Result<AuctionRecord> {
        let encoded = STANDARD.encode(jpeg_bytes);
        let body = request_body(&encoded);
        let url = format!(
            "{ENDPOINT_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        debug!("sending extraction request");
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| GavelmarkError::Extraction(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GavelmarkError::Extraction(format!(
                "service returned {status}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|err| GavelmarkError::Extraction(format!("unreadable response: {err}")))?;

        let record = parse_response(&payload)?;
        info!("extraction succeeded");
        Ok(record)
    }
}

/// The generateContent request: inline image, fixed prompt, and a response
/// schema pinning the nine string fields so the model answers in JSON.
fn request_body(base64_image: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "parts": [
                { "inline_data": { "mime_type": "image/jpeg", "data": base64_image } },
                { "text": PROMPT }
            ]
        }],
        "generationConfig": {
            "response_mime_type": "application/json",
            "response_schema": {
                "type": "OBJECT",
                "properties": {
                    "caseNumber": { "type": "STRING" },
                    "saleDate": { "type": "STRING" },
                    "appraisalValue": { "type": "STRING" },
                    "minimumPrice": { "type": "STRING" },
                    "minimumPercentage": { "type": "STRING" },
                    "landArea": { "type": "STRING" },
                    "buildingArea": { "type": "STRING" },
                    "address": { "type": "STRING" },
                    "apartmentName": { "type": "STRING" }
                }
            }
        }
    })
}

/// Pull the model's JSON text out of the generateContent envelope and parse
/// it as an `AuctionRecord`.
fn parse_response(payload: &serde_json::Value) -> Result<AuctionRecord> {
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GavelmarkError::Extraction("no text in model response".into()))?;

    serde_json::from_str(text)
        .map_err(|err| GavelmarkError::Extraction(format!("unparseable record: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_image_and_schema() {
        let body = request_body("QUJD");
        assert_eq!(
            body.pointer("/contents/0/parts/0/inline_data/data")
                .and_then(|v| v.as_str()),
            Some("QUJD")
        );
        let schema = body
            .pointer("/generationConfig/response_schema/properties")
            .unwrap();
        for field in [
            "caseNumber",
            "saleDate",
            "appraisalValue",
            "minimumPrice",
            "minimumPercentage",
            "landArea",
            "buildingArea",
            "address",
            "apartmentName",
        ] {
            assert!(schema.get(field).is_some(), "schema missing {field}");
        }
    }

    #[test]
    fn parse_response_fills_record() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"caseNumber\":\"2024타경85900\",\"minimumPercentage\":\"70%\"}"
                    }]
                }
            }]
        });
        let record = parse_response(&payload).unwrap();
        assert_eq!(record.case_number, "2024타경85900");
        assert_eq!(record.minimum_percentage, "70%");
        // Omitted fields default to empty.
        assert!(record.address.is_empty());
    }

    #[test]
    fn parse_response_rejects_empty_envelope() {
        let payload = serde_json::json!({ "candidates": [] });
        let err = parse_response(&payload).unwrap_err();
        assert!(matches!(err, GavelmarkError::Extraction(_)));
    }

    #[test]
    fn parse_response_rejects_non_json_text() {
        let payload = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry, no" }] } }]
        });
        assert!(parse_response(&payload).is_err());
    }

    #[test]
    fn empty_key_is_missing_credential() {
        let err = ExtractionClient::new(String::new(), "gemini-2.5-flash-latest".into())
            .err()
            .unwrap();
        assert!(matches!(err, GavelmarkError::MissingCredential));
    }

    #[test]
    fn from_env_requires_credential() {
        if std::env::var(API_KEY_ENV).is_ok() {
            return; // credential present on this host; nothing to assert
        }
        let err = ExtractionClient::from_env("gemini-2.5-flash-latest".into())
            .err()
            .unwrap();
        assert!(matches!(err, GavelmarkError::MissingCredential));
    }
}
