// SPDX-License-Identifier: MIT
//
// Core domain types for the Gavelmark marketing-image toolkit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a processed (watermarked) image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One auction listing as entered in the cover form.
///
/// All fields are free text and may be empty; values are rendered verbatim
/// with no validation or coercion. The camelCase wire names match the JSON
/// schema the field-extraction service fills in, and per-field defaults let
/// it omit anything it could not read from the source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuctionRecord {
    /// Court case number, e.g. "2024타경85900".
    pub case_number: String,
    /// Auction sale date, e.g. "2026년 1월 6일".
    pub sale_date: String,
    /// Appraisal price (감정가).
    pub appraisal_value: String,
    /// Minimum bid price (최저가).
    pub minimum_price: String,
    /// Minimum price as a percentage of the appraisal, e.g. "70%".
    pub minimum_percentage: String,
    /// Land area (대지면적).
    pub land_area: String,
    /// Building area (건물면적).
    pub building_area: String,
    /// Full street address of the property.
    pub address: String,
    /// Apartment complex or building name.
    pub apartment_name: String,
    /// Optional free-form status note (e.g. 유찰, 변경).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Default for AuctionRecord {
    fn default() -> Self {
        Self {
            case_number: String::new(),
            sale_date: String::new(),
            appraisal_value: String::new(),
            minimum_price: String::new(),
            minimum_percentage: String::new(),
            land_area: String::new(),
            building_area: String::new(),
            address: String::new(),
            apartment_name: String::new(),
            status: None,
        }
    }
}

impl AuctionRecord {
    /// The demo listing the cover form starts from.
    pub fn sample() -> Self {
        Self {
            case_number: "2024타경85900".into(),
            sale_date: "2026년 1월 6일".into(),
            appraisal_value: "540,000,000".into(),
            minimum_price: "378,000,000".into(),
            minimum_percentage: "70%".into(),
            land_area: "12.307평 (40.6831㎡)".into(),
            building_area: "전용 18.149평 / 공급 25평형".into(),
            address: "경기도 화성시 반월동 000-00".into(),
            apartment_name: "반월동 SK아파트".into(),
            status: None,
        }
    }

    /// Suggested file name for an exported cover image.
    ///
    /// `cover_<case number>.png`, falling back to `cover_auction.png` when no
    /// case number has been entered.
    pub fn cover_file_name(&self) -> String {
        let stem = if self.case_number.is_empty() {
            "auction"
        } else {
            self.case_number.as_str()
        };
        format!("cover_{stem}.png")
    }
}

/// A source photo that has had the advertising banner appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedImage {
    pub id: ImageId,
    /// File name of the uploaded source, extension included.
    pub original_name: String,
    /// JPEG-encoded composited output.
    pub jpeg_bytes: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl ProcessedImage {
    pub fn new(original_name: String, jpeg_bytes: Vec<u8>) -> Self {
        Self {
            id: ImageId::new(),
            original_name,
            jpeg_bytes,
            created_at: Utc::now(),
        }
    }

    /// Suggested file name for the exported watermarked image:
    /// `wm_<original name>`, original extension preserved.
    pub fn export_file_name(&self) -> String {
        format!("wm_{}", self.original_name)
    }
}

/// Result contract shared by every save-strategy implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Bytes were written where the user asked.
    Saved,
    /// User dismissed the dialog — a no-op, not an error.
    Cancelled,
    /// The write failed; message is already human-readable.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_file_name_uses_case_number() {
        let record = AuctionRecord::sample();
        assert_eq!(record.cover_file_name(), "cover_2024타경85900.png");
    }

    #[test]
    fn cover_file_name_falls_back_when_empty() {
        let record = AuctionRecord::default();
        assert_eq!(record.cover_file_name(), "cover_auction.png");
    }

    #[test]
    fn export_name_preserves_extension() {
        let img = ProcessedImage::new("terrace.png".into(), vec![1, 2, 3]);
        assert_eq!(img.export_file_name(), "wm_terrace.png");
    }

    #[test]
    fn record_deserializes_with_missing_fields() {
        // The extraction service may omit anything it could not read.
        let json = r#"{"caseNumber": "2025타경100", "saleDate": ""}"#;
        let record: AuctionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.case_number, "2025타경100");
        assert!(record.apartment_name.is_empty());
        assert!(record.status.is_none());
    }

    #[test]
    fn record_roundtrips_camel_case() {
        let record = AuctionRecord::sample();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"minimumPercentage\""));
        let back: AuctionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
