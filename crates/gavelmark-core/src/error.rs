// SPDX-License-Identifier: MIT
//
// Unified error types for Gavelmark.

use thiserror::Error;

/// Top-level error type for all Gavelmark operations.
#[derive(Debug, Error)]
pub enum GavelmarkError {
    // -- Imaging errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("no usable font found: {0}")]
    FontUnavailable(String),

    // -- Field extraction --
    #[error("extraction credential missing (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("field extraction failed: {0}")]
    Extraction(String),

    // -- Saving / persistence --
    #[error("save failed: {0}")]
    Save(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GavelmarkError>;
