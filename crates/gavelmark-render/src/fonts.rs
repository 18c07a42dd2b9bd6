// SPDX-License-Identifier: MIT
//
// System font discovery. Both compositors need a bold sans face with Korean
// coverage; this resolves one via fontdb, preferring Noto Sans KR (the face
// the original artwork was designed against) and falling back to whatever
// bold sans-serif the host offers.

use ab_glyph::FontVec;
use gavelmark_core::error::{GavelmarkError, Result};
use tracing::{debug, info};

/// Environment variable naming an explicit .ttf/.otf to use instead of
/// system discovery.
pub const FONT_ENV_VAR: &str = "GAVELMARK_FONT";

const PREFERRED_FAMILY: &str = "Noto Sans KR";

/// A resolved bold sans face, ready for glyph rasterization.
#[derive(Debug)]
pub struct FontStore {
    bold: FontVec,
}

impl FontStore {
    /// Resolve a font: the `GAVELMARK_FONT` override if set, otherwise the
    /// best bold sans face installed on the system.
    pub fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var(FONT_ENV_VAR) {
            return Self::from_file(&path);
        }
        Self::from_system()
    }

    /// Load a specific font file.
    pub fn from_file(path: &str) -> Result<Self> {
        let data = std::fs::read(path).map_err(|err| {
            GavelmarkError::FontUnavailable(format!("cannot read {path}: {err}"))
        })?;
        let bold = FontVec::try_from_vec(data).map_err(|err| {
            GavelmarkError::FontUnavailable(format!("{path} is not a usable font: {err}"))
        })?;
        info!(path, "font loaded from explicit path");
        Ok(Self { bold })
    }

    /// Query the system font database for a bold sans face.
    pub fn from_system() -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "system fonts enumerated");

        let query = fontdb::Query {
            families: &[
                fontdb::Family::Name(PREFERRED_FAMILY),
                fontdb::Family::SansSerif,
            ],
            weight: fontdb::Weight::BOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| {
                // Some hosts ship no bold variant at all; take any sans face.
                db.query(&fontdb::Query {
                    families: &[fontdb::Family::SansSerif],
                    weight: fontdb::Weight::NORMAL,
                    stretch: fontdb::Stretch::Normal,
                    style: fontdb::Style::Normal,
                })
            })
            .ok_or_else(|| {
                GavelmarkError::FontUnavailable("no sans-serif face installed".into())
            })?;

        let face = db.face(id).ok_or_else(|| {
            GavelmarkError::FontUnavailable("font database returned a stale face id".into())
        })?;
        let index = face.index;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();

        let data = match &face.source {
            fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
            fontdb::Source::File(path) => std::fs::read(path).map_err(|err| {
                GavelmarkError::FontUnavailable(format!(
                    "cannot read {}: {err}",
                    path.display()
                ))
            })?,
            _ => {
                return Err(GavelmarkError::FontUnavailable(
                    "unsupported font source".into(),
                ));
            }
        };

        let bold = FontVec::try_from_vec_and_index(data, index).map_err(|err| {
            GavelmarkError::FontUnavailable(format!("failed to parse {family}: {err}"))
        })?;
        info!(family, "font resolved from system");
        Ok(Self { bold })
    }

    /// The bold face used for all drawn text.
    pub fn bold(&self) -> &FontVec {
        &self.bold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_rejects_non_font_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = FontStore::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, GavelmarkError::FontUnavailable(_)));
    }

    #[test]
    fn from_file_rejects_missing_path() {
        let err = FontStore::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, GavelmarkError::FontUnavailable(_)));
    }

    // System discovery depends on the host; only assert it doesn't panic.
    #[test]
    fn from_system_does_not_panic() {
        let _ = FontStore::from_system();
    }
}
