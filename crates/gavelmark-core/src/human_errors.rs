// SPDX-License-Identifier: MIT
//
// Human-readable error messages for the single user-facing alert.
//
// Gavelmark never retries automatically and has no per-item recovery UI, so
// the mapping is deliberately coarse: one plain-language message and one
// suggestion per error family.

use crate::error::GavelmarkError;

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain-language summary (shown as the alert heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
}

/// Convert a `GavelmarkError` into something the alert can display.
pub fn humanize_error(err: &GavelmarkError) -> HumanError {
    match err {
        GavelmarkError::ImageDecode(_) => HumanError {
            message: "This photo couldn't be opened.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
        },

        GavelmarkError::ImageEncode(_) | GavelmarkError::Render(_) => HumanError {
            message: "The image couldn't be created.".into(),
            suggestion: "Try again with a different photo. If this keeps happening, please report it.".into(),
        },

        GavelmarkError::FontUnavailable(_) => HumanError {
            message: "No usable font was found on this computer.".into(),
            suggestion: "Install a sans-serif font with Korean support (e.g. Noto Sans KR), or point GAVELMARK_FONT at a .ttf file.".into(),
        },

        GavelmarkError::MissingCredential => HumanError {
            message: "Automatic field extraction isn't set up.".into(),
            suggestion: "Set the GEMINI_API_KEY environment variable and restart the app, or fill the fields in by hand.".into(),
        },

        GavelmarkError::Extraction(_) => HumanError {
            message: "Reading the listing from the image didn't work.".into(),
            suggestion: "Check your network connection and try again, or fill the fields in by hand.".into(),
        },

        GavelmarkError::Save(_) => HumanError {
            message: "The image couldn't be saved.".into(),
            suggestion: "Check that the chosen folder is writable and there is space left on the disk.".into(),
        },

        GavelmarkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                }
            }
        }

        GavelmarkError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
        },
    }
}
