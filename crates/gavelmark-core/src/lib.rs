// SPDX-License-Identifier: MIT
//
// Gavelmark — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::AppConfig;
pub use error::GavelmarkError;
pub use types::*;
