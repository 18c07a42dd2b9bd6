// SPDX-License-Identifier: MIT
//
// Service layer — bridges the Dioxus UI to the gavelmark backend crates.
//
// Each service wraps one or more backend crate APIs in a way that is
// convenient for the UI to call (returns data the UI can display directly).

pub mod app_services;
pub mod data_dir;
pub mod save;
