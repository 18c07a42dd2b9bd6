// SPDX-License-Identifier: MIT
//
// gavelmark-render — Raster operations for the Gavelmark toolkit.
//
// Provides image loading/encoding, the advertising-banner compositor for the
// batch watermark flow, the fixed-template auction cover renderer, and
// system font discovery.

pub mod banner;
pub mod cover;
mod draw;
pub mod fonts;
pub mod loader;

// Re-export the primary structs so callers can use `gavelmark_render::SourceImage` etc.
pub use banner::BannerCompositor;
pub use cover::CoverRenderer;
pub use fonts::FontStore;
pub use loader::SourceImage;
