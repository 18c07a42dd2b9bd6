// SPDX-License-Identifier: MIT
//
// Banner compositor — appends the academy's advertising strip beneath a
// source photo. The only component here with computed geometry: the band
// height scales with the image (with a floor for small photos) and the font
// size is capped by both the image width and the band height.

use ab_glyph::PxScale;
use gavelmark_core::error::Result;
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::draw;
use crate::fonts::FontStore;
use crate::loader::{self, SourceImage};

/// The advertising line drawn on every banner. Fixed; never derived from an
/// `AuctionRecord`.
pub const BANNER_TEXT: &str = "화성부동산 경매학원 010-8213-6711";

/// Band height as a fraction of the source height.
pub const BANNER_RATIO: f32 = 0.12;
/// Band height floor in pixels, so tiny photos still get a legible strip.
pub const BANNER_MIN_PX: u32 = 60;
/// Font size cap as a fraction of the image width (tames panoramic inputs).
pub const FONT_WIDTH_RATIO: f32 = 0.06;
/// Font size cap as a fraction of the band height (tames tall narrow inputs).
pub const FONT_BAND_RATIO: f32 = 0.5;
/// JPEG quality for the encoded output.
pub const JPEG_QUALITY: u8 = 90;

/// Gold band: the standard high-visibility pairing with black text.
pub const BANNER_FILL: Rgba<u8> = Rgba([0xFF, 0xD7, 0x00, 0xFF]);
pub const BANNER_TEXT_COLOR: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);

/// Band height in pixels for a source of the given height.
///
/// The fractional term truncates to whole pixels before the floor applies,
/// so the output raster height is always `source_height + banner_height`.
pub fn banner_height(source_height: u32) -> u32 {
    ((source_height as f32 * BANNER_RATIO) as u32).max(BANNER_MIN_PX)
}

/// Font size for the banner text: capped by both the image width and the
/// band height, whichever is smaller.
pub fn banner_font_size(source_width: u32, banner_px: u32) -> f32 {
    (source_width as f32 * FONT_WIDTH_RATIO).min(banner_px as f32 * FONT_BAND_RATIO)
}

/// Stateless compositor for the batch watermark flow.
pub struct BannerCompositor;

impl BannerCompositor {
    /// Composite the banner beneath `source` and return the raw raster.
    ///
    /// The source is drawn unchanged at the top; the band fills the strip
    /// from the source's bottom edge to the new bottom edge, with the
    /// advertising line centered inside it.
    #[instrument(skip_all, fields(width = source.width(), height = source.height()))]
    pub fn compose_raster(source: &SourceImage, fonts: &FontStore) -> RgbaImage {
        let (w, h) = (source.width(), source.height());
        let band = banner_height(h);
        let font_px = banner_font_size(w, band);
        debug!(band, font_px, "banner geometry computed");

        let mut out = RgbaImage::new(w, h + band);
        image::imageops::replace(&mut out, &source.to_rgba8(), 0, 0);

        draw::fill_rect(&mut out, BANNER_FILL, 0, h as i32, w, band);
        draw::draw_text_centered(
            &mut out,
            BANNER_TEXT_COLOR,
            (w / 2) as i32,
            (h + band / 2) as i32,
            PxScale::from(font_px),
            fonts.bold(),
            BANNER_TEXT,
        );
        out
    }

    /// Composite and encode to JPEG at the fixed quality.
    pub fn compose(source: &SourceImage, fonts: &FontStore) -> Result<Vec<u8>> {
        let raster = Self::compose_raster(source, fonts);
        loader::encode_jpeg(&image::DynamicImage::ImageRgba8(raster), JPEG_QUALITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn flat(w: u32, h: u32) -> SourceImage {
        SourceImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            w,
            h,
            Rgba([80, 120, 160, 255]),
        )))
    }

    #[test]
    fn band_scales_with_large_images() {
        // 0.12 * 1000 = 120, above the floor.
        assert_eq!(banner_height(1000), 120);
    }

    #[test]
    fn band_floor_applies_to_small_images() {
        // 0.12 * 100 = 12, floored to 60.
        assert_eq!(banner_height(100), 60);
        assert_eq!(banner_height(0), 60);
        assert_eq!(banner_height(1), 60);
    }

    #[test]
    fn band_height_is_monotonic() {
        let mut last = 0;
        for h in (0..4000).step_by(7) {
            let band = banner_height(h);
            assert!(band >= last, "height {h} regressed: {band} < {last}");
            last = band;
        }
    }

    #[test]
    fn font_size_for_square_images() {
        // 1000x1000: min(60, 60) = 60.
        assert_eq!(banner_font_size(1000, banner_height(1000)), 60.0);
        // 100x100: min(6, 30) = 6.
        assert_eq!(banner_font_size(100, banner_height(100)), 6.0);
    }

    #[test]
    fn wide_images_cap_font_by_band() {
        // 4000 wide, 100 tall: width term would give 240 but the 60px band caps at 30.
        assert_eq!(banner_font_size(4000, banner_height(100)), 30.0);
    }

    #[test]
    fn narrow_images_cap_font_by_width() {
        // 50 wide, 2000 tall: band term would give 120 but the width caps at 3.
        assert_eq!(banner_font_size(50, banner_height(2000)), 3.0);
    }

    #[test]
    fn composited_raster_has_expected_dimensions() {
        let Ok(fonts) = FontStore::discover() else {
            return; // host has no fonts installed
        };
        let out = BannerCompositor::compose_raster(&flat(1000, 1000), &fonts);
        assert_eq!(out.width(), 1000);
        assert_eq!(out.height(), 1120);

        let out = BannerCompositor::compose_raster(&flat(100, 100), &fonts);
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 160);
    }

    #[test]
    fn source_pixels_survive_unchanged() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let out = BannerCompositor::compose_raster(&flat(64, 64), &fonts);
        assert_eq!(*out.get_pixel(0, 0), Rgba([80, 120, 160, 255]));
        assert_eq!(*out.get_pixel(63, 63), Rgba([80, 120, 160, 255]));
    }

    #[test]
    fn band_edges_are_banner_fill() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let out = BannerCompositor::compose_raster(&flat(200, 200), &fonts);
        // Top corners of the band are clear of text regardless of font.
        assert_eq!(*out.get_pixel(0, 200), BANNER_FILL);
        assert_eq!(*out.get_pixel(199, 259), BANNER_FILL);
    }

    #[test]
    fn recompositing_appends_a_second_band() {
        // Re-running the compositor on its own output is not detected; the
        // result simply grows by another band.
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let first = BannerCompositor::compose(&flat(500, 500), &fonts).unwrap();
        let second_src = SourceImage::from_bytes(&first).unwrap();
        assert_eq!(second_src.height(), 560);
        let second = BannerCompositor::compose_raster(&second_src, &fonts);
        assert_eq!(second.height(), 560 + banner_height(560));
    }

    #[test]
    fn encoded_output_is_jpeg() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let bytes = BannerCompositor::compose(&flat(32, 32), &fonts).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
