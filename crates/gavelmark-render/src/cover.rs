// SPDX-License-Identifier: MIT
//
// Cover renderer — rasterizes the fixed marketing template: centered title
// block, square photo region with a translucent caption, six labeled detail
// rows, and a disclaimer line. Layout is specified in 900-unit base
// coordinates and rendered at a fixed 2x scale on a white background.

use ab_glyph::PxScale;
use gavelmark_core::error::Result;
use gavelmark_core::types::AuctionRecord;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use crate::draw;
use crate::fonts::FontStore;
use crate::loader::{self, SourceImage};

/// Template width in base units; the raster is twice this.
pub const BASE_WIDTH: u32 = 900;
/// Template height in base units.
pub const BASE_HEIGHT: u32 = 660;
/// Fixed rasterization scale.
pub const SCALE: u32 = 2;

const INSTITUTION: &str = "화성부동산경매학원";
const ADDRESS_PREFIX: &str = "도로명 주소 - ";
const TITLE_PLACEHOLDER: &str = "아파트명 입력";
const ADDRESS_PLACEHOLDER: &str = "주소 입력";
const PHOTO_PLACEHOLDER: &str = "이미지 없음";
const DISCLAIMER: &str = "* 경매절차상 기일변경, 취하, 기각이 될 수 있습니다.";

const ROW_LABELS: [&str; 6] = [
    "사건번호",
    "매각기일",
    "감정가",
    "최저가",
    "대지면적",
    "건물면적",
];

// Template palette.
const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
const GRAY_900: Rgba<u8> = Rgba([0x11, 0x18, 0x27, 0xFF]);
const GRAY_800: Rgba<u8> = Rgba([0x1F, 0x29, 0x37, 0xFF]);
const GRAY_600: Rgba<u8> = Rgba([0x4B, 0x55, 0x63, 0xFF]);
const GRAY_500: Rgba<u8> = Rgba([0x6B, 0x72, 0x80, 0xFF]);
const GRAY_400: Rgba<u8> = Rgba([0x9C, 0xA3, 0xAF, 0xFF]);
const GRAY_100: Rgba<u8> = Rgba([0xF3, 0xF4, 0xF6, 0xFF]);
const WARNING_RED: Rgba<u8> = Rgba([0xDC, 0x26, 0x26, 0xFF]);
const ACCENT_BLUE: Rgba<u8> = Rgba([0x25, 0x63, 0xEB, 0xFF]);

// Base-unit layout.
const PHOTO_X: u32 = 32;
const PHOTO_Y: u32 = 150;
const PHOTO_SIZE: u32 = 420;
const ROWS_X: u32 = 484;
const ROW_SLOT_H: u32 = 70;
const PILL_W: u32 = 130;
const PILL_H: u32 = 44;
const VALUE_X: u32 = ROWS_X + PILL_W + 20;

/// The minimum-price percentage shown on the cover; "70%" when the field is
/// left empty.
pub fn minimum_percentage_display(record: &AuctionRecord) -> &str {
    if record.minimum_percentage.is_empty() {
        "70%"
    } else {
        record.minimum_percentage.as_str()
    }
}

/// Full minimum-price row text, e.g. "378,000,000 (70%)".
pub fn minimum_price_line(record: &AuctionRecord) -> String {
    format!(
        "{} ({})",
        record.minimum_price,
        minimum_percentage_display(record)
    )
}

/// Full appraisal row text; the suffix is always "(100%)".
pub fn appraisal_line(record: &AuctionRecord) -> String {
    format!("{} (100%)", record.appraisal_value)
}

/// Stateless renderer for the cover template.
pub struct CoverRenderer;

impl CoverRenderer {
    /// Render the template to a raster. All field values are drawn verbatim;
    /// absent photo gets the placeholder region.
    #[instrument(skip_all, fields(has_photo = photo.is_some()))]
    pub fn render(
        record: &AuctionRecord,
        photo: Option<&SourceImage>,
        fonts: &FontStore,
    ) -> RgbaImage {
        let s = |v: u32| v * SCALE;
        let font = fonts.bold();
        let px = |size: u32| PxScale::from((size * SCALE) as f32);

        let mut img = RgbaImage::from_pixel(s(BASE_WIDTH), s(BASE_HEIGHT), WHITE);
        let cx = s(BASE_WIDTH / 2) as i32;

        // -- Title block ------------------------------------------------------
        let name = if record.apartment_name.is_empty() {
            TITLE_PLACEHOLDER
        } else {
            record.apartment_name.as_str()
        };
        let name_w = draw::text_width(font, px(36), name);
        let label_w = draw::text_width(font, px(20), INSTITUTION);
        let gap = s(16) as f32;
        let title_x = cx as f32 - (name_w + gap + label_w) / 2.0;
        draw::draw_text(&mut img, GRAY_900, title_x as i32, s(40) as i32, px(36), font, name);
        // Institution label sits on the name's baseline.
        draw::draw_text(
            &mut img,
            GRAY_500,
            (title_x + name_w + gap) as i32,
            s(40 + 36 - 20 - 2) as i32,
            px(20),
            font,
            INSTITUTION,
        );

        let address = if record.address.is_empty() {
            ADDRESS_PLACEHOLDER
        } else {
            record.address.as_str()
        };
        let address_line = format!("{ADDRESS_PREFIX}{address}");
        draw::draw_text_centered(
            &mut img,
            GRAY_600,
            cx,
            s(92 + 10) as i32,
            px(20),
            font,
            &address_line,
        );

        // -- Photo region -----------------------------------------------------
        let (photo_x, photo_y) = (s(PHOTO_X) as i32, s(PHOTO_Y) as i32);
        let photo_px = s(PHOTO_SIZE);
        match photo {
            Some(source) => {
                let squared = squared_photo(source, photo_px);
                image::imageops::replace(&mut img, &squared, photo_x as i64, photo_y as i64);
            }
            None => {
                draw::fill_rect(&mut img, GRAY_100, photo_x, photo_y, photo_px, photo_px);
                placeholder_glyph(&mut img, photo_x, photo_y, photo_px);
                draw::draw_text_centered(
                    &mut img,
                    GRAY_400,
                    photo_x + (photo_px / 2) as i32,
                    photo_y + (photo_px * 2 / 3) as i32,
                    px(24),
                    font,
                    PHOTO_PLACEHOLDER,
                );
            }
        }
        // Translucent caption near the top of the photo region.
        draw::draw_text_alpha(
            &mut img,
            WHITE,
            0.9,
            photo_x + (photo_px / 2) as i32,
            photo_y + s(24) as i32,
            px(20),
            font,
            INSTITUTION,
        );

        // -- Detail rows ------------------------------------------------------
        let rows: [(String, u32, Rgba<u8>); 6] = [
            (record.case_number.clone(), 30, GRAY_800),
            (record.sale_date.clone(), 36, WARNING_RED),
            (record.appraisal_value.clone(), 30, GRAY_800),
            (minimum_price_line(record), 36, WARNING_RED),
            (record.land_area.clone(), 24, GRAY_800),
            (record.building_area.clone(), 24, ACCENT_BLUE),
        ];

        for (i, (value, size, color)) in rows.iter().enumerate() {
            let slot_top = PHOTO_Y + i as u32 * ROW_SLOT_H;
            let pill_y = s(slot_top + (ROW_SLOT_H - PILL_H) / 2) as i32;
            draw::fill_pill(&mut img, GRAY_600, s(ROWS_X) as i32, pill_y, s(PILL_W), s(PILL_H));
            draw::draw_text_centered(
                &mut img,
                WHITE,
                s(ROWS_X + PILL_W / 2) as i32,
                pill_y + (s(PILL_H) / 2) as i32,
                px(20),
                font,
                ROW_LABELS[i],
            );

            let value_y = s(slot_top + (ROW_SLOT_H - size) / 2) as i32;
            draw::draw_text(&mut img, *color, s(VALUE_X) as i32, value_y, px(*size), font, value);

            // The appraisal row carries its fixed "(100%)" suffix in a
            // smaller, muted run.
            if i == 2 {
                let main_w = draw::text_width(font, px(30), value);
                draw::draw_text(
                    &mut img,
                    GRAY_400,
                    s(VALUE_X) as i32 + main_w as i32 + s(8) as i32,
                    value_y + s(30 - 20) as i32,
                    px(20),
                    font,
                    "(100%)",
                );
            }
        }

        // -- Disclaimer -------------------------------------------------------
        draw::draw_text_centered(
            &mut img,
            GRAY_800,
            cx,
            s(PHOTO_Y + PHOTO_SIZE + 46) as i32,
            px(20),
            font,
            DISCLAIMER,
        );

        debug!(width = img.width(), height = img.height(), "cover rendered");
        img
    }

    /// Render and encode to PNG.
    pub fn render_png(
        record: &AuctionRecord,
        photo: Option<&SourceImage>,
        fonts: &FontStore,
    ) -> Result<Vec<u8>> {
        let raster = Self::render(record, photo, fonts);
        loader::encode_png(&image::DynamicImage::ImageRgba8(raster))
    }
}

/// Center-crop the photo to a square and resize it to `size`, compositing
/// any transparency on white first.
fn squared_photo(source: &SourceImage, size: u32) -> RgbaImage {
    let mut rgba = source.to_rgba8();
    for p in rgba.pixels_mut() {
        if p.0[3] < 255 {
            let a = p.0[3] as f32 / 255.0;
            let inv = 1.0 - a;
            p.0[0] = (p.0[0] as f32 * a + 255.0 * inv) as u8;
            p.0[1] = (p.0[1] as f32 * a + 255.0 * inv) as u8;
            p.0[2] = (p.0[2] as f32 * a + 255.0 * inv) as u8;
            p.0[3] = 255;
        }
    }

    let min_dim = rgba.width().min(rgba.height()).max(1);
    let left = (rgba.width() - min_dim) / 2;
    let top = (rgba.height() - min_dim) / 2;
    let cropped = image::imageops::crop(&mut rgba, left, top, min_dim, min_dim).to_image();
    image::imageops::resize(&cropped, size, size, image::imageops::FilterType::Lanczos3)
}

/// Simple framed-picture glyph for the empty photo region.
fn placeholder_glyph(img: &mut RgbaImage, x: i32, y: i32, region: u32) {
    let frame = region / 5;
    let fx = x + (region / 2 - frame / 2) as i32;
    let fy = y + (region / 3 - frame / 2) as i32;
    draw_hollow_rect_mut(img, Rect::at(fx, fy).of_size(frame, frame), GRAY_400);
    imageproc::drawing::draw_filled_circle_mut(
        img,
        (fx + (frame / 3) as i32, fy + (frame / 3) as i32),
        (frame / 10) as i32,
        GRAY_400,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    #[test]
    fn minimum_percentage_defaults_when_empty() {
        let record = AuctionRecord::default();
        assert_eq!(minimum_percentage_display(&record), "70%");
        assert_eq!(minimum_price_line(&record), " (70%)");
    }

    #[test]
    fn minimum_percentage_renders_verbatim() {
        let mut record = AuctionRecord::default();
        record.minimum_price = "350,000,000".into();
        record.minimum_percentage = "49%".into();
        assert_eq!(minimum_price_line(&record), "350,000,000 (49%)");
    }

    #[test]
    fn sample_record_rows_match_expected_lines() {
        let record = AuctionRecord::sample();
        assert_eq!(minimum_price_line(&record), "378,000,000 (70%)");
        assert_eq!(appraisal_line(&record), "540,000,000 (100%)");
    }

    #[test]
    fn appraisal_suffix_is_fixed() {
        let record = AuctionRecord::default();
        assert_eq!(appraisal_line(&record), " (100%)");
    }

    #[test]
    fn rendered_cover_has_fixed_dimensions() {
        let Ok(fonts) = FontStore::discover() else {
            return; // host has no fonts installed
        };
        let img = CoverRenderer::render(&AuctionRecord::sample(), None, &fonts);
        assert_eq!(img.width(), BASE_WIDTH * SCALE);
        assert_eq!(img.height(), BASE_HEIGHT * SCALE);
        // White background outside the template content.
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn empty_record_still_renders() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let img = CoverRenderer::render(&AuctionRecord::default(), None, &fonts);
        // Placeholder photo region is filled with the light gray.
        let px = *img.get_pixel(PHOTO_X * SCALE + 4, (PHOTO_Y + PHOTO_SIZE - 4) * SCALE);
        assert_eq!(px, GRAY_100);
    }

    #[test]
    fn photo_is_composited_into_the_square_region() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let photo = SourceImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            300,
            200,
            Rgba([10, 200, 10, 255]),
        )));
        let img = CoverRenderer::render(&AuctionRecord::sample(), Some(&photo), &fonts);
        // Sample the middle of the photo region.
        let px = *img.get_pixel((PHOTO_X + PHOTO_SIZE / 2) * SCALE, (PHOTO_Y + PHOTO_SIZE / 2) * SCALE);
        assert_eq!(px, Rgba([10, 200, 10, 255]));
    }

    #[test]
    fn cover_png_encodes() {
        let Ok(fonts) = FontStore::discover() else {
            return;
        };
        let bytes = CoverRenderer::render_png(&AuctionRecord::sample(), None, &fonts).unwrap();
        // PNG magic.
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}
