// SPDX-License-Identifier: MIT
//
// Small drawing helpers shared by the banner compositor and cover renderer.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Advance width of `text` at `scale`, in pixels.
pub fn text_width(font: &FontVec, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut prev: Option<ab_glyph::GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Fill an axis-aligned rectangle. Zero-sized rectangles are ignored.
pub fn fill_rect(img: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, w: u32, h: u32) {
    if w == 0 || h == 0 {
        return;
    }
    draw_filled_rect_mut(img, Rect::at(x, y).of_size(w, h), color);
}

/// Fill a pill shape (rectangle with fully rounded ends), the label chip used
/// in the cover's detail rows.
pub fn fill_pill(img: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, w: u32, h: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let r = (h / 2) as i32;
    if w as i32 > 2 * r {
        draw_filled_rect_mut(
            img,
            Rect::at(x + r, y).of_size(w - 2 * r as u32, h),
            color,
        );
    }
    let cy = y + r;
    draw_filled_circle_mut(img, (x + r, cy), r, color);
    draw_filled_circle_mut(img, (x + w as i32 - r, cy), r, color);
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(
    img: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Draw `text` centered on (cx, cy), both axes.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    color: Rgba<u8>,
    cx: i32,
    cy: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    let (tw, th) = text_size(scale, font, text);
    let x = cx - (tw as i32) / 2;
    let y = cy - (th as i32) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Draw `text` centered horizontally on cx with its top at y, blended at the
/// given opacity. Used for the translucent watermark caption over the photo.
pub fn draw_text_alpha(
    img: &mut RgbaImage,
    color: Rgba<u8>,
    opacity: f32,
    cx: i32,
    top: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    let scaled = font.as_scaled(scale);
    let total = text_width(font, scale, text);
    let mut caret = cx as f32 - total / 2.0;
    let baseline = top as f32 + scaled.ascent();

    let mut prev: Option<ab_glyph::GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                    return;
                }
                let a = (coverage * opacity).clamp(0.0, 1.0);
                if a <= 0.0 {
                    return;
                }
                let dst = img.get_pixel_mut(px as u32, py as u32);
                let inv = 1.0 - a;
                dst.0[0] = (color.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
                dst.0[3] = 255;
            });
        }
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([220, 38, 38, 255]);

    #[test]
    fn fill_rect_covers_exact_region() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        fill_rect(&mut img, RED, 5, 5, 10, 10);
        assert_eq!(*img.get_pixel(5, 5), RED);
        assert_eq!(*img.get_pixel(14, 14), RED);
        assert_eq!(*img.get_pixel(4, 4), WHITE);
        assert_eq!(*img.get_pixel(15, 15), WHITE);
    }

    #[test]
    fn fill_rect_ignores_empty() {
        let mut img = RgbaImage::from_pixel(4, 4, WHITE);
        fill_rect(&mut img, RED, 1, 1, 0, 3);
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn fill_pill_fills_centre_and_rounds_corners() {
        let mut img = RgbaImage::from_pixel(60, 20, WHITE);
        fill_pill(&mut img, RED, 0, 0, 60, 20);
        // Centre is solid.
        assert_eq!(*img.get_pixel(30, 10), RED);
        // The extreme corner stays outside the rounded end.
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }
}
