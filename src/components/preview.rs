// ============================================================================
// PREVIEW — bounded thumbnail of the current image, cached as a GPU texture
// ============================================================================

use egui::{ColorImage, TextureHandle, TextureOptions};
use image::RgbImage;

/// Longest edge of the on-screen preview, in pixels.
pub const PREVIEW_SIZE: u32 = 350;

/// Size that fits `(w, h)` inside a `max`×`max` box keeping the aspect ratio.
/// Images already inside the box keep their size (never upscales).
pub fn fit_size(w: u32, h: u32, max: u32) -> (u32, u32) {
    if w <= max && h <= max {
        return (w, h);
    }
    let scale = (max as f32 / w as f32).min(max as f32 / h as f32);
    let fit_w = ((w as f32 * scale).round() as u32).clamp(1, max);
    let fit_h = ((h as f32 * scale).round() as u32).clamp(1, max);
    (fit_w, fit_h)
}

/// Downscaled copy of `source` bounded by `max` on both axes.
pub fn thumbnail(source: &RgbImage, max: u32) -> RgbImage {
    let (w, h) = source.dimensions();
    let (fit_w, fit_h) = fit_size(w, h, max);
    if (fit_w, fit_h) == (w, h) {
        return source.clone();
    }
    image::imageops::thumbnail(source, fit_w, fit_h)
}

/// Holds the texture for whatever image is on display.
#[derive(Default)]
pub struct Preview {
    texture: Option<TextureHandle>,
    size: egui::Vec2,
}

impl Preview {
    /// Replace the displayed image. The thumbnail is uploaded once here,
    /// not every frame.
    pub fn set(&mut self, ctx: &egui::Context, image: &RgbImage) {
        let thumb = thumbnail(image, PREVIEW_SIZE);
        let (w, h) = thumb.dimensions();
        let color_image = ColorImage::from_rgb([w as usize, h as usize], thumb.as_raw());
        self.texture = Some(ctx.load_texture("image_preview", color_image, TextureOptions::LINEAR));
        self.size = egui::vec2(w as f32, h as f32);
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.size = egui::Vec2::ZERO;
    }

    /// Draw the preview centred in the available space.
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            return;
        };
        ui.centered_and_justified(|ui| {
            ui.add(
                egui::Image::new(egui::load::SizedTexture::new(texture.id(), self.size))
                    .fit_to_exact_size(self.size),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_not_upscaled() {
        assert_eq!(fit_size(100, 40, PREVIEW_SIZE), (100, 40));
        assert_eq!(fit_size(350, 350, PREVIEW_SIZE), (350, 350));
    }

    #[test]
    fn large_images_fit_the_box() {
        assert_eq!(fit_size(700, 350, PREVIEW_SIZE), (350, 175));
        assert_eq!(fit_size(1000, 2000, PREVIEW_SIZE), (175, 350));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_size(10_000, 1, PREVIEW_SIZE), (350, 1));
    }

    #[test]
    fn thumbnail_matches_fit_size() {
        let img = RgbImage::new(800, 600);
        assert_eq!(thumbnail(&img, PREVIEW_SIZE).dimensions(), (350, 263));
    }
}
