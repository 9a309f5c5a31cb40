use eframe::egui;

use crate::components::dialogs::{self, SaveFormat};
use crate::components::preview::Preview;
use crate::io::{DEFAULT_QUALITY, encode_and_write, with_default_extension};
use crate::ops::key::{KEY_MAX, KEY_MIN};
use crate::ops::shift::Direction;
use crate::session::Session;
use crate::{log_err, log_info};

pub const WINDOW_TITLE: &str = "Image Encryption Tool";

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xf5, 0xf7, 0xfa);
const HEADING_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);
const SUBTLE_TEXT: egui::Color32 = egui::Color32::from_rgb(0x66, 0x66, 0x66);

/// The main window.
pub struct PixelShiftApp {
    session: Session,
    preview: Preview,
    key_text: String,
    /// Info line under the preview (`Format: PNG | Size: ...`).
    info_line: String,
    /// JPEG quality used when the chosen save path ends in .jpg/.jpeg.
    jpeg_quality: u8,
}

impl PixelShiftApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            session: Session::new(),
            preview: Preview::default(),
            key_text: String::new(),
            info_line: String::new(),
            jpeg_quality: DEFAULT_QUALITY,
        }
    }

    fn open_image(&mut self, ctx: &egui::Context) {
        let Some(path) = dialogs::pick_image_path() else {
            return;
        };
        match self.session.open(&path) {
            Ok(info) => {
                self.info_line = info.to_string();
                if let Some(source) = self.session.source() {
                    self.preview.set(ctx, &source.pixels);
                }
            }
            Err(e) => {
                log_err!("failed to open {}: {}", path.display(), e);
                dialogs::show_error(e.title(), &format!("Could not open {}:\n{}", path.display(), e));
            }
        }
    }

    /// Validate, transform, show the result, then offer to save it.
    fn process(&mut self, ctx: &egui::Context, direction: Direction) {
        let processed = match self.session.process(&self.key_text, direction) {
            Ok(p) => p,
            Err(e) => {
                if e.is_error() {
                    dialogs::show_error(e.title(), &e.to_string());
                } else {
                    dialogs::show_warning(e.title(), &e.to_string());
                }
                return;
            }
        };
        self.preview.set(ctx, &processed.pixels);

        let suggested = self.session.suggested_file_name();
        let Some(path) = dialogs::pick_save_path(&suggested) else {
            return;
        };
        let path = with_default_extension(path);
        let format = SaveFormat::from_path(&path);

        let Some(processed) = self.session.processed() else {
            return;
        };
        match encode_and_write(&processed.pixels, &path, format, self.jpeg_quality) {
            Ok(()) => {
                log_info!("saved {} as {}", path.display(), format.label());
                dialogs::show_info("Success", &format!("Image saved to:\n{}", path.display()));
            }
            Err(e) => {
                log_err!("failed to save {}: {}", path.display(), e);
                dialogs::show_error("Save Failed", &format!("Could not save {}:\n{}", path.display(), e));
            }
        }
    }

    fn reset(&mut self) {
        self.session.reset();
        self.preview.clear();
        self.key_text.clear();
        self.info_line.clear();
        log_info!("reset");
    }

    fn controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let enabled = self.session.can_process();
        ui.horizontal(|ui| {
            if ui.button("Open Image").clicked() {
                self.open_image(ctx);
            }
            ui.label("Key:");
            ui.add(
                egui::TextEdit::singleline(&mut self.key_text)
                    .desired_width(60.0)
                    .hint_text(format!("{}-{}", KEY_MIN, KEY_MAX)),
            );
            for direction in [Direction::Forward, Direction::Inverse] {
                if ui
                    .add_enabled(enabled, egui::Button::new(direction.label()))
                    .clicked()
                {
                    self.process(ctx, direction);
                }
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
        });
        ui.horizontal(|ui| {
            ui.label("JPEG quality:");
            ui.add(egui::Slider::new(&mut self.jpeg_quality, 1..=100));
        });
    }
}

impl eframe::App for PixelShiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND).inner_margin(15.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Simple Image Encryption Tool")
                            .size(24.0)
                            .strong()
                            .color(HEADING_COLOR),
                    );
                    ui.label(
                        egui::RichText::new(format!(
                            "Open an image, enter a key ({}-{}), then encrypt or decrypt.",
                            KEY_MIN, KEY_MAX
                        ))
                        .color(SUBTLE_TEXT),
                    );
                    ui.add_space(10.0);
                });

                self.controls(ctx, ui);
                ui.add_space(10.0);

                let preview_height = (ui.available_height() - 30.0).max(0.0);
                egui::Frame::default()
                    .fill(egui::Color32::WHITE)
                    .stroke(egui::Stroke::new(1.0, egui::Color32::GRAY))
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(ui.available_width(), preview_height));
                        self.preview.show(ui);
                    });

                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(&self.info_line).color(SUBTLE_TEXT));
                });
            });
    }
}
