// ============================================================================
// DIALOGS — save format choice and native message boxes
// ============================================================================

use std::path::Path;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

/// Extensions offered in the open dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

// ============================================================================
// IMAGE FORMAT ENUM
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaveFormat::Png => "PNG",
            SaveFormat::Jpeg => "JPEG",
            SaveFormat::Bmp => "Bitmap",
        }
    }

    /// Extensions listed for this format in the save dialog filter.
    pub fn filter_extensions(&self) -> &'static [&'static str] {
        match self {
            SaveFormat::Png => &["png"],
            SaveFormat::Jpeg => &["jpg", "jpeg"],
            SaveFormat::Bmp => &["bmp"],
        }
    }

    pub fn supports_quality(&self) -> bool {
        matches!(self, SaveFormat::Jpeg)
    }

    /// Parse a `--format` style name. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpeg" | "jpg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            _ => None,
        }
    }

    /// Infer the format from a path's extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_name)
            .unwrap_or_default()
    }

    pub fn all() -> &'static [SaveFormat] {
        &[SaveFormat::Png, SaveFormat::Jpeg, SaveFormat::Bmp]
    }
}

// ============================================================================
// NATIVE DIALOGS
// ============================================================================

/// Ask the user for an image to open.
pub fn pick_image_path() -> Option<std::path::PathBuf> {
    FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Image files", OPEN_EXTENSIONS)
        .pick_file()
}

/// Ask the user where to save, PNG first. `suggested` pre-fills the file name.
pub fn pick_save_path(suggested: &str) -> Option<std::path::PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Image As")
        .set_file_name(suggested);
    for format in SaveFormat::all() {
        dialog = dialog.add_filter(format.label(), format.filter_extensions());
    }
    dialog.save_file()
}

pub fn show_info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

pub fn show_warning(title: &str, message: &str) {
    show(MessageLevel::Warning, title, message);
}

pub fn show_error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
