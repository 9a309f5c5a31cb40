use std::path::Path;

use image::{ImageError, RgbImage};

use crate::io::{ImageInfo, LoadedImage, load_rgb};
use crate::ops::key::{KeyError, parse_key};
use crate::ops::shift::{Direction, shift_image};
use crate::{log_info, log_warn};

/// Why a process request was refused.
#[derive(Debug)]
pub enum ProcessError {
    InvalidKey(KeyError),
    NoImage,
    Image(ImageError),
}

impl ProcessError {
    /// Dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            ProcessError::InvalidKey(e) => e.title(),
            ProcessError::NoImage => "No Image",
            ProcessError::Image(_) => "Image Error",
        }
    }

    /// Unreadable key text and file failures are errors; the rest are
    /// warnings the user can fix by opening a file or choosing a key.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ProcessError::InvalidKey(KeyError::NotAnInteger(_)) | ProcessError::Image(_)
        )
    }
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::InvalidKey(e) => write!(f, "{}", e),
            ProcessError::NoImage => write!(f, "Please open an image first."),
            ProcessError::Image(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessError {}

impl From<KeyError> for ProcessError {
    fn from(e: KeyError) -> Self {
        ProcessError::InvalidKey(e)
    }
}

impl From<ImageError> for ProcessError {
    fn from(e: ImageError) -> Self {
        ProcessError::Image(e)
    }
}

/// Output of the last successful encrypt/decrypt.
#[derive(Clone, Debug)]
pub struct Processed {
    pub pixels: RgbImage,
    pub key: i64,
    pub direction: Direction,
}

/// Everything the window knows about: the opened file and the last result.
#[derive(Default)]
pub struct Session {
    source: Option<LoadedImage>,
    processed: Option<Processed>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, replacing whatever was open. On failure the session is
    /// left as it was.
    pub fn open(&mut self, path: &Path) -> Result<&ImageInfo, ProcessError> {
        let loaded = load_rgb(path)?;
        log_info!("opened {} ({})", path.display(), loaded.info);
        self.processed = None;
        Ok(&self.source.insert(loaded).info)
    }

    /// Install an already-decoded image.
    pub fn set_source(&mut self, loaded: LoadedImage) {
        self.processed = None;
        self.source = Some(loaded);
    }

    /// Encrypt or decrypt the opened image with the key typed in `key_text`.
    ///
    /// The key is checked before the image so a bad key is reported even
    /// when nothing is open. The opened image is never overwritten; each
    /// call starts from the original file.
    pub fn process(
        &mut self,
        key_text: &str,
        direction: Direction,
    ) -> Result<&Processed, ProcessError> {
        let key = parse_key(key_text).inspect_err(|e| {
            log_warn!("rejected key {:?}: {}", key_text, e);
        })?;
        let source = self.source.as_ref().ok_or(ProcessError::NoImage)?;

        let pixels = shift_image(&source.pixels, key, direction);
        log_info!(
            "{} {} with key {}",
            direction.past_tense(),
            source.path.display(),
            key
        );
        Ok(self.processed.insert(Processed {
            pixels,
            key,
            direction,
        }))
    }

    /// Forget the opened image and any result.
    pub fn reset(&mut self) {
        self.source = None;
        self.processed = None;
    }

    /// Encrypt/Decrypt are only offered once an image is open.
    pub fn can_process(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&LoadedImage> {
        self.source.as_ref()
    }

    pub fn processed(&self) -> Option<&Processed> {
        self.processed.as_ref()
    }

    pub fn info(&self) -> Option<&ImageInfo> {
        self.source.as_ref().map(|s| &s.info)
    }

    /// File name offered in the save dialog, e.g. `photo_encrypted.png`.
    pub fn suggested_file_name(&self) -> String {
        let stem = self
            .source
            .as_ref()
            .and_then(|s| s.path.file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let suffix = self
            .processed
            .as_ref()
            .map(|p| p.direction.past_tense())
            .unwrap_or("output");
        format!("{}_{}.png", stem, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::PathBuf;

    fn loaded() -> LoadedImage {
        let mut pixels = RgbImage::new(2, 1);
        pixels.put_pixel(0, 0, Rgb([10, 20, 30]));
        pixels.put_pixel(1, 0, Rgb([250, 5, 0]));
        LoadedImage {
            info: ImageInfo {
                format: Some(image::ImageFormat::Png),
                width: 2,
                height: 1,
            },
            pixels,
            path: PathBuf::from("photo.png"),
        }
    }

    #[test]
    fn process_requires_an_image() {
        let mut session = Session::new();
        assert!(!session.can_process());
        assert!(matches!(
            session.process("10", Direction::Forward),
            Err(ProcessError::NoImage)
        ));
    }

    #[test]
    fn bad_key_is_reported_before_missing_image() {
        let mut session = Session::new();
        assert!(matches!(
            session.process("abc", Direction::Forward),
            Err(ProcessError::InvalidKey(KeyError::NotAnInteger(_)))
        ));
    }

    #[test]
    fn rejected_keys_leave_session_unchanged() {
        let mut session = Session::new();
        session.set_source(loaded());
        for text in ["0", "-5"] {
            let err = session.process(text, Direction::Forward).unwrap_err();
            assert!(matches!(err, ProcessError::InvalidKey(KeyError::NotPositive(_))));
            assert!(session.processed().is_none());
            assert_eq!(session.source().unwrap().pixels, loaded().pixels);
        }
    }

    #[test]
    fn encrypt_then_decrypt_both_start_from_source() {
        let mut session = Session::new();
        session.set_source(loaded());

        let encrypted = session.process("10", Direction::Forward).unwrap();
        assert_eq!(encrypted.pixels.get_pixel(1, 0), &Rgb([4, 15, 10]));

        // Decrypt operates on the opened file, not on the encrypted output.
        let decrypted = session.process("10", Direction::Inverse).unwrap();
        assert_eq!(decrypted.pixels.get_pixel(0, 0), &Rgb([0, 10, 20]));
        assert_eq!(session.source().unwrap().pixels, loaded().pixels);
    }

    #[test]
    fn dialog_level_follows_the_failure() {
        let mut session = Session::new();
        assert!(session.process("ten", Direction::Forward).unwrap_err().is_error());
        assert!(!session.process("-5", Direction::Forward).unwrap_err().is_error());
        assert!(!session.process("5", Direction::Forward).unwrap_err().is_error());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.set_source(loaded());
        session.process("3", Direction::Forward).unwrap();
        session.reset();
        assert!(!session.can_process());
        assert!(session.processed().is_none());
        assert!(session.info().is_none());
    }

    #[test]
    fn suggested_name_tracks_direction() {
        let mut session = Session::new();
        session.set_source(loaded());
        assert_eq!(session.suggested_file_name(), "photo_output.png");
        session.process("1", Direction::Inverse).unwrap();
        assert_eq!(session.suggested_file_name(), "photo_decrypted.png");
    }

    #[test]
    fn failed_open_keeps_previous_image() {
        let mut session = Session::new();
        session.set_source(loaded());
        let missing = std::env::temp_dir().join("pixelshift_session_missing.png");
        assert!(matches!(session.open(&missing), Err(ProcessError::Image(_))));
        assert!(session.can_process());
    }
}
