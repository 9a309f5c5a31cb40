use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Generates an RGB checkerboard whose dark cells sit near 0 and light
/// cells near 255, so any shift wraps on some channels.
pub fn checkerboard_rgb(width: u32, height: u32, cell: u32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    RgbImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            Rgb([3, 250, 128])
        } else {
            Rgb([252, 1, (x % 256) as u8])
        }
    })
}

/// Per-test directory under the system temp dir, removed with everything in
/// it when dropped.
pub struct ScratchDir {
    dir: PathBuf,
}

impl ScratchDir {
    pub fn new(test: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("pixelshift_{}_{}", std::process::id(), test));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.dir
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
