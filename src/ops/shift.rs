// ============================================================================
// CHANNEL SHIFT — modular additive per-channel transform ("encrypt"/"decrypt")
// ============================================================================
//
// Every R, G and B byte is shifted by the key modulo 256. Forward adds the
// key, Inverse subtracts it, so the two are exact inverses for any integer
// key. Rows are processed in parallel via rayon; each output byte depends
// only on the matching input byte.
// ============================================================================

use image::RgbImage;
use rayon::prelude::*;

/// Bytes per RGB pixel.
const CHANNELS: usize = 3;

/// Which way the key is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// `c' = (c + key) mod 256` — "Encrypt" in the UI.
    #[default]
    Forward,
    /// `c' = (c - key) mod 256` — "Decrypt" in the UI.
    Inverse,
}

impl Direction {
    /// The direction that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "Encrypt",
            Direction::Inverse => "Decrypt",
        }
    }

    /// Past-tense verb used in status text and default file names.
    pub fn past_tense(self) -> &'static str {
        match self {
            Direction::Forward => "encrypted",
            Direction::Inverse => "decrypted",
        }
    }
}

/// Reduce any integer key to its equivalent offset in `0..=255`.
///
/// `k` and `k + 256 * n` always produce identical output.
pub fn normalize_key(key: i64) -> u8 {
    key.rem_euclid(256) as u8
}

/// Shift a single channel value.
#[inline]
pub fn shift_channel(value: u8, key: i64, direction: Direction) -> u8 {
    let offset = normalize_key(key);
    match direction {
        Direction::Forward => value.wrapping_add(offset),
        Direction::Inverse => value.wrapping_sub(offset),
    }
}

/// Apply the shift to every channel of `image`, returning a new buffer of
/// identical dimensions. The input is never modified.
pub fn shift_image(image: &RgbImage, key: i64, direction: Direction) -> RgbImage {
    let w = image.width() as usize;
    let h = image.height() as usize;
    if w == 0 || h == 0 {
        return RgbImage::new(image.width(), image.height());
    }

    let src_raw = image.as_raw();
    let mut dst_raw = vec![0u8; w * h * CHANNELS];
    let stride = w * CHANNELS;

    // Forward and Inverse collapse to one wrapping add of a fixed offset.
    let offset = match direction {
        Direction::Forward => normalize_key(key),
        Direction::Inverse => normalize_key(key).wrapping_neg(),
    };

    dst_raw.par_chunks_mut(stride).enumerate().for_each(|(y, row_out)| {
        let row_in = &src_raw[y * stride..(y + 1) * stride];
        for (out, &value) in row_out.iter_mut().zip(row_in) {
            *out = value.wrapping_add(offset);
        }
    });

    // Same dimensions and channel count as the source, so from_raw cannot fail;
    // fall back to a blank buffer rather than panic.
    RgbImage::from_raw(image.width(), image.height(), dst_raw)
        .unwrap_or_else(|| RgbImage::new(image.width(), image.height()))
}

/// Check that shifting `image` forward and then back with `key` reproduces
/// it exactly.
pub fn round_trips(image: &RgbImage, key: i64) -> bool {
    let forward = shift_image(image, key, Direction::Forward);
    let restored = shift_image(&forward, key, Direction::Forward.inverse());
    restored.dimensions() == image.dimensions() && restored.as_raw() == image.as_raw()
}
