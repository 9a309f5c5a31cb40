// ============================================================================
// KEY VALIDATION — usability policy for the text typed into the Key field
// ============================================================================

use std::num::IntErrorKind;

use crate::log_warn;

/// Lowest key the UI advertises.
pub const KEY_MIN: i64 = 1;
/// Highest key the UI advertises. Larger keys still work (they wrap).
pub const KEY_MAX: i64 = 255;

/// Reasons a key entry is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The text is not an integer at all.
    NotAnInteger(String),
    /// The integer is zero or negative.
    NotPositive(i64),
}

impl KeyError {
    /// Dialog title shown alongside the message.
    pub fn title(&self) -> &'static str {
        match self {
            KeyError::NotAnInteger(_) => "Invalid Input",
            KeyError::NotPositive(_) => "Invalid Key",
        }
    }
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::NotAnInteger(_) => write!(f, "Key must be an integer."),
            KeyError::NotPositive(_) => write!(f, "Please enter a positive integer key."),
        }
    }
}

impl std::error::Error for KeyError {}

/// Parse the key text. Whitespace around the number is ignored.
///
/// Integers too large for `i64` are still keys: they are replaced by the
/// smallest equivalent key above [`KEY_MAX`], so they wrap like any other
/// large key.
pub fn parse_key(text: &str) -> Result<i64, KeyError> {
    let trimmed = text.trim();
    let key: i64 = match trimmed.parse() {
        Ok(key) => key,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => {
                let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
                KEY_MAX + 1 + i64::from(decimal_residue(digits))
            }
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return Err(KeyError::NotAnInteger(trimmed.to_string())),
        },
    };
    validate_key(key)
}

/// `digits` (ASCII decimal) modulo 256.
fn decimal_residue(digits: &str) -> u8 {
    digits
        .bytes()
        .fold(0u32, |r, d| (r * 10 + u32::from(d - b'0')) % 256) as u8
}

/// Reject non-positive keys. Keys above [`KEY_MAX`] are let through.
pub fn validate_key(key: i64) -> Result<i64, KeyError> {
    if key < KEY_MIN {
        return Err(KeyError::NotPositive(key));
    }
    if key > KEY_MAX {
        log_warn!(
            "key {} is outside {}-{}; it wraps to {}",
            key,
            KEY_MIN,
            KEY_MAX,
            crate::ops::shift::normalize_key(key)
        );
    }
    Ok(key)
}
