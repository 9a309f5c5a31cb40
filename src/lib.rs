//! PixelShift: shift every RGB channel of an image by an integer key,
//! modulo 256, and shift it back.
//!
//! The transform lives in [`ops::shift`]; everything else is the window,
//! the headless CLI and image file handling around it.

pub mod logger;

pub mod app;
pub mod cli;
pub mod components;
pub mod io;
pub mod ops;
pub mod session;

pub use ops::{Direction, KeyError, parse_key, round_trips, shift_image};
pub use session::{ProcessError, Session};
