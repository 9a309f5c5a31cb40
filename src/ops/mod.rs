pub mod key;
pub mod shift;

pub use key::{KeyError, parse_key};
pub use shift::{Direction, round_trips, shift_image};
