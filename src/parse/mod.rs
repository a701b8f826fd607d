//! Response validation and normalization.

mod notices;
mod xml;

pub use notices::{parse_notices, sanitize_body};
