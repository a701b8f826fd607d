//! Command-line argument parsing and output.

pub mod definition;
pub mod render;
pub mod utils;

pub use definition::Args;
pub use utils::determine_log_level;
