pub mod size;
pub mod terminal;

pub use size::{format_megabytes, parse_size};
pub use terminal::sanitize_for_terminal;
