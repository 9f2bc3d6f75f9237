//! CLI argument models and validation helpers for the Wisp portal binary.

pub mod cli_args;
pub mod validation;

pub use cli_args::Cli;
pub use validation::{parse_hex_color, parse_positive_u64};
