//! CLI subcommand implementations.

pub mod check;
pub mod show;
pub mod util;
