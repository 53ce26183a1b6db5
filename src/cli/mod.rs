pub mod commands;
pub mod context;
pub mod generate;
pub mod progress;
pub mod render;
pub mod run;
pub mod serve;

pub use commands::{Cli, Commands};
