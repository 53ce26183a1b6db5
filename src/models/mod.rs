pub mod project;
pub mod step;

pub use project::*;
pub use step::*;
