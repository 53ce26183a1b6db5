pub mod credentials;
pub mod parser;
pub mod schema;
pub mod types;

pub use types::*;
pub use credentials::{redact_credentials, resolve_llm_settings};
pub use parser::{load_config, parse_config};
