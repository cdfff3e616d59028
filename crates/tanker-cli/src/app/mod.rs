//! Application-level plumbing for the Tanker CLI.
//!
//! - Path resolution for the config file and data directory
//! - The per-invocation context (clock, store, output settings)
//! - Error reporting and exit codes

mod context;
mod report;
mod resolver;

pub use context::{normalize_phone, session_user, AppContext, Store};
pub use report::exit_with_error;
pub use resolver::resolve_config_path;
