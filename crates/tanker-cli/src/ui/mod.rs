//! UI primitives for the Tanker CLI.
//!
//! - **context**: TTY, color and unicode detection
//! - **mode**: json / plain / pretty routing
//! - **theme**: badges and colors
//! - **render**: headers, key-value lines, tables, errors

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::{UiContext, UiFlags};
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, print, print_json, receipt, rupees, table,
};
