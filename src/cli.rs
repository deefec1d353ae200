//! CLI domain: parse, route and output only.

mod output;
mod parse;
mod route;

pub use output::{format_gate, format_send, format_session, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
