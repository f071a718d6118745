pub mod dispatcher;
pub mod handler;
pub mod registry;

pub use dispatcher::{CommandDispatcher, create_command_registry};

/// Splits a `/name arg ...` line. Returns `None` for ordinary messages.
pub fn parse_slash_command(line: &str) -> Option<(&str, Vec<&str>)> {
    let rest = line.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}
