//! Command interpreter for zipsh.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The interpreter tokenizes an
//! input line on whitespace, resolves the first token as the command name,
//! and dispatches `execute()` against the session environment.

mod commands;
mod interpreter;
mod tree;

/// Register all built-in commands (ls, cd, pwd, cp, tree, exit).
pub use commands::register_builtins;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, nothing, or the exit signal).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Session state passed to every command.
pub use interpreter::Environment;
/// Resolve a possibly-relative path against the current working directory.
pub use interpreter::resolve_path;
/// Render a directory subtree as indented display lines.
pub use tree::render_tree;
