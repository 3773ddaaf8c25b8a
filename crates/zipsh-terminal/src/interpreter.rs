//! Command trait, registry, and dispatch logic.

use std::collections::HashMap;

use zipsh_types::error::Result;
use zipsh_vfs::ArchiveIndex;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the session loop to close the archive and terminate.
    Exit,
}

/// Session state passed to every command.
///
/// Current directory and username live here, not in process globals; every
/// operation receives the session it acts on.
pub struct Environment<'a> {
    /// Current working directory (absolute, normalized, always a directory).
    pub cwd: String,
    /// Name shown in the prompt.
    pub username: String,
    /// The archive index backing the session.
    pub index: &'a mut ArchiveIndex,
}

impl Environment<'_> {
    /// Prompt string for the interactive loop: `<username>@<cwd>$ `.
    pub fn prompt(&self) -> String {
        format!("{}@{}$ ", self.username, self.cwd)
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse and execute a command line.
    ///
    /// Tokenizes on whitespace; the first token is the verb. An unknown verb
    /// produces an `Unknown command` output line, not an error: it changes
    /// no state and the session continues.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };

        // help needs registry access, so it is intercepted here.
        if verb == "help" {
            return Ok(self.execute_help());
        }

        match self.commands.get(verb) {
            Some(cmd) => cmd.execute(args, env),
            None => Ok(CommandOutput::Text(format!("Unknown command: {verb}"))),
        }
    }

    fn execute_help(&self) -> CommandOutput {
        let mut names: Vec<&String> = self.commands.keys().collect();
        names.sort();
        let mut lines = Vec::with_capacity(names.len());
        for name in names {
            let cmd = &self.commands[name];
            lines.push(format!("{:<16} {}", cmd.usage(), cmd.description()));
        }
        CommandOutput::Text(lines.join("\n"))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Resolve a possibly-relative path against the current working directory.
///
/// Empty input and `.` leave the current directory unchanged; a leading `/`
/// makes the input absolute; anything else is joined onto the current
/// directory. `.` and `..` segments are collapsed left to right. `..` at the
/// root is a deliberate no-op: the shell stays at `/` rather than jumping
/// anywhere or failing.
pub fn resolve_path(cwd: &str, input: &str) -> String {
    let raw = if input.starts_with('/') {
        input.to_string()
    } else if cwd == "/" {
        format!("/{input}")
    } else {
        format!("{cwd}/{input}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zipsh_vfs::MemoryContainer;

    // -- Path resolution --

    #[test]
    fn resolve_path_absolute() {
        assert_eq!(resolve_path("/any", "/foo/bar"), "/foo/bar");
    }

    #[test]
    fn resolve_path_relative() {
        assert_eq!(resolve_path("/home", "user"), "/home/user");
    }

    #[test]
    fn resolve_path_dotdot() {
        assert_eq!(resolve_path("/a/b/c", "../../x"), "/a/x");
    }

    #[test]
    fn resolve_path_root_relative() {
        assert_eq!(resolve_path("/", "foo"), "/foo");
    }

    #[test]
    fn resolve_path_empty_input_keeps_cwd() {
        assert_eq!(resolve_path("/a/b", ""), "/a/b");
        assert_eq!(resolve_path("/", ""), "/");
    }

    #[test]
    fn resolve_path_dot_keeps_cwd() {
        assert_eq!(resolve_path("/a/b", "."), "/a/b");
        assert_eq!(resolve_path("/", "."), "/");
    }

    #[test]
    fn resolve_path_dotdot_at_root_is_noop() {
        assert_eq!(resolve_path("/", ".."), "/");
        assert_eq!(resolve_path("/", "../.."), "/");
        assert_eq!(resolve_path("/", "../x"), "/x");
    }

    #[test]
    fn resolve_path_two_levels_up_is_root() {
        let one = resolve_path("/a/b", "..");
        let two = resolve_path(&one, "..");
        assert_eq!(two, "/");
    }

    #[test]
    fn resolve_path_mixed_segments() {
        assert_eq!(resolve_path("/a", "./b/../c"), "/a/c");
        assert_eq!(resolve_path("/a", "b//c"), "/a/b/c");
    }

    // -- Dispatch --

    fn empty_env(index: &mut zipsh_vfs::ArchiveIndex) -> Environment<'_> {
        Environment {
            cwd: "/".to_string(),
            username: "user1".to_string(),
            index,
        }
    }

    #[test]
    fn empty_line_is_no_output() {
        let mut index =
            zipsh_vfs::ArchiveIndex::open(Box::new(MemoryContainer::new())).unwrap();
        let mut env = empty_env(&mut index);
        let reg = CommandRegistry::new();
        assert_eq!(reg.execute("", &mut env).unwrap(), CommandOutput::None);
        assert_eq!(reg.execute("   ", &mut env).unwrap(), CommandOutput::None);
    }

    #[test]
    fn unknown_verb_reports_and_continues() {
        let mut index =
            zipsh_vfs::ArchiveIndex::open(Box::new(MemoryContainer::new())).unwrap();
        let mut env = empty_env(&mut index);
        let reg = CommandRegistry::new();
        let out = reg.execute("frobnicate now", &mut env).unwrap();
        assert_eq!(
            out,
            CommandOutput::Text("Unknown command: frobnicate".to_string())
        );
        assert_eq!(env.cwd, "/");
    }

    #[test]
    fn prompt_format() {
        let mut index =
            zipsh_vfs::ArchiveIndex::open(Box::new(MemoryContainer::new())).unwrap();
        let env = empty_env(&mut index);
        assert_eq!(env.prompt(), "user1@/$ ");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolved_paths_are_absolute_and_collapsed(
                cwd_segs in proptest::collection::vec("[a-z]{1,6}", 0..4),
                input in "[a-z./]{0,20}",
            ) {
                let cwd = if cwd_segs.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}", cwd_segs.join("/"))
                };
                let resolved = resolve_path(&cwd, &input);
                prop_assert!(resolved.starts_with('/'));
                prop_assert!(!resolved.contains("//"));
                prop_assert!(
                    resolved.split('/').all(|s| s != "." && s != ".."),
                    "dot segments survived: {resolved}"
                );
                // Resolving the result with empty input is a fixpoint.
                prop_assert_eq!(resolve_path(&resolved, ""), resolved.clone());
            }

            #[test]
            fn enough_dotdots_always_reach_root(
                cwd_segs in proptest::collection::vec("[a-z]{1,6}", 0..5),
            ) {
                let mut cwd = if cwd_segs.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}", cwd_segs.join("/"))
                };
                for _ in 0..cwd_segs.len() {
                    cwd = resolve_path(&cwd, "..");
                }
                prop_assert_eq!(&cwd, "/");
                // And one more is a no-op at the root boundary.
                prop_assert_eq!(resolve_path(&cwd, ".."), "/");
            }
        }
    }
}
