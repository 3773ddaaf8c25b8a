//! zipsh entry point.
//!
//! Loads the JSON configuration, mounts the archive named by `vfs_path`,
//! optionally replays a startup script, then runs the interactive
//! read-eval loop until `exit` or end of input. Configuration and archive
//! failures are fatal here, before the session starts; everything after
//! that is reported at the prompt and the loop continues.

use std::path::Path;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use zipsh_terminal::{CommandOutput, CommandRegistry, Environment, register_builtins};
use zipsh_types::config::ShellConfig;
use zipsh_vfs::{ArchiveIndex, ZipContainer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config =
        ShellConfig::load(Path::new(&config_path)).context("failed to load configuration")?;

    let container =
        ZipContainer::open(Path::new(&config.vfs_path)).context("failed to open archive")?;
    let mut index =
        ArchiveIndex::open(Box::new(container)).context("failed to index archive")?;
    log::info!("Mounted {} ({} files)", config.vfs_path, index.file_count());
    if index.conflicts() > 0 {
        log::warn!(
            "{} entries conflicted with directories and were shadowed",
            index.conflicts()
        );
    }

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    let mut env = Environment {
        cwd: "/".to_string(),
        username: config.username.clone(),
        index: &mut index,
    };

    let mut finished = false;
    if let Some(script) = &config.startup_script {
        finished = replay_script(&registry, &mut env, Path::new(script));
    }

    if !finished {
        let mut editor = DefaultEditor::new().context("failed to start line editor")?;
        loop {
            match editor.readline(&env.prompt()) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if dispatch(&registry, &mut env, &line) {
                        break;
                    }
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("failed to read input"),
            }
        }
    }

    drop(env);
    index.close();
    Ok(())
}

/// Run one line through the registry and print the result.
///
/// Returns `true` when the session should end. Recoverable command errors
/// are printed as a single line; session state is already unchanged by the
/// time they surface here.
fn dispatch(registry: &CommandRegistry, env: &mut Environment<'_>, line: &str) -> bool {
    match registry.execute(line, env) {
        Ok(CommandOutput::Text(text)) => println!("{text}"),
        Ok(CommandOutput::None) => {},
        Ok(CommandOutput::Exit) => return true,
        Err(e) => println!("{e}"),
    }
    false
}

/// Replay a startup script from the host filesystem, echoing each command
/// behind its prompt. A missing or unreadable script is logged and skipped.
/// Returns `true` if the script ran `exit`.
fn replay_script(registry: &CommandRegistry, env: &mut Environment<'_>, path: &Path) -> bool {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("skipping startup script {}: {e}", path.display());
            return false;
        },
    };
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("{}{line}", env.prompt());
        if dispatch(registry, env, line) {
            return true;
        }
    }
    false
}
