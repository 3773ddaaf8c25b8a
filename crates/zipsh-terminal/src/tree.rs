//! Recursive tree rendering for the `tree` command.

use zipsh_types::error::{Result, ZipshError};
use zipsh_vfs::{ArchiveIndex, EntryKind};

/// Render a directory subtree as indented display lines.
///
/// Pure function of the index: the same call always yields the same lines,
/// in sorted order, visiting each node exactly once. Recursion is bounded by
/// the deepest entry path in the archive since the index tree is finite and
/// acyclic by construction. Fails with `NotADirectory` when the root path
/// names a file.
pub fn render_tree(index: &ArchiveIndex, root: &str) -> Result<Vec<String>> {
    if index.stat(root)? != EntryKind::Directory {
        return Err(ZipshError::NotADirectory(root.to_string()));
    }
    let mut lines = vec![root.to_string()];
    let mut dirs = 0u32;
    let mut files = 0u32;
    render_level(index, root, 1, &mut lines, &mut dirs, &mut files)?;
    lines.push(format!("\n{dirs} directories, {files} files"));
    Ok(lines)
}

fn render_level(
    index: &ArchiveIndex,
    dir: &str,
    depth: usize,
    lines: &mut Vec<String>,
    dirs: &mut u32,
    files: &mut u32,
) -> Result<()> {
    let indent = "  ".repeat(depth);
    for entry in index.readdir(dir)? {
        match entry.kind {
            EntryKind::Directory => {
                lines.push(format!("{indent}{}/", entry.name));
                *dirs += 1;
                let child = if dir == "/" {
                    format!("/{}", entry.name)
                } else {
                    format!("{dir}/{}", entry.name)
                };
                render_level(index, &child, depth + 1, lines, dirs, files)?;
            },
            EntryKind::File => {
                lines.push(format!("{indent}{}", entry.name));
                *files += 1;
            },
        }
    }
    Ok(())
}
