//! Read-only virtual file system for zipsh.
//!
//! An archive container stores nothing but a flat list of path-named byte
//! blobs. [`ArchiveIndex`] materializes that list into a directory tree once,
//! at load time; all navigation and extraction then runs against the tree.
//! The container itself stays behind the [`Container`] trait, which only has
//! to enumerate entry paths and read bytes by path.

pub mod container;
pub mod index;

pub use container::{Container, MemoryContainer, ZipContainer};
pub use index::{ArchiveIndex, DirEntry, EntryKind};
