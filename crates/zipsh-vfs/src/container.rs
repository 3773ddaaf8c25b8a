//! Archive containers: flat stores of path-named byte blobs.
//!
//! A container knows nothing about directories. Paths are `/`-separated and
//! relative (no leading slash); hierarchy is synthesized later by the index.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zipsh_types::error::{Result, ZipshError};

/// A flat archive of named entries.
///
/// `read_entry` takes `&mut self` because seekable archive formats decode
/// entries through a stateful reader.
pub trait Container {
    /// Enumerate every entry path in the container, in container order.
    fn entry_paths(&self) -> Result<Vec<String>>;

    /// Read the raw bytes of one entry.
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// A zip archive on the host filesystem.
#[derive(Debug)]
pub struct ZipContainer {
    archive: zip::ZipArchive<File>,
}

impl ZipContainer {
    /// Open a zip archive for reading. Fails with `Archive` if the file is
    /// missing or not a valid zip.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| ZipshError::Archive(format!("cannot open {}: {e}", path.display())))?;
        let archive = zip::ZipArchive::new(file)
            .map_err(|e| ZipshError::Archive(format!("cannot read {}: {e}", path.display())))?;
        Ok(Self { archive })
    }
}

impl Container for ZipContainer {
    fn entry_paths(&self) -> Result<Vec<String>> {
        // Some zip writers store explicit directory entries with a trailing
        // slash; those carry no bytes and are skipped here. The index
        // recreates every intermediate directory from the file paths alone.
        Ok(self
            .archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect())
    }

    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(path)
            .map_err(|e| ZipshError::Archive(format!("cannot open entry {path}: {e}")))?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut data)
            .map_err(|e| ZipshError::Archive(format!("cannot read entry {path}: {e}")))?;
        Ok(data)
    }
}

/// A fully in-memory container. Useful for unit tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container from `(path, bytes)` pairs.
    pub fn from_entries<I, P, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, B)>,
        P: Into<String>,
        B: Into<Vec<u8>>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(p, b)| (p.into(), b.into()))
                .collect(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, path: &str, data: &[u8]) {
        self.entries.push((path.to_string(), data.to_vec()));
    }
}

impl Container for MemoryContainer {
    fn entry_paths(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|(p, _)| p.clone()).collect())
    }

    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| ZipshError::Archive(format!("no such entry: {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_test_zip(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("vfs.zip");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        writer.add_directory("dir1", options).unwrap();
        writer.start_file("dir1/file1.txt", options).unwrap();
        writer.write_all(b"This is file 1").unwrap();
        writer.start_file("file4.txt", options).unwrap();
        writer.write_all(b"This is file 4").unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn zip_lists_files_not_directories() {
        let dir = tempfile::tempdir().unwrap();
        let container = ZipContainer::open(&write_test_zip(&dir)).unwrap();
        let mut paths = container.entry_paths().unwrap();
        paths.sort();
        assert_eq!(paths, vec!["dir1/file1.txt", "file4.txt"]);
    }

    #[test]
    fn zip_reads_entry_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut container = ZipContainer::open(&write_test_zip(&dir)).unwrap();
        assert_eq!(container.read_entry("dir1/file1.txt").unwrap(), b"This is file 1");
        assert_eq!(container.read_entry("file4.txt").unwrap(), b"This is file 4");
    }

    #[test]
    fn zip_missing_entry_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut container = ZipContainer::open(&write_test_zip(&dir)).unwrap();
        assert!(matches!(
            container.read_entry("ghost.txt"),
            Err(ZipshError::Archive(_))
        ));
    }

    #[test]
    fn zip_missing_file_is_archive_error() {
        let err = ZipContainer::open(Path::new("/no/such/archive.zip")).unwrap_err();
        assert!(matches!(err, ZipshError::Archive(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn zip_garbage_file_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.zip");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        assert!(matches!(
            ZipContainer::open(&path),
            Err(ZipshError::Archive(_))
        ));
    }

    #[test]
    fn memory_round_trip() {
        let mut container =
            MemoryContainer::from_entries([("a/b.txt", b"hello".to_vec()), ("c.txt", b"!".to_vec())]);
        assert_eq!(container.entry_paths().unwrap(), vec!["a/b.txt", "c.txt"]);
        assert_eq!(container.read_entry("c.txt").unwrap(), b"!");
    }

    #[test]
    fn memory_missing_entry_fails() {
        let mut container = MemoryContainer::new();
        assert!(container.read_entry("nothing").is_err());
    }
}
