//! Per-run scratch directory with RAII cleanup.
//!
//! Every case that touches the filesystem does so through a named
//! [`ScratchFile`] under the run's own directory. Names are fixed per
//! purpose; the directory itself is unique per run so concurrent runs in one
//! process cannot collide. Files are deleted when their guard drops, on pass
//! and fail paths alike, and the directory goes when the run context does.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RUN: AtomicU64 = AtomicU64::new(0);

/// A per-run scratch directory.
#[derive(Debug)]
pub struct Scratch {
    root: PathBuf,
}

impl Scratch {
    /// Creates the run directory under `base`.
    pub fn create(base: &Path) -> io::Result<Self> {
        let run = NEXT_RUN.fetch_add(1, Ordering::Relaxed);
        let root = base.join(format!("asmcheck-{}-{run}", std::process::id()));
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A named file slot in this run's directory. Nothing is created until
    /// the guard is written through.
    #[must_use]
    pub fn file(&self, name: &str) -> ScratchFile {
        ScratchFile {
            path: self.root.join(name),
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// RAII guard for one scratch file; removes the file on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates (or truncates) the file with the given contents.
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(&self.path, bytes)
    }

    /// Opens the file for reading.
    pub fn open_read(&self) -> io::Result<File> {
        File::open(&self.path)
    }

    /// Creates (or truncates) the file and opens it for writing.
    pub fn open_write(&self) -> io::Result<File> {
        File::create(&self.path)
    }

    /// Reads the file's contents back.
    pub fn read_back(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_files_are_cleaned_up() {
        let dir;
        let file_path;
        {
            let scratch = Scratch::create(&std::env::temp_dir()).unwrap();
            dir = scratch.root().to_path_buf();
            let file = scratch.file("write_case.txt");
            file_path = file.path().to_path_buf();
            file.write_bytes(b"hello").unwrap();
            assert!(file_path.exists());
            assert_eq!(file.read_back().unwrap(), b"hello");
            drop(file);
            assert!(!file_path.exists());
        }
        assert!(!dir.exists());
    }

    #[test]
    fn two_runs_get_distinct_roots() {
        let a = Scratch::create(&std::env::temp_dir()).unwrap();
        let b = Scratch::create(&std::env::temp_dir()).unwrap();
        assert_ne!(a.root(), b.root());
    }
}
