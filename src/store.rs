//! Filesystem access used by the generator.
//!
//! The generator only ever lists one directory, checks whether a sidecar
//! exists, and writes whole text files. `DiskStore` does that against the real
//! filesystem; `MemoryStore` keeps everything in a map for tests.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

pub trait AssetStore {
    /// Names of the immediate entries of `dir` (files and subdirectories).
    /// Names that are not valid UTF-8 are left out.
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;
    fn exists(&self, path: &Path) -> bool;
    /// Create or truncate `path` and write `contents` in full.
    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl AssetStore for DiskStore {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            match entry?.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("skipping non-UTF-8 entry {:?} in {}", raw, dir.display()),
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    writes: Cell<usize>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Seed a file without counting it as a write. Parent directories are registered.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.mkdir(parent);
        }
        self.files.borrow_mut().insert(path, contents.into());
    }

    pub fn mkdir(&self, dir: impl AsRef<Path>) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in dir.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Number of successful `write_text` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// When set, every write fails with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl AssetStore for MemoryStore {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        if !self.dirs.borrow().contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", dir.display()),
            ));
        }
        let mut names: Vec<String> = Vec::new();
        let files = self.files.borrow();
        let dirs = self.dirs.borrow();
        for path in files.keys().chain(dirs.iter()) {
            if path.parent() == Some(dir) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_owned());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn write_text(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.get() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_store_lists_writes_and_checks() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.png"), b"").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let store = DiskStore;
        let mut names = store.list(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png", "sub"]);

        let out = tmp.path().join("a.yaml");
        assert!(!store.exists(&out));
        store.write_text(&out, "type: texture\n").unwrap();
        assert!(store.exists(&out));
        assert_eq!(fs::read_to_string(&out).unwrap(), "type: texture\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn disk_store_skips_non_utf8_names() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xffname.png")), b"").unwrap();
        fs::write(tmp.path().join("good.png"), b"").unwrap();

        assert_eq!(DiskStore.list(tmp.path()).unwrap(), vec!["good.png"]);
    }

    #[test]
    fn disk_store_missing_dir_errors() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(DiskStore.list(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn memory_store_lists_immediate_entries_only() {
        let store = MemoryStore::new()
            .with_file("/tex/a.png", "")
            .with_file("/tex/nested/b.png", "");
        let mut names = store.list(Path::new("/tex")).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png", "nested"]);
        assert!(store.list(Path::new("/missing")).is_err());
    }

    #[test]
    fn memory_store_counts_writes_and_honours_read_only() {
        let store = MemoryStore::new();
        store.mkdir("/tex");
        store.write_text(Path::new("/tex/a.yaml"), "x").unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read("/tex/a.yaml").as_deref(), Some("x"));

        store.set_read_only(true);
        let err = store.write_text(Path::new("/tex/b.yaml"), "y").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(store.write_count(), 1);
    }
}
