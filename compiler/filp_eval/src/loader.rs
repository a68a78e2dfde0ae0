//! Source loading for `load` and [`Interpreter::load_exec`].
//!
//! The interpreter never opens files itself; it asks its [`SourceLoader`]
//! for the bytes of a named program and executes them.
//!
//! [`Interpreter::load_exec`]: crate::Interpreter::load_exec

use std::io;

use rustc_hash::FxHashMap;

/// Supplies program text by name.
pub trait SourceLoader {
    fn load(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Reads programs from the file system, names being paths.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(name)
    }
}

/// Serves programs from memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_loader_serves_inserted_files() {
        let loader = MemoryLoader::new().with_file("lib.filp", "1 2 +");
        assert_eq!(loader.load("lib.filp").unwrap(), b"1 2 +");
        assert_eq!(
            loader.load("missing.filp").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn fs_loader_reports_missing_files() {
        let err = FsLoader
            .load("/nonexistent/filp/source/file.filp")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
