use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::Filesystem;

#[derive(Debug, Default)]
struct MemoryState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    fail_mkdir: bool,
    fail_flush: bool,
}

impl MemoryState {
    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != Path::new("/") => {
                self.dirs.contains(parent)
            }
            _ => true,
        }
    }
}

/// In-memory filesystem for exercising the backup without touching disk
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryFs {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every directory creation fails with permission denied
    pub(crate) fn failing_mkdir(self) -> Self {
        self.state.borrow_mut().fail_mkdir = true;
        self
    }

    /// Streamed writers fail when flushed
    pub(crate) fn failing_flush(self) -> Self {
        self.state.borrow_mut().fail_flush = true;
        self
    }

    pub(crate) fn is_dir(&self, path: &Path) -> bool {
        self.state.borrow().dirs.contains(path)
    }

    pub(crate) fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.borrow().files.get(path).cloned()
    }

    pub(crate) fn files(&self) -> Vec<PathBuf> {
        self.state.borrow().files.keys().cloned().collect()
    }
}

impl Filesystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state.borrow();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_mkdir {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mkdir disabled"));
        }
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() || ancestor == Path::new("/") {
                continue;
            }
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.parent_exists(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "parent directory missing"));
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        self.write(path, &[])?;
        let fail_flush = self.state.borrow().fail_flush;
        Ok(Box::new(MemoryFile {
            path: path.to_path_buf(),
            state: Rc::clone(&self.state),
            fail_flush,
        }))
    }
}

struct MemoryFile {
    path: PathBuf,
    state: Rc<RefCell<MemoryState>>,
    fail_flush: bool,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state
            .borrow_mut()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.fail_flush {
            return Err(io::Error::other("flush disabled"));
        }
        Ok(())
    }
}
