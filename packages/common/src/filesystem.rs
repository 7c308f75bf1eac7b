use crate::result::CommonResult;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File system abstraction for persistence and testing
pub trait FileSystem: Send + Sync {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> CommonResult<String>;

    /// Write a whole file, replacing previous contents
    fn write(&self, path: &Path, contents: &str) -> CommonResult<()>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> CommonResult<()>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> CommonResult<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn create_dir_all(&self, path: &Path) -> CommonResult<()> {
        Ok(std::fs::create_dir_all(path)?)
    }
}

/// In-memory file system for testing
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_file(&self, path: PathBuf, contents: impl Into<String>) {
        self.lock().insert(path, contents.into());
    }

    pub fn file_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        // A poisoned map is still a valid map
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        self.lock().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
            .into()
        })
    }

    fn write(&self, path: &Path, contents: &str) -> CommonResult<()> {
        self.lock().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> CommonResult<()> {
        // Directories are implicit in the mock
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommonError;

    #[test]
    fn test_mock_round_trip() {
        let fs = MockFileSystem::new();
        let path = PathBuf::from("/store/p.json");

        assert!(!fs.exists(&path));
        fs.write(&path, "{}").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "{}");
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_mock_missing_file_is_not_found() {
        let fs = MockFileSystem::new();
        match fs.read_to_string(Path::new("/nope")) {
            Err(CommonError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_real_file_system() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let fs = RealFileSystem;

        fs.create_dir_all(&nested).unwrap();
        let file = nested.join("x.json");
        fs.write(&file, "[]").unwrap();
        assert!(fs.exists(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "[]");
    }
}
