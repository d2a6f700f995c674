//! File accessor capability supplied by the editor host.
//!
//! The engine has no file system access of its own. Everything it reads or
//! writes (dictionary word lists, mostly) goes through a [`FileAccessor`]
//! passed in by the host, which keeps the engine testable against the
//! in-memory [`mock::MemoryFileAccessor`].
//!
//! ## Error classification
//!
//! Host back ends report "file not found" with different codes
//! (`FileNotFound`, `EntryNotFound`, `ENOENT`, ...). The accessor classifies
//! each failure once, at its own boundary, into an [`FsErrorKind`] using its
//! [`NotFoundCodes`]; callers branch on the kind instead of re-inspecting raw
//! errors. Hosts can register additional codes at initialization.
//!
//! ```ignore
//! let mut codes = NotFoundCodes::default();
//! codes.register("NoSuchKey");
//! let fs = TokioFileAccessor::with_not_found_codes(codes);
//! ```

use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Not-found codes every accessor recognizes out of the box.
pub const DEFAULT_NOT_FOUND_CODES: &[&str] = &["FileNotFound", "EntryNotFound", "ENOENT"];

const PERMISSION_DENIED_CODES: &[&str] = &["NoPermissions", "EACCES", "EPERM"];

/// Classified kind of a file system failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    NotFound,
    PermissionDenied,
    Other,
}

/// The set of error codes treated as "not found".
///
/// Starts with [`DEFAULT_NOT_FOUND_CODES`]; hosts add the codes their back
/// end uses with [`NotFoundCodes::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundCodes {
    codes: HashSet<String>,
}

impl Default for NotFoundCodes {
    fn default() -> Self {
        Self {
            codes: DEFAULT_NOT_FOUND_CODES
                .iter()
                .map(|code| code.to_string())
                .collect(),
        }
    }
}

impl NotFoundCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional host-specific not-found code.
    pub fn register(&mut self, code: impl Into<String>) -> &mut Self {
        self.codes.insert(code.into());
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Map a back end error code onto an [`FsErrorKind`].
    pub fn classify(&self, code: &str) -> FsErrorKind {
        if self.contains(code) {
            FsErrorKind::NotFound
        } else if PERMISSION_DENIED_CODES.contains(&code) {
            FsErrorKind::PermissionDenied
        } else {
            FsErrorKind::Other
        }
    }
}

/// A failure reported by the host file system.
#[derive(Debug, Error)]
#[error("{operation} failed for {}: {code}", path.display())]
pub struct FsError {
    pub kind: FsErrorKind,
    /// The back end's own error code, kept verbatim.
    pub code: String,
    pub path: PathBuf,
    pub operation: &'static str,
    #[source]
    pub source: Option<io::Error>,
}

impl FsError {
    /// Build an error from a back end code, classifying it with `codes`.
    pub fn with_code(
        operation: &'static str,
        path: impl Into<PathBuf>,
        code: impl Into<String>,
        codes: &NotFoundCodes,
    ) -> Self {
        let code = code.into();
        Self {
            kind: codes.classify(&code),
            code,
            path: path.into(),
            operation,
            source: None,
        }
    }

    /// Build an error from a `std::io::Error`.
    pub fn from_io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        err: io::Error,
        codes: &NotFoundCodes,
    ) -> Self {
        let code = io_error_code(&err);
        Self {
            kind: codes.classify(&code),
            code,
            path: path.into(),
            operation,
            source: Some(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FsErrorKind::NotFound
    }
}

fn io_error_code(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "ENOENT".to_string(),
        io::ErrorKind::PermissionDenied => "EACCES".to_string(),
        io::ErrorKind::AlreadyExists => "EEXIST".to_string(),
        io::ErrorKind::IsADirectory => "EISDIR".to_string(),
        io::ErrorKind::NotADirectory => "ENOTDIR".to_string(),
        kind => match err.raw_os_error() {
            Some(raw) => format!("os-error-{}", raw),
            None => format!("{:?}", kind),
        },
    }
}

/// Errors surfaced by a [`FileAccessor`].
///
/// `Fs` is the host file system error family; `Other` is anything else the
/// host raised (transport failures, cancellations, bugs). The two are never
/// conflated: [`FileAccessor::file_exists`] swallows only `Fs`.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AccessError {
    /// The classified kind, for file system errors.
    pub fn fs_kind(&self) -> Option<FsErrorKind> {
        match self {
            AccessError::Fs(err) => Some(err.kind),
            AccessError::Other(_) => None,
        }
    }

    /// The back end error code, if the error reports one.
    pub fn code(&self) -> Option<&str> {
        match self {
            AccessError::Fs(err) => Some(&err.code),
            AccessError::Other(err) => err.downcast_ref::<FsError>().map(|fs| fs.code.as_str()),
        }
    }
}

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Unknown,
    File,
    Directory,
    SymbolicLink,
}

/// File access capability supplied by the host.
///
/// All operations may suspend pending I/O. Operations on the same path issued
/// by one logical operation must be awaited in order by the caller (create
/// the directory, then write the file).
#[async_trait]
pub trait FileAccessor: Send + Sync + std::fmt::Debug {
    /// Create a directory, including missing parents. Existing directories
    /// are not an error.
    async fn create_directory(&self, path: &Path) -> Result<(), AccessError>;

    /// Write UTF-8 text, replacing any existing content.
    async fn write_file(&self, path: &Path, content: &str) -> Result<(), AccessError>;

    /// Read a file as UTF-8 text.
    async fn read_file(&self, path: &Path) -> Result<String, AccessError>;

    /// Report what a path points at.
    async fn stat(&self, path: &Path) -> Result<FileKind, AccessError>;

    /// The not-found codes this accessor was initialized with.
    fn not_found_codes(&self) -> &NotFoundCodes;

    /// Check whether a path exists.
    ///
    /// Any file system error means "does not exist". Errors outside the file
    /// system family are returned unchanged.
    async fn file_exists(&self, path: &Path) -> Result<bool, AccessError> {
        match self.stat(path).await {
            Ok(kind) => Ok(kind != FileKind::Unknown),
            Err(AccessError::Fs(err)) => {
                tracing::trace!(path = %path.display(), code = %err.code, "treating fs error as missing");
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    /// Check whether an error reports one of the known not-found codes.
    fn is_not_found_error(&self, err: &AccessError) -> bool {
        match err {
            AccessError::Fs(fs) => fs.is_not_found() || self.not_found_codes().contains(&fs.code),
            AccessError::Other(_) => err
                .code()
                .is_some_and(|code| self.not_found_codes().contains(code)),
        }
    }
}

/// Accessor over the local disk, backed by `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileAccessor {
    codes: NotFoundCodes,
}

impl TokioFileAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_not_found_codes(codes: NotFoundCodes) -> Self {
        Self { codes }
    }

    fn fs_error(&self, operation: &'static str, path: &Path, err: io::Error) -> AccessError {
        AccessError::Fs(FsError::from_io(operation, path, err, &self.codes))
    }
}

#[async_trait]
impl FileAccessor for TokioFileAccessor {
    async fn create_directory(&self, path: &Path) -> Result<(), AccessError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| self.fs_error("create_directory", path, e))
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<(), AccessError> {
        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|e| self.fs_error("write_file", path, e))
    }

    async fn read_file(&self, path: &Path) -> Result<String, AccessError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| self.fs_error("read_file", path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn stat(&self, path: &Path) -> Result<FileKind, AccessError> {
        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| self.fs_error("stat", path, e))?;
        let file_type = metadata.file_type();
        Ok(if file_type.is_symlink() {
            FileKind::SymbolicLink
        } else if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_file() {
            FileKind::File
        } else {
            FileKind::Unknown
        })
    }

    fn not_found_codes(&self) -> &NotFoundCodes {
        &self.codes
    }
}

pub mod mock {
    //! In-memory accessor for tests and hosts without a disk.

    use super::*;
    use std::collections::HashMap;
    use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

    /// Failure injected for a path.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum InjectedFailure {
        /// A file system error carrying this back end code.
        Fs(String),
        /// A non file system error raised by the host.
        Host(String),
    }

    #[derive(Debug, Default)]
    struct State {
        files: HashMap<PathBuf, String>,
        dirs: HashSet<PathBuf>,
        failures: HashMap<PathBuf, InjectedFailure>,
        operations: Vec<String>,
    }

    /// In-memory file accessor.
    ///
    /// Behaves like a strict host back end: writing a file whose parent
    /// directory does not exist fails with `FileNotFound`, and missing
    /// files report `FileNotFound` as well.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fs = MemoryFileAccessor::new();
    /// fs.add_file("/dicts/words.txt", "alpha\nbeta\n");
    /// assert!(fs.file_exists(Path::new("/dicts/words.txt")).await?);
    /// ```
    #[derive(Debug, Default)]
    pub struct MemoryFileAccessor {
        state: RwLock<State>,
        codes: NotFoundCodes,
    }

    impl MemoryFileAccessor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_not_found_codes(codes: NotFoundCodes) -> Self {
            Self {
                state: RwLock::default(),
                codes,
            }
        }

        fn read_state(&self) -> RwLockReadGuard<'_, State> {
            self.state.read().unwrap_or_else(|e| e.into_inner())
        }

        fn write_state(&self) -> RwLockWriteGuard<'_, State> {
            self.state.write().unwrap_or_else(|e| e.into_inner())
        }

        /// Add a file with the given content. Parent directories are created.
        pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
            let path = normalize_path(path.as_ref());
            let mut state = self.write_state();
            if let Some(parent) = path.parent() {
                add_dir_recursive(&mut state.dirs, parent);
            }
            state.files.insert(path, content.into());
        }

        /// Add an empty directory. Parent directories are created.
        pub fn add_dir(&self, path: impl AsRef<Path>) {
            let path = normalize_path(path.as_ref());
            add_dir_recursive(&mut self.write_state().dirs, &path);
        }

        /// Make every operation on `path` fail.
        pub fn fail_with(&self, path: impl AsRef<Path>, failure: InjectedFailure) {
            let path = normalize_path(path.as_ref());
            self.write_state().failures.insert(path, failure);
        }

        /// Current content of a file, if present.
        pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
            let path = normalize_path(path.as_ref());
            self.read_state().files.get(&path).cloned()
        }

        /// Log of mutating operations in the order they completed.
        pub fn operations(&self) -> Vec<String> {
            self.read_state().operations.clone()
        }

        fn check_failure(&self, operation: &'static str, path: &Path) -> Result<(), AccessError> {
            match self.read_state().failures.get(path) {
                Some(InjectedFailure::Fs(code)) => Err(AccessError::Fs(FsError::with_code(
                    operation,
                    path,
                    code.clone(),
                    &self.codes,
                ))),
                Some(InjectedFailure::Host(message)) => {
                    Err(AccessError::Other(anyhow::anyhow!("{}", message)))
                }
                None => Ok(()),
            }
        }

        fn not_found(&self, operation: &'static str, path: &Path) -> AccessError {
            AccessError::Fs(FsError::with_code(
                operation,
                path,
                "FileNotFound",
                &self.codes,
            ))
        }
    }

    #[async_trait]
    impl FileAccessor for MemoryFileAccessor {
        async fn create_directory(&self, path: &Path) -> Result<(), AccessError> {
            let path = normalize_path(path);
            self.check_failure("create_directory", &path)?;
            let mut state = self.write_state();
            if state.files.contains_key(&path) {
                return Err(AccessError::Fs(FsError::with_code(
                    "create_directory",
                    path,
                    "FileExists",
                    &self.codes,
                )));
            }
            add_dir_recursive(&mut state.dirs, &path);
            state
                .operations
                .push(format!("create_directory {}", path.display()));
            Ok(())
        }

        async fn write_file(&self, path: &Path, content: &str) -> Result<(), AccessError> {
            let path = normalize_path(path);
            self.check_failure("write_file", &path)?;
            let mut state = self.write_state();
            let parent_exists = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => state.dirs.contains(parent),
                _ => true,
            };
            if !parent_exists {
                return Err(self.not_found("write_file", &path));
            }
            state.operations.push(format!("write_file {}", path.display()));
            state.files.insert(path, content.to_string());
            Ok(())
        }

        async fn read_file(&self, path: &Path) -> Result<String, AccessError> {
            let path = normalize_path(path);
            self.check_failure("read_file", &path)?;
            self.read_state()
                .files
                .get(&path)
                .cloned()
                .ok_or_else(|| self.not_found("read_file", &path))
        }

        async fn stat(&self, path: &Path) -> Result<FileKind, AccessError> {
            let path = normalize_path(path);
            self.check_failure("stat", &path)?;
            let state = self.read_state();
            if state.files.contains_key(&path) {
                Ok(FileKind::File)
            } else if state.dirs.contains(&path) {
                Ok(FileKind::Directory)
            } else {
                Err(self.not_found("stat", &path))
            }
        }

        fn not_found_codes(&self) -> &NotFoundCodes {
            &self.codes
        }
    }

    fn add_dir_recursive(dirs: &mut HashSet<PathBuf>, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        dirs.insert(path.to_path_buf());
        if let Some(parent) = path.parent() {
            add_dir_recursive(dirs, parent);
        }
    }

    /// Normalize a path for consistent lookups.
    ///
    /// Removes `.` components and resolves `..` lexically.
    fn normalize_path(path: &Path) -> PathBuf {
        use std::path::Component;

        let mut result = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(s) => result.push(s),
                Component::RootDir => result.push(component.as_os_str()),
                Component::Prefix(p) => result.push(p.as_os_str()),
            }
        }
        result
    }

}

#[cfg(test)]
mod tests {
    use super::mock::{InjectedFailure, MemoryFileAccessor};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_not_found_codes() {
        let codes = NotFoundCodes::default();
        for code in ["FileNotFound", "EntryNotFound", "ENOENT"] {
            assert!(codes.contains(code), "{} should be a not-found code", code);
            assert_eq!(codes.classify(code), FsErrorKind::NotFound);
        }
        assert!(!codes.contains("EISDIR"));
        assert_eq!(codes.classify("EISDIR"), FsErrorKind::Other);
        assert_eq!(codes.classify("EACCES"), FsErrorKind::PermissionDenied);
        assert_eq!(codes.classify("NoPermissions"), FsErrorKind::PermissionDenied);
    }

    #[test]
    fn test_register_extends_codes() {
        let mut codes = NotFoundCodes::default();
        assert_eq!(codes.classify("NoSuchKey"), FsErrorKind::Other);
        codes.register("NoSuchKey");
        assert_eq!(codes.classify("NoSuchKey"), FsErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_is_not_found_error_for_each_known_spelling() {
        let fs = MemoryFileAccessor::new();
        for code in DEFAULT_NOT_FOUND_CODES {
            let path = format!("/{}.txt", code);
            fs.fail_with(&path, InjectedFailure::Fs(code.to_string()));
            let err = fs.read_file(Path::new(&path)).await.unwrap_err();
            assert!(fs.is_not_found_error(&err), "{} should be not-found", code);
        }

        fs.fail_with("/other.txt", InjectedFailure::Fs("EBUSY".to_string()));
        let err = fs.read_file(Path::new("/other.txt")).await.unwrap_err();
        assert!(!fs.is_not_found_error(&err));
    }

    #[tokio::test]
    async fn test_host_registered_code_is_not_found() {
        let mut codes = NotFoundCodes::default();
        codes.register("NoSuchKey");
        let fs = MemoryFileAccessor::with_not_found_codes(codes);
        fs.fail_with("/remote.txt", InjectedFailure::Fs("NoSuchKey".to_string()));

        let err = fs.read_file(Path::new("/remote.txt")).await.unwrap_err();
        assert_eq!(err.fs_kind(), Some(FsErrorKind::NotFound));
        assert!(fs.is_not_found_error(&err));
    }

    #[tokio::test]
    async fn test_non_fs_error_is_not_not_found() {
        let fs = MemoryFileAccessor::new();
        fs.fail_with("/x.txt", InjectedFailure::Host("ENOENT lookalike".to_string()));
        let err = fs.read_file(Path::new("/x.txt")).await.unwrap_err();
        assert!(!fs.is_not_found_error(&err));
    }

    #[tokio::test]
    async fn test_file_exists_missing_returns_false() {
        let fs = MemoryFileAccessor::new();
        assert!(!fs.file_exists(Path::new("/missing.txt")).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_exists_swallows_any_fs_error() {
        let fs = MemoryFileAccessor::new();
        fs.fail_with("/locked.txt", InjectedFailure::Fs("EACCES".to_string()));
        assert!(!fs.file_exists(Path::new("/locked.txt")).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_exists_reraises_host_errors() {
        let fs = MemoryFileAccessor::new();
        fs.fail_with("/broken.txt", InjectedFailure::Host("transport closed".to_string()));
        let err = fs.file_exists(Path::new("/broken.txt")).await.unwrap_err();
        assert!(matches!(err, AccessError::Other(_)));
        assert_eq!(err.to_string(), "transport closed");
    }

    #[tokio::test]
    async fn test_tokio_read_write_and_exists() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dicts");
        let file = dir.join("words.txt");
        let fs = TokioFileAccessor::new();

        assert!(!fs.file_exists(&file).await.unwrap());
        fs.create_directory(&dir).await.unwrap();
        fs.create_directory(&dir).await.unwrap();
        fs.write_file(&file, "alpha\nbeta\n").await.unwrap();

        assert!(fs.file_exists(&file).await.unwrap());
        assert_eq!(fs.stat(&dir).await.unwrap(), FileKind::Directory);
        assert_eq!(fs.read_file(&file).await.unwrap(), "alpha\nbeta\n");
    }

    #[tokio::test]
    async fn test_tokio_missing_file_classified_not_found() {
        let temp = TempDir::new().unwrap();
        let fs = TokioFileAccessor::new();
        let err = fs
            .read_file(&temp.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("ENOENT"));
        assert_eq!(err.fs_kind(), Some(FsErrorKind::NotFound));
        assert!(fs.is_not_found_error(&err));
    }
}
