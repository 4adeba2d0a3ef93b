//! Document root file access
//!
//! Reads whole files that live under a canonical root directory. Anything
//! resolving outside the root is treated as missing.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncReadExt;

/// Why a file could not be served.
#[derive(Debug)]
pub enum FileError {
    /// No regular file at that path inside the document root
    NotFound,
    /// The file exists but could not be read, or exceeds the size limit
    IoError(io::Error),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound => f.write_str("file not found"),
            FileError::IoError(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::NotFound => None,
            FileError::IoError(e) => Some(e),
        }
    }
}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            FileError::NotFound
        } else {
            FileError::IoError(e)
        }
    }
}

/// Reads files relative to a document root.
#[derive(Debug, Clone)]
pub struct StaticFileReader {
    root: PathBuf,
    max_file_bytes: u64,
}

impl StaticFileReader {
    /// Canonicalizes `root` once; it must exist and be a directory.
    pub async fn open(root: impl AsRef<Path>, max_file_bytes: u64) -> io::Result<Self> {
        let root = fs::canonicalize(root.as_ref()).await?;

        if !fs::metadata(&root).await?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("document root {} is not a directory", root.display()),
            ));
        }

        Ok(Self {
            root,
            max_file_bytes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Reads `path` (relative to the root) into memory.
    ///
    /// Files over the size limit are an error rather than a short read.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, FileError> {
        let resolved = self.resolve(path).await?;

        let mut file = fs::File::open(&resolved).await?;
        let meta = file.metadata().await?;

        if !meta.is_file() {
            return Err(FileError::NotFound);
        }
        if meta.len() > self.max_file_bytes {
            return Err(self.too_large(&resolved));
        }

        // The file may grow between stat and read; never take more than limit + 1.
        let mut contents = Vec::with_capacity(meta.len() as usize);
        (&mut file)
            .take(self.max_file_bytes + 1)
            .read_to_end(&mut contents)
            .await?;

        if contents.len() as u64 > self.max_file_bytes {
            return Err(self.too_large(&resolved));
        }

        Ok(contents)
    }

    async fn resolve(&self, path: &str) -> Result<PathBuf, FileError> {
        let canonical = fs::canonicalize(self.root.join(path)).await?;

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                requested = %path,
                resolved = %canonical.display(),
                "Path escapes document root, refusing"
            );
            return Err(FileError::NotFound);
        }

        Ok(canonical)
    }

    fn too_large(&self, path: &Path) -> FileError {
        FileError::IoError(io::Error::other(format!(
            "{} exceeds the {} byte file limit",
            path.display(),
            self.max_file_bytes
        )))
    }
}
