//! Upload directory management.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Gives up on disambiguating a name after this many attempts.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("Could not create the directory where the uploaded files will be stored: {0}")]
    Init(#[source] std::io::Error),

    #[error("Filename contains invalid path sequence: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Could not store file {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates the upload directory if needed.
    pub fn new(upload_dir: impl AsRef<Path>) -> Result<Self, FileStorageError> {
        let dir = upload_dir.as_ref();
        std::fs::create_dir_all(dir).map_err(FileStorageError::Init)?;
        let root = dir.canonicalize().map_err(FileStorageError::Init)?;

        info!(path = %root.display(), "File storage ready");
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `content` under a sanitized, non-colliding name and returns that name.
    pub async fn store(
        &self,
        original_name: &str,
        content: &[u8],
    ) -> Result<String, FileStorageError> {
        let clean = sanitize_file_name(original_name)?;
        let (name, file) = self.create_unique(&clean).await?;
        self.write_or_discard(&name, file, content).await?;

        debug!(file = %name, bytes = content.len(), "Stored upload");
        Ok(name)
    }

    /// Resolves a stored file, refusing anything outside the storage root.
    pub async fn load(&self, filename: &str) -> Result<PathBuf, FileStorageError> {
        let not_found = || FileStorageError::NotFound(filename.to_string());

        if filename.is_empty() || filename.contains("..") {
            return Err(not_found());
        }

        let resolved = tokio::fs::canonicalize(self.root.join(filename))
            .await
            .map_err(|_| not_found())?;

        if !resolved.starts_with(&self.root) || !resolved.is_file() {
            return Err(not_found());
        }

        Ok(resolved)
    }

    /// Writes `content`; a failed write removes the partial file.
    async fn write_or_discard<W>(
        &self,
        name: &str,
        mut file: W,
        content: &[u8],
    ) -> Result<(), FileStorageError>
    where
        W: AsyncWrite + Unpin,
    {
        let written = async {
            file.write_all(content).await?;
            file.flush().await
        }
        .await;

        let Err(source) = written else {
            return Ok(());
        };

        drop(file);
        if let Err(e) = tokio::fs::remove_file(self.root.join(name)).await {
            warn!(file = %name, error = %e, "Failed to remove partial upload");
        }

        Err(FileStorageError::Io {
            name: name.to_string(),
            source,
        })
    }

    async fn create_unique(
        &self,
        name: &str,
    ) -> Result<(String, tokio::fs::File), FileStorageError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = numbered_name(name, attempt);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&candidate))
                .await;

            match opened {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(source) => {
                    return Err(FileStorageError::Io {
                        name: candidate,
                        source,
                    });
                }
            }
        }

        Err(FileStorageError::Io {
            name: name.to_string(),
            source: std::io::Error::new(ErrorKind::AlreadyExists, "no free file name left"),
        })
    }
}

/// Keeps the last path component and rejects traversal sequences.
pub fn sanitize_file_name(original: &str) -> Result<String, FileStorageError> {
    if original.contains("..") {
        return Err(FileStorageError::InvalidName(original.to_string()));
    }

    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." {
        return Err(FileStorageError::InvalidName(original.to_string()));
    }

    Ok(name.to_string())
}

/// `report.pdf` -> `report-2.pdf`; attempt 0 keeps the name.
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{attempt}.{ext}"),
        _ => format!("{name}-{attempt}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Accepts nothing, as a full disk would.
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn temp_storage() -> FileStorage {
        let dir = std::env::temp_dir().join(format!("restapi-files-{}", uuid::Uuid::new_v4()));
        FileStorage::new(dir).unwrap()
    }

    #[test]
    fn sanitize_keeps_last_component() {
        assert_eq!(sanitize_file_name("report.pdf").unwrap(), "report.pdf");
        assert_eq!(sanitize_file_name("C:\\docs\\report.pdf").unwrap(), "report.pdf");
        assert_eq!(sanitize_file_name("/tmp/x/report.pdf").unwrap(), "report.pdf");
        assert!(sanitize_file_name("../etc/passwd").is_err());
        assert!(sanitize_file_name("dir/").is_err());
        assert!(sanitize_file_name("").is_err());
    }

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name("report.pdf", 0), "report.pdf");
        assert_eq!(numbered_name("report.pdf", 2), "report-2.pdf");
        assert_eq!(numbered_name("archive.tar.gz", 1), "archive.tar-1.gz");
        assert_eq!(numbered_name("README", 1), "README-1");
        assert_eq!(numbered_name(".env", 1), ".env-1");
    }

    #[tokio::test]
    async fn store_disambiguates_and_loads() {
        let storage = temp_storage();

        let first = storage.store("notes.txt", b"one").await.unwrap();
        let second = storage.store("nested/notes.txt", b"two").await.unwrap();
        assert_eq!(first, "notes.txt");
        assert_eq!(second, "notes-1.txt");

        let path = storage.load(&second).await.unwrap();
        assert_eq!(tokio::fs::read(path).await.unwrap(), b"two");

        std::fs::remove_dir_all(storage.root()).ok();
    }

    #[tokio::test]
    async fn load_rejects_escape_and_missing() {
        let storage = temp_storage();

        assert!(matches!(
            storage.load("../Cargo.toml").await,
            Err(FileStorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.load("missing.bin").await,
            Err(FileStorageError::NotFound(_))
        ));

        std::fs::remove_dir_all(storage.root()).ok();
    }

    #[tokio::test]
    async fn failed_write_leaves_no_partial_file() {
        let storage = temp_storage();

        let (name, _file) = storage.create_unique("partial.bin").await.unwrap();
        assert!(storage.root().join(&name).exists());

        let result = storage.write_or_discard(&name, FullDisk, b"payload").await;
        assert!(matches!(result, Err(FileStorageError::Io { .. })));
        assert!(!storage.root().join(&name).exists());

        let stored = storage.store("partial.bin", b"payload").await.unwrap();
        assert_eq!(stored, "partial.bin");

        std::fs::remove_dir_all(storage.root()).ok();
    }
}
