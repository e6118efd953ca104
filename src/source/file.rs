//! Local file reader.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};

/// Reads a file, or only its first bytes, on a blocking thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    /// Read `path`, at most `limit` bytes when set.
    pub async fn fetch(&self, path: &Path, limit: Option<usize>) -> Result<Vec<u8>> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_prefix(&path, limit))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?
    }
}

/// Read `path` synchronously, at most `limit` bytes when set.
///
/// Used directly by the parallel directory scan.
pub fn read_prefix(path: &Path, limit: Option<usize>) -> Result<Vec<u8>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(path));
        }
        Err(e) => return Err(Error::Io(e).context(format!("opening {}", path.display()))),
    };

    let mut data = Vec::new();
    let read = match limit {
        Some(limit) => file.take(limit as u64).read_to_end(&mut data),
        None => {
            let mut file = file;
            file.read_to_end(&mut data)
        }
    };
    read.with_context(format!("reading {}", path.display()))?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(bytes).expect("Failed to write temp file");
        file
    }

    #[tokio::test]
    async fn test_read_whole_file() {
        let file = temp_file(b"ID3 and then some");
        let data = FileFetcher.fetch(file.path(), None).await.unwrap();
        assert_eq!(data, b"ID3 and then some");
    }

    #[tokio::test]
    async fn test_read_prefix() {
        let file = temp_file(&[7u8; 1000]);
        let data = FileFetcher.fetch(file.path(), Some(10)).await.unwrap();
        assert_eq!(data, vec![7u8; 10]);
    }

    #[test]
    fn test_limit_past_end() {
        let file = temp_file(b"short");
        let data = read_prefix(file.path(), Some(4096)).unwrap();
        assert_eq!(data, b"short");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FileFetcher
            .fetch(Path::new("definitely-missing.mp3"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
