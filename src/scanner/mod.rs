//! Directory scanning for MP3 files and batch tag extraction.

use futures::stream::Stream;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::id3::{self, ExtractedTags};
use crate::source::{initial_len, read_prefix, refetch_len};

/// Scans the given root directory recursively for MP3 files.
///
/// Matches the `mp3` extension case-insensitively. Returns a Stream of PathBufs.
pub fn scan(root: PathBuf) -> impl Stream<Item = PathBuf> {
    let (tx, rx) = mpsc::channel(100);

    // Spawn a blocking task to perform the synchronous file system traversal
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_mp3(entry.path()) {
                // If the receiver is dropped, blocking_send fails and we stop scanning.
                if tx.blocking_send(entry.path().to_path_buf()).is_err() {
                    break;
                }
            }
        }
    });

    // Convert the mpsc Receiver into a Stream
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|path| (path, rx))
    })
}

/// Check if a path has an mp3 extension
pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// Extract tags from every file in parallel. Results keep the input order.
pub fn extract_all(
    paths: &[PathBuf],
    config: &FetchConfig,
) -> Vec<(PathBuf, Result<ExtractedTags>)> {
    paths
        .par_iter()
        .map(|path| {
            let tags = read_tag_bytes(path, config).map(|bytes| id3::extract(&bytes));
            (path.clone(), tags)
        })
        .collect()
}

/// Blocking counterpart of [`crate::source::fetch_tag_bytes`] for one file.
fn read_tag_bytes(path: &Path, config: &FetchConfig) -> Result<Vec<u8>> {
    let bytes = read_prefix(path, Some(initial_len(config)))?;
    match refetch_len(&bytes, config) {
        Some(limit) => read_prefix(path, Some(limit)),
        None => Ok(bytes),
    }
}
