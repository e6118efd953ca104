//! Batch extraction over a directory.

use futures::StreamExt;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use super::format_bytes;
use crate::config::Config;
use crate::cover::{cover_from_picture, write_cover};
use crate::display::NowPlaying;
use crate::id3::ExtractedTags;
use crate::scanner;

/// One line of JSON output
#[derive(Serialize)]
struct ScanRecord<'a> {
    path: String,
    #[serde(flatten)]
    tags: Option<&'a ExtractedTags>,
    error: Option<String>,
}

/// Extract tags from every MP3 under `path`
pub fn cmd_scan(
    rt: &Runtime,
    config: &Config,
    path: &Path,
    json: bool,
    covers: Option<&Path>,
) -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = if path.is_dir() {
        // The walk runs on a blocking task, so it must start inside the runtime
        rt.block_on(async { scanner::scan(path.to_path_buf()).collect::<Vec<_>>().await })
    } else {
        vec![path.to_path_buf()]
    };
    files.sort();
    if files.is_empty() {
        println!("No MP3 files found in {:?}", path);
        return Ok(());
    }

    tracing::info!("Extracting tags from {} files", files.len());
    let results = scanner::extract_all(&files, &config.fetch);

    let mut seen_covers = HashSet::new();
    let mut tagged = 0;
    let mut failed = 0;

    for (file, result) in &results {
        match result {
            Ok(tags) => {
                if !tags.is_empty() {
                    tagged += 1;
                }

                if let Some(dir) = covers
                    && let Some(cover) = tags
                        .picture
                        .as_ref()
                        .and_then(|p| cover_from_picture(p, &config.display.default_mime))
                {
                    let hash = cover.content_hash();
                    if seen_covers.insert(hash.clone()) {
                        write_cover(&cover, dir, &hash[..16])?;
                    }
                }

                if json {
                    let record = ScanRecord {
                        path: file.display().to_string(),
                        tags: Some(tags),
                        error: None,
                    };
                    println!("{}", serde_json::to_string(&record)?);
                } else if tags.is_empty() {
                    println!("  - {} (no tags)", file.display());
                } else {
                    let now = NowPlaying::resolve(tags.clone(), &config.display);
                    let cover = now
                        .cover
                        .as_ref()
                        .map(|c| format!(" [{} {}]", c.mime_type, format_bytes(c.len())))
                        .unwrap_or_default();
                    println!("  ✓ {}: {}{}", file.display(), now, cover);
                }
            }
            Err(e) => {
                failed += 1;
                if json {
                    let record = ScanRecord {
                        path: file.display().to_string(),
                        tags: None,
                        error: Some(e.to_string()),
                    };
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    println!("  ✗ {}: {}", file.display(), e);
                }
            }
        }
    }

    if !json {
        println!();
        println!(
            "Scanned {} files: {} tagged, {} untagged, {} errors",
            results.len(),
            tagged,
            results.len() - tagged - failed,
            failed
        );
        if let Some(dir) = covers {
            println!("Wrote {} distinct covers to {:?}", seen_covers.len(), dir);
        }
    }

    Ok(())
}
