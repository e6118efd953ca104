//! Cover art export.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::cover::{cover_from_picture, write_cover};
use crate::error::Error;
use crate::id3;
use crate::source::{DefaultSource, Source, fetch_tag_bytes};

/// Write the embedded cover of `source` into `out`
pub fn cmd_cover(
    rt: &Runtime,
    config: &Config,
    source: &str,
    out: &Path,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let source = Source::parse(source);
    let fetcher = DefaultSource::new(&config.fetch)?;
    let bytes = rt.block_on(fetch_tag_bytes(&fetcher, &source, &config.fetch))?;

    let cover = id3::extract(&bytes)
        .picture
        .as_ref()
        .and_then(|p| cover_from_picture(p, &config.display.default_mime))
        .ok_or_else(|| Error::no_cover(source.to_string()))?;

    let stem = name.map(str::to_string).unwrap_or_else(|| source.stem());
    let path = write_cover(&cover, out, &stem)?;

    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TagBuilder, sample_jpeg, sample_mp3};
    use tempfile::tempdir;

    #[test]
    fn test_cover_written_under_source_stem() {
        let dir = tempdir().unwrap();
        let song = dir.path().join("smooth-operator.mp3");
        std::fs::write(&song, sample_mp3()).unwrap();
        let out = dir.path().join("covers");

        let rt = Runtime::new().unwrap();
        cmd_cover(&rt, &Config::default(), song.to_str().unwrap(), &out, None).unwrap();

        let written = out.join("smooth-operator.jpg");
        assert_eq!(std::fs::read(written).unwrap(), sample_jpeg());
    }

    #[test]
    fn test_missing_cover_is_error() {
        let dir = tempdir().unwrap();
        let song = dir.path().join("plain.mp3");
        std::fs::write(&song, TagBuilder::new().text(*b"TIT2", "No Art").build()).unwrap();
        let out = dir.path().join("covers");

        let rt = Runtime::new().unwrap();
        let err = cmd_cover(&rt, &Config::default(), song.to_str().unwrap(), &out, Some("x"))
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoCover(_))));
        assert!(!out.join("x.jpg").exists());
    }
}
