//! Show the now-playing card for one source.

use tokio::runtime::Runtime;

use super::print_now_playing;
use crate::config::{Config, FetchConfig};
use crate::display::NowPlaying;
use crate::id3;
use crate::source::{DefaultSource, Source, fetch_tag_bytes};

/// Fetch a source, extract its tags and print the result
pub fn cmd_inspect(
    rt: &Runtime,
    config: &Config,
    source: &str,
    limit: Option<usize>,
    json: bool,
    data_uri: bool,
    placeholder_on_error: bool,
) -> anyhow::Result<()> {
    let source = Source::parse(source);
    let fetch = FetchConfig {
        prefix_bytes: limit.unwrap_or(config.fetch.prefix_bytes),
        ..config.fetch.clone()
    };

    let fetcher = DefaultSource::new(&fetch)?;
    let now = match rt.block_on(fetch_tag_bytes(&fetcher, &source, &fetch)) {
        Ok(bytes) => {
            let tags = id3::extract(&bytes);
            if tags.is_empty() {
                tracing::info!("No ID3v2 tags found in {}", source);
            }
            NowPlaying::resolve(tags, &config.display)
        }
        Err(e) if placeholder_on_error => {
            tracing::warn!("Could not read {}: {}", source, e);
            NowPlaying::placeholder(&config.display)
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&now.summary())?);
    } else {
        println!("Source: {}", source);
        print_now_playing(&now);
    }

    if data_uri {
        match &now.cover {
            Some(cover) => println!("{}", cover.to_data_uri()),
            None => eprintln!("No embedded cover art in {}", source),
        }
    }

    Ok(())
}
