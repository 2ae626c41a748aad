//! `cargo xtask inspect <token>`: decode a track token and print it.
//!
//! Set `RUST_LOG=trackinfo=trace` to see header and dispatch events.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use trackinfo::{peek_header, TrackInfo};

pub fn run(token: &str, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let header = peek_header(token).context("Failed to read track header")?;
    let info = trackinfo::decode(token).context("Failed to decode track token")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        format!(
            "🎵 Track info v{} ({} payload bytes)",
            header.version, header.payload_len
        )
        .cyan()
        .bold()
    );
    println!();
    for (field, value) in rows(&info) {
        println!("  {:<12} {}", field.dimmed(), value);
    }
    println!();

    Ok(())
}

fn rows(info: &TrackInfo) -> Vec<(&'static str, String)> {
    let none = || "-".to_string();
    let mut rows = vec![
        ("flags", info.flags.to_string()),
        ("title", info.title.clone()),
        ("author", info.author.clone()),
        ("length", format!("{} ms", info.length)),
        ("identifier", info.identifier.clone()),
        ("stream", info.is_stream.to_string()),
        ("uri", info.uri.clone().unwrap_or_else(none)),
        ("source", info.source.clone()),
        ("position", format!("{} ms", info.position)),
    ];
    if let Some(probe) = &info.probe_info {
        rows.push(("probe", probe.name.clone()));
        rows.push(("parameters", probe.parameters.clone().unwrap_or_else(none)));
    }
    if let Some(spotify) = &info.spotify_info {
        rows.push(("isrc", spotify.isrc.clone().unwrap_or_else(none)));
        rows.push(("thumbnail", spotify.thumbnail.clone().unwrap_or_else(none)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::rows;
    use trackinfo::{decode, encode_latest, PartialTrack};

    #[test]
    fn rows_include_probe_fields_for_http() {
        let token = encode_latest(
            &PartialTrack::new()
                .with_title("t")
                .with_source("http")
                .with_probe_info("mp3|rate=44100"),
        )
        .unwrap();
        let info = decode(token.as_str()).unwrap();
        let rows = rows(&info);
        assert!(rows.contains(&("probe", "mp3".to_string())));
        assert!(rows.contains(&("parameters", "rate=44100".to_string())));
        assert!(rows.contains(&("uri", "-".to_string())));
    }
}
