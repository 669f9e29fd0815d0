//! ADPCM Decoder
//!
//! Reads packed ADPCM from stdin and writes raw interleaved 16-bit
//! little-endian stereo PCM to stdout.
//!
//! Usage: `adpcm-decoder [CONFIG.toml]`

use anyhow::{Context, Result};
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stereo_adpcm::{
    audio::{read_retrying, samples_to_le_bytes},
    codec::AdpcmDecoder, config::StreamConfig, constants::CHANNELS,
};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the decoded PCM
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StreamConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => StreamConfig::load_or_default()?,
    };

    tracing::info!(
        "Decoding to {}Hz, {} channels",
        config.sample_rate,
        CHANNELS
    );

    let mut decoder = AdpcmDecoder::new();
    decoder.reset();

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    // Every byte is a whole stereo frame, so reads can be any size
    let mut read_buffer = vec![0u8; config.chunk_frames()];
    let mut samples = Vec::with_capacity(config.chunk_samples);

    loop {
        let n = read_retrying(&mut stdin, &mut read_buffer).context("reading ADPCM from stdin")?;
        if n == 0 {
            break;
        }

        samples.clear();
        decoder.decode_into(&read_buffer[..n], &mut samples);
        stdout
            .write_all(&samples_to_le_bytes(&samples))
            .context("writing PCM to stdout")?;
    }
    stdout.flush()?;

    let stats = decoder.stats();
    tracing::info!(
        "Done: {} frames decoded, {} samples written",
        stats.frames_decoded,
        stats.samples_produced
    );
    Ok(())
}
