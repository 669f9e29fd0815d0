//! ADPCM Encoder
//!
//! Reads raw interleaved 16-bit little-endian stereo PCM from stdin and
//! writes packed ADPCM to stdout, one byte per stereo frame.
//!
//! Usage: `adpcm-encoder [CONFIG.toml] [--stereo]`

use anyhow::{Context, Result};
use bytes::BytesMut;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stereo_adpcm::{
    audio::{read_retrying, samples_from_le_bytes, ChunkAccumulator, PcmChunk},
    codec::{AdpcmEncoder, PackingMode},
    config::StreamConfig,
    constants::CHANNELS,
};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the encoded stream
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config_path = None;
    let mut stereo = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--stereo" => stereo = true,
            _ => config_path = Some(arg),
        }
    }

    let mut config = match config_path {
        Some(path) => StreamConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => StreamConfig::load_or_default()?,
    };
    if stereo {
        config.packing = PackingMode::Stereo;
    }

    tracing::info!(
        "Encoding {}Hz, {} channels, {} samples/chunk ({:.1}ms), {:?} packing",
        config.sample_rate,
        CHANNELS,
        config.chunk_samples,
        config.chunk_duration_ms(),
        config.packing
    );

    let mut encoder = AdpcmEncoder::new(config.packing);
    encoder.reset();
    let mut accumulator = ChunkAccumulator::new(config.chunk_samples);

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut read_buffer = vec![0u8; config.chunk_samples * 2];
    let mut pending = BytesMut::with_capacity(read_buffer.len() + 1);

    loop {
        let n = read_retrying(&mut stdin, &mut read_buffer).context("reading PCM from stdin")?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&read_buffer[..n]);

        // Keep a split sample for the next read
        let whole = pending.len() & !1;
        let samples = samples_from_le_bytes(&pending.split_to(whole))?;
        for chunk in accumulator.push(&samples) {
            write_chunk(&mut encoder, &chunk, &mut stdout)?;
        }
    }

    if !pending.is_empty() {
        tracing::warn!("Ignoring {} trailing byte(s) of PCM input", pending.len());
    }
    if let Some(tail) = accumulator.flush() {
        write_chunk(&mut encoder, &tail, &mut stdout)?;
    }
    stdout.flush()?;

    let stats = encoder.stats();
    tracing::info!(
        "Done: {} frames encoded, {} bytes written, {} chunks",
        stats.frames_encoded,
        stats.bytes_produced,
        stats.calls
    );
    Ok(())
}

fn write_chunk(encoder: &mut AdpcmEncoder, chunk: &PcmChunk, out: &mut impl Write) -> Result<()> {
    let encoded = encoder.encode(&chunk.samples)?;
    out.write_all(&encoded).context("writing ADPCM to stdout")?;
    Ok(())
}
