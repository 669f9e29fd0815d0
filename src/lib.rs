//! # Stereo ADPCM
//!
//! Stateful fixed-point codec between interleaved 16-bit stereo PCM and a
//! packed 4-bit-per-channel adaptive differential code stream.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────── SENDING SIDE ────────────────────────────┐
//! │  ┌──────────────┐    ┌──────────────────┐    ┌────────────────────┐  │
//! │  │ Recording    │───▶│ ChunkAccumulator │───▶│ AdpcmEncoder       │  │
//! │  │ (i16 L/R)    │    │ (2048 samples)   │    │ 1 byte per frame   │  │
//! │  └──────────────┘    └──────────────────┘    └─────────┬──────────┘  │
//! └────────────────────────────────────────────────────────┼─────────────┘
//!                                                          │ transport
//! ┌──────────────────────────── RECEIVING SIDE ────────────┼─────────────┐
//! │  ┌──────────────┐    ┌──────────────────┐              │             │
//! │  │ Playback     │◀───│ AdpcmDecoder     │◀─────────────┘             │
//! │  │ (i16 L/R)    │    │ 2 samples / byte │                            │
//! │  └──────────────┘    └──────────────────┘                            │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each direction owns its own codec instance. Call `reset()` once before
//! every independent stream; chunked calls within a stream carry state over
//! and produce the same output as a single call.
//!
//! ```
//! use stereo_adpcm::codec::{AdpcmDecoder, AdpcmEncoder, PackingMode};
//!
//! let mut encoder = AdpcmEncoder::new(PackingMode::Stereo);
//! let mut decoder = AdpcmDecoder::new();
//! encoder.reset();
//! decoder.reset();
//!
//! let encoded = encoder.encode(&[0, 0]).unwrap();
//! assert_eq!(&encoded[..], &[0x88]);
//! assert_eq!(decoder.decode(&encoded), vec![1, 1]);
//! ```

pub mod audio;
pub mod codec;
pub mod config;
pub mod error;
pub mod stream;

pub use codec::{AdpcmDecoder, AdpcmEncoder, PackingMode};
pub use config::StreamConfig;
pub use error::{CodecError, Error, Result};

/// Application-wide constants
pub mod constants {
    /// Default sample rate in Hz
    pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

    /// Stereo; the codec handles nothing else
    pub const CHANNELS: u16 = 2;

    /// Default encoder chunk in interleaved samples (1024 stereo frames)
    pub const DEFAULT_CHUNK_SAMPLES: usize = 2048;

    /// Default bounded queue capacity between worker threads (in chunks)
    pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
}
