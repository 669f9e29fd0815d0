//! Error types for the stereo ADPCM codec and its stream workers

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Interleaved stereo input must hold one sample per channel per frame
    #[error("Invalid input length: {0} samples is not a whole number of stereo frames")]
    InvalidInputLength(usize),

    #[error("Unaligned PCM data: {0} bytes is not a whole number of 16-bit samples")]
    UnalignedPcm(usize),
}

/// Stream worker errors
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),

    #[error("Output channel disconnected")]
    Disconnected,

    #[error("Worker thread panicked")]
    Panicked,
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
