//! Stereo ADPCM codec
//!
//! A fixed-point adaptive differential codec that maps each 16-bit stereo
//! PCM frame to one byte holding two 4-bit codes. Encoder and decoder keep
//! independent running state; use one instance per stream direction.

pub mod decoder;
pub mod encoder;
pub mod state;
pub mod tables;

pub use decoder::{AdpcmDecoder, DecoderStats};
pub use encoder::{AdpcmEncoder, EncoderStats, PackingMode};
pub use state::{ChannelState, StereoState, StreamPhase};
