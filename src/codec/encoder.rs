//! Stereo ADPCM encoder
//!
//! Converts interleaved 16-bit stereo PCM into one byte per stereo frame.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::state::StereoState;
use crate::error::CodecError;

/// How the encoder packs the two channel codes of a frame into one byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Right channel code in both nibbles.
    ///
    /// This is the byte layout deployed peers emit. The left channel code
    /// is computed (and drives the left predictor) but never transmitted.
    #[default]
    Legacy,
    /// Left code in the high nibble, right code in the low nibble
    Stereo,
}

impl PackingMode {
    #[inline]
    pub fn pack(self, left: u8, right: u8) -> u8 {
        match self {
            PackingMode::Legacy => (right << 4) | right,
            PackingMode::Stereo => (left << 4) | right,
        }
    }
}

/// Stereo ADPCM encoder with running predictor state
#[derive(Debug, Clone, Default)]
pub struct AdpcmEncoder {
    state: StereoState,
    packing: PackingMode,
    /// Stereo frames encoded since the last stats reset
    frames_encoded: u64,
    /// Encode calls since the last stats reset
    calls: u64,
}

impl AdpcmEncoder {
    /// Create an encoder in the idle state with the given packing
    pub fn new(packing: PackingMode) -> Self {
        Self {
            packing,
            ..Self::default()
        }
    }

    /// Reset both channels to the start-of-stream state.
    ///
    /// Call once before the first chunk of every independent stream.
    pub fn reset(&mut self) {
        tracing::debug!("ADPCM encoder reset");
        self.state.reset();
    }

    /// Encode interleaved stereo samples into a new buffer
    ///
    /// Input is `[l0, r0, l1, r1, ...]` and must have even length; the
    /// output holds `samples.len() / 2` bytes.
    pub fn encode(&mut self, samples: &[i16]) -> Result<Bytes, CodecError> {
        let mut out = BytesMut::with_capacity(samples.len() / 2);
        self.encode_into(samples, &mut out)?;
        Ok(out.freeze())
    }

    /// Encode interleaved stereo samples, appending to `out`
    ///
    /// On error neither `out` nor the codec state is modified.
    pub fn encode_into(&mut self, samples: &[i16], out: &mut BytesMut) -> Result<(), CodecError> {
        if samples.len() % 2 != 0 {
            return Err(CodecError::InvalidInputLength(samples.len()));
        }

        self.state.mark_streaming();
        out.reserve(samples.len() / 2);
        for frame in samples.chunks_exact(2) {
            let left = self.state.left.encode_sample(frame[0]);
            let right = self.state.right.encode_sample(frame[1]);
            out.put_u8(self.packing.pack(left, right));
        }

        self.frames_encoded += (samples.len() / 2) as u64;
        self.calls += 1;
        Ok(())
    }

    /// Current codec state
    pub fn state(&self) -> &StereoState {
        &self.state
    }

    /// Packing applied to output bytes
    pub fn packing(&self) -> PackingMode {
        self.packing
    }

    /// Get statistics
    pub fn stats(&self) -> EncoderStats {
        EncoderStats {
            frames_encoded: self.frames_encoded,
            // one byte per stereo frame
            bytes_produced: self.frames_encoded,
            calls: self.calls,
        }
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.frames_encoded = 0;
        self.calls = 0;
    }
}

/// Encoder statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    pub frames_encoded: u64,
    pub bytes_produced: u64,
    pub calls: u64,
}
