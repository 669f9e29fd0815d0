//! Stereo ADPCM decoder
//!
//! Reconstructs interleaved 16-bit stereo PCM from packed nibble pairs.
//! Each input byte is one whole stereo frame, so transport message
//! boundaries never split a frame.

use crate::codec::state::StereoState;

/// Stereo ADPCM decoder with running predictor state
#[derive(Debug, Clone, Default)]
pub struct AdpcmDecoder {
    state: StereoState,
    /// Stereo frames decoded since the last stats reset
    frames_decoded: u64,
    /// Decode calls since the last stats reset
    calls: u64,
}

impl AdpcmDecoder {
    /// Create a decoder in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both channels to the start-of-stream state.
    ///
    /// Call once before the first chunk of every independent stream.
    pub fn reset(&mut self) {
        tracing::debug!("ADPCM decoder reset");
        self.state.reset();
    }

    /// Decode packed bytes into interleaved stereo samples
    ///
    /// High nibble is the left code, low nibble the right code. The output
    /// holds `data.len() * 2` samples.
    pub fn decode(&mut self, data: &[u8]) -> Vec<i16> {
        let mut out = Vec::with_capacity(data.len() * 2);
        self.decode_into(data, &mut out);
        out
    }

    /// Decode packed bytes, appending interleaved samples to `out`
    pub fn decode_into(&mut self, data: &[u8], out: &mut Vec<i16>) {
        self.state.mark_streaming();
        out.reserve(data.len() * 2);
        for &byte in data {
            out.push(self.state.left.decode_code(byte >> 4));
            out.push(self.state.right.decode_code(byte & 0x0F));
        }

        self.frames_decoded += data.len() as u64;
        self.calls += 1;
    }

    /// Current codec state
    pub fn state(&self) -> &StereoState {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> DecoderStats {
        DecoderStats {
            frames_decoded: self.frames_decoded,
            samples_produced: self.frames_decoded * 2,
            calls: self.calls,
        }
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.frames_decoded = 0;
        self.calls = 0;
    }
}

/// Decoder statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub frames_decoded: u64,
    pub samples_produced: u64,
    pub calls: u64,
}
