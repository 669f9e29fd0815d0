//! Fixed-size PCM chunking
//!
//! Recording sources deliver interleaved stereo PCM in runs of whatever
//! size the device hands out. The encoder side cuts them into chunks of a
//! fixed, even sample count before encoding.

use crate::constants::DEFAULT_CHUNK_SAMPLES;

/// Chunk of interleaved stereo samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmChunk {
    /// Interleaved samples `[l0, r0, l1, r1, ...]`
    pub samples: Vec<i16>,
    /// Chunk sequence number within the stream
    pub sequence: u32,
}

impl PcmChunk {
    pub fn new(samples: Vec<i16>, sequence: u32) -> Self {
        Self { samples, sequence }
    }

    /// Number of stereo frames in the chunk
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    /// Chunk duration in microseconds, `None` for a zero sample rate
    pub fn duration_us(&self, sample_rate: u32) -> Option<u64> {
        (self.frames() as u64 * 1_000_000).checked_div(u64::from(sample_rate))
    }
}

/// Accumulates PCM runs and cuts them into fixed-size chunks
#[derive(Debug)]
pub struct ChunkAccumulator {
    pending: Vec<i16>,
    chunk_samples: usize,
    next_sequence: u32,
}

impl ChunkAccumulator {
    /// Create an accumulator producing chunks of `chunk_samples` samples.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_samples` is zero or odd.
    pub fn new(chunk_samples: usize) -> Self {
        assert!(
            chunk_samples > 0 && chunk_samples % 2 == 0,
            "Chunk size must be a positive whole number of stereo frames"
        );

        Self {
            pending: Vec::with_capacity(chunk_samples * 2),
            chunk_samples,
            next_sequence: 0,
        }
    }

    /// Append samples and return every chunk that is now complete
    pub fn push(&mut self, samples: &[i16]) -> Vec<PcmChunk> {
        self.pending.extend_from_slice(samples);

        let mut chunks = Vec::with_capacity(self.pending.len() / self.chunk_samples);
        while self.pending.len() >= self.chunk_samples {
            let samples: Vec<i16> = self.pending.drain(..self.chunk_samples).collect();
            chunks.push(self.next_chunk(samples));
        }
        chunks
    }

    /// Take the remaining partial chunk at end of stream.
    ///
    /// A trailing unpaired sample cannot form a stereo frame and is dropped.
    pub fn flush(&mut self) -> Option<PcmChunk> {
        if self.pending.len() % 2 != 0 {
            tracing::warn!("Dropping unpaired trailing sample at end of stream");
            self.pending.pop();
        }
        if self.pending.is_empty() {
            return None;
        }

        let samples = std::mem::take(&mut self.pending);
        Some(self.next_chunk(samples))
    }

    /// Discard buffered samples and restart sequence numbering
    pub fn reset(&mut self) {
        self.pending.clear();
        self.next_sequence = 0;
    }

    /// Samples waiting for a full chunk
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Configured chunk size in samples
    pub fn chunk_samples(&self) -> usize {
        self.chunk_samples
    }

    fn next_chunk(&mut self, samples: Vec<i16>) -> PcmChunk {
        let chunk = PcmChunk::new(samples, self.next_sequence);
        self.next_sequence = self.next_sequence.wrapping_add(1);
        chunk
    }
}

impl Default for ChunkAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SAMPLES)
    }
}
