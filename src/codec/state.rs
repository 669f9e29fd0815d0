//! Per-channel predictor state
//!
//! Each stereo channel carries a step index and a predicted sample. Both
//! evolve sample by sample and persist across calls, so a stream may be fed
//! to the codec in chunks of any size. State is reset explicitly between
//! independent streams.

use crate::codec::tables::{MAX_STEP_INDEX, STEP_INDEX_TABLE, STEP_TABLE};

/// Largest nibble code
pub const MAX_CODE: i32 = 15;

/// ADPCM state for a single channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    step_index: u8,
    predicted: i16,
}

impl ChannelState {
    /// Create a channel state at the start of a stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to step index 0 and predicted sample 0
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.predicted = 0;
    }

    /// Current index into the step table, always in `0..=88`
    pub fn step_index(&self) -> u8 {
        self.step_index
    }

    /// Current running reconstruction of the channel
    pub fn predicted(&self) -> i16 {
        self.predicted
    }

    /// Current quantization step size
    pub fn step(&self) -> i32 {
        i32::from(STEP_TABLE[usize::from(self.step_index)])
    }

    /// Whether the channel holds its reset values.
    ///
    /// A stream can return to these values mid-flight, so this says nothing
    /// about whether the channel has processed samples.
    pub fn is_at_reset(&self) -> bool {
        self.step_index == 0 && self.predicted == 0
    }

    /// Quantize one sample against the prediction and advance the state.
    ///
    /// Returns the 4-bit code in `0..=15`.
    pub fn encode_sample(&mut self, sample: i16) -> u8 {
        let step = self.step();
        let delta = i32::from(sample) - i32::from(self.predicted);
        // Truncating division; a negative numerator always clamps to 0.
        let code = ((delta * 4 + step * 8) / step).clamp(0, MAX_CODE);
        self.advance(code, step);
        code as u8
    }

    /// Reconstruct one sample from a 4-bit code and advance the state.
    ///
    /// Only the low nibble of `code` is used.
    pub fn decode_code(&mut self, code: u8) -> i16 {
        let step = self.step();
        self.advance(i32::from(code & 0x0F), step);
        self.predicted
    }

    /// Shared predictor and step-index update, identical on both paths
    #[inline]
    fn advance(&mut self, code: i32, step: i32) {
        let predicted = i32::from(self.predicted) + ((code * step) >> 2) - ((15 * step) >> 3);
        self.predicted = clamp_sample(predicted);
        self.step_index = clamp_step_index(
            i32::from(self.step_index) + i32::from(STEP_INDEX_TABLE[code as usize]),
        );
    }
}

/// Lifecycle of one stream direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamPhase {
    /// Reset and not yet fed
    #[default]
    Idle,
    /// At least one encode or decode call since the last reset
    Streaming,
}

/// Running state for both channels of one stream direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StereoState {
    pub left: ChannelState,
    pub right: ChannelState,
    phase: StreamPhase,
}

impl StereoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both channels and return to [`StreamPhase::Idle`]
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.phase = StreamPhase::Idle;
    }

    /// Record an encode or decode call
    pub fn mark_streaming(&mut self) {
        self.phase = StreamPhase::Streaming;
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// No encode or decode call since the last reset
    pub fn is_idle(&self) -> bool {
        self.phase == StreamPhase::Idle
    }
}

/// Saturate a wide intermediate to the 16-bit sample range
#[inline]
pub fn clamp_sample(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Saturate a wide intermediate to the valid step index range
#[inline]
pub fn clamp_step_index(value: i32) -> u8 {
    value.clamp(0, i32::from(MAX_STEP_INDEX)) as u8
}
