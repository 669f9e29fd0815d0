//! Encoder worker thread
//!
//! Owns one [`AdpcmEncoder`] for the lifetime of a stream. PCM runs from a
//! recording source arrive on a channel, are cut into fixed-size chunks and
//! encoded, and the packed bytes are forwarded to the transport side.

use bytes::Bytes;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::audio::buffer::{ChunkAccumulator, PcmChunk};
use crate::codec::{AdpcmEncoder, EncoderStats};
use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::stream::{send_while_running, POLL_INTERVAL};

/// Handle to a running encoder thread
pub struct EncodeWorker {
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<EncoderStats>>,
    handle: Option<JoinHandle<Result<EncoderStats>>>,
}

impl EncodeWorker {
    /// Spawn the encoder thread.
    ///
    /// The thread resets its encoder once, then runs until `input` is
    /// disconnected (flushing any partial chunk) or [`stop`](Self::stop)
    /// is called.
    pub fn spawn(
        config: &StreamConfig,
        input: Receiver<Vec<i16>>,
        output: Sender<Bytes>,
    ) -> Result<Self> {
        config.validate()?;

        let running = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(Mutex::new(EncoderStats::default()));

        let mut encoder = AdpcmEncoder::new(config.packing);
        encoder.reset();
        let accumulator = ChunkAccumulator::new(config.chunk_samples);

        let task = EncodeTask {
            encoder,
            accumulator,
            input,
            output,
            running: running.clone(),
            stats: stats.clone(),
        };

        let handle = thread::Builder::new()
            .name("adpcm-encode".into())
            .spawn(move || task.run())
            .map_err(|e| StreamError::Spawn(e.to_string()))?;

        tracing::debug!(
            "Encoder worker started: {} samples/chunk, {:?} packing",
            config.chunk_samples,
            config.packing
        );

        Ok(Self {
            running,
            stats,
            handle: Some(handle),
        })
    }

    /// Statistics as of the last encoded chunk
    pub fn stats(&self) -> EncoderStats {
        *self.stats.lock()
    }

    /// Check if the worker thread is still processing
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the stream to end and return the final statistics
    pub fn join(mut self) -> Result<EncoderStats> {
        self.wait()
    }

    /// Abort the stream, discarding any partial chunk
    pub fn stop(&mut self) -> Result<EncoderStats> {
        self.running.store(false, Ordering::SeqCst);
        self.wait()
    }

    fn wait(&mut self) -> Result<EncoderStats> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| StreamError::Panicked)?,
            None => Ok(self.stats()),
        }
    }
}

impl Drop for EncodeWorker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

struct EncodeTask {
    encoder: AdpcmEncoder,
    accumulator: ChunkAccumulator,
    input: Receiver<Vec<i16>>,
    output: Sender<Bytes>,
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<EncoderStats>>,
}

impl EncodeTask {
    fn run(mut self) -> Result<EncoderStats> {
        while self.running.load(Ordering::Relaxed) {
            match self.input.recv_timeout(POLL_INTERVAL) {
                Ok(samples) => {
                    for chunk in self.accumulator.push(&samples) {
                        if !self.encode_chunk(chunk)? {
                            break;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if let Some(tail) = self.accumulator.flush() {
                        self.encode_chunk(tail)?;
                    }
                    break;
                }
            }
        }

        let stats = self.encoder.stats();
        tracing::debug!(
            "Encoder worker finished: {} frames in {} chunks",
            stats.frames_encoded,
            stats.calls
        );
        Ok(stats)
    }

    /// Returns `false` once a stop request interrupted delivery
    fn encode_chunk(&mut self, chunk: PcmChunk) -> Result<bool> {
        let encoded = self.encoder.encode(&chunk.samples)?;
        tracing::trace!("Encoded chunk {} ({} frames)", chunk.sequence, chunk.frames());

        *self.stats.lock() = self.encoder.stats();
        send_while_running(&self.output, encoded, &self.running)
    }
}
