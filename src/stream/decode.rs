//! Decoder worker thread
//!
//! Owns one [`AdpcmDecoder`]. Byte buffers from the transport are decoded
//! as they arrive and the PCM is forwarded to the playback side.

use bytes::Bytes;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::codec::{AdpcmDecoder, DecoderStats};
use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::stream::{send_while_running, POLL_INTERVAL};

/// Handle to a running decoder thread
pub struct DecodeWorker {
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<DecoderStats>>,
    handle: Option<JoinHandle<Result<DecoderStats>>>,
}

impl DecodeWorker {
    /// Spawn the decoder thread.
    ///
    /// Runs until `input` is disconnected or [`stop`](Self::stop) is called.
    pub fn spawn(
        config: &StreamConfig,
        input: Receiver<Bytes>,
        output: Sender<Vec<i16>>,
    ) -> Result<Self> {
        config.validate()?;

        let running = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(Mutex::new(DecoderStats::default()));
        let running_for_loop = running.clone();
        let stats_for_loop = stats.clone();

        let handle = thread::Builder::new()
            .name("adpcm-decode".into())
            .spawn(move || -> Result<DecoderStats> {
                let mut decoder = AdpcmDecoder::new();
                decoder.reset();

                while running_for_loop.load(Ordering::Relaxed) {
                    let data = match input.recv_timeout(POLL_INTERVAL) {
                        Ok(data) => data,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    };

                    let samples = decoder.decode(&data);
                    *stats_for_loop.lock() = decoder.stats();
                    if !send_while_running(&output, samples, &running_for_loop)? {
                        break;
                    }
                }

                let stats = decoder.stats();
                tracing::debug!(
                    "Decoder worker finished: {} frames in {} buffers",
                    stats.frames_decoded,
                    stats.calls
                );
                Ok(stats)
            })
            .map_err(|e| StreamError::Spawn(e.to_string()))?;

        tracing::debug!("Decoder worker started");

        Ok(Self {
            running,
            stats,
            handle: Some(handle),
        })
    }

    /// Statistics as of the last decoded buffer
    pub fn stats(&self) -> DecoderStats {
        *self.stats.lock()
    }

    /// Check if the worker thread is still processing
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the stream to end and return the final statistics
    pub fn join(mut self) -> Result<DecoderStats> {
        self.wait()
    }

    /// Stop decoding; buffers still queued are not decoded
    pub fn stop(&mut self) -> Result<DecoderStats> {
        self.running.store(false, Ordering::SeqCst);
        self.wait()
    }

    fn wait(&mut self) -> Result<DecoderStats> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| StreamError::Panicked)?,
            None => Ok(self.stats()),
        }
    }
}

impl Drop for DecodeWorker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
