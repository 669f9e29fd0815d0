//! Thread-confined codec workers
//!
//! The surrounding application records and encodes on one thread while it
//! receives and decodes on another. Each worker owns its codec instance
//! outright; encoder and decoder state are never shared.

pub mod decode;
pub mod encode;

pub use decode::DecodeWorker;
pub use encode::EncodeWorker;

use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};

/// How often idle workers check for a stop request
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Create a bounded queue sized for worker hand-off
pub fn queue<T>(config: &StreamConfig) -> (Sender<T>, Receiver<T>) {
    bounded(config.queue_capacity)
}

/// Send on a bounded queue without blocking past a stop request.
///
/// Returns `Ok(false)` if `running` was cleared while the queue stayed full;
/// the value is dropped in that case.
pub(crate) fn send_while_running<T>(
    output: &Sender<T>,
    mut value: T,
    running: &AtomicBool,
) -> Result<bool> {
    loop {
        match output.send_timeout(value, POLL_INTERVAL) {
            Ok(()) => return Ok(true),
            Err(SendTimeoutError::Timeout(pending)) => {
                if !running.load(Ordering::Relaxed) {
                    tracing::debug!("Stop requested with output queue full, dropping buffer");
                    return Ok(false);
                }
                value = pending;
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                return Err(StreamError::Disconnected.into());
            }
        }
    }
}
