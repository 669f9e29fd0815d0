//! Little-endian 16-bit PCM serialization
//!
//! Recording sources and playback sinks exchange PCM as raw bytes; the
//! codec works on `i16` samples.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{ErrorKind, Read};

use crate::error::CodecError;

/// Parse little-endian 16-bit samples
pub fn samples_from_le_bytes(data: &[u8]) -> Result<Vec<i16>, CodecError> {
    if data.len() % 2 != 0 {
        return Err(CodecError::UnalignedPcm(data.len()));
    }

    let mut buf = data;
    let mut samples = Vec::with_capacity(data.len() / 2);
    while buf.has_remaining() {
        samples.push(buf.get_i16_le());
    }
    Ok(samples)
}

/// Serialize samples as little-endian 16-bit PCM
pub fn samples_to_le_bytes(samples: &[i16]) -> Bytes {
    let mut out = BytesMut::with_capacity(samples.len() * 2);
    for &sample in samples {
        out.put_i16_le(sample);
    }
    out.freeze()
}

/// Read once from a raw PCM or ADPCM source, retrying on `Interrupted`.
///
/// Returns 0 at end of stream.
pub fn read_retrying(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
