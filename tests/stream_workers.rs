//! Encoder and decoder worker threads

use bytes::Bytes;
use std::time::{Duration, Instant};
use stereo_adpcm::codec::{AdpcmDecoder, AdpcmEncoder, PackingMode};
use stereo_adpcm::config::StreamConfig;
use stereo_adpcm::stream::{queue, DecodeWorker, EncodeWorker};

fn test_signal(frames: usize) -> Vec<i16> {
    (0..frames)
        .flat_map(|i| {
            let t = i as f32 / 16_000.0;
            let v = (t * 330.0 * 2.0 * std::f32::consts::PI).sin() * 9000.0;
            [v as i16, (v * -0.5) as i16]
        })
        .collect()
}

/// Poll `condition` until it holds or `timeout` elapses
fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

fn small_config(packing: PackingMode) -> StreamConfig {
    StreamConfig {
        chunk_samples: 256,
        packing,
        queue_capacity: 1024,
        ..StreamConfig::default()
    }
}

#[test]
fn test_encode_worker_matches_direct_encode() {
    let config = small_config(PackingMode::Legacy);
    let samples = test_signal(1000);

    let (pcm_tx, pcm_rx) = queue::<Vec<i16>>(&config);
    let (out_tx, out_rx) = queue::<Bytes>(&config);
    let worker = EncodeWorker::spawn(&config, pcm_rx, out_tx).unwrap();

    // uneven runs, as a recording callback would deliver them
    for run in samples.chunks(330) {
        pcm_tx.send(run.to_vec()).unwrap();
    }
    drop(pcm_tx);

    let stats = worker.join().unwrap();
    let encoded: Vec<Bytes> = out_rx.iter().collect();

    // 2000 samples in 256-sample chunks: 7 full chunks plus a tail
    assert_eq!(encoded.len(), 8);
    assert!(encoded[..7].iter().all(|chunk| chunk.len() == 128));
    assert_eq!(stats.frames_encoded, 1000);
    assert_eq!(stats.calls, 8);

    let mut direct = AdpcmEncoder::new(PackingMode::Legacy);
    let expected = direct.encode(&samples).unwrap();
    assert_eq!(encoded.concat(), expected.to_vec());
}

#[test]
fn test_encode_decode_pipeline() {
    let config = small_config(PackingMode::Stereo);
    let samples = test_signal(2048);

    let (pcm_tx, pcm_rx) = queue::<Vec<i16>>(&config);
    let (wire_tx, wire_rx) = queue::<Bytes>(&config);
    let (play_tx, play_rx) = queue::<Vec<i16>>(&config);

    let encoder = EncodeWorker::spawn(&config, pcm_rx, wire_tx).unwrap();
    let decoder = DecodeWorker::spawn(&config, wire_rx, play_tx).unwrap();

    for run in samples.chunks(500) {
        pcm_tx.send(run.to_vec()).unwrap();
    }
    drop(pcm_tx);

    let encode_stats = encoder.join().unwrap();
    let decode_stats = decoder.join().unwrap();
    let played: Vec<i16> = play_rx.iter().flatten().collect();

    assert_eq!(encode_stats.frames_encoded, 2048);
    assert_eq!(decode_stats.frames_decoded, 2048);
    assert_eq!(played.len(), samples.len());

    let mut direct_encoder = AdpcmEncoder::new(PackingMode::Stereo);
    let mut direct_decoder = AdpcmDecoder::new();
    let expected = direct_decoder.decode(&direct_encoder.encode(&samples).unwrap());
    assert_eq!(played, expected);
}

#[test]
fn test_odd_tail_is_dropped() {
    let config = small_config(PackingMode::Legacy);
    let (pcm_tx, pcm_rx) = queue::<Vec<i16>>(&config);
    let (out_tx, out_rx) = queue::<Bytes>(&config);
    let worker = EncodeWorker::spawn(&config, pcm_rx, out_tx).unwrap();

    pcm_tx.send(vec![0, 0, 0]).unwrap();
    drop(pcm_tx);

    let stats = worker.join().unwrap();
    assert_eq!(stats.frames_encoded, 1);
    assert_eq!(out_rx.iter().collect::<Vec<_>>(), vec![Bytes::from_static(&[0x88])]);
}

#[test]
fn test_stop_with_open_input() {
    let config = small_config(PackingMode::Legacy);
    let (pcm_tx, pcm_rx) = queue::<Vec<i16>>(&config);
    let (out_tx, _out_rx) = queue::<Bytes>(&config);
    let mut encoder = EncodeWorker::spawn(&config, pcm_rx, out_tx).unwrap();

    let (wire_tx, wire_rx) = queue::<Bytes>(&config);
    let (play_tx, _play_rx) = queue::<Vec<i16>>(&config);
    let mut decoder = DecodeWorker::spawn(&config, wire_rx, play_tx).unwrap();

    pcm_tx.send(vec![0; 256]).unwrap();
    wire_tx.send(Bytes::from_static(&[0x88; 16])).unwrap();

    assert!(wait_until(Duration::from_secs(5), || {
        encoder.stats().frames_encoded == 128
    }));
    assert!(wait_until(Duration::from_secs(5), || {
        decoder.stats().frames_decoded == 16
    }));
    assert!(encoder.is_running());

    let stats = encoder.stop().unwrap();
    assert_eq!(stats.frames_encoded, 128);
    assert!(!encoder.is_running());
    decoder.stop().unwrap();
    assert!(!decoder.is_running());
}

#[test]
fn test_disconnected_output_is_an_error() {
    let config = small_config(PackingMode::Legacy);
    let (wire_tx, wire_rx) = queue::<Bytes>(&config);
    let (play_tx, play_rx) = queue::<Vec<i16>>(&config);
    let decoder = DecodeWorker::spawn(&config, wire_rx, play_tx).unwrap();

    drop(play_rx);
    wire_tx.send(Bytes::from_static(&[0x88])).unwrap();

    assert!(decoder.join().is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let config = StreamConfig {
        chunk_samples: 3,
        ..StreamConfig::default()
    };
    let (_pcm_tx, pcm_rx) = queue::<Vec<i16>>(&StreamConfig::default());
    let (out_tx, _out_rx) = queue::<Bytes>(&StreamConfig::default());
    assert!(EncodeWorker::spawn(&config, pcm_rx, out_tx).is_err());
}

#[test]
fn test_stop_with_full_output_queue() {
    let config = StreamConfig {
        chunk_samples: 4,
        queue_capacity: 1,
        ..StreamConfig::default()
    };

    let (pcm_tx, pcm_rx) = queue::<Vec<i16>>(&config);
    let (out_tx, out_rx) = queue::<Bytes>(&config);
    let mut encoder = EncodeWorker::spawn(&config, pcm_rx, out_tx).unwrap();

    let (wire_tx, wire_rx) = queue::<Bytes>(&config);
    let (play_tx, play_rx) = queue::<Vec<i16>>(&config);
    let mut decoder = DecodeWorker::spawn(&config, wire_rx, play_tx).unwrap();

    // four chunks and two buffers against single-slot queues nobody drains
    pcm_tx.send(vec![0; 16]).unwrap();
    wire_tx.send(Bytes::from_static(&[0x88])).unwrap();
    assert!(wait_until(Duration::from_secs(5), || out_rx.is_full()));
    wire_tx.send(Bytes::from_static(&[0x88])).unwrap();
    assert!(wait_until(Duration::from_secs(5), || play_rx.is_full()));

    let (done_tx, done_rx) = crossbeam_channel::bounded(2);
    std::thread::spawn(move || {
        let encoded = encoder.stop().map(|stats| stats.frames_encoded);
        let decoded = decoder.stop().map(|stats| stats.frames_decoded);
        let _ = done_tx.send((encoded.ok(), decoded.ok()));
    });

    let (encoded, decoded) = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("workers did not stop while their output queues were full");
    assert!(encoded.is_some_and(|frames| frames >= 4));
    assert!(decoded.is_some_and(|frames| frames >= 1));

    // keep both queues alive until the workers have stopped
    drop(out_rx);
    drop(play_rx);
    drop(pcm_tx);
    drop(wire_tx);
}
