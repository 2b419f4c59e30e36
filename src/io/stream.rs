//! Bounded-channel seam between the byte transport and the decoder.
//!
//! The transport pushes raw byte chunks into a bounded channel and the
//! decode thread drains them strictly in order, forwarding measurements
//! into a second bounded channel. Backpressure lives in the channels on
//! both sides; the decoder itself never blocks mid-frame.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};

use crate::core::types::Measurement;
use crate::io::decoder::PacketDecoder;

/// Final decoder counters, returned when the stream thread exits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames decoded successfully.
    pub frames_decoded: u64,
    /// Frames dropped for CRC or header errors.
    pub frames_dropped: u64,
    /// Total bytes consumed.
    pub bytes_consumed: u64,
}

/// Handle to a running decode thread.
pub struct DecodeStream {
    handle: JoinHandle<DecoderStats>,
}

impl DecodeStream {
    /// Spawn the decode thread.
    ///
    /// `bytes_rx` is the transport side (a bounded channel owned by the
    /// caller); decoded measurements arrive on the returned receiver,
    /// bounded by `capacity`. The thread exits when the transport drops
    /// its sender or every measurement receiver is gone.
    pub fn spawn(bytes_rx: Receiver<Vec<u8>>, capacity: usize) -> (Self, Receiver<Measurement>) {
        let (measurement_tx, measurement_rx) = bounded(capacity);

        let handle = thread::Builder::new()
            .name("decode".into())
            .spawn(move || {
                let mut decoder = PacketDecoder::new();

                'transport: while let Ok(chunk) = bytes_rx.recv() {
                    for &byte in &chunk {
                        if let Some(measurements) = decoder.push_byte(byte) {
                            for m in measurements {
                                if measurement_tx.send(m).is_err() {
                                    log::debug!("Measurement receiver gone, stopping decode stream");
                                    break 'transport;
                                }
                            }
                        }
                    }
                }

                let stats = DecoderStats {
                    frames_decoded: decoder.frames_decoded(),
                    frames_dropped: decoder.frames_dropped(),
                    bytes_consumed: decoder.bytes_consumed(),
                };
                log::info!(
                    "Decode stream finished: {} frames decoded, {} dropped, {} bytes",
                    stats.frames_decoded,
                    stats.frames_dropped,
                    stats.bytes_consumed
                );
                stats
            })
            .expect("Failed to spawn decode thread");

        (Self { handle }, measurement_rx)
    }

    /// Wait for the thread to finish and collect its counters.
    pub fn join(self) -> thread::Result<DecoderStats> {
        self.handle.join()
    }
}
