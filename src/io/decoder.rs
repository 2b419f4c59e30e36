//! Streaming byte decoder.
//!
//! A strictly ordered state machine that consumes one byte at a time and
//! emits the 12 measurements of each complete, CRC-valid frame. Corrupt
//! frames are dropped and scanning resumes at the next header; that path
//! is counted, logged at debug level, and never fatal.

use crate::core::types::Measurement;
use crate::io::packet::{self, FRAME_LEN, FRAME_TYPE_BYTE, HEADER_BYTE};

/// Decoder sync states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SyncState {
    /// Scanning for the first header byte.
    Sync0,
    /// Header byte seen, expecting the frame type byte.
    Sync1,
    /// Header validated, accumulating the frame body.
    Payload,
}

/// Byte-stream to measurement decoder.
///
/// Feed bytes in arrival order; there is no internal parallelism and no
/// buffering beyond the current frame.
#[derive(Debug)]
pub struct PacketDecoder {
    state: SyncState,
    frame: [u8; FRAME_LEN],
    filled: usize,
    frames_decoded: u64,
    frames_dropped: u64,
    bytes_consumed: u64,
}

impl PacketDecoder {
    /// Create a decoder in the scanning state.
    pub fn new() -> Self {
        Self {
            state: SyncState::Sync0,
            frame: [0u8; FRAME_LEN],
            filled: 0,
            frames_decoded: 0,
            frames_dropped: 0,
            bytes_consumed: 0,
        }
    }

    /// Consume one byte. Returns the decoded measurements when this byte
    /// completes a valid frame, `None` otherwise.
    pub fn push_byte(&mut self, byte: u8) -> Option<Vec<Measurement>> {
        self.bytes_consumed += 1;
        match self.state {
            SyncState::Sync0 => {
                if byte == HEADER_BYTE {
                    self.frame[0] = byte;
                    self.state = SyncState::Sync1;
                }
            }
            SyncState::Sync1 => {
                if byte == FRAME_TYPE_BYTE {
                    self.frame[1] = byte;
                    self.filled = 2;
                    self.state = SyncState::Payload;
                } else {
                    self.state = SyncState::Sync0;
                }
            }
            SyncState::Payload => {
                self.frame[self.filled] = byte;
                self.filled += 1;
                if self.filled == FRAME_LEN {
                    self.state = SyncState::Sync0;
                    match packet::decode_frame(&self.frame) {
                        Ok(measurements) => {
                            self.frames_decoded += 1;
                            return Some(measurements);
                        }
                        Err(e) => {
                            self.frames_dropped += 1;
                            log::debug!("Dropping frame ({} dropped so far): {}", self.frames_dropped, e);
                        }
                    }
                }
            }
        }
        None
    }

    /// Consume a byte slice, appending decoded measurements to `out`.
    pub fn feed(&mut self, bytes: &[u8], out: &mut Vec<Measurement>) {
        for &byte in bytes {
            if let Some(measurements) = self.push_byte(byte) {
                out.extend(measurements);
            }
        }
    }

    /// Frames decoded successfully.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Frames dropped for CRC or header errors.
    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped
    }

    /// Total bytes consumed, including garbage between frames.
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}
