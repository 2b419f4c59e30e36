//! Wire frame layout and per-frame decoding.
//!
//! The sensor emits fixed 47-byte little-endian frames:
//!
//! | offset | size | field                                 |
//! |--------|------|---------------------------------------|
//! | 0      | 2    | header `0x54`, `0x2C`                 |
//! | 2      | 2    | rotation speed, deg/s (unused)        |
//! | 4      | 2    | start angle, centidegrees             |
//! | 6      | 36   | 12 x (u16 distance mm, u8 confidence) |
//! | 42     | 2    | stop angle, centidegrees              |
//! | 44     | 2    | timestamp, ms                         |
//! | 46     | 1    | CRC-8 over bytes 0..=45               |
//!
//! Per-sample angles are interpolated linearly between start and stop;
//! a stop angle below the start angle marks the 360° wraparound and
//! gets 360° added before interpolation.

use crate::core::math::normalize_degrees_360;
use crate::core::types::Measurement;
use crate::error::{Error, Result};

/// Total frame length in bytes.
pub const FRAME_LEN: usize = 47;
/// First header byte.
pub const HEADER_BYTE: u8 = 0x54;
/// Second header byte (frame type / payload length marker).
pub const FRAME_TYPE_BYTE: u8 = 0x2C;
/// Samples carried by one frame.
pub const SAMPLES_PER_FRAME: usize = 12;

const SPEED_OFFSET: usize = 2;
const START_ANGLE_OFFSET: usize = 4;
const DATA_OFFSET: usize = 6;
const STOP_ANGLE_OFFSET: usize = 42;
const TIMESTAMP_OFFSET: usize = 44;
const CRC_OFFSET: usize = 46;

/// CRC-8 with polynomial 0x4D (MSB-first, init 0) over a byte slice.
#[inline]
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x4D
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[inline]
fn read_u16(frame: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([frame[offset], frame[offset + 1]])
}

/// Decode one complete frame into its 12 measurements.
///
/// Validates the header bytes and the CRC; interpolated angles are
/// normalized into [0, 360) and the millisecond wire timestamp widens
/// to microseconds.
pub fn decode_frame(frame: &[u8; FRAME_LEN]) -> Result<Vec<Measurement>> {
    if frame[0] != HEADER_BYTE || frame[1] != FRAME_TYPE_BYTE {
        return Err(Error::MalformedPacket(format!(
            "bad header bytes {:#04x} {:#04x}",
            frame[0], frame[1]
        )));
    }

    let computed = crc8(&frame[..CRC_OFFSET]);
    let found = frame[CRC_OFFSET];
    if computed != found {
        return Err(Error::CrcMismatch { computed, found });
    }

    let start_angle = read_u16(frame, START_ANGLE_OFFSET) as f32 / 100.0;
    let mut stop_angle = read_u16(frame, STOP_ANGLE_OFFSET) as f32 / 100.0;
    let timestamp_us = read_u16(frame, TIMESTAMP_OFFSET) as u64 * 1000;

    // Sweep wraparound: unwrap the stop angle before interpolating.
    if stop_angle < start_angle {
        stop_angle += 360.0;
    }
    let step = (stop_angle - start_angle) / (SAMPLES_PER_FRAME - 1) as f32;

    let mut measurements = Vec::with_capacity(SAMPLES_PER_FRAME);
    for i in 0..SAMPLES_PER_FRAME {
        let base = DATA_OFFSET + i * 3;
        let distance_mm = read_u16(frame, base) as u32;
        let confidence = frame[base + 2];
        let angle_deg = normalize_degrees_360(start_angle + step * i as f32);
        measurements.push(Measurement::new(
            angle_deg,
            distance_mm,
            confidence,
            timestamp_us,
        ));
    }
    Ok(measurements)
}

/// Build a complete frame from field values, CRC included.
///
/// The inverse of [`decode_frame`]; used to synthesize traffic for
/// tests, benchmarks and capture tooling.
pub fn encode_frame(
    speed_deg_s: u16,
    start_centideg: u16,
    stop_centideg: u16,
    samples: &[(u16, u8); SAMPLES_PER_FRAME],
    timestamp_ms: u16,
) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = HEADER_BYTE;
    frame[1] = FRAME_TYPE_BYTE;
    frame[SPEED_OFFSET..SPEED_OFFSET + 2].copy_from_slice(&speed_deg_s.to_le_bytes());
    frame[START_ANGLE_OFFSET..START_ANGLE_OFFSET + 2]
        .copy_from_slice(&start_centideg.to_le_bytes());
    for (i, &(distance_mm, confidence)) in samples.iter().enumerate() {
        let base = DATA_OFFSET + i * 3;
        frame[base..base + 2].copy_from_slice(&distance_mm.to_le_bytes());
        frame[base + 2] = confidence;
    }
    frame[STOP_ANGLE_OFFSET..STOP_ANGLE_OFFSET + 2].copy_from_slice(&stop_centideg.to_le_bytes());
    frame[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 2].copy_from_slice(&timestamp_ms.to_le_bytes());
    frame[CRC_OFFSET] = crc8(&frame[..CRC_OFFSET]);
    frame
}
