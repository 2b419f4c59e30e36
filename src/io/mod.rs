//! Wire protocol: frame codec, streaming decoder, transport seam.

pub mod decoder;
pub mod packet;
pub mod stream;

pub use decoder::PacketDecoder;
pub use packet::{crc8, decode_frame, encode_frame, FRAME_LEN, SAMPLES_PER_FRAME};
pub use stream::{DecodeStream, DecoderStats};
