//! Error types for vastu-loc.

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during decoding or grid construction.
///
/// Packet-level errors are recoverable: the decoder drops the frame and
/// rescans for the next header. `InvalidInput` is raised once, at
/// construction time, and is fatal for that call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame structure error (bad length, impossible field values).
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    /// Frame checksum did not match the computed value.
    #[error("CRC mismatch: computed {computed:#04x}, frame carried {found:#04x}")]
    CrcMismatch { computed: u8, found: u8 },

    /// Construction input that can never produce a valid structure,
    /// e.g. a floor plan with fewer than 3 vertices.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the decoder may keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedPacket(_) | Error::CrcMismatch { .. })
    }
}
