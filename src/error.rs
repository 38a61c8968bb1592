use alloc::string::String;
use enough::StopReason;

/// Errors from Netpbm decoding, encoding, and image construction.
///
/// Decode failures carry the defective header field or the body
/// row/column in their message.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    /// The input does not start with one of the `P1`..`P6` magic numbers.
    #[error("unrecognized magic number")]
    UnrecognizedFormat,

    /// Missing, malformed, or out-of-range header token.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A body sample could not be parsed or exceeds the declared max value.
    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    /// The body holds fewer samples than the header promises.
    #[error("truncated pixel data: {0}")]
    Truncated(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// A caller-supplied value is out of range (zero dimensions,
    /// zero max value, and the like). Raised at the call boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
