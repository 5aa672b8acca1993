/// Errors surfaced while encoding or decoding binary streams.
///
/// Every failure is a distinctly named condition so callers can tell
/// "not this format" (`MagicMismatch`) from "wrong version"
/// (`VersionMismatch`) from "corrupted or truncated payload". A decode
/// aborts on the first structural violation; no partial results.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The stream does not start with the expected magic bytes.
    #[error("magic bytes do not match (expected {expected:02x?}, found {found:02x?})")]
    MagicMismatch { expected: Vec<u8>, found: Vec<u8> },

    /// The stream was produced under a different format version.
    #[error("version mismatch (expected {expected}, found {found})")]
    VersionMismatch { expected: i32, found: i32 },

    /// The stream ended before the requested number of bytes was read.
    #[error("truncated data ({requested} bytes requested, {available} available)")]
    TruncatedData { requested: usize, available: usize },

    /// A boolean byte was neither `1` nor `0`.
    #[error("{value} is not a valid bool encoding")]
    InvalidBoolEncoding { value: u8 },

    /// A string payload was not valid UTF-8.
    #[error("string payload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// An integer matched no discriminant of the target enumeration.
    #[error("{value} is not a defined discriminant of {enumeration}")]
    UndefinedEnumValue {
        value: i32,
        enumeration: &'static str,
    },

    /// A fat pointer was constructed with a negative length or an
    /// inverted range.
    #[error("invalid fat pointer (address {address}, length {length})")]
    InvalidFatPointer { address: i64, length: i64 },

    /// A value's byte count or end offset exceeds the 4-byte wire range.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
