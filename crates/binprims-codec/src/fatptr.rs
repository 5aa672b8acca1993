use crate::error::{CodecError, Result};

/// An immutable byte range `[address, address + length)` inside an
/// encoded stream.
///
/// On the wire a fat pointer is two consecutive 4-byte little-endian
/// signed integers, so both fields are `i32`. The constructors are the
/// only way to build one, which keeps `length >= 0` for every reachable
/// value; a decoded negative length is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatPtr {
    address: i32,
    length: i32,
}

impl FatPtr {
    /// The canonical null pointer.
    ///
    /// All-zero conflates "empty region at offset zero" with "absent".
    /// That ambiguity is part of the format; [`FatPtr::is_null`] is the
    /// only query.
    pub const NULL: FatPtr = FatPtr {
        address: 0,
        length: 0,
    };

    /// Build a pointer from a start offset and a length.
    ///
    /// Fails with [`CodecError::InvalidFatPointer`] when `length` is
    /// negative. Negative addresses are representable on the wire and
    /// accepted; fetching through one clamps like every other seek.
    pub fn from_length(address: i32, length: i32) -> Result<Self> {
        if length < 0 {
            return Err(CodecError::InvalidFatPointer {
                address: i64::from(address),
                length: i64::from(length),
            });
        }
        Ok(Self { address, length })
    }

    /// Build a pointer covering `[begin, end)`.
    ///
    /// Fails with [`CodecError::InvalidFatPointer`] when `begin > end`
    /// or when the span does not fit the wire's 4-byte length.
    pub fn from_range(begin: i32, end: i32) -> Result<Self> {
        let span = i64::from(end) - i64::from(begin);
        let length = i32::try_from(span)
            .ok()
            .filter(|length| *length >= 0)
            .ok_or(CodecError::InvalidFatPointer {
                address: i64::from(begin),
                length: span,
            })?;
        Ok(Self {
            address: begin,
            length,
        })
    }

    /// Start offset of the range.
    pub fn address(self) -> i32 {
        self.address
    }

    /// Length of the range in bytes. Never negative.
    pub fn length(self) -> i32 {
        self.length
    }

    /// One past the last offset of the range.
    pub fn end(self) -> i32 {
        self.address.saturating_add(self.length)
    }

    /// Whether this is the all-zero null pointer.
    pub fn is_null(self) -> bool {
        self.address == 0 && self.length == 0
    }
}
