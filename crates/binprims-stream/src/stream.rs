use std::io::SeekFrom;

use bytes::{Bytes, BytesMut};

/// A growable byte region with a read/write cursor.
///
/// The stream itself never fails: out-of-range seeks clamp, short reads
/// return what is available, and writes grow the region as needed.
/// The cursor always satisfies `position <= len`. Every value handed
/// back to a caller is an independent copy, so later mutation of the
/// stream cannot be observed through it.
#[derive(Debug, Default)]
pub struct MemoryStream {
    data: BytesMut,
    position: usize,
}

impl MemoryStream {
    /// Create an empty stream for encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream over a copy of existing bytes, cursor at zero.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            data: BytesMut::from(data),
            position: 0,
        }
    }

    /// Number of bytes currently in the stream.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stream holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes between the cursor and the end of the stream.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Move the cursor and return the resulting position.
    ///
    /// The candidate position is computed from the origin and offset,
    /// then clamped into `[0, len]`; out-of-range seeks never fail.
    pub fn seek(&mut self, pos: SeekFrom) -> usize {
        let candidate = match pos {
            SeekFrom::Start(offset) => usize::try_from(offset).unwrap_or(usize::MAX),
            SeekFrom::Current(delta) => offset_by(self.position, delta),
            SeekFrom::End(delta) => offset_by(self.data.len(), delta),
        };
        self.position = candidate.min(self.data.len());
        self.position
    }

    /// Copy up to `count` bytes at the cursor into a new buffer.
    ///
    /// When fewer than `count` bytes remain, only the available bytes
    /// are returned without padding or error. The cursor advances by
    /// the number of bytes actually copied.
    pub fn read(&mut self, count: usize) -> Bytes {
        let count = count.min(self.remaining());
        let bytes = Bytes::copy_from_slice(&self.data[self.position..self.position + count]);
        self.position += count;
        bytes
    }

    /// Copy `bytes` into the stream at the cursor and advance past them.
    ///
    /// Grows the region when the write extends past the current end.
    /// Writing over existing content overwrites it in place.
    pub fn write(&mut self, bytes: &[u8]) {
        let required = self.position + bytes.len();
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
        self.data[self.position..required].copy_from_slice(bytes);
        self.position = required;
    }

    /// Independent copy of the full current contents.
    pub fn snapshot(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}

/// Apply a signed delta to a position, saturating at the usize bounds.
fn offset_by(base: usize, delta: i64) -> usize {
    let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
    if delta.is_negative() {
        base.saturating_sub(magnitude)
    } else {
        base.saturating_add(magnitude)
    }
}
