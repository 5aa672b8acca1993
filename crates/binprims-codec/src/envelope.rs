use std::io::SeekFrom;

use binprims_stream::MemoryStream;
use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::fatptr::FatPtr;
use crate::io::{read_exact, read_i32, write_fat_ptr, write_i32, WORD_SIZE};

/// Fixed magic bytes plus an exact format version.
///
/// Every encoder/decoder pair writes the envelope first and verifies it
/// before reading any field. There is no partial compatibility across
/// versions: a stream either carries exactly the expected version or is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    magic: &'static [u8],
    version: i32,
}

impl Envelope {
    /// Define an envelope for a format.
    pub const fn new(magic: &'static [u8], version: i32) -> Self {
        Self { magic, version }
    }

    /// The magic bytes identifying the format.
    pub const fn magic(self) -> &'static [u8] {
        self.magic
    }

    /// The exact accepted format version.
    pub const fn version(self) -> i32 {
        self.version
    }

    /// Wire size of the envelope (magic plus version integer).
    pub const fn wire_size(self) -> usize {
        self.magic.len() + WORD_SIZE
    }

    /// Write the magic bytes and version at the cursor.
    pub fn write(self, stream: &mut MemoryStream) {
        stream.write(self.magic);
        write_i32(stream, self.version);
    }

    /// Verify the magic bytes and version at the cursor.
    ///
    /// Fails with [`CodecError::MagicMismatch`] when the first bytes
    /// differ from the magic, [`CodecError::VersionMismatch`] when the
    /// version integer is not exactly the expected one. A stream
    /// shorter than the envelope surfaces as `TruncatedData`.
    pub fn verify(self, stream: &mut MemoryStream) -> Result<()> {
        let magic = read_exact(stream, self.magic.len())?;
        if magic.as_ref() != self.magic {
            debug!(expected = ?self.magic, found = ?magic.as_ref(), "magic bytes do not match");
            return Err(CodecError::MagicMismatch {
                expected: self.magic.to_vec(),
                found: magic.to_vec(),
            });
        }

        let version = read_i32(stream)?;
        if version != self.version {
            debug!(
                expected = self.version,
                found = version,
                "rejecting stream version"
            );
            return Err(CodecError::VersionMismatch {
                expected: self.version,
                found: version,
            });
        }

        Ok(())
    }
}

/// Reserve space for a fat pointer at the cursor.
///
/// Writes an 8-byte null-pointer placeholder and returns its offset.
/// Once the payload has been appended (see
/// [`write_ptr`](crate::io::write_ptr)), pass the offset and the real
/// pointer to [`patch_ptr`].
pub fn reserve_ptr(stream: &mut MemoryStream) -> usize {
    let placeholder = stream.position();
    write_fat_ptr(stream, FatPtr::NULL);
    placeholder
}

/// Overwrite a placeholder written by [`reserve_ptr`] with the real
/// pointer.
///
/// Leaves the cursor just past the patched pointer field, NOT at the
/// true end of the stream. That is safe when the patched payload is the
/// logically last thing written; otherwise the caller must re-seek to
/// the end before writing further fields.
pub fn patch_ptr(stream: &mut MemoryStream, placeholder: usize, ptr: FatPtr) {
    trace!(
        placeholder,
        address = ptr.address(),
        length = ptr.length(),
        "patching fat pointer"
    );
    stream.seek(SeekFrom::Start(placeholder as u64));
    write_fat_ptr(stream, ptr);
}
