use std::io::SeekFrom;

use binprims_stream::MemoryStream;
use bytes::Bytes;

use crate::error::{CodecError, Result};
use crate::fatptr::FatPtr;

/// Wire size of every fixed-width integer and float.
pub const WORD_SIZE: usize = 4;

/// Wire size of an encoded fat pointer (address + length).
pub const FAT_PTR_SIZE: usize = 2 * WORD_SIZE;

/// Read exactly `count` bytes at the cursor.
///
/// Fails with [`CodecError::TruncatedData`] when fewer bytes remain.
/// Every typed decoder builds on this, never on the best-effort read.
pub fn read_exact(stream: &mut MemoryStream, count: usize) -> Result<Bytes> {
    let bytes = stream.read(count);
    if bytes.len() < count {
        return Err(CodecError::TruncatedData {
            requested: count,
            available: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Write `bytes` at the cursor and return a pointer to the region they
/// now occupy.
pub fn write_ptr(stream: &mut MemoryStream, bytes: &[u8]) -> Result<FatPtr> {
    let begin = wire_offset(stream.position())?;
    stream.write(bytes);
    let end = wire_offset(stream.position())?;
    FatPtr::from_range(begin, end)
}

/// Fetch the byte range referenced by `ptr`.
///
/// Seeks to the pointer's address and leaves the cursor at the end of
/// the range; the prior position is NOT restored. Callers own cursor
/// sequencing after this call.
pub fn read_at(stream: &mut MemoryStream, ptr: FatPtr) -> Result<Bytes> {
    stream.seek(SeekFrom::Start(ptr.address().max(0) as u64));
    // length() is never negative, so the cast is lossless.
    read_exact(stream, ptr.length() as usize)
}

/// Write a 4-byte integer.
///
/// The wire is little-endian regardless of host byte order;
/// `to_le_bytes` performs the normalization on big-endian hosts.
pub fn write_i32(stream: &mut MemoryStream, value: i32) {
    stream.write(&value.to_le_bytes());
}

/// Read a 4-byte little-endian integer.
pub fn read_i32(stream: &mut MemoryStream) -> Result<i32> {
    let bytes = read_exact(stream, WORD_SIZE)?;
    Ok(i32::from_le_bytes(bytes.as_ref().try_into().unwrap()))
}

/// Write a 4-byte float, little-endian on the wire.
pub fn write_f32(stream: &mut MemoryStream, value: f32) {
    stream.write(&value.to_le_bytes());
}

/// Read a 4-byte little-endian float.
pub fn read_f32(stream: &mut MemoryStream) -> Result<f32> {
    let bytes = read_exact(stream, WORD_SIZE)?;
    Ok(f32::from_le_bytes(bytes.as_ref().try_into().unwrap()))
}

/// Write a bool as a single byte, `1` for true and `0` for false.
pub fn write_bool(stream: &mut MemoryStream, value: bool) {
    stream.write(&[u8::from(value)]);
}

/// Read a single-byte bool.
///
/// Fails with [`CodecError::InvalidBoolEncoding`] for any byte other
/// than `1` or `0`.
pub fn read_bool(stream: &mut MemoryStream) -> Result<bool> {
    let bytes = read_exact(stream, 1)?;
    match bytes[0] {
        1 => Ok(true),
        0 => Ok(false),
        value => Err(CodecError::InvalidBoolEncoding { value }),
    }
}

/// Write a string as a 4-byte length prefix plus UTF-8 bytes.
pub fn write_str(stream: &mut MemoryStream, value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    write_len_prefix(stream, bytes.len())?;
    stream.write(bytes);
    Ok(())
}

/// Read a length-prefixed UTF-8 string.
///
/// Fails with [`CodecError::TruncatedData`] when fewer bytes remain
/// than the prefix declares, or [`CodecError::InvalidEncoding`] when
/// they are not valid UTF-8.
pub fn read_string(stream: &mut MemoryStream) -> Result<String> {
    let count = read_len_prefix(stream)?;
    let bytes = read_exact(stream, count)?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Write a raw payload with a 4-byte length prefix.
pub fn write_prefixed_bytes(stream: &mut MemoryStream, bytes: &[u8]) -> Result<()> {
    write_len_prefix(stream, bytes.len())?;
    stream.write(bytes);
    Ok(())
}

/// Read a length-prefixed raw payload.
pub fn read_prefixed_bytes(stream: &mut MemoryStream) -> Result<Bytes> {
    let count = read_len_prefix(stream)?;
    read_exact(stream, count)
}

/// Closed set of wire discriminants for an enumeration.
///
/// Implementors enumerate their valid discriminants explicitly in
/// [`WireEnum::from_discriminant`]; decoding rejects anything outside
/// that set. There is no runtime introspection.
pub trait WireEnum: Sized + Copy {
    /// Name reported in [`CodecError::UndefinedEnumValue`].
    const NAME: &'static str;

    /// Map a wire discriminant back to a variant.
    fn from_discriminant(value: i32) -> Option<Self>;

    /// The wire discriminant of this variant.
    fn discriminant(self) -> i32;
}

/// Write an enumeration as its 4-byte discriminant.
pub fn write_enum<E: WireEnum>(stream: &mut MemoryStream, value: E) {
    write_i32(stream, value.discriminant());
}

/// Read an enumeration.
///
/// Fails with [`CodecError::UndefinedEnumValue`] when the integer
/// matches no discriminant in the enumeration's declared set.
pub fn read_enum<E: WireEnum>(stream: &mut MemoryStream) -> Result<E> {
    let value = read_i32(stream)?;
    E::from_discriminant(value).ok_or(CodecError::UndefinedEnumValue {
        value,
        enumeration: E::NAME,
    })
}

/// Write a fat pointer as two consecutive 4-byte integers, address
/// then length.
pub fn write_fat_ptr(stream: &mut MemoryStream, ptr: FatPtr) {
    write_i32(stream, ptr.address());
    write_i32(stream, ptr.length());
}

/// Read a fat pointer, reconstructing it through [`FatPtr::from_length`]
/// and propagating its failure on a negative length.
pub fn read_fat_ptr(stream: &mut MemoryStream) -> Result<FatPtr> {
    let address = read_i32(stream)?;
    let length = read_i32(stream)?;
    FatPtr::from_length(address, length)
}

fn write_len_prefix(stream: &mut MemoryStream, count: usize) -> Result<()> {
    let count = i32::try_from(count).map_err(|_| CodecError::PayloadTooLarge {
        size: count,
        max: i32::MAX as usize,
    })?;
    write_i32(stream, count);
    Ok(())
}

/// Read a 4-byte length prefix as the byte count it is.
///
/// The count is decoded unsigned, so a corrupted sign bit requests more
/// bytes than any stream holds and surfaces as `TruncatedData` rather
/// than a bogus short read.
fn read_len_prefix(stream: &mut MemoryStream) -> Result<usize> {
    let bytes = read_exact(stream, WORD_SIZE)?;
    let count = u32::from_le_bytes(bytes.as_ref().try_into().unwrap());
    Ok(count as usize)
}

fn wire_offset(position: usize) -> Result<i32> {
    i32::try_from(position).map_err(|_| CodecError::PayloadTooLarge {
        size: position,
        max: i32::MAX as usize,
    })
}
