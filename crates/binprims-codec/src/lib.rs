//! Typed encode/decode primitives over `binprims-stream`.
//!
//! This is the core value-add layer of binprims. Everything on the wire
//! is byte-exact:
//! - Integers and floats are 4 bytes, little-endian regardless of host
//! - Booleans are a single byte, `1` or `0`
//! - Strings and raw payloads carry a 4-byte length prefix
//! - Fat pointers are two consecutive 4-byte integers (address, length)
//!
//! Decoding aborts on the first structural violation; no partial
//! results are ever returned.

pub mod envelope;
pub mod error;
pub mod fatptr;
pub mod io;

pub use envelope::{patch_ptr, reserve_ptr, Envelope};
pub use error::{CodecError, Result};
pub use fatptr::FatPtr;
pub use io::{
    read_at, read_bool, read_enum, read_exact, read_f32, read_fat_ptr, read_i32,
    read_prefixed_bytes, read_string, write_bool, write_enum, write_f32, write_fat_ptr, write_i32,
    write_prefixed_bytes, write_ptr, write_str, WireEnum, FAT_PTR_SIZE, WORD_SIZE,
};
