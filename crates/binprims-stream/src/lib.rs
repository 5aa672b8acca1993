//! Growable, seekable in-memory byte stream.
//!
//! This is the storage layer the binprims codec builds on. A
//! [`MemoryStream`] owns a contiguous byte region and a cursor:
//! - Seeks clamp into `[0, len]` instead of failing
//! - Reads are best-effort copies of whatever remains
//! - Writes grow the region to fit
//!
//! Exact-length reads and every typed operation live one layer up in
//! `binprims-codec`.

mod stream;

pub use stream::MemoryStream;
