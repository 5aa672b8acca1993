//! Binary serialization primitives: a growable byte stream, typed
//! encode/decode, and fat-pointer forward patching.
//!
//! A schema encoder opens a stream, writes its envelope (magic bytes
//! plus version), writes its fixed fields in order, reserves space for
//! a fat pointer, appends the variable payload, and patches the pointer
//! in place. A decoder verifies the envelope, reads the same fields in
//! the same order, and fetches the payload through the pointer.
//!
//! # Crate Structure
//!
//! - [`stream`] — Growable, seekable in-memory byte stream
//! - [`codec`] — Typed primitives, envelope, and forward-patch protocol

/// Re-export stream types.
pub mod stream {
    pub use binprims_stream::*;
}

/// Re-export codec types.
pub mod codec {
    pub use binprims_codec::*;
}
