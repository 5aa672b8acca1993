//! Encode a small record through the forward-patch protocol, then
//! decode it back and fetch its payload through the fat pointer.
//!
//! Run with:
//!   cargo run --example record-roundtrip -p binprims

use std::io::SeekFrom;

use binprims::codec::{self, Envelope};
use binprims::stream::MemoryStream;

const ENVELOPE: Envelope = Envelope::new(&[1, 2, 3, 4, 5], 42);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload: Vec<u8> = (0u8..16).map(|i| i.wrapping_mul(17)).collect();

    // Encode: envelope, fixed fields in order, then the deferred payload.
    let mut stream = MemoryStream::new();
    ENVELOPE.write(&mut stream);
    codec::write_f32(&mut stream, 13.45);
    codec::write_str(&mut stream, "example record")?;

    let placeholder = codec::reserve_ptr(&mut stream);
    let ptr = codec::write_ptr(&mut stream, &payload)?;
    codec::patch_ptr(&mut stream, placeholder, ptr);

    let wire = stream.snapshot();
    eprintln!("Encoded {} bytes", wire.len());
    eprintln!(
        "Payload lives at [{}, {}) per the patched pointer",
        ptr.address(),
        ptr.end()
    );

    // Decode: verify the envelope, read the fields back in order.
    let mut decoder = MemoryStream::from_slice(&wire);
    ENVELOPE.verify(&mut decoder)?;
    let value = codec::read_f32(&mut decoder)?;
    let name = codec::read_string(&mut decoder)?;
    let decoded_ptr = codec::read_fat_ptr(&mut decoder)?;
    let fetched = codec::read_at(&mut decoder, decoded_ptr)?;

    eprintln!("Decoded value={value}, name={name:?}");
    assert_eq!(fetched.as_ref(), payload.as_slice());
    eprintln!("Payload fetched through the pointer matches");

    // The decoder's cursor now sits at the end of the payload range;
    // re-seek explicitly if more fields were to follow.
    decoder.seek(SeekFrom::End(0));

    Ok(())
}
