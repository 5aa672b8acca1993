//! End-to-end coverage of the envelope and forward-patch protocol: a
//! composite record is encoded field by field, a fat pointer to its
//! payload is patched in, and decoding reproduces every field exactly.

use std::io::SeekFrom;

use binprims::codec::{self, CodecError, Envelope};
use binprims::stream::MemoryStream;
use bytes::Bytes;

const ENVELOPE: Envelope = Envelope::new(&[1, 2, 3, 4, 5], 42);

const PAYLOAD: [u8; 16] = [
    248, 188, 93, 51, 115, 254, 255, 92, 185, 245, 163, 158, 114, 165, 34, 163,
];

/// The reference record: numeric value, ordered boolean sequence,
/// length-prefixed name, and one forward-patched byte payload written
/// last.
#[derive(Debug, Clone, PartialEq)]
struct AssetRecord {
    value: f32,
    bools: Vec<bool>,
    name: String,
    payload: Bytes,
}

impl AssetRecord {
    fn reference() -> Self {
        Self {
            value: 13.45,
            bools: vec![true, false, true, true],
            name: "Rismosch".to_string(),
            payload: Bytes::copy_from_slice(&PAYLOAD),
        }
    }

    fn encode(&self) -> codec::Result<Bytes> {
        let mut stream = MemoryStream::new();
        ENVELOPE.write(&mut stream);

        codec::write_f32(&mut stream, self.value);
        codec::write_i32(&mut stream, self.bools.len() as i32);
        for &flag in &self.bools {
            codec::write_bool(&mut stream, flag);
        }
        codec::write_str(&mut stream, &self.name)?;

        // The payload is the logically last field, so the cursor may be
        // left on the patched pointer afterwards.
        let placeholder = codec::reserve_ptr(&mut stream);
        let ptr = codec::write_ptr(&mut stream, &self.payload)?;
        codec::patch_ptr(&mut stream, placeholder, ptr);

        Ok(stream.snapshot())
    }

    fn decode(bytes: &[u8]) -> codec::Result<Self> {
        let mut stream = MemoryStream::from_slice(bytes);
        ENVELOPE.verify(&mut stream)?;

        let value = codec::read_f32(&mut stream)?;
        let count = codec::read_i32(&mut stream)?;
        let mut bools = Vec::new();
        for _ in 0..count {
            bools.push(codec::read_bool(&mut stream)?);
        }
        let name = codec::read_string(&mut stream)?;
        let ptr = codec::read_fat_ptr(&mut stream)?;
        let payload = codec::read_at(&mut stream, ptr)?;

        Ok(Self {
            value,
            bools,
            name,
            payload,
        })
    }
}

#[test]
fn encoded_stream_starts_with_magic_and_version() {
    let wire = AssetRecord::reference().encode().unwrap();

    assert_eq!(&wire[..5], [1, 2, 3, 4, 5]);
    assert_eq!(&wire[5..9], 42i32.to_le_bytes());
}

#[test]
fn wire_layout_is_byte_exact() {
    let wire = AssetRecord::reference().encode().unwrap();

    // magic(5) ‖ version(4) ‖ value(4) ‖ count(4) ‖ bools(4) ‖
    // name prefix(4) ‖ name(8) ‖ fat ptr(8) ‖ payload(16)
    assert_eq!(wire.len(), 57);
    assert_eq!(&wire[9..13], 13.45f32.to_le_bytes());
    assert_eq!(&wire[13..17], 4i32.to_le_bytes());
    assert_eq!(&wire[17..21], [1, 0, 1, 1]);
    assert_eq!(&wire[21..25], 8i32.to_le_bytes());
    assert_eq!(&wire[25..33], b"Rismosch");
    // The patched pointer references the payload right behind it.
    assert_eq!(&wire[33..37], 41i32.to_le_bytes());
    assert_eq!(&wire[37..41], 16i32.to_le_bytes());
    assert_eq!(&wire[41..], PAYLOAD);
}

#[test]
fn roundtrip_reproduces_every_field() {
    let record = AssetRecord::reference();
    let decoded = AssetRecord::decode(&record.encode().unwrap()).unwrap();

    assert_eq!(decoded.value, record.value);
    assert_eq!(decoded.bools, record.bools);
    assert_eq!(decoded.name, record.name);
    assert_eq!(decoded.payload, record.payload);
}

#[test]
fn payload_fetch_is_exact_regardless_of_preceding_field_sizes() {
    let names = ["", "a", "Rismosch", "a much longer record name than usual"];
    let bool_runs = [0usize, 1, 4, 17];

    for name in names {
        for count in bool_runs {
            let record = AssetRecord {
                value: -0.5,
                bools: vec![true; count],
                name: name.to_string(),
                payload: Bytes::copy_from_slice(&PAYLOAD),
            };

            let decoded = AssetRecord::decode(&record.encode().unwrap()).unwrap();
            assert_eq!(decoded.payload.as_ref(), PAYLOAD);
            assert_eq!(decoded, record);
        }
    }
}

#[test]
fn corrupting_any_magic_byte_fails_the_magic_gate() {
    let wire = AssetRecord::reference().encode().unwrap();

    for index in 0..5 {
        let mut corrupted = wire.to_vec();
        corrupted[index] ^= 0xFF;

        let err = AssetRecord::decode(&corrupted).unwrap_err();
        assert!(
            matches!(err, CodecError::MagicMismatch { .. }),
            "byte {index}: {err:?}"
        );
    }
}

#[test]
fn wrong_version_fails_the_version_gate() {
    let wire = AssetRecord::reference().encode().unwrap();

    let mut stale = MemoryStream::from_slice(&wire);
    stale.seek(SeekFrom::Start(5));
    codec::write_i32(&mut stale, 43);

    let err = AssetRecord::decode(&stale.snapshot()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::VersionMismatch {
            expected: 42,
            found: 43
        }
    ));
}

#[test]
fn any_truncation_fails_as_truncated_data() {
    let wire = AssetRecord::reference().encode().unwrap();

    for cut in 0..wire.len() {
        let err = AssetRecord::decode(&wire[..cut]).unwrap_err();
        assert!(
            matches!(err, CodecError::TruncatedData { .. }),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn corrupted_bool_byte_is_rejected() {
    let wire = AssetRecord::reference().encode().unwrap();

    let mut corrupted = wire.to_vec();
    corrupted[17] = 2;

    let err = AssetRecord::decode(&corrupted).unwrap_err();
    assert!(matches!(err, CodecError::InvalidBoolEncoding { value: 2 }));
}

#[test]
fn corrupted_name_bytes_fail_as_invalid_encoding() {
    let wire = AssetRecord::reference().encode().unwrap();

    let mut corrupted = wire.to_vec();
    corrupted[25] = 0xFF;

    let err = AssetRecord::decode(&corrupted).unwrap_err();
    assert!(matches!(err, CodecError::InvalidEncoding(_)));
}

#[test]
fn negative_pointer_length_on_the_wire_is_rejected() {
    let wire = AssetRecord::reference().encode().unwrap();

    let mut corrupted = MemoryStream::from_slice(&wire);
    corrupted.seek(SeekFrom::Start(37));
    codec::write_i32(&mut corrupted, -16);

    let err = AssetRecord::decode(&corrupted.snapshot()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidFatPointer { .. }));
}
