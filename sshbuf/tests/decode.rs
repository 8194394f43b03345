//! Tests for the `Decode` trait.

use hex_literal::hex;
use sshbuf::{Decode, Error, Reader, SshBuf};

#[test]
fn decode_u8() {
    let mut bytes = hex!("42").as_slice();
    let ret = u8::decode(&mut bytes).unwrap();
    assert_eq!(ret, 0x42u8);
}

#[test]
fn decode_u16() {
    let mut bytes = hex!("BEEF").as_slice();
    let ret = u16::decode(&mut bytes).unwrap();
    assert_eq!(ret, 0xBEEFu16);
}

#[test]
fn decode_u32() {
    let mut bytes = hex!("DEADBEEF").as_slice();
    let ret = u32::decode(&mut bytes).unwrap();
    assert_eq!(ret, 0xDEADBEEFu32);
}

#[test]
fn decode_u64() {
    let mut bytes = hex!("0000DEADBEEFCAFE").as_slice();
    let ret = u64::decode(&mut bytes).unwrap();
    assert_eq!(ret, 0xDEADBEEFCAFEu64);
}

#[test]
fn decode_bool() {
    let mut bytes = hex!("00 01 7f").as_slice();
    assert!(!bool::decode(&mut bytes).unwrap());
    assert!(bool::decode(&mut bytes).unwrap());
    assert!(bool::decode(&mut bytes).unwrap());
}

#[test]
fn decode_usize() {
    let mut bytes = hex!("07FFFFFC").as_slice();
    let ret = usize::decode(&mut bytes).unwrap();
    assert_eq!(ret, 0x7FFFFFCusize);
}

/// `usize` decoder rejects lengths no buffer could hold.
#[test]
fn reject_oversize_usize() {
    let mut bytes = hex!("07FFFFFD").as_slice();
    let err = usize::decode(&mut bytes).err().unwrap();
    assert_eq!(err, Error::StringTooLarge);
}

#[test]
fn decode_byte_array() {
    let mut bytes = hex!("6578616d706c65").as_slice();
    let ret = <[u8; 7]>::decode(&mut bytes).unwrap();
    assert_eq!(&ret, b"example");
}

#[test]
fn decode_byte_vec() {
    let mut bytes = hex!("000000076578616d706c65").as_slice();
    let ret = Vec::<u8>::decode(&mut bytes).unwrap();
    assert_eq!(&ret, b"example");
}

#[test]
fn decode_string() {
    let mut bytes = hex!("000000076578616d706c65").as_slice();
    let ret = String::decode(&mut bytes).unwrap();
    assert_eq!(&ret, "example");
}

#[test]
fn decode_string_vec() {
    let mut bytes = hex!("0000001500000003666f6f000000036261720000000362617a").as_slice();
    let ret = Vec::<String>::decode(&mut bytes).unwrap();
    assert_eq!(ret.len(), 3);
    assert_eq!(ret[0], "foo");
    assert_eq!(ret[1], "bar");
    assert_eq!(ret[2], "baz");
}

#[test]
fn decode_truncated_slice() {
    let mut bytes = hex!("DEADBE").as_slice();
    assert_eq!(u32::decode(&mut bytes), Err(Error::MessageIncomplete));

    let mut bytes = hex!("00000008 6578616d706c65").as_slice();
    assert_eq!(Vec::<u8>::decode(&mut bytes), Err(Error::MessageIncomplete));
}

#[test]
fn decode_from_sshbuf_consumes() {
    let mut buf = SshBuf::from_slice(&hex!("DEADBEEF 000000076578616d706c65 42")).unwrap();

    assert_eq!(u32::decode(&mut buf).unwrap(), 0xDEADBEEF);
    assert_eq!(buf.len(), 12);
    assert_eq!(String::decode(&mut buf).unwrap(), "example");
    assert_eq!(buf.remaining_len(), 1);
    assert_eq!(u8::decode(&mut buf).unwrap(), 0x42);
    assert!(buf.is_finished());
}

#[test]
fn failed_sshbuf_decode_consumes_nothing() {
    let mut buf = SshBuf::from_slice(&hex!("DEADBE")).unwrap();
    assert_eq!(u32::decode(&mut buf), Err(Error::MessageIncomplete));
    assert_eq!(buf.len(), 3);

    let mut buf = SshBuf::from_slice(&hex!("00000008 6578616d706c65")).unwrap();
    assert_eq!(Vec::<u8>::decode(&mut buf), Err(Error::MessageIncomplete));
    assert_eq!(buf.len(), 11);

    // `String` is validated only once the string has been read.
    let mut buf = SshBuf::from_slice(&hex!("00000002 c328")).unwrap();
    assert_eq!(String::decode(&mut buf), Err(Error::CharacterEncoding));
    assert!(buf.is_empty());
}

#[test]
fn decode_sshbuf() {
    let mut bytes = hex!("00000003 010203 ff").as_slice();
    let inner = SshBuf::decode(&mut bytes).unwrap();
    assert_eq!(inner.as_slice(), hex!("010203"));
    assert_eq!(bytes, hex!("ff"));
}

#[test]
fn read_prefixed_requires_full_body() {
    let mut buf = SshBuf::from_slice(&hex!("00000005 DEADBEEF 01 02")).unwrap();

    let ret = buf.read_prefixed(|reader| u32::decode(reader));
    assert_eq!(ret, Err(Error::TrailingData { remaining: 1 }));
    assert_eq!(buf.len(), 10);

    let ret = buf.read_prefixed(|reader| {
        let n = u32::decode(reader)?;
        let m = u8::decode(reader)?;
        Ok::<_, Error>((n, m))
    });
    assert_eq!(ret, Ok((0xDEADBEEF, 0x01)));
    assert_eq!(buf.as_slice(), hex!("02"));
}

#[test]
fn read_byten_into_small_buffer() {
    let mut buf = SshBuf::from_slice(&hex!("00000004 DEADBEEF")).unwrap();
    let mut out = [0u8; 3];
    assert_eq!(buf.read_byten(&mut out), Err(Error::NoBufferSpace));
    assert_eq!(buf.len(), 8);

    let mut out = [0u8; 8];
    assert_eq!(buf.read_byten(&mut out).unwrap(), hex!("DEADBEEF"));
    assert!(buf.is_empty());
}

#[test]
fn drain_prefixed() {
    let mut buf = SshBuf::from_slice(&hex!("00000003 010203 04")).unwrap();
    assert_eq!(buf.drain_prefixed().unwrap(), 3);
    assert_eq!(buf.as_slice(), hex!("04"));
    assert_eq!(buf.ensure_finished(), Err(Error::TrailingData { remaining: 1 }));
}

#[test]
fn drain_sshbuf() {
    let mut buf = SshBuf::from_slice(b"abc").unwrap();
    assert_eq!(buf.drain(5), Err(Error::MessageIncomplete));
    assert_eq!(buf.as_slice(), b"abc");

    buf.drain(2).unwrap();
    assert_eq!(buf.as_slice(), b"c");
}
