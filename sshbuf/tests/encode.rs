//! Tests for the `Encode` trait.

use hex_literal::hex;
use sshbuf::{Encode, Error, SshBuf};

#[test]
fn encode_u8() {
    let mut out = Vec::new();
    0x42u8.encode(&mut out).unwrap();
    assert_eq!(out, hex!("42"));
}

#[test]
fn encode_u16() {
    let mut out = Vec::new();
    0xBEEFu16.encode(&mut out).unwrap();
    assert_eq!(out, hex!("BEEF"));
}

#[test]
fn encode_u32() {
    let mut out = Vec::new();
    0xDEADBEEFu32.encode(&mut out).unwrap();
    assert_eq!(out, hex!("DEADBEEF"));
}

#[test]
fn encode_u64() {
    let mut out = Vec::new();
    0xDEADBEEFCAFEu64.encode(&mut out).unwrap();
    assert_eq!(out, hex!("0000DEADBEEFCAFE"));
}

#[test]
fn encode_usize() {
    let mut out = Vec::new();
    0xDEADBEEFusize.encode(&mut out).unwrap();
    assert_eq!(out, hex!("DEADBEEF"));
}

#[test]
fn encode_byte_slice() {
    let mut out = Vec::new();
    b"example".as_slice().encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_byte_vec() {
    let mut out = Vec::new();
    Vec::from(b"example".as_ref()).encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_str() {
    let mut out = Vec::new();
    "example".encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_string() {
    let mut out = Vec::new();
    String::from("example").encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_string_vec() {
    let vec = ["foo", "bar", "baz"]
        .iter()
        .map(|&s| s.to_owned())
        .collect::<Vec<String>>();

    let mut out = Vec::new();
    vec.encode(&mut out).unwrap();

    assert_eq!(
        out,
        hex!("0000001500000003666f6f000000036261720000000362617a")
    );
}

#[test]
fn encode_sshbuf_as_string() {
    let inner = SshBuf::from_slice(b"example").unwrap();
    assert_eq!(inner.encoded_len().unwrap(), 11);

    let mut out = Vec::new();
    inner.encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_into_sshbuf() {
    let mut buf = SshBuf::new();
    0xDEADBEEFu32.encode(&mut buf).unwrap();
    "example".encode(&mut buf).unwrap();
    assert_eq!(buf.as_slice(), hex!("DEADBEEF 000000076578616d706c65"));
}

#[test]
fn encode_sshbuf_respects_max_size() {
    let mut buf = SshBuf::with_max_size(3).unwrap();
    assert_eq!(0xDEADBEEFu32.encode(&mut buf), Err(Error::NoBufferSpace));
    assert!(buf.is_empty());
}

#[test]
fn encode_string_into_full_sshbuf_writes_nothing() {
    let mut buf = SshBuf::with_max_size(8).unwrap();
    assert_eq!("example".encode(&mut buf), Err(Error::NoBufferSpace));
    assert!(buf.is_empty());

    buf.put_u8(0x01).unwrap();
    let names = vec!["a".to_string()];
    assert_eq!(names.encode(&mut buf), Err(Error::NoBufferSpace));
    assert_eq!(buf.as_slice(), hex!("01"));

    assert_eq!(0xDEADBEEFu32.encode_prefixed(&mut buf), Err(Error::NoBufferSpace));
    assert_eq!(buf.as_slice(), hex!("01"));

    "abc".encode(&mut buf).unwrap();
    assert_eq!(buf.as_slice(), hex!("01 00000003 616263"));
}

#[test]
fn encode_to_new_sshbuf() {
    let buf = "example".encode_sshbuf().unwrap();
    assert_eq!(buf.as_slice(), hex!("000000076578616d706c65"));
    assert_eq!(buf.alloc(), sshbuf::SIZE_INC);
}

#[test]
fn encode_prefixed() {
    let mut out = Vec::new();
    0xDEADBEEFu32.encode_prefixed(&mut out).unwrap();
    assert_eq!(out, hex!("00000004 DEADBEEF"));
    assert_eq!(0xDEADBEEFu32.encoded_len_prefixed().unwrap(), 8);
}
