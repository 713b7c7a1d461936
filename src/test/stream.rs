use std::error::Error as _;
use std::io::{self, Read, Write};

use super::builder::Builder;
use crate::error::{ErrorKind, Result};
use crate::stream::{NbtReader, WriteNbt};
use crate::{ReadOpts, Tag};

struct Broken(io::ErrorKind);

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(self.0, "broken reader"))
    }
}

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(self.0, "broken writer"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn primitives_are_big_endian() -> Result<()> {
    let mut out = Vec::new();
    out.write_byte(-2)?;
    out.write_short(0x0102)?;
    out.write_int(0x01020304)?;
    out.write_long(0x0102030405060708)?;

    assert_eq!(
        out,
        [0xfe, 1, 2, 1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8].to_vec()
    );
    Ok(())
}

#[test]
fn primitives_read_back() -> Result<()> {
    let payload = Builder::new()
        .byte_payload(-5)
        .short_payload(-300)
        .int_payload(70000)
        .long_payload(i64::MIN)
        .float_payload(1.25)
        .double_payload(-2.5)
        .string_payload("hello")
        .build();

    let mut reader = NbtReader::new(payload.as_slice());
    assert_eq!(reader.read_byte()?, -5);
    assert_eq!(reader.read_short()?, -300);
    assert_eq!(reader.read_int()?, 70000);
    assert_eq!(reader.read_long()?, i64::MIN);
    assert_eq!(reader.read_float()?, 1.25);
    assert_eq!(reader.read_double()?, -2.5);
    assert_eq!(reader.read_size_prefixed_string()?, "hello");
    Ok(())
}

#[test]
fn string_is_u16_length_then_utf8() -> Result<()> {
    let mut out = Vec::new();
    out.write_size_prefixed_str("héllo")?;

    assert_eq!(&out[..2], &[0, 6]);
    assert_eq!(&out[2..], "héllo".as_bytes());
    Ok(())
}

#[test]
fn string_longer_than_u16_cannot_be_written() {
    let long = "a".repeat(u16::MAX as usize + 1);
    let mut out = Vec::new();
    let err = out.write_size_prefixed_str(&long).unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::LengthOverflow);
    assert!(out.is_empty());
}

#[test]
fn string_shorter_than_prefix_is_malformed() {
    let payload = Builder::new().raw_str_len(10).raw_bytes(b"abc").build();
    let mut reader = NbtReader::new(payload.as_slice());

    let err = reader.read_size_prefixed_string().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn nonunicode_string_is_malformed() {
    let payload = Builder::new().raw_str_len(2).raw_bytes(&[0xff, 0xfe]).build();
    let mut reader = NbtReader::new(payload.as_slice());

    let err = reader.read_size_prefixed_string().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn short_read_of_fixed_width_is_malformed() {
    let payload = [0u8, 1];
    let mut reader = NbtReader::new(&payload[..]);

    let err = reader.read_int().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn negative_len_is_malformed() {
    let payload = Builder::new().int_payload(-1).build();
    let mut reader = NbtReader::new(payload.as_slice());

    let err = reader.read_len().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn len_over_limit_is_refused() {
    let payload = Builder::new().int_payload(11).build();
    let mut reader = NbtReader::with_opts(payload.as_slice(), ReadOpts::new().max_seq_len(10));

    let err = reader.read_len().unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::AllocationGuardExceeded {
            requested: 11,
            limit: 10
        }
    );
}

#[test]
fn len_at_limit_is_accepted() -> Result<()> {
    let payload = Builder::new().int_payload(10).build();
    let mut reader = NbtReader::with_opts(payload.as_slice(), ReadOpts::new().max_seq_len(10));

    assert_eq!(reader.read_len()?, 10);
    Ok(())
}

#[test]
fn read_bytes_does_not_trust_length() {
    let payload = [1u8, 2, 3];
    let mut reader = NbtReader::new(&payload[..]);

    let err = reader.read_bytes(1 << 20).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn unknown_tag_id() {
    let payload = [13u8];
    let mut reader = NbtReader::new(&payload[..]);

    let err = reader.read_tag().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownTagType(13));
}

#[test]
fn end_is_a_readable_tag() -> Result<()> {
    let payload = Builder::new().tag(Tag::End).build();
    let mut reader = NbtReader::new(payload.as_slice());

    assert_eq!(reader.read_tag()?, Tag::End);
    Ok(())
}

#[test]
fn reader_does_not_consume_past_value() -> Result<()> {
    let payload = Builder::new().int_payload(7).raw_bytes(&[9, 9]).build();
    let mut reader = NbtReader::new(payload.as_slice());
    reader.read_int()?;

    let rest = reader.into_inner();
    assert_eq!(rest, &[9, 9]);
    Ok(())
}

#[test]
fn depth_is_restored_after_failure() -> Result<()> {
    let payload: [u8; 0] = [];
    let mut reader = NbtReader::with_opts(&payload[..], ReadOpts::new().max_depth(1));

    assert!(reader.nested(|r| r.read_int()).is_err());
    // Were the depth leaked, this would now be refused.
    assert_eq!(reader.nested(|_| Ok(5))?, 5);

    let err = reader
        .nested(|r| r.nested(|_| Ok(())))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(1));
    Ok(())
}

#[test]
fn transport_read_errors_propagate() {
    let mut reader = NbtReader::new(Broken(io::ErrorKind::ConnectionReset));
    let err = reader.read_int().unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Io(io::ErrorKind::ConnectionReset));
    assert!(err.source().is_some());
    assert_eq!(
        err.into_io().map(|e| e.kind()),
        Some(io::ErrorKind::ConnectionReset)
    );
}

#[test]
fn transport_write_errors_propagate() {
    let mut writer = Broken(io::ErrorKind::BrokenPipe);
    let err = writer.write_int(1).unwrap_err();

    assert_eq!(err.kind(), &ErrorKind::Io(io::ErrorKind::BrokenPipe));
}
