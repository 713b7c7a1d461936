use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::builder::Builder;
use crate::error::{ErrorKind, Result};
use crate::{
    compound, from_bytes, from_bytes_with_opts, from_reader, read_named, to_bytes, to_writer,
    write_named, ByteArray, Compound, IntArray, List, LongArray, ReadOpts, Tag, Value,
};

fn level() -> Compound {
    let mut pos = List::new(Tag::Double);
    pos.push(0.5f64).unwrap();
    pos.push(70.0f64).unwrap();
    pos.push(-12.25f64).unwrap();

    let mut items = List::new(Tag::Compound);
    items
        .push(compound! { "Slot" => 0i8, "id" => "minecraft:torch", "Count" => 64i8 })
        .unwrap();

    compound! {
        "Data" => compound! {
            "LevelName" => "world",
            "SpawnX" => 100i32,
            "RandomSeed" => -4_172_144_997_902_289_642i64,
            "rainTime" => 12_000i32,
            "thundering" => false,
            "BorderSize" => 6.0e7f64,
            "version" => 19133i16,
            "DayTime" => 1.0f32,
            "Pos" => pos,
            "Inventory" => items,
            "Biomes" => ByteArray::new((0..=255).collect()),
            "Heights" => IntArray::new(vec![64; 16]),
            "BlockStates" => LongArray::new(vec![0x1111_2222_3333_4444, -1]),
            "Empty" => List::new(Tag::String),
            "NoEntries" => Compound::new(),
        },
    }
}

#[test]
fn root_layout() -> Result<()> {
    let root = compound! { "a" => 1i32 };
    let expected = Builder::new()
        .start_compound("")
        .int("a", 1)
        .end_compound()
        .build();

    assert_eq!(to_bytes(&root)?, expected);
    Ok(())
}

#[test]
fn round_trip() -> Result<()> {
    let root = level();
    let bytes = to_bytes(&root)?;
    let back = from_bytes(&bytes)?;

    assert_eq!(back, root);
    assert_eq!(to_bytes(&back)?, bytes);
    Ok(())
}

#[test]
fn named_round_trip() -> Result<()> {
    let value = Value::from(level());
    let mut bytes = Vec::new();
    write_named(&mut bytes, "level.dat", &value)?;

    let (name, back) = read_named(bytes.as_slice(), &ReadOpts::new())?;
    assert_eq!(name, "level.dat");
    assert_eq!(back, value);
    Ok(())
}

#[test]
fn non_compound_root() -> Result<()> {
    let mut bytes = Vec::new();
    write_named(&mut bytes, "n", &Value::Int(7))?;

    let (name, value) = read_named(bytes.as_slice(), &ReadOpts::new())?;
    assert_eq!((name.as_str(), value), ("n", Value::Int(7)));

    let err = from_bytes(&bytes).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::TypeMismatch {
            expected: Tag::Compound,
            found: Tag::Int
        }
    );
    Ok(())
}

#[test]
fn network_root_has_no_name() -> Result<()> {
    let payload = Builder::new()
        .tag(Tag::Compound)
        .string("motd", "hi")
        .end_compound()
        .build();

    let root = from_bytes_with_opts(&payload, &ReadOpts::network_nbt())?;
    assert_eq!(root.get_str("motd")?, Some("hi"));

    // The same bytes as a named root would take "motd"'s tag byte as part of
    // the name length and fall apart.
    assert!(from_bytes(&payload).is_err());
    Ok(())
}

#[test]
fn empty_input() {
    let err = from_bytes(&[]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn end_as_root() {
    let payload = Builder::new().tag(Tag::End).build();
    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedStream);
}

#[test]
fn unknown_root_type() {
    let payload = Builder::new().tag_id(77).name("").build();
    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownTagType(77));
}

#[test]
fn unknown_nested_type_leaks_nothing() {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("a")
        .start_list("b", Tag::Compound, 1)
        .start_anon_compound()
        .tag_id(13)
        .name("c")
        .end_compound()
        .end_compound()
        .end_compound()
        .build();

    let res = from_bytes(&payload);
    assert_eq!(res.unwrap_err().kind(), &ErrorKind::UnknownTagType(13));
}

#[test]
fn stream_left_after_root() -> Result<()> {
    let mut bytes = to_bytes(&compound! { "x" => 1i8 })?;
    bytes.extend_from_slice(b"tail");

    let mut reader = bytes.as_slice();
    let root = from_reader(&mut reader)?;

    assert_eq!(root.get_byte("x")?, Some(1));
    assert_eq!(reader, b"tail");
    Ok(())
}

#[test]
fn depth_guard() {
    let depth = 20;
    let mut builder = Builder::new().start_compound("");
    for _ in 0..depth {
        builder = builder.start_compound("n");
    }
    for _ in 0..=depth {
        builder = builder.end_compound();
    }
    let payload = builder.build();

    assert!(from_bytes_with_opts(&payload, &ReadOpts::new().max_depth(21)).is_ok());

    let err = from_bytes_with_opts(&payload, &ReadOpts::new().max_depth(20)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(20));
}

#[test]
fn deeply_nested_lists_are_refused() {
    let mut builder = Builder::new().start_compound("").start_list("l", Tag::List, 1);
    for _ in 0..10_000 {
        builder = builder.start_anon_list(Tag::List, 1);
    }
    let payload = builder.build();

    let err = from_bytes_with_opts(&payload, &ReadOpts::new().max_depth(64)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(64));
}

#[test]
fn gzip_round_trip() -> Result<()> {
    let root = level();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    to_writer(&mut encoder, &root)?;
    let compressed = encoder.finish()?;

    let back = from_reader(GzDecoder::new(compressed.as_slice()))?;
    assert_eq!(back, root);
    Ok(())
}

#[test]
fn writer_is_not_closed() -> Result<()> {
    let mut out = Vec::new();
    to_writer(&mut out, &Compound::new())?;
    out.write_all(&[0xAB])?;

    assert_eq!(out.last(), Some(&0xAB));

    let mut reader = out.as_slice();
    from_reader(&mut reader)?;
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    assert_eq!(rest, vec![0xAB]);
    Ok(())
}
