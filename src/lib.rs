//! nbtree reads and writes owned, typed trees of NBT tags: the recursive,
//! self-describing binary format used to store world data, entity state and
//! packet payloads.
//!
//! * For the tree itself see [`Value`], [`Compound`] and [`List`].
//! * For the array types see [`ByteArray`], [`IntArray`] and [`LongArray`].
//! * For how each tag encodes itself see [`Payload`].
//! * For reading a tree from a stream see [`from_reader`] and [`read_named`].
//!
//! Every tag in a tree is plain owned data. `Clone` produces a completely
//! independent copy, equality is structural, and writing a tree that was just
//! read produces exactly the same bytes, because compounds keep their entries
//! in insertion order.
//!
//! # Quick example
//!
//! ```
//! use nbtree::{compound, from_bytes, to_bytes, List, Tag};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let mut player = compound! {
//!     "Name" => "Steve",
//!     "Health" => 20.0f32,
//!     "Level" => 7i32,
//! };
//!
//! let mut pos = List::new(Tag::Double);
//! pos.push(1.5f64)?;
//! pos.push(64.0f64)?;
//! pos.push(-3.25f64)?;
//! player.insert("Pos", pos);
//!
//! let bytes = to_bytes(&player)?;
//! let back = from_bytes(&bytes)?;
//!
//! assert_eq!(back, player);
//! assert_eq!(back.get_int("Level")?, Some(7));
//! # Ok(())
//! # }
//! ```
//!
//! # Compression
//!
//! Files on disk are usually gzip compressed. This crate does not deal with
//! compression: wrap the file in a decoder such as `flate2::read::GzDecoder`
//! and hand that to [`from_reader`].

use std::convert::TryFrom;
use std::io::{Read, Write};

use log::trace;

pub mod error;
pub mod registry;
pub mod stream;

mod arrays;
mod macros;
mod payload;
mod value;

pub use arrays::*;
pub use payload::Payload;
pub use value::*;

#[cfg(test)]
mod test;

use error::{Error, Result};
use stream::{NbtReader, WriteNbt};

/// An NBT tag type. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of raw bytes.
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other tags, all of the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
    /// Represents an array of Long (i64).
    LongArray = 12,
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

/// Largest array length or list count accepted by default, in elements.
pub const DEFAULT_MAX_SEQ_LEN: usize = 16 * 1024 * 1024;

/// Deepest nesting of compounds and lists accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for reading NBT.
///
/// ```
/// use nbtree::ReadOpts;
///
/// let opts = ReadOpts::new().max_seq_len(1024).max_depth(16);
/// # let _ = opts;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ReadOpts {
    pub(crate) max_seq_len: usize,
    pub(crate) max_depth: usize,
    pub(crate) unnamed_root: bool,
}

impl Default for ReadOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOpts {
    pub fn new() -> Self {
        Self {
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            unnamed_root: false,
        }
    }

    /// Options for NBT embedded in network packets, where the root tag has
    /// no name.
    pub fn network_nbt() -> Self {
        Self {
            unnamed_root: true,
            ..Self::new()
        }
    }

    /// Maximum length of any array, and maximum count of any list. Larger
    /// declared sizes fail with
    /// [`AllocationGuardExceeded`][error::ErrorKind::AllocationGuardExceeded]
    /// before anything is allocated.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    /// Maximum nesting of compounds and lists.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }
}

/// Write a complete named tag: type id, name, then payload.
pub fn write_named<W: Write>(mut writer: W, name: &str, value: &Value) -> Result<()> {
    trace!("writing root {:?} tag {:?}", value.tag(), name);
    writer.write_tag(value.tag())?;
    writer.write_size_prefixed_str(name)?;
    value.write_payload(&mut writer)
}

/// Read a complete named tag, returning its name and value. With
/// [`ReadOpts::network_nbt`] no name is read and the returned name is empty.
pub fn read_named<R: Read>(reader: R, opts: &ReadOpts) -> Result<(String, Value)> {
    let mut reader = NbtReader::with_opts(reader, opts.clone());
    let tag = reader.read_tag()?;

    if tag == Tag::End {
        return Err(Error::malformed("invalid nbt: no root tag"));
    }

    let name = if opts.unnamed_root {
        String::new()
    } else {
        reader.read_size_prefixed_string()?
    };

    trace!("reading root {:?} tag {:?}", tag, name);
    let mut value = registry::instantiate(tag as u8)?;
    value.read_payload(&mut reader)?;
    Ok((name, value))
}

/// Write `root` as the root compound of a file. The root's name is the empty
/// string.
pub fn to_writer<W: Write>(mut writer: W, root: &Compound) -> Result<()> {
    trace!("writing root compound of {} entries", root.len());
    writer.write_tag(Tag::Compound)?;
    writer.write_size_prefixed_str("")?;
    root.write_payload(&mut writer)
}

/// Serialize a root compound to a new byte vector.
pub fn to_bytes(root: &Compound) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(&mut out, root)?;
    Ok(out)
}

/// Read a root compound from a stream with default options. The stream is
/// read only as far as the end of the root.
pub fn from_reader<R: Read>(reader: R) -> Result<Compound> {
    from_reader_with_opts(reader, &ReadOpts::new())
}

pub fn from_reader_with_opts<R: Read>(reader: R, opts: &ReadOpts) -> Result<Compound> {
    let (_, value) = read_named(reader, opts)?;
    match value {
        Value::Compound(c) => Ok(c),
        other => Err(Error::type_mismatch(Tag::Compound, other.tag())),
    }
}

/// Read a root compound from a byte slice with default options.
pub fn from_bytes(bytes: &[u8]) -> Result<Compound> {
    from_reader(bytes)
}

pub fn from_bytes_with_opts(bytes: &[u8], opts: &ReadOpts) -> Result<Compound> {
    from_reader_with_opts(bytes, opts)
}
