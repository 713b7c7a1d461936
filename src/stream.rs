//! Primitive reads and writes of NBT data over `std::io` streams.
//!
//! All multi-byte values are big-endian. Text is a `u16` length followed by
//! that many bytes of UTF-8.
//!
//! Nothing here ever closes a stream. A reader or writer handed in by the
//! caller is only used for the duration of the call, and `&mut R` works
//! anywhere an `R` is expected.

use std::convert::{TryFrom, TryInto};
use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::error::{Error, Result};
use crate::{registry, ReadOpts, Tag};

/// Extension trait adding NBT primitive writes to every [`Write`].
pub trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag as u8)?;
        Ok(())
    }

    fn write_byte(&mut self, v: i8) -> Result<()> {
        self.write_i8(v)?;
        Ok(())
    }

    fn write_short(&mut self, v: i16) -> Result<()> {
        self.write_i16::<BigEndian>(v)?;
        Ok(())
    }

    fn write_int(&mut self, v: i32) -> Result<()> {
        self.write_i32::<BigEndian>(v)?;
        Ok(())
    }

    fn write_long(&mut self, v: i64) -> Result<()> {
        self.write_i64::<BigEndian>(v)?;
        Ok(())
    }

    fn write_float(&mut self, v: f32) -> Result<()> {
        self.write_f32::<BigEndian>(v)?;
        Ok(())
    }

    fn write_double(&mut self, v: f64) -> Result<()> {
        self.write_f64::<BigEndian>(v)?;
        Ok(())
    }

    /// Write a `u16` length prefixed UTF-8 string. Used for both compound
    /// entry names and String payloads.
    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| Error::length_overflow(s.len()))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write an `i32` length prefix for an array or list.
    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len.try_into().map_err(|_| Error::length_overflow(len))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write + ?Sized {}

/// Reads NBT primitives from any [`Read`], enforcing the limits of a
/// [`ReadOpts`].
///
/// The reader also tracks how deeply nested the current read is, so that
/// maliciously deep compounds and lists are rejected rather than blowing the
/// stack.
pub struct NbtReader<R: Read> {
    reader: R,
    opts: ReadOpts,
    depth: usize,
}

impl<R: Read> NbtReader<R> {
    /// Create a reader with the default options.
    pub fn new(reader: R) -> Self {
        Self::with_opts(reader, ReadOpts::new())
    }

    pub fn with_opts(reader: R, opts: ReadOpts) -> Self {
        Self {
            reader,
            opts,
            depth: 0,
        }
    }

    pub fn opts(&self) -> &ReadOpts {
        &self.opts
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this reader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a raw type id without checking it is registered.
    pub fn read_tag_id(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    /// Read a type id, which must be a known tag or End.
    pub fn read_tag(&mut self) -> Result<Tag> {
        let id = self.read_tag_id()?;
        registry::resolve(id)
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        Ok(self.reader.read_i8()?)
    }

    pub fn read_short(&mut self) -> Result<i16> {
        Ok(self.reader.read_i16::<BigEndian>()?)
    }

    pub fn read_int(&mut self) -> Result<i32> {
        Ok(self.reader.read_i32::<BigEndian>()?)
    }

    pub fn read_long(&mut self) -> Result<i64> {
        Ok(self.reader.read_i64::<BigEndian>()?)
    }

    pub fn read_float(&mut self) -> Result<f32> {
        Ok(self.reader.read_f32::<BigEndian>()?)
    }

    pub fn read_double(&mut self) -> Result<f64> {
        Ok(self.reader.read_f64::<BigEndian>()?)
    }

    pub fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        let buf = self.read_bytes(len)?;

        String::from_utf8(buf).map_err(|e| {
            Error::malformed(format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(e.as_bytes())
            ))
        })
    }

    /// Read an `i32` length or count prefix. Negative values are malformed,
    /// values above [`ReadOpts::max_seq_len`] are refused.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = self.read_int()?;
        let len = usize::try_from(len)
            .map_err(|_| Error::malformed(format!("nbt length was negative: {}", len)))?;

        if len > self.opts.max_seq_len {
            debug!(
                "refusing nbt length {} over limit {}",
                len, self.opts.max_seq_len
            );
            return Err(Error::guard_exceeded(len, self.opts.max_seq_len));
        }

        Ok(len)
    }

    /// Read exactly `len` raw bytes.
    ///
    /// The buffer grows as data actually arrives, so a length field larger
    /// than the remaining stream fails without allocating the full amount.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;

        if buf.len() != len {
            return Err(Error::malformed(format!(
                "eof: wanted {} bytes, stream had {}",
                len,
                buf.len()
            )));
        }
        Ok(buf)
    }

    pub fn read_int_vec(&mut self, len: usize) -> Result<Vec<i32>> {
        let bytes = self.read_bytes(byte_len(len, 4)?)?;
        let mut out = vec![0; len];
        BigEndian::read_i32_into(&bytes, &mut out);
        Ok(out)
    }

    pub fn read_long_vec(&mut self, len: usize) -> Result<Vec<i64>> {
        let bytes = self.read_bytes(byte_len(len, 8)?)?;
        let mut out = vec![0; len];
        BigEndian::read_i64_into(&bytes, &mut out);
        Ok(out)
    }

    /// Run `f` one nesting level deeper. Fails if that would exceed
    /// [`ReadOpts::max_depth`]. The depth is restored whether or not `f`
    /// succeeds.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.opts.max_depth {
            debug!("refusing nbt nested past depth {}", self.opts.max_depth);
            return Err(Error::depth_exceeded(self.opts.max_depth));
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}

fn byte_len(len: usize, width: usize) -> Result<usize> {
    len.checked_mul(width)
        .ok_or_else(|| Error::length_overflow(len))
}
