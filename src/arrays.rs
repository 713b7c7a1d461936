use std::fmt::Display;
use std::io::{Read, Write};
use std::ops::{Deref, DerefMut};

use serde::{Serialize, Serializer};
use serde_bytes::Bytes;

use crate::error::Result;
use crate::stream::{NbtReader, WriteNbt};
use crate::{Payload, Tag};

/// NBT ByteArray: an `i32` length followed by that many raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
pub struct ByteArray {
    data: Vec<u8>,
}

impl ByteArray {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Payload for ByteArray {
    fn tag(&self) -> Tag {
        Tag::ByteArray
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_len(self.data.len())?;
        writer.write_bytes(&self.data)
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        let len = reader.read_len()?;
        self.data = reader.read_bytes(len)?;
        Ok(())
    }
}

impl Serialize for ByteArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Bytes::new(&self.data).serialize(serializer)
    }
}

/// NBT IntArray: an `i32` length followed by that many big-endian `i32`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[serde(transparent)]
pub struct IntArray {
    data: Vec<i32>,
}

impl IntArray {
    pub fn new(data: Vec<i32>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.data
    }
}

impl Payload for IntArray {
    fn tag(&self) -> Tag {
        Tag::IntArray
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_len(self.data.len())?;
        for v in &self.data {
            writer.write_int(*v)?;
        }
        Ok(())
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        let len = reader.read_len()?;
        self.data = reader.read_int_vec(len)?;
        Ok(())
    }
}

/// NBT LongArray: an `i32` length followed by that many big-endian `i64`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[serde(transparent)]
pub struct LongArray {
    data: Vec<i64>,
}

impl LongArray {
    pub fn new(data: Vec<i64>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.data
    }
}

impl Payload for LongArray {
    fn tag(&self) -> Tag {
        Tag::LongArray
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_len(self.data.len())?;
        for v in &self.data {
            writer.write_long(*v)?;
        }
        Ok(())
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        let len = reader.read_len()?;
        self.data = reader.read_long_vec(len)?;
        Ok(())
    }
}

macro_rules! array_common {
    ($($name:ident($elem:ty, $unit:literal)),*) => {
        $(
            impl Deref for $name {
                type Target = Vec<$elem>;

                fn deref(&self) -> &Self::Target {
                    &self.data
                }
            }

            impl DerefMut for $name {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.data
                }
            }

            impl From<Vec<$elem>> for $name {
                fn from(data: Vec<$elem>) -> Self {
                    Self::new(data)
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    if self.data.is_empty() {
                        f.write_str("[empty]")
                    } else {
                        write!(f, "[{} {}]", self.data.len(), $unit)
                    }
                }
            }
        )*
    };
}

array_common!(ByteArray(u8, "bytes"), IntArray(i32, "ints"), LongArray(i64, "longs"));
