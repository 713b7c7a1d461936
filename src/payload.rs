use std::io::{Read, Write};

use crate::error::Result;
use crate::stream::{NbtReader, WriteNbt};
use crate::Tag;

/// The contract every NBT tag implements: how its payload is laid out on the
/// wire.
///
/// A payload is only the value itself. The type id and (inside a compound)
/// the name are written by the container holding the tag.
///
/// Copying, equality and hashing come from `Clone`, `Eq` and `Hash`, which
/// every implementor provides.
pub trait Payload {
    /// The type id of this tag.
    fn tag(&self) -> Tag;

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()>;

    /// Replace this tag's value with one read from `reader`.
    ///
    /// The whole value is replaced, nothing is merged with the previous state.
    /// On error `self` is left as it was before the call.
    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()>;
}

macro_rules! scalar_payload {
    ($($ty:ty => $tag:ident, $write:ident, $read:ident;)*) => {
        $(
            impl Payload for $ty {
                fn tag(&self) -> Tag {
                    Tag::$tag
                }

                fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
                    writer.$write(*self)
                }

                fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
                    *self = reader.$read()?;
                    Ok(())
                }
            }
        )*
    };
}

scalar_payload! {
    i8 => Byte, write_byte, read_byte;
    i16 => Short, write_short, read_short;
    i32 => Int, write_int, read_int;
    i64 => Long, write_long, read_long;
    f32 => Float, write_float, read_float;
    f64 => Double, write_double, read_double;
}

impl Payload for String {
    fn tag(&self) -> Tag {
        Tag::String
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_size_prefixed_str(self)
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        *self = reader.read_size_prefixed_string()?;
        Ok(())
    }
}
