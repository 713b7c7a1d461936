mod compound;
mod list;
mod ser;

use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::stream::NbtReader;
use crate::{registry, ByteArray, IntArray, LongArray, Payload, Tag};

pub use self::compound::Compound;
pub use self::list::List;

/// Value is a complete NBT tag. It owns its data, and compounds and lists own
/// their children, so cloning a `Value` never shares anything with the
/// original.
///
/// Equality is structural: the variant must match and the payloads must be
/// equal. Floats compare by bit pattern, which keeps `Eq` and `Hash` lawful
/// and means a value always equals its own round trip through the wire
/// format, `NaN` included.
///
/// ```
/// # use nbtree::{Value, Tag};
/// # fn main() -> nbtree::error::Result<()> {
/// let v = Value::from(42i32);
/// assert_eq!(v.tag(), Tag::Int);
/// assert_eq!(v.as_int()?, 42);
/// assert!(v.as_long().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(ByteArray),
    IntArray(IntArray),
    LongArray(LongArray),
    List(List),
    Compound(Compound),
}

// Run the same expression against whichever payload the value holds.
macro_rules! with_payload {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            Value::Byte($v) => $body,
            Value::Short($v) => $body,
            Value::Int($v) => $body,
            Value::Long($v) => $body,
            Value::Float($v) => $body,
            Value::Double($v) => $body,
            Value::String($v) => $body,
            Value::ByteArray($v) => $body,
            Value::IntArray($v) => $body,
            Value::LongArray($v) => $body,
            Value::List($v) => $body,
            Value::Compound($v) => $body,
        }
    };
}

impl Value {
    /// The zero value of a tag type, as produced by the
    /// [`registry`][crate::registry]. `None` for [`Tag::End`].
    pub fn zero(tag: Tag) -> Option<Value> {
        registry::instantiate(tag as u8).ok()
    }

    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    fn mismatch(&self, expected: Tag) -> Error {
        Error::type_mismatch(expected, self.tag())
    }

    pub fn as_str(&self) -> Result<&str> {
        self.as_string().map(String::as_str)
    }

    pub fn into_compound(self) -> Result<Compound> {
        match self {
            Value::Compound(c) => Ok(c),
            other => Err(other.mismatch(Tag::Compound)),
        }
    }

    pub fn into_list(self) -> Result<List> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(other.mismatch(Tag::List)),
        }
    }
}

macro_rules! copy_accessors {
    ($($fn:ident: $variant:ident -> $ty:ty),* $(,)?) => {
        impl Value {
            $(
                #[doc = concat!("The value of a `", stringify!($variant), "` tag, or a `TypeMismatch` error.")]
                pub fn $fn(&self) -> Result<$ty> {
                    match self {
                        Value::$variant(v) => Ok(*v),
                        other => Err(other.mismatch(Tag::$variant)),
                    }
                }
            )*
        }
    };
}

copy_accessors! {
    as_byte: Byte -> i8,
    as_short: Short -> i16,
    as_int: Int -> i32,
    as_long: Long -> i64,
    as_float: Float -> f32,
    as_double: Double -> f64,
}

macro_rules! ref_accessors {
    ($($fn:ident, $fn_mut:ident: $variant:ident -> $ty:ty),* $(,)?) => {
        impl Value {
            $(
                pub fn $fn(&self) -> Result<&$ty> {
                    match self {
                        Value::$variant(v) => Ok(v),
                        other => Err(other.mismatch(Tag::$variant)),
                    }
                }

                pub fn $fn_mut(&mut self) -> Result<&mut $ty> {
                    match self {
                        Value::$variant(v) => Ok(v),
                        other => Err(other.mismatch(Tag::$variant)),
                    }
                }
            )*
        }
    };
}

ref_accessors! {
    as_string, as_string_mut: String -> String,
    as_byte_array, as_byte_array_mut: ByteArray -> ByteArray,
    as_int_array, as_int_array_mut: IntArray -> IntArray,
    as_long_array, as_long_array_mut: LongArray -> LongArray,
    as_list, as_list_mut: List -> List,
    as_compound, as_compound_mut: Compound -> Compound,
}

impl Payload for Value {
    fn tag(&self) -> Tag {
        Value::tag(self)
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        with_payload!(self, v => v.write_payload(writer))
    }

    /// Reads a payload of this value's current variant. Values created by the
    /// registry start out as the zero value of the variant that was declared
    /// on the wire.
    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        with_payload!(self, v => v.read_payload(reader))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (ByteArray(a), ByteArray(b)) => a == b,
            (IntArray(a), IntArray(b)) => a == b,
            (LongArray(a), LongArray(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Compound(a), Compound(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::ByteArray(v) => v.hash(state),
            Value::IntArray(v) => v.hash(state),
            Value::LongArray(v) => v.hash(state),
            Value::List(v) => v.hash(state),
            Value::Compound(v) => v.hash(state),
        }
    }
}

/// A compact SNBT-like rendering, mostly for logs and debugging. Arrays are
/// summarised by their length rather than printed in full.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}b", v),
            Value::Short(v) => write!(f, "{}s", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}L", v),
            Value::Float(v) => write!(f, "{}f", v),
            Value::Double(v) => write!(f, "{}d", v),
            Value::String(v) => write_quoted(f, v),
            Value::ByteArray(v) => v.fmt(f),
            Value::IntArray(v) => v.fmt(f),
            Value::LongArray(v) => v.fmt(f),
            Value::List(v) => v.fmt(f),
            Value::Compound(v) => v.fmt(f),
        }
    }
}

pub(crate) fn write_quoted(f: &mut std::fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

#[cfg(feature = "arbitrary1")]
fn arbitrary_of(u: &mut arbitrary::Unstructured<'_>, tag: Tag) -> arbitrary::Result<Value> {
    use Value::*;

    Ok(match tag {
        Tag::End => return Err(arbitrary::Error::IncorrectFormat),
        Tag::Byte => Byte(u.arbitrary()?),
        Tag::Short => Short(u.arbitrary()?),
        Tag::Int => Int(u.arbitrary()?),
        Tag::Long => Long(u.arbitrary()?),
        Tag::Float => Float(u.arbitrary()?),
        Tag::Double => Double(u.arbitrary()?),
        Tag::ByteArray => ByteArray(u.arbitrary()?),
        Tag::String => String(u.arbitrary()?),
        Tag::List => List(u.arbitrary()?),
        Tag::Compound => Compound(u.arbitrary()?),
        Tag::IntArray => IntArray(u.arbitrary()?),
        Tag::LongArray => LongArray(u.arbitrary()?),
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let tag = u.arbitrary()?;
        arbitrary_of(u, tag)
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for List {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Lists need to all be the same type.
        let element: Tag = u.arbitrary()?;
        let mut list = List::new(element);
        if element == Tag::End {
            return Ok(list);
        }

        let len = u.arbitrary_len::<Value>()?;
        for _ in 0..len {
            list.push(arbitrary_of(u, element)?)
                .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        }
        Ok(list)
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Compound {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let entries: Vec<(std::string::String, Value)> = u.arbitrary()?;
        Ok(entries.into_iter().collect())
    }
}
