//! The mapping from on-wire type ids to the tag variants they stand for.
//!
//! Readers of compounds and lists only learn the type of a child when they
//! read its id. The registry turns that id into a zero-valued [`Value`] of the
//! right variant, which then reads its own payload.
//!
//! An id without a registered variant is always an error. Skipping it is not
//! possible: without knowing the variant there is no way to know how long its
//! payload is, and every read after it would be out of step.

use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::{ByteArray, Compound, IntArray, List, LongArray, Tag, Value};

/// Produces the zero value of one tag variant.
pub type Factory = fn() -> Value;

// Indexed by type id. End has no payload and therefore no factory.
static FACTORIES: [Option<Factory>; 13] = [
    None,
    Some(|| Value::Byte(0)),
    Some(|| Value::Short(0)),
    Some(|| Value::Int(0)),
    Some(|| Value::Long(0)),
    Some(|| Value::Float(0.0)),
    Some(|| Value::Double(0.0)),
    Some(|| Value::ByteArray(ByteArray::default())),
    Some(|| Value::String(String::new())),
    Some(|| Value::List(List::default())),
    Some(|| Value::Compound(Compound::new())),
    Some(|| Value::IntArray(IntArray::default())),
    Some(|| Value::LongArray(LongArray::default())),
];

/// Look up the factory for a type id.
pub fn lookup(id: u8) -> Result<Factory> {
    FACTORIES
        .get(id as usize)
        .copied()
        .flatten()
        .ok_or_else(|| Error::unknown_tag(id))
}

/// Create the zero value for a type id.
pub fn instantiate(id: u8) -> Result<Value> {
    lookup(id).map(|factory| factory())
}

/// Whether `id` names a tag that carries a payload.
pub fn is_registered(id: u8) -> bool {
    lookup(id).is_ok()
}

/// Turn a type id into a [`Tag`]. Unlike [`lookup`] this accepts End, which is
/// a valid id in compound terminators and as the type of an empty list.
pub fn resolve(id: u8) -> Result<Tag> {
    Tag::try_from(id).map_err(|_| Error::unknown_tag(id))
}
