use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::ops::Index;

use indexmap::IndexMap;
use log::warn;

use crate::error::Result;
use crate::stream::{NbtReader, WriteNbt};
use crate::{registry, ByteArray, IntArray, List, LongArray, Payload, Tag, Value};

/// NBT Compound: named children of any type.
///
/// Entries keep the order they were inserted in, and that order is the order
/// they are written in, so writing the same compound twice gives the same
/// bytes. Equality ignores the order: two compounds are equal when they hold
/// equal values under the same names.
///
/// ```
/// # use nbtree::Compound;
/// # fn main() -> nbtree::error::Result<()> {
/// let mut c = Compound::new();
/// c.insert("x", 1i32);
/// c.insert("name", "chest");
///
/// assert_eq!(c.get_int("x")?, Some(1));
/// assert_eq!(c.get_str("name")?, Some("chest"));
/// assert_eq!(c.get_int("missing")?, None);
/// assert!(c.get_int("name").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a child, returning the value previously stored under `name`.
    /// Replacing a value keeps the position of the original entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    /// Remove a child. The remaining entries keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

// Typed lookups. A missing name is `Ok(None)`; a name holding another type of
// tag is a `TypeMismatch`.
macro_rules! typed_getters {
    ($($fn:ident => $as:ident -> $ty:ty),* $(,)?) => {
        impl Compound {
            $(
                pub fn $fn(&self, name: &str) -> Result<Option<$ty>> {
                    self.get(name).map(Value::$as).transpose()
                }
            )*
        }
    };
}

typed_getters! {
    get_byte => as_byte -> i8,
    get_short => as_short -> i16,
    get_int => as_int -> i32,
    get_long => as_long -> i64,
    get_float => as_float -> f32,
    get_double => as_double -> f64,
    get_str => as_str -> &str,
    get_byte_array => as_byte_array -> &ByteArray,
    get_int_array => as_int_array -> &IntArray,
    get_long_array => as_long_array -> &LongArray,
    get_list => as_list -> &List,
    get_compound => as_compound -> &Compound,
}

impl Payload for Compound {
    fn tag(&self) -> Tag {
        Tag::Compound
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        for (name, value) in &self.entries {
            writer.write_tag(value.tag())?;
            writer.write_size_prefixed_str(name)?;
            value.write_payload(writer)?;
        }
        writer.write_tag(Tag::End)
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        let entries = reader.nested(|reader| {
            let mut entries = IndexMap::new();

            loop {
                let id = reader.read_tag_id()?;
                if id == Tag::End as u8 {
                    break;
                }

                let name = reader.read_size_prefixed_string()?;
                let mut value = registry::instantiate(id)?;
                value.read_payload(reader)?;

                if let Some(old) = entries.insert(name, value) {
                    warn!(
                        "duplicate name in nbt compound, replacing {:?} tag",
                        old.tag()
                    );
                }
            }

            Ok(entries)
        })?;

        self.entries = entries;
        Ok(())
    }
}

impl Hash for Compound {
    // Must agree with the order-insensitive equality, so entries are hashed
    // independently and combined commutatively.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined = 0u64;
        for entry in &self.entries {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }

        self.entries.len().hash(state);
        combined.hash(state);
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if is_bare_name(name) {
                f.write_str(name)?;
            } else {
                super::write_quoted(f, name)?;
            }
            write!(f, ": {}", value)?;
        }
        f.write_str("}")
    }
}

fn is_bare_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

impl Index<&str> for Compound {
    type Output = Value;

    /// # Panics
    ///
    /// If there is no entry with the given name.
    fn index(&self, name: &str) -> &Value {
        match self.entries.get(name) {
            Some(v) => v,
            None => panic!("no entry named {:?} in compound", name),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut c = Compound::new();
        c.extend(iter);
        c
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
