use std::fmt::Display;
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::stream::{NbtReader, WriteNbt};
use crate::{registry, Payload, Tag, Value};

// Cap on how many elements are reserved up front when reading. The count has
// already passed the length guard, but an honest count is no promise that the
// stream really holds that many elements.
const PREALLOC_LIMIT: usize = 4096;

/// NBT List: an ordered sequence of tags that all share one declared type.
///
/// The declared element type is part of the list's state even when the list
/// is empty, and it is written to the wire either way. A list declared as
/// [`Tag::End`] has no element type yet; it takes the type of the first
/// element pushed into it.
///
/// Unlike [`Compound`][crate::Compound], order matters for equality.
///
/// ```
/// # use nbtree::{List, Tag};
/// let mut inventory = List::new(Tag::Compound);
/// assert!(inventory.is_empty());
/// assert_eq!(inventory.element_tag(), Tag::Compound);
///
/// assert!(inventory.push(5i32).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl List {
    /// Create an empty list of the given element type.
    pub fn new(element: Tag) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Create a list from existing values, which must all be of the `element`
    /// type.
    pub fn from_values(element: Tag, values: Vec<Value>) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| v.tag() != element) {
            return Err(Error::type_mismatch(element, bad.tag()));
        }

        Ok(Self {
            element,
            items: values,
        })
    }

    pub fn element_tag(&self) -> Tag {
        self.element
    }

    fn accept(&mut self, value: &Value) -> Result<()> {
        if self.element == Tag::End && self.items.is_empty() {
            self.element = value.tag();
        }

        if value.tag() != self.element {
            return Err(Error::type_mismatch(self.element, value.tag()));
        }
        Ok(())
    }

    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.accept(&value)?;
        self.items.push(value);
        Ok(())
    }

    /// # Panics
    ///
    /// If `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.accept(&value)?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        self.accept(&value)?;
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Value {
        self.items.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Mutable access to an element. Replacing it with a tag of another type
    /// makes the list unwritable until it is fixed.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every element. The declared element type is kept.
    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.items
    }
}

impl Payload for List {
    fn tag(&self) -> Tag {
        Tag::List
    }

    fn write_payload<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        // Checked up front so a bad element cannot leave half a list behind.
        if let Some(bad) = self.items.iter().find(|v| v.tag() != self.element) {
            return Err(Error::type_mismatch(self.element, bad.tag()));
        }

        writer.write_tag(self.element)?;
        writer.write_len(self.items.len())?;
        for item in &self.items {
            item.write_payload(writer)?;
        }
        Ok(())
    }

    fn read_payload<R: Read>(&mut self, reader: &mut NbtReader<R>) -> Result<()> {
        let (element, items) = reader.nested(|reader| {
            let element = reader.read_tag()?;
            let len = reader.read_len()?;

            // A list of End with elements would be a list of nothing taking up
            // no bytes; refuse it. Empty lists are often written as End.
            if element == Tag::End && len != 0 {
                return Err(Error::malformed(
                    "unexpected list of type 'end', which is not supported",
                ));
            }

            let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                let mut item = registry::instantiate(element as u8)?;
                item.read_payload(reader)?;
                items.push(item);
            }

            Ok((element, items))
        })?;

        self.element = element;
        self.items = items;
        Ok(())
    }
}

impl Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
