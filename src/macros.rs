/// Build a [`Compound`][crate::Compound] from `name => value` pairs. Values
/// can be anything that converts into a [`Value`][crate::Value], including
/// nested compounds and lists.
///
/// ```
/// use nbtree::{compound, ByteArray, Tag};
///
/// let chunk = compound! {
///     "DataVersion" => 3465i32,
///     "Status" => "minecraft:full",
///     "Level" => compound! {
///         "xPos" => -2i32,
///         "Biomes" => ByteArray::new(vec![1, 1, 2]),
///     },
/// };
///
/// assert_eq!(chunk.len(), 3);
/// assert_eq!(chunk["Level"].tag(), Tag::Compound);
/// ```
///
/// Entries are inserted in the order written, which is also the order they
/// are serialized in. A repeated name keeps its first position and its last
/// value.
#[macro_export]
macro_rules! compound {
    () => {
        $crate::Compound::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut compound = $crate::Compound::new();
        $(
            compound.insert($name, $value);
        )+
        compound
    }};
}
