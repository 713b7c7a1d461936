use crate::{compound, Compound, List, Tag, Value};

#[test]
fn empty() {
    let c = compound! {};
    assert_eq!(c, Compound::new());
}

#[test]
fn trailing_comma_is_optional() {
    let a = compound! { "a" => 1i32 };
    let b = compound! { "a" => 1i32, };
    assert_eq!(a, b);
}

#[test]
fn nested() {
    let c = compound! {
        "outer" => compound! {
            "inner" => compound! { "leaf" => 1.0f32 },
        },
    };

    let leaf = c
        .get_compound("outer")
        .unwrap()
        .unwrap()
        .get_compound("inner")
        .unwrap()
        .unwrap()
        .get_float("leaf")
        .unwrap();
    assert_eq!(leaf, Some(1.0));
}

#[test]
fn names_can_be_expressions() {
    let name = String::from("dynamic");
    let c = compound! { name.clone() => List::new(Tag::Byte), format!("n{}", 2) => 2i8 };

    assert_eq!(c[name.as_str()], Value::List(List::new(Tag::Byte)));
    assert_eq!(c.get_byte("n2").unwrap(), Some(2));
}

#[test]
fn repeated_name_keeps_first_position() {
    let c = compound! { "a" => 1i32, "b" => 2i32, "a" => 3i32 };

    let names: Vec<_> = c.keys().map(String::as_str).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(c.get_int("a").unwrap(), Some(3));
}
