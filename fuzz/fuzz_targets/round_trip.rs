#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{compound, from_bytes, to_bytes, Value};

fuzz_target!(|v: Value| {
    let root = compound! { "" => v };

    // Names longer than a u16 length are refused, everything else must survive.
    if let Ok(bs) = to_bytes(&root) {
        assert_eq!(from_bytes(&bs).unwrap(), root);
    }
});
