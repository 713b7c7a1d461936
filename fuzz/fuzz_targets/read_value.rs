#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes, from_bytes_with_opts, to_bytes, ReadOpts};

fuzz_target!(|data: &[u8]| {
    let opts = ReadOpts::new().max_seq_len(100).max_depth(64);
    if let Ok(root) = from_bytes_with_opts(data, &opts) {
        let bs = to_bytes(&root).unwrap();
        assert_eq!(from_bytes(&bs).unwrap(), root);
    }
});
