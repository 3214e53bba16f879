#![no_main]
use libfuzzer_sys::fuzz_target;
use lzwpack::{Codec, Trailing};

fuzz_target!(|data: &[u8]| {
    let codec = Codec::new().trailing(Trailing::Pad);
    let packed = codec.compress_bytes(data);
    let compare = codec.decompress_bytes(&packed);
    assert!(compare.is_ok(), "{:?}", compare);
    assert_eq!(compare.unwrap(), data);
});
