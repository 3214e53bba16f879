use lzwpack::decode::Decoder;
use lzwpack::encode::{self, Encoder};
use lzwpack::{Codec, Symbol, Trailing};

/// Text with many distinct, growing phrases.
fn counting_text(words: usize) -> Vec<u8> {
    let mut text = String::new();
    for i in 0..words {
        text.push_str(&format!("{} {:x} {:o}; ", i, i * i, i * 31));
    }
    text.into_bytes()
}

/// Dictionary sizes seen by the encoder after each phrase it learns.
fn encoder_sizes(data: &[u8], dict_size: u32) -> (Vec<Symbol>, Vec<u32>) {
    let mut encoder = Encoder::with_dict_size(dict_size).unwrap();
    let mut symbols = vec![];
    let mut sizes = vec![];
    for &byte in data {
        if let Some(symbol) = encoder.push(byte) {
            symbols.push(symbol);
            sizes.push(encoder.dict_len());
        }
    }
    symbols.extend(encoder.finish());
    (symbols, sizes)
}

/// Dictionary sizes seen by the decoder after each phrase it learns.
fn decoder_sizes(symbols: &[Symbol], dict_size: u32) -> (Vec<u8>, Vec<u32>) {
    let mut decoder = Decoder::with_dict_size(dict_size).unwrap();
    let mut sizes = vec![];
    for (idx, &symbol) in symbols.iter().enumerate() {
        decoder.push(symbol).unwrap();
        if idx > 0 {
            sizes.push(decoder.dict_len());
        }
    }
    (decoder.into_inner(), sizes)
}

#[test]
fn resets_multiple_times() {
    let data = counting_text(2000);
    let symbols = encode::compress(&data);
    // Every symbol after the first learns a phrase, 256 of them fill the dictionary.
    assert!(symbols.len() > 3 * 256);
    // The last entry is learned and forgotten in the same step.
    assert!(symbols.iter().all(|s| s.code() < 511));

    let codec = Codec::new().trailing(Trailing::Pad);
    let packed = codec.compress_bytes(&data);
    assert!(packed.len() < data.len());
    assert_eq!(codec.decompress_bytes(&packed).unwrap(), data);
}

#[test]
fn dictionaries_stay_in_lockstep() {
    let data = counting_text(1000);
    for &dict_size in &[257, 300, 512, 4096] {
        let (symbols, encoded) = encoder_sizes(&data, dict_size);
        let (decoded, sizes) = decoder_sizes(&symbols, dict_size);
        assert_eq!(decoded, data);
        assert_eq!(encoded, sizes, "dictionary size {}", dict_size);
        assert!(sizes.iter().all(|&len| len < dict_size));
    }
}

#[test]
fn reset_forgets_phrases() {
    let data = counting_text(1000);
    let (_, sizes) = encoder_sizes(&data, 512);
    let resets = sizes.iter().filter(|&&len| len == 256).count();
    assert!(resets >= 2, "only {} resets", resets);
    // After a reset the dictionary grows one entry at a time from the literals again.
    for pair in sizes.windows(2) {
        assert!(pair[1] == pair[0] + 1 || (pair[0] == 511 && pair[1] == 256));
    }
}

#[test]
fn smallest_dictionary_never_learns() {
    let data = b"aaaaaaaaaaaaaaaa";
    let (symbols, sizes) = encoder_sizes(data, 257);
    assert!(symbols.iter().all(|s| matches!(s, Symbol::Literal(b'a'))));
    assert!(sizes.iter().all(|&len| len == 256));
    let (decoded, _) = decoder_sizes(&symbols, 257);
    assert_eq!(decoded, &data[..]);
}
