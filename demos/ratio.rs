//! Compresses a sample text and prints how well it went.

use lzwpack::{Codec, Stats, Trailing};

const SAMPLE: &str = "\
It was the best of times, it was the worst of times, it was the age of wisdom, it was the age \
of foolishness, it was the epoch of belief, it was the epoch of incredulity, it was the season \
of Light, it was the season of Darkness, it was the spring of hope, it was the winter of \
despair.";

fn main() {
    for &trailing in &[Trailing::Discard, Trailing::Pad] {
        let codec = Codec::new().trailing(trailing);
        let packed = codec.compress(SAMPLE);
        let stats = Stats {
            original: SAMPLE.len(),
            compressed: packed.len(),
        };

        println!("{:?}", trailing);
        println!("  original size:   {}", stats.original);
        println!("  compressed size: {}", stats.compressed);
        if let Some(ratio) = stats.ratio() {
            println!("  ratio:           {:.3}", ratio);
        }
        match codec.decompress(&packed) {
            Ok(text) if text == SAMPLE => println!("  round-trip:      exact"),
            Ok(text) => println!("  round-trip:      differs, {} bytes", text.len()),
            Err(err) => println!("  round-trip:      {}", err),
        }
    }
}
