extern crate criterion;
extern crate lzwpack;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lzwpack::{Codec, Trailing};

fn sample(len: usize) -> Vec<u8> {
    let text = include_str!("../src/decode.rs").as_bytes();
    text.iter().copied().cycle().take(len).collect()
}

pub fn criterion_benchmark(c: &mut Criterion, dict_size: u32) {
    let codec = Codec::with_dict_size(dict_size)
        .expect("Invalid dictionary size")
        .trailing(Trailing::Pad);
    let data = sample(1 << 20);
    let packed = codec.compress_bytes(&data);

    let mut group = c.benchmark_group(format!("dict-{}", dict_size));
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_with_input(BenchmarkId::new("compress", data.len()), &data, |b, data| {
        b.iter(|| black_box(codec.compress_bytes(data)))
    });
    group.bench_with_input(BenchmarkId::new("decompress", data.len()), &packed, |b, packed| {
        b.iter(|| black_box(codec.decompress_bytes(packed).expect("Error")))
    });
    group.finish();
}

pub fn bench_default(c: &mut Criterion) {
    criterion_benchmark(c, 512);
}

pub fn bench_wide(c: &mut Criterion) {
    criterion_benchmark(c, 1 << 12);
}

criterion_group!(benches, bench_default, bench_wide);
criterion_main!(benches);
