use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stockroom_catalog::read_catalog;

fn catalog_text(blocks: usize) -> String {
    let mut text = String::new();
    for i in 0..blocks {
        text.push_str("BEGIN PRODUCT\n");
        text.push_str(&format!("CODE {i}\n"));
        text.push_str(&format!("NAME Product {i}\n"));
        text.push_str(&format!("CATEGORY Category {}\n", i % 10));
        text.push_str("PRICE 9.95  # list price\n");
        text.push_str("STOCK 40\n");
        text.push_str("END PRODUCT\n\n");
    }
    text
}

fn bench_read_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_catalog");

    for blocks in [100usize, 1_000, 10_000] {
        let text = catalog_text(blocks);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(blocks),
            &text,
            |b, text| {
                b.iter(|| read_catalog(black_box(text.as_bytes())));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_read_catalog);
criterion_main!(benches);
