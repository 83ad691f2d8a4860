use std::hint::black_box;

use conversation_splitter::parsers::{ArrayScanner, decode_span};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate a synthetic export array with N conversations of a few messages each
fn generate_export(num_conversations: usize) -> Vec<u8> {
    let entries: Vec<String> = (0..num_conversations)
        .map(|i| {
            format!(
                r#"{{"id":"{:08x}-0000-4000-8000-000000000000","title":"Test {{conversation}} {}","create_time":{},"mapping":{{"root":{{"message":null,"children":["u"]}},"u":{{"message":{{"author":{{"role":"user"}},"create_time":{},"content":{{"content_type":"text","parts":["How do I escape \"quotes\" and {{braces}}?"]}}}}}},"a":{{"message":{{"author":{{"role":"assistant"}},"create_time":{},"content":{{"content_type":"text","parts":["Like this: \\\" and \\\\"]}}}}}}}}}}"#,
                i,
                i,
                1_700_000_000 + i,
                1_700_000_000 + i,
                1_700_000_001 + i
            )
        })
        .collect();
    format!("[{}]", entries.join(",\n")).into_bytes()
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_array");

    for size in [100, 1_000, 10_000].iter() {
        let input = generate_export(*size);

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| ArrayScanner::new(black_box(&input[..])).map(|span| span.unwrap()).count());
        });
    }

    group.finish();
}

fn bench_scan_and_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_and_decode");

    for size in [100, 1_000, 10_000].iter() {
        let input = generate_export(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                ArrayScanner::new(black_box(&input[..]))
                    .map(|span| decode_span(span.unwrap().as_bytes()).unwrap())
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scan, bench_scan_and_decode);
criterion_main!(benches);
