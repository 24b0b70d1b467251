use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use zero_clickhouse::sync::{LineReader, Rows};
use zero_clickhouse::{Opts, Value};

fn result_set(rows: usize) -> Vec<u8> {
    let mut out = b"id\tname\tscore\tcreated\n\
                    UInt64\tNullable(String)\tFloat64\tDateTime\n"
        .to_vec();
    for i in 0..rows {
        let name = if i % 10 == 0 {
            "\\N".to_string()
        } else {
            format!("user\\t{i}")
        };
        out.extend_from_slice(
            format!("{i}\t{name}\t{}.25\t2024-03-04 05:06:07\n", i % 1000).as_bytes(),
        );
    }
    out
}

fn bench_read_lines(c: &mut Criterion) {
    let input = result_set(10_000);
    let mut group = c.benchmark_group("read_lines");

    for capacity in [64, 4096, 64 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut reader = LineReader::with_capacity(capacity, &input[..]);
                    let mut total = 0;
                    while let Some(line) = reader.read_line().unwrap() {
                        total += line.len();
                    }
                    total
                })
            },
        );
    }
    group.finish();
}

fn bench_decode_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_rows");

    for size in [100, 10_000].iter() {
        let input = result_set(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut rows = Rows::open(&input[..], &Opts::default()).unwrap();
                let mut row = vec![Value::Null; rows.column_count()];
                let mut count = 0;
                while rows.next(&mut row).unwrap() {
                    count += 1;
                }
                count
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read_lines, bench_decode_rows);
criterion_main!(benches);
