use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [1_024usize, 10_240, 102_400] {
        let input = make_input(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| envfile::parse_str(black_box(input)).expect("parse should succeed"));
        });
    }
    group.finish();
}

fn bench_substitute(c: &mut Criterion) {
    let value = "$HOME/bin:$HOME/.local/bin:/usr/bin:$MISSING";
    c.bench_function("substitute", |b| {
        b.iter(|| {
            envfile::substitute(black_box(value), |name| {
                (name == "HOME").then(|| "/home/user".to_owned())
            })
        });
    });
}

fn make_input(bytes: usize) -> String {
    let block = "# comment\nKEY=value\nQUOTED=\"a \\\"quoted\\\" value\"\n\n";
    let repeat = bytes / block.len() + 1;
    block.repeat(repeat)
}

criterion_group!(benches, bench_parse, bench_substitute);
criterion_main!(benches);
