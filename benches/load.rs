use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use envfile::{EnvLoader, TargetEnv};

fn bench_load(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_file(&dir.path().join(".env"), &make_env_content(2_000));

    c.bench_function("load_in_memory", |b| {
        b.iter(|| {
            let mut loader = EnvLoader::new()
                .base_dir(dir.path())
                .target(TargetEnv::memory());
            loader.load().expect("load should succeed")
        });
    });
}

fn make_env_content(entries: usize) -> String {
    let mut content = String::with_capacity(entries * 24);
    content.push_str("BASE=/srv/app\n");
    for idx in 0..entries {
        content.push_str("KEY_");
        content.push_str(&idx.to_string());
        content.push('=');
        if idx % 4 == 0 {
            content.push_str("$BASE/");
        }
        content.push_str("value");
        content.push('\n');
    }
    content
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write test file");
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
