use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use cryptostrings::{entropy::OsEntropy, Charset, Generator, PasswordPolicy, SecurityLevel};
use std::time::Duration;

fn generate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.measurement_time(Duration::new(10, 0));
    //
    // Measure the latency of a typical session token at each level.
    // This is the cost callers see when picking a level.
    //
    for level in SecurityLevel::ALL {
        let mut gen = Generator::with_level(OsEntropy::default(), level);
        let title = format!("token_32_{}", level);
        group.bench_function(&title, |b| {
            b.iter(|| gen.generate_string(32, &Charset::UrlSafe).unwrap())
        });
    }
    //
    // Rejection sampling: 62 symbols discard 8 of every 256 bytes, 64
    // symbols discard none.
    //
    let mut gen = Generator::with_level(OsEntropy::default(), SecurityLevel::Medium);
    for charset in [Charset::Alphanumeric, Charset::Base64] {
        let title = format!("string_1024_{}", charset.name());
        group.bench_function(&title, |b| b.iter(|| gen.generate_string(1024, &charset).unwrap()));
    }
    let policy = PasswordPolicy::new(20, 3, 3);
    group.bench_function("password_20", |b| {
        b.iter(|| gen.generate_password(&policy).unwrap())
    });
    //
    // Measure the throughput for bulk random bytes.
    //
    let mut buf = vec![0u8; 1 << 20];
    group.throughput(Throughput::Bytes(buf.len() as u64));
    for level in SecurityLevel::ALL {
        let mut gen = Generator::with_level(OsEntropy::default(), level);
        let title = format!("1_MiB_{}", level);
        group.bench_function(&title, |b| b.iter(|| gen.fill_bytes(&mut buf).unwrap()));
    }
}

criterion_group!(benches, generate_benchmark);
criterion_main!(benches);
