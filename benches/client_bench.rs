//! Benchmarks for bucketkv client operations

use bucketkv::{Bucket, Client, Config, Kv, KvBatch};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

const BUCKET: &str = "bench";

fn setup() -> (TempDir, Client) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .path(temp_dir.path().join("bench.db"))
        .build();
    let client = Client::open(config).unwrap();
    client.write(&Bucket::new(BUCKET)).unwrap();
    (temp_dir, client)
}

fn record(i: usize) -> Kv {
    let mut kv = Kv::new();
    kv.set_bucket(BUCKET)
        .set_key(format!("key_{:06}", i))
        .set_value(format!("value_data_{}", i));
    kv
}

fn client_benchmarks(c: &mut Criterion) {
    let (_temp, client) = setup();

    let mut counter = 0usize;
    c.bench_function("single_write", |b| {
        b.iter(|| {
            counter += 1;
            client.write(&record(counter)).unwrap();
        })
    });

    c.bench_function("batch_write_100", |b| {
        b.iter_batched(
            || (0..100).map(record).collect::<KvBatch>(),
            |batch| client.write(&batch).unwrap(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("single_read", |b| {
        let mut lookup = record(1);
        b.iter(|| {
            client.read(&mut lookup).unwrap();
            black_box(lookup.value().len());
        })
    });

    c.bench_function("scan_bucket", |b| {
        let mut bucket = Bucket::new(BUCKET);
        b.iter(|| black_box(client.read_all(&mut bucket).unwrap().len()))
    });
}

criterion_group!(benches, client_benchmarks);
criterion_main!(benches);
