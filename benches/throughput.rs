//! Throughput Benchmark for EmberKV
//!
//! This benchmark measures the hot paths of the store: resident cache
//! operations, the write-through engine, the cold-miss replay, and the
//! request parser.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use emberkv::aof::MemoryAof;
use emberkv::protocol::{parse_request, Reply};
use emberkv::storage::{LruCache, StorageEngine};

/// Benchmark raw cache operations (no log involved)
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_with_eviction", |b| {
        let mut cache = LruCache::new(10_000);
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            cache.insert(key, Bytes::from("value"));
            i += 1;
        });
    });

    group.bench_function("get_resident", |b| {
        let mut cache = LruCache::new(10_000);
        for i in 0..10_000 {
            cache.insert(Bytes::from(format!("key:{}", i)), Bytes::from("value"));
        }
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 10_000);
            black_box(cache.get(key.as_bytes()));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark engine operations including the write-through log append
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_write_through", |b| {
        let mut engine = StorageEngine::new(10_000, Box::new(MemoryAof::new()));
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            engine.set(key, Bytes::from("value"));
            i += 1;
        });
    });

    group.bench_function("get_resident", |b| {
        let mut engine = StorageEngine::new(10_000, Box::new(MemoryAof::new()));
        for i in 0..10_000 {
            engine.set(Bytes::from(format!("key:{}", i)), Bytes::from("value"));
        }
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 10_000);
            black_box(engine.get(key.as_bytes()));
            i += 1;
        });
    });

    // A cold get scans the full log; this shows the documented O(log length)
    // cost of the miss path. The probed key's last record is a DEL, so the
    // scan resolves to a miss and the log does not grow between iterations.
    group.bench_function("get_cold_replay", |b| {
        let mut engine = StorageEngine::new(100, Box::new(MemoryAof::new()));
        for i in 0..10_000 {
            engine.set(Bytes::from(format!("key:{}", i)), Bytes::from("value"));
        }
        engine.del(b"key:0");
        b.iter(|| {
            black_box(engine.get(b"key:0"));
        });
    });

    group.finish();
}

/// Benchmark the wire protocol
fn bench_protocol(c: &mut Criterion) {
    let mut group = c.benchmark_group("protocol");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_set_request", |b| {
        let request = b"*3\r\n$3\r\nSET\r\n$8\r\nuser:101\r\n$5\r\nalice\r\n";
        b.iter(|| {
            black_box(parse_request(request));
        });
    });

    group.bench_function("parse_large_value", |b| {
        let value = "x".repeat(64 * 1024);
        let mut request = Vec::new();
        request.extend_from_slice(b"*3\r\n$3\r\nSET\r\n$3\r\nbig\r\n$");
        request.extend_from_slice(value.len().to_string().as_bytes());
        request.extend_from_slice(b"\r\n");
        request.extend_from_slice(value.as_bytes());
        request.extend_from_slice(b"\r\n");
        b.iter(|| {
            black_box(parse_request(&request));
        });
    });

    group.bench_function("serialize_bulk_reply", |b| {
        let reply = Reply::Bulk(Bytes::from("x".repeat(1024)));
        let mut buf = Vec::with_capacity(2048);
        b.iter(|| {
            buf.clear();
            reply.serialize_into(&mut buf);
            black_box(buf.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cache, bench_engine, bench_protocol);

criterion_main!(benches);
