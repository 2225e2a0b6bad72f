// benches/buffer_bench.rs
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use duplexbuf::prelude::*;
use std::hint::black_box;

/// Frames `payload` with a 3-byte little-endian length and a sequence id.
fn frame(seq: u8, payload: &[u8]) -> Vec<u8> {
    let len = payload.len() as u32;
    let mut out = vec![len as u8, (len >> 8) as u8, (len >> 16) as u8, seq];
    out.extend_from_slice(payload);
    out
}

fn bench_read_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_next");

    for size in [64, 1024, 4096, 16384].iter() {
        let mut wire = Vec::new();
        for seq in 0..32u8 {
            wire.extend(frame(seq, &vec![0x42; *size]));
        }

        group.bench_with_input(BenchmarkId::new("packets", size), &wire, |b, wire| {
            b.iter(|| {
                let mut buf = StreamBuffer::new(&wire[..]);
                for _ in 0..32 {
                    let header = buf.read_next(4).unwrap();
                    let len = header[0] as usize
                        | (header[1] as usize) << 8
                        | (header[2] as usize) << 16;
                    black_box(buf.read_next(len).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_take_vs_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("take_vs_alloc");
    let query = b"SELECT id, name, email FROM users WHERE id = 42";

    group.bench_function("take_small_buffer", |b| {
        let mut buf = StreamBuffer::new(std::io::empty());
        b.iter(|| {
            let mut region = buf.take_small_buffer(query.len() + 5).unwrap();
            region[5..].copy_from_slice(black_box(query));
            black_box(region.commit(query.len() + 5).unwrap());
        });
    });

    group.bench_function("fresh_vec", |b| {
        b.iter(|| {
            let mut packet = vec![0u8; query.len() + 5];
            packet[5..].copy_from_slice(black_box(query));
            black_box(packet);
        });
    });

    group.finish();
}

fn bench_recycle_vs_direct(c: &mut Criterion) {
    let mut group = c.benchmark_group("recycle_comparison");

    group.bench_function("pooled_fields", |b| {
        let pool: RecyclePool<Vec<FieldDescriptor>> = RecyclePool::default();
        b.iter(|| {
            let mut fields = pool.acquire_len(black_box(12));
            fields[0].name.push_str("id");
            pool.release(fields);
        });
    });

    group.bench_function("direct_fields", |b| {
        b.iter(|| {
            let mut fields = vec![FieldDescriptor::default(); black_box(12)];
            fields[0].name.push_str("id");
            black_box(fields);
        });
    });

    group.bench_function("pooled_rows", |b| {
        let pool: RecyclePool<RowBuffer> = RecyclePool::default();
        b.iter(|| {
            let mut row = pool.checkout();
            for _ in 0..8 {
                row.push_value(black_box(b"column value"));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_read_next,
    bench_take_vs_alloc,
    bench_recycle_vs_direct
);

criterion_main!(benches);
