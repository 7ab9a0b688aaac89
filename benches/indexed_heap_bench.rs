//! Indexed Heap Benchmarks
//!
//! Wall-clock benchmarks of the core operations at several heap sizes.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench indexed_heap_bench
//!
//! # Only the arbitrary-removal group
//! cargo bench --bench indexed_heap_bench -- remove
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indexed_heap::{ByKey, IndexedHeap, Keyed};
use std::hint::black_box;

#[derive(Debug, Clone)]
struct Entry {
    id: u32,
    priority: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.priority.partial_cmp(&other.priority)
    }
}

impl Keyed for Entry {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.id
    }
}

const SIZES: [u32; 3] = [1 << 8, 1 << 12, 1 << 16];

/// Deterministic scrambled priorities so runs are comparable
fn entries(n: u32) -> Vec<Entry> {
    (0..n)
        .map(|id| Entry {
            id,
            priority: (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 16,
        })
        .collect()
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    for &n in &SIZES {
        let input = entries(n);
        group.bench_with_input(BenchmarkId::new("push_then_drain", n), &input, |b, input| {
            b.iter(|| {
                let mut heap: IndexedHeap<Entry, ByKey> = IndexedHeap::with_capacity(input.len());
                for entry in input {
                    heap.push(entry.clone()).unwrap();
                }
                while let Ok(entry) = heap.pop() {
                    black_box(entry);
                }
            })
        });
    }
    group.finish();
}

fn bench_heapify(c: &mut Criterion) {
    let mut group = c.benchmark_group("heapify");
    for &n in &SIZES {
        let input = entries(n);
        group.bench_with_input(BenchmarkId::new("from_vec", n), &input, |b, input| {
            b.iter(|| {
                let heap: IndexedHeap<Entry, ByKey> = IndexedHeap::from_vec(input.clone()).unwrap();
                black_box(heap)
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for &n in &SIZES {
        let heap: IndexedHeap<Entry, ByKey> = IndexedHeap::from_vec(entries(n)).unwrap();
        group.bench_with_input(BenchmarkId::new("every_third_key", n), &heap, |b, heap| {
            b.iter(|| {
                let mut heap = heap.clone();
                for id in (0..n).step_by(3) {
                    black_box(heap.remove(&id).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_decrease(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_decreased");
    for &n in &SIZES {
        let heap: IndexedHeap<Entry, ByKey> = IndexedHeap::from_vec(entries(n)).unwrap();
        group.bench_with_input(BenchmarkId::new("halve_all", n), &heap, |b, heap| {
            b.iter(|| {
                let mut heap = heap.clone();
                for id in 0..n {
                    if let Some(entry) = heap.peek_by_key_mut(&id) {
                        entry.priority /= 2;
                    }
                    heap.priority_decreased(&id).unwrap();
                }
                black_box(heap.peek().map(|e| e.id))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_heapify, bench_remove, bench_decrease);
criterion_main!(benches);
