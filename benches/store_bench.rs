// ABOUTME: Criterion benchmarks for recipe store queries and mutations
// ABOUTME: Measures search, dietary filter, combined query, and favorite toggle latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the recipe store.
//!
//! Queries scan the whole collection, so they are measured at several
//! collection sizes over memory storage.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

mod common;

use common::fixtures::{generate_recipes, CollectionSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flavor_exchange::storage::memory::MemoryStorage;
use flavor_exchange::stores::{RecipeQuery, RecipeStore, RecipeStoreOptions};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SIZES: [CollectionSize; 3] = [
    CollectionSize::Small,
    CollectionSize::Medium,
    CollectionSize::Large,
];

fn store_of(size: CollectionSize) -> RecipeStore {
    let options = RecipeStoreOptions {
        seed_on_empty: false,
        ..RecipeStoreOptions::default()
    };
    RecipeStore::from_recipes(Arc::new(MemoryStorage::new()), options, generate_recipes(size))
        .unwrap()
}

/// Benchmark case-insensitive search over titles and ingredients
#[allow(clippy::cast_possible_truncation)]
fn bench_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_search");

    for size in SIZES {
        let store = store_of(size);
        group.throughput(Throughput::Elements(size.count() as u64));
        group.bench_with_input(BenchmarkId::new("ingredient", size.name()), &store, |b, store| {
            b.iter(|| rt.block_on(async { store.search(black_box("Ginger")).await }));
        });
        group.bench_with_input(BenchmarkId::new("empty", size.name()), &store, |b, store| {
            b.iter(|| rt.block_on(async { store.search(black_box("")).await }));
        });
    }

    group.finish();
}

/// Benchmark exact dietary label filtering
#[allow(clippy::cast_possible_truncation)]
fn bench_filter_by_diet(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_filter_by_diet");

    for size in SIZES {
        let store = store_of(size);
        group.throughput(Throughput::Elements(size.count() as u64));
        group.bench_with_input(BenchmarkId::new("vegan", size.name()), &store, |b, store| {
            b.iter(|| rt.block_on(async { store.filter_by_diet(black_box(Some("Vegan"))).await }));
        });
    }

    group.finish();
}

/// Benchmark the combined home page query
fn bench_query(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_query");
    let query = RecipeQuery::all().with_text("curry").with_diet("Keto");

    for size in SIZES {
        let store = store_of(size);
        group.bench_with_input(BenchmarkId::new("text_and_diet", size.name()), &store, |b, store| {
            b.iter(|| rt.block_on(async { store.query(black_box(&query)).await }));
        });
    }

    group.finish();
}

/// Benchmark favorite toggling, which clones and persists the full state
fn bench_toggle_favorite(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_toggle_favorite");

    for size in [CollectionSize::Small, CollectionSize::Medium] {
        let store = store_of(size);
        group.bench_with_input(BenchmarkId::new("memory", size.name()), &store, |b, store| {
            b.iter(|| {
                rt.block_on(async {
                    store
                        .toggle_favorite(black_box("user1"), black_box("bench-0"))
                        .await
                        .unwrap()
                })
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_search,
    bench_filter_by_diet,
    bench_query,
    bench_toggle_favorite
);
criterion_main!(benches);
