// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use spray::api::CollectionApi;
use spray::store::{DataFile, Document, ImageMaterializer, ROUTES, WALLS};

mod fixtures;
mod profiler;

use fixtures::library::{self, Case};

fn document(case: Case) -> Document {
    let library = library::fixture(case);
    let mut document = Document::seeded();
    for wall in &library.walls {
        document
            .collection_or_insert(WALLS)
            .push(serde_json::to_value(wall).expect("wall to json"));
    }
    for route in &library.routes {
        document
            .collection_or_insert(ROUTES)
            .push(serde_json::to_value(route).expect("route to json"));
    }
    document
}

fn api_in(dir: &std::path::Path) -> CollectionApi {
    CollectionApi::new(
        DataFile::new(dir.join("db.json")),
        ImageMaterializer::new(dir.join("uploads")),
    )
}

// Benchmark identity (keep stable):
// - Groups: `store.write_document`, `store.read_document`, `api.create_route`,
//   `images.materialize`.
// - Case IDs after the `/` stay stable across refactors so results remain comparable.
fn benches_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.write_document");
    for case in [Case::Small, Case::Medium, Case::Large] {
        let doc = document(case);
        let compute_doc = doc.clone();
        group.bench_function(format!("compute_only_{}", case.id()), move |b| {
            b.iter(|| {
                black_box(
                    serde_json::to_vec_pretty(black_box(&compute_doc))
                        .expect("serialize document")
                        .len(),
                )
            })
        });
        group.bench_function(format!("io_{}", case.id()), move |b| {
            b.iter_batched_ref(
                || fixtures::temp_dir("write_document"),
                |tmp| {
                    let file = DataFile::new(tmp.path().join("db.json"));
                    file.write_all(black_box(&doc)).expect("write_all");
                    black_box(std::fs::metadata(file.path()).expect("db metadata").len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("store.read_document");
    for case in [Case::Small, Case::Medium, Case::Large] {
        let tmp = fixtures::temp_dir("read_document");
        let file = DataFile::new(tmp.path().join("db.json"));
        file.write_all(&document(case)).expect("write_all");
        group.bench_function(format!("io_{}", case.id()), move |b| {
            let _keep = &tmp;
            b.iter(|| black_box(file.read_all().expect("read_all")))
        });
    }
    group.finish();
}

fn benches_api(c: &mut Criterion) {
    let mut group = c.benchmark_group("api.create_route");
    for case in [Case::Small, Case::Medium] {
        let doc = document(case);
        group.bench_function(format!("io_{}", case.id()), move |b| {
            b.iter_batched_ref(
                || {
                    let tmp = fixtures::temp_dir("create_route");
                    let api = api_in(tmp.path());
                    api.data_file().write_all(&doc).expect("seed document");
                    (tmp, api)
                },
                |(_tmp, api)| {
                    let record = json!({
                        "id": "bench_route",
                        "wallId": "wall_000",
                        "name": "Bench",
                        "holds": fixtures::holds::fixture(fixtures::holds::Case::Sparse),
                    });
                    black_box(api.create(ROUTES, record).expect("create"))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("images.materialize");
    for (id, bytes) in [("inline_64k", 64 * 1024), ("inline_1m", 1024 * 1024)] {
        let image = library::data_uri(bytes);
        group.bench_function(id, move |b| {
            b.iter_batched_ref(
                || fixtures::temp_dir("materialize"),
                |tmp| {
                    let images = ImageMaterializer::new(tmp.path().join("uploads"));
                    black_box(images.materialize("bench", black_box(&image)).expect("materialize"))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_document, benches_api
}
criterion_main!(benches);
