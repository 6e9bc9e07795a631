// ABOUTME: Criterion benchmarks for the nutrition engine hot paths
// ABOUTME: Measures serving scaling, record normalization, period roll-ups and store reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens

//! Criterion benchmarks for the nutrition engine.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use macrolens::external::{InMemoryStore, NutritionStore};
use macrolens::intelligence::nutrient_normalizer::FoodNutrient;
use macrolens::intelligence::{
    normalize_food, scale_nutrition, summarize_period, FoodRecord, ProgressPeriod,
};
use macrolens::models::{FoodItem, FoodLog, LogType, MealType, MicronutrientMap, NutrientProfile};
use tokio::runtime::Runtime;

const USER_ID: &str = "bench_user";

fn sample_profile() -> NutrientProfile {
    NutrientProfile {
        fiber: Some(2.4),
        sugar: Some(12.0),
        sodium: Some(410.0),
        vitamins: Some(MicronutrientMap::from([
            ("vitaminA".to_owned(), 120.0),
            ("vitaminC".to_owned(), 8.5),
        ])),
        minerals: Some(MicronutrientMap::from([
            ("calcium".to_owned(), 90.0),
            ("iron".to_owned(), 1.8),
        ])),
        ..NutrientProfile::macros(412.0, 18.5, 52.0, 14.2)
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_logs(count: usize) -> Vec<FoodLog> {
    let now = Utc::now();
    (0..count)
        .map(|index| {
            let foods = (0..3)
                .map(|n| {
                    FoodItem::new(
                        format!("Food {}", (index + n) % 17),
                        "150g",
                        NutrientProfile::macros(200.0 + n as f64, 10.0, 25.0, 6.0),
                    )
                })
                .collect();
            FoodLog::new(
                USER_ID,
                now - Duration::hours((index * 7) as i64),
                MealType::Lunch,
                LogType::ManualSearch,
                foods,
            )
        })
        .collect()
}

fn bench_scale_nutrition(c: &mut Criterion) {
    let profile = sample_profile();
    c.bench_function("scale_nutrition", |b| {
        b.iter(|| scale_nutrition(black_box(&profile), black_box(1.37)));
    });
}

fn bench_normalize_food(c: &mut Criterion) {
    let record = FoodRecord {
        description: Some("YOGURT, GREEK, PLAIN, NONFAT".to_owned()),
        food_nutrients: vec![
            FoodNutrient::coded(1008, 59.0),
            FoodNutrient::coded(1003, 10.3),
            FoodNutrient::coded(1005, 3.6),
            FoodNutrient::coded(1004, 0.4),
            FoodNutrient::coded(2000, 3.2),
            FoodNutrient::coded(1087, 110.0),
        ],
        ..FoodRecord::default()
    };
    c.bench_function("normalize_food", |b| {
        b.iter(|| normalize_food(black_box(&record)));
    });
}

fn bench_period_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("period_summary");
    let now = Utc::now();

    for count in [10, 100, 1000] {
        let logs = generate_logs(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("month", count), &logs, |b, logs| {
            b.iter(|| summarize_period(black_box(logs), ProgressPeriod::Month, now));
        });
    }

    group.finish();
}

fn bench_store_list_logs(c: &mut Criterion) {
    let Ok(runtime) = Runtime::new() else {
        return;
    };
    let store = InMemoryStore::new();
    runtime.block_on(async {
        for log in generate_logs(500) {
            let _ = store.upsert_log(log).await;
        }
    });

    c.bench_function("store_list_logs", |b| {
        b.to_async(&runtime)
            .iter(|| async { store.list_logs(black_box(USER_ID)).await });
    });
}

criterion_group!(
    benches,
    bench_scale_nutrition,
    bench_normalize_food,
    bench_period_summary,
    bench_store_list_logs,
);
criterion_main!(benches);
