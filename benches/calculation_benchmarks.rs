//! Performance benchmarks for the Income Tax Engine.
//!
//! This benchmark suite tracks:
//! - A single engine calculation against the 2025/26 tables
//! - Calculation plus audit narration
//! - A full POST /calculate round trip through the router
//! - A batch of 1000 requests with varied incomes and ages
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use tax_engine::api::{AppState, create_router};
use tax_engine::calculation::{calculate, calculation_warnings, narrate_audit_steps};
use tax_engine::config::ConfigLoader;
use tax_engine::models::TaxCalculationInput;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/za").expect("Failed to load config")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn reference_input() -> TaxCalculationInput {
    TaxCalculationInput::new(dec("850000"), 35)
        .with_retirement_contrib(dec("100000"))
        .with_medical_contrib(dec("36000"))
        .with_uif_contrib(dec("2125.44"))
}

fn calculate_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: engine calculation only.
fn bench_calculate(c: &mut Criterion) {
    let config = load_config();
    let policy = config.policy("2025/26").unwrap();
    let input = reference_input();

    c.bench_function("calculate", |b| {
        b.iter(|| black_box(calculate(black_box(&input), policy).unwrap()))
    });
}

/// Benchmark: calculation followed by the audit narration.
fn bench_calculate_with_narration(c: &mut Criterion) {
    let config = load_config();
    let policy = config.policy("2025/26").unwrap();
    let input = reference_input();

    c.bench_function("calculate_with_narration", |b| {
        b.iter(|| {
            let result = calculate(&input, policy).unwrap();
            let steps = narrate_audit_steps(&input, &result, policy);
            let warnings = calculation_warnings(&input, &result);
            black_box((result, steps, warnings))
        })
    });
}

/// Benchmark: single request through the HTTP router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "tax_year": "2025/26",
        "gross_income": 850000,
        "retirement_contrib": 100000,
        "age": 35,
        "paye_withheld": 200000
    })
    .to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(calculate_request(body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 1000 requests spread across brackets and rebate tiers.
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());

    let requests: Vec<String> = (0..1000)
        .map(|i| {
            serde_json::json!({
                "gross_income": 50_000 + i * 2_500,
                "retirement_contrib": (i % 10) * 10_000,
                "medical_contrib": if i % 2 == 0 { 36_000 } else { 0 },
                "medical_dependants": i % 4,
                "age": 25 + (i % 60)
            })
            .to_string()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(calculate_request(body.clone()))
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: how bracket depth affects the engine.
fn bench_bracket_depth(c: &mut Criterion) {
    let config = load_config();
    let policy = config.policy("2025/26").unwrap();

    let mut group = c.benchmark_group("bracket_depth");

    for gross in ["100000", "400000", "800000", "2500000"] {
        let input = TaxCalculationInput::new(dec(gross), 40);
        group.bench_with_input(BenchmarkId::new("gross", gross), &input, |b, input| {
            b.iter(|| black_box(calculate(input, policy).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate,
    bench_calculate_with_narration,
    bench_single_request,
    bench_batch_1000,
    bench_bracket_depth,
);
criterion_main!(benches);
