//! Benchmarks for composite validation dispatch.
//!
//! Run with: cargo bench -p credform-validation --bench composite_bench

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use credform_validation::{ValidationBuilder, ValidationComposite};

fn login_rules() -> ValidationComposite {
    ValidationBuilder::new()
        .field("email")
        .required()
        .email()
        .field("password")
        .required()
        .min_length(5)
        .build()
}

fn bench_validate(c: &mut Criterion) {
    let rules = login_rules();

    c.bench_function("validate_passing_email", |b| {
        b.iter(|| rules.validate(black_box("email"), black_box("ada@example.com")))
    });

    c.bench_function("validate_failing_required", |b| {
        b.iter(|| rules.validate(black_box("email"), black_box("")))
    });

    c.bench_function("validate_unknown_field", |b| {
        b.iter(|| rules.validate(black_box("nickname"), black_box("ada")))
    });
}

fn bench_wide_form(c: &mut Criterion) {
    // Dispatch cost with many registered fields.
    let mut builder = ValidationBuilder::new();
    for i in 0..64 {
        builder = builder.field(format!("field-{i}")).required().min_length(3);
    }
    let rules = builder.build();

    c.bench_function("validate_last_of_64_fields", |b| {
        b.iter(|| rules.validate(black_box("field-63"), black_box("value")))
    });
}

criterion_group!(benches, bench_validate, bench_wide_form);
criterion_main!(benches);
