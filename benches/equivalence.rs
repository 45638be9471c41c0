use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mealy::{
    prelude::*,
    random::{generate_random_mealy_with, generate_random_words},
};

fn product_and_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_and_trim");
    let mut rng = fastrand::Rng::with_seed(0xbeef);
    for size in [4, 16, 64] {
        let left = generate_random_mealy_with(&mut rng, "q", size);
        let right = generate_random_mealy_with(&mut rng, "p", size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(&left)
                    .product(black_box(&right))
                    .and_then(|prod| prod.trim())
            })
        });
    }
    group.finish();
}

fn equivalence(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalence");
    let mut rng = fastrand::Rng::with_seed(0xcafe);
    for size in [4, 16, 64] {
        let machine = generate_random_mealy_with(&mut rng, "q", size);
        let other = generate_random_mealy_with(&mut rng, "p", size);
        group.bench_with_input(BenchmarkId::new("reflexive", size), &machine, |b, mm| {
            b.iter(|| are_equivalent(black_box(mm), black_box(mm)))
        });
        group.bench_with_input(
            BenchmarkId::new("separating_word", size),
            &(machine, other),
            |b, (left, right)| b.iter(|| separating_word(black_box(left), black_box(right))),
        );
    }
    group.finish();
}

fn run_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    let mut rng = fastrand::Rng::with_seed(0xf00d);
    for size in [4, 64] {
        let machine = generate_random_mealy_with(&mut rng, "q", size);
        let words = generate_random_words(&mut rng, machine.input_alphabet(), 8, 64, 100);
        let product = machine.product(&machine).unwrap();
        group.bench_with_input(BenchmarkId::new("machine", size), &words, |b, words| {
            b.iter(|| {
                words
                    .iter()
                    .map(|word| black_box(&machine).run(word))
                    .collect::<Result<Vec<_>, _>>()
            })
        });
        group.bench_with_input(BenchmarkId::new("product", size), &words, |b, words| {
            b.iter(|| {
                words
                    .iter()
                    .map(|word| black_box(&product).run(word))
                    .collect::<Result<Vec<_>, _>>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, product_and_trim, equivalence, run_words);
criterion_main!(benches);
