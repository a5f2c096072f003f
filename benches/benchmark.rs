use criterion::BenchmarkId;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, SamplingMode};
use dense_linear_assignment::{solve_matrix, Matrix, MunkresSolver, ProblemInstance, SolverOptions};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type Cost = i64;

fn gen_input(seed: u64, num_rows: usize, num_cols: usize, max_value: Cost) -> Matrix<Cost> {
    let mut val_rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(0..max_value);
    let values = (0..num_rows * num_cols)
        .map(|_| between.sample(&mut val_rng))
        .collect::<Vec<_>>();
    Matrix::from_vec(num_rows, num_cols, values).unwrap()
}

fn bench_square_size_and_range(c: &mut Criterion, max_size: usize) {
    let mut group = c.benchmark_group("square_uniform");
    group.sample_size(10);
    group.sampling_mode(SamplingMode::Flat);

    for max_value in [10, 1000, 1_000_000] {
        for size in (50..=max_size).step_by(50) {
            let input = gen_input(size as u64, size, size, max_value);
            group.throughput(Throughput::Elements((size * size) as u64));
            let benchmark_id =
                BenchmarkId::new("munkres", format!("max_value {} size {}", max_value, size));

            group.bench_with_input(benchmark_id, &input, |b, input| {
                b.iter_batched(
                    || ProblemInstance::new(input.clone(), false).unwrap(),
                    |instance| {
                        let mut solver = MunkresSolver::new(instance, &SolverOptions::default());
                        let assignment = solver.run().unwrap();
                        if !assignment.is_complete() {
                            println!(
                                "incomplete: nits {}, num_unassigned {}",
                                solver.nits, assignment.num_unassigned,
                            )
                        }
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_rectangular(c: &mut Criterion, num_rows: usize, max_num_cols: usize) {
    let mut group = c.benchmark_group("rectangular_uniform");
    group.sampling_mode(SamplingMode::Flat);

    for num_cols in (num_rows..=max_num_cols).step_by(num_rows) {
        let wide = gen_input(num_cols as u64, num_rows, num_cols, 1000);
        let tall = wide.transposed().unwrap();
        group.throughput(Throughput::Elements((num_rows * num_cols) as u64));
        for (name, input) in [("wide", wide), ("tall", tall)] {
            let benchmark_id = BenchmarkId::new(
                name,
                format!("num_rows {}, num_cols {}", input.rows(), input.cols()),
            );
            group.bench_with_input(benchmark_id, &input, |b, input| {
                b.iter_batched(
                    || input.clone(),
                    |input| solve_matrix(input, &SolverOptions::default()).unwrap(),
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_square_size_400(c: &mut Criterion) {
    bench_square_size_and_range(c, 400)
}

fn bench_rectangular_100_rows_500_cols(c: &mut Criterion) {
    bench_rectangular(c, 100, 500)
}

criterion_group!(
    benches,
    bench_square_size_400,
    bench_rectangular_100_rows_500_cols
);
criterion_main!(benches);
