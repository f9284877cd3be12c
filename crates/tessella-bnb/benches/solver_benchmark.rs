// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tessella_bnb::bnb::BnbSolver;
use tessella_model::instance::Instance;
use tessella_model::random::random_instance;

/// Seeded instances of increasing size; every one stays comfortably inside
/// criterion's default measurement budget.
fn bench_instances() -> Vec<(String, Instance<f64>)> {
    [(6usize, 12usize), (8, 20), (10, 30)]
        .iter()
        .map(|&(elements, subsets)| {
            (
                format!("{}x{}", elements, subsets),
                random_instance(elements, subsets, 42),
            )
        })
        .collect()
}

fn bench_branch_and_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("branch_and_bound");

    for (name, instance) in bench_instances() {
        group.throughput(Throughput::Elements(instance.num_subsets() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(&name),
            &instance,
            |b, instance| {
                let mut solver = BnbSolver::new();
                b.iter(|| black_box(solver.solve(black_box(instance)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_branch_and_bound);
criterion_main!(benches);
