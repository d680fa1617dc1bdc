//! Forwarding Overhead Benchmarks
//!
//! Measures the cost of one boundary crossing per wrapper.
//!
//! Run with: cargo bench --bench forwarding_bench

use fortran_interop::{
    Binding, callback_example, copy_integer_with, return_double_with, return_integer_with,
    sum_array,
};
use std::hint::black_box;
use std::time::{Duration, Instant};

const ITERATIONS: u32 = 1_000_000;

// Simple timing macro for benchmarks
macro_rules! bench {
    ($name:expr, $iterations:expr, $code:block) => {{
        let start = Instant::now();
        for _ in 0..$iterations {
            black_box($code);
        }
        let elapsed = start.elapsed();
        let per_iter = elapsed / $iterations;
        println!(
            "{}: {} iterations in {:?} ({:?}/iter, {:.0} ops/sec)",
            $name,
            $iterations,
            elapsed,
            per_iter,
            $iterations as f64 / elapsed.as_secs_f64()
        );
        elapsed
    }};
}

fn bench_scalars() -> Duration {
    let mut total = Duration::ZERO;
    for binding in Binding::ALL {
        total += bench!(format!("return_integer [{binding}]"), ITERATIONS, {
            return_integer_with(binding, black_box(42))
        });
        total += bench!(format!("copy_integer [{binding}]"), ITERATIONS, {
            let mut destination = 0;
            copy_integer_with(binding, black_box(7), &mut destination);
            destination
        });
        total += bench!(format!("return_double [{binding}]"), ITERATIONS, {
            return_double_with(binding, black_box(3.5))
        });
    }
    total
}

fn bench_arrays() -> Duration {
    let data: Vec<f64> = (0..1024).map(|i| i as f64).collect();
    bench!("sum_array [1024]", ITERATIONS / 100, { sum_array(black_box(&data)) })
}

fn bench_callbacks() -> Duration {
    bench!("callback_example [100 steps]", ITERATIONS / 100, {
        let mut last = 0;
        callback_example(100, 1, |progress| last = progress);
        last
    })
}

fn main() {
    println!("=== Forwarding Benchmarks ===\n");
    let total = bench_scalars() + bench_arrays() + bench_callbacks();
    println!("\nTotal: {total:?}");
}
