#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
//! One evaluator, many threads.

use numc::{compile_expression, Backend, EvaluationContext, Evaluator};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn evaluators_are_send_and_sync() {
    assert_send_sync::<Evaluator<i64>>();
    assert_send_sync::<Evaluator<f32>>();
    assert_send_sync::<EvaluationContext<u64>>();
}

#[test]
fn shared_evaluator_with_per_thread_contexts() {
    for backend in Backend::ALL {
        let evaluator =
            compile_expression::<i64>("poly", "x * x + 2 * x + max(x, 7)", backend).unwrap();
        let results: Vec<i64> = (0..1_000_i64)
            .into_par_iter()
            .map(|x| {
                let mut ctx = EvaluationContext::new();
                ctx.set_variable("x", x);
                evaluator.evaluate(&ctx).unwrap()
            })
            .collect();
        let expected: Vec<i64> = (0..1_000_i64).map(|x| x * x + 2 * x + x.max(7)).collect();
        assert_eq!(results, expected, "{backend}");
    }
}

#[test]
fn shared_context_read_from_many_threads() {
    let mut ctx = EvaluationContext::<f64>::new();
    ctx.set_variable("r", 3.0);
    let evaluators: Vec<_> = Backend::ALL
        .iter()
        .map(|&backend| compile_expression::<f64>("area", "pi * r * r", backend).unwrap())
        .collect();

    let total: f64 = (0..300)
        .into_par_iter()
        .map(|i| evaluators[i % evaluators.len()].evaluate(&ctx).unwrap())
        .sum();
    let expected = 300.0 * std::f64::consts::PI * 9.0;
    assert!((total - expected).abs() < 1e-6, "{total} vs {expected}");
}
