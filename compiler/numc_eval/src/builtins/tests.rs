use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{Context, EvaluationContext};

fn call<T: Number>(name: &str, args: &[T]) -> EvalResult<T> {
    EvaluationContext::<T>::new().call_function(&Name::new(name), args)
}

// === Shared helpers ===

#[test]
fn variadic_helpers_handle_zero_and_one_argument() {
    for name in ["min", "max", "sum", "mean", "average", "range", "mode"] {
        assert_eq!(call::<i64>(name, &[]), Ok(0), "{name}()");
        assert_eq!(call::<i64>(name, &[7]), Ok(7), "{name}(7)");
    }
}

#[test]
fn variadic_helpers_over_many_arguments() {
    let args = [4_i32, -2, 9, 4, 1];
    assert_eq!(call("min", &args), Ok(-2));
    assert_eq!(call("max", &args), Ok(9));
    assert_eq!(call("sum", &args), Ok(16));
    assert_eq!(call("mean", &args), Ok(3));
    assert_eq!(call("range", &args), Ok(11));
    assert_eq!(call("mode", &args), Ok(4));
}

#[test]
fn mode_ties_go_to_the_first_seen_value() {
    assert_eq!(call::<u32>("mode", &[2, 1, 1, 2]), Ok(2));
    assert_eq!(call::<u32>("mode", &[5, 3]), Ok(5));
    assert_eq!(call::<f64>("mode", &[1.5, 2.5, 2.5]), Ok(2.5));
}

#[test]
fn mean_of_floats() {
    assert_eq!(call::<f64>("average", &[1.0, 2.0]), Ok(1.5));
}

#[test]
fn nan_arguments_poison_min_max_and_clamp() {
    let nan = f64::NAN;
    for args in [[nan, 1.0, 2.0], [1.0, nan, 2.0], [1.0, 2.0, nan]] {
        assert!(call::<f64>("min", &args).is_ok_and(f64::is_nan), "min{args:?}");
        assert!(call::<f64>("max", &args).is_ok_and(f64::is_nan), "max{args:?}");
        assert!(call::<f64>("range", &args).is_ok_and(f64::is_nan), "range{args:?}");
    }
    assert!(call::<f64>("clamp", &[nan, 0.0, 1.0]).is_ok_and(f64::is_nan));
    assert!(call::<f64>("clamp", &[0.5, nan, 1.0]).is_ok_and(f64::is_nan));
}

#[test]
fn clamp_with_inverted_bounds_does_not_panic() {
    assert_eq!(call::<i64>("clamp", &[5, 0, 10]), Ok(5));
    assert_eq!(call::<i64>("clamp", &[-5, 0, 10]), Ok(0));
    assert_eq!(call::<i64>("clamp", &[50, 0, 10]), Ok(10));
    assert_eq!(call::<i64>("clamp", &[5, 10, 0]), Ok(0));
}

#[test]
fn lerp_and_inverse_lerp() {
    assert_eq!(call::<f64>("lerp", &[0.25, 10.0, 20.0]), Ok(12.5));
    assert_eq!(call::<f64>("inverseLerp", &[12.5, 10.0, 20.0]), Ok(0.25));
    assert_eq!(
        call::<i32>("inverseLerp", &[1, 3, 3]),
        Err(EvalError::DivideByZero)
    );
}

#[test]
fn mod_and_abs() {
    assert_eq!(call::<i32>("mod", &[-7, 3]), Ok(-1));
    assert_eq!(call::<i32>("mod", &[7, 0]), Err(EvalError::DivideByZero));
    assert_eq!(call::<i64>("abs", &[-4]), Ok(4));
    assert_eq!(call::<f32>("abs", &[-0.5]), Ok(0.5));
}

#[test]
fn fixed_arity_builtins_reject_wrong_counts() {
    assert_eq!(
        call::<i32>("clamp", &[1, 2]),
        Err(EvalError::Arity {
            name: Name::new("clamp"),
            got: 2,
            min: Some(3),
            max: Some(3),
        })
    );
}

#[test]
fn direct_invocation_checks_shape() {
    let registry = DefaultRegistry::<i32>::with_builtins();
    let Some(abs) = registry.function("abs") else {
        panic!("abs is registered");
    };
    let no_args: &[i32] = &[];
    assert!(matches!((abs.function)(no_args), Err(EvalError::Arity { got: 0, .. })));
}

// === Float-only ===

#[test]
fn float_constants() {
    let ctx = EvaluationContext::<f64>::new();
    assert_eq!(ctx.try_get_variable("pi"), Some(std::f64::consts::PI));
    assert_eq!(ctx.try_get_variable("tau"), Some(std::f64::consts::TAU));
    assert!(ctx.try_get_variable("nan").is_some_and(f64::is_nan));
    assert_eq!(ctx.try_get_variable("inf"), Some(f64::INFINITY));
    let f32_ctx = EvaluationContext::<f32>::new();
    assert_eq!(f32_ctx.try_get_variable("pi"), Some(std::f32::consts::PI));
}

#[test]
fn transcendental_functions() {
    let close = |value: EvalResult<f64>, expected: f64| {
        value.is_ok_and(|v| (v - expected).abs() < 1e-9)
    };
    assert!(close(call("sin", &[std::f64::consts::FRAC_PI_2]), 1.0));
    assert!(close(call("atan2", &[1.0, 1.0]), std::f64::consts::FRAC_PI_4));
    assert!(close(call("root", &[27.0, 3.0]), 3.0));
    assert!(close(call("logn", &[8.0, 2.0]), 3.0));
    assert!(close(call("pow", &[2.0, 10.0]), 1024.0));
    assert!(close(call("cbrt", &[-8.0]), -2.0));
}

#[test]
fn round_is_half_to_even() {
    assert_eq!(call::<f64>("round", &[2.5]), Ok(2.0));
    assert_eq!(call::<f64>("round", &[3.5]), Ok(4.0));
    assert_eq!(call::<f32>("round", &[-0.5]), Ok(-0.0));
}

#[test]
fn float_functions_are_absent_for_integers() {
    let ctx = EvaluationContext::<i64>::new();
    assert!(ctx.try_get_function("sin").is_none());
    assert!(ctx.try_get_variable("pi").is_none());
}

// === Integer-only ===

#[test]
fn integer_log2() {
    assert_eq!(call::<u64>("log2", &[1024]), Ok(10));
    assert_eq!(call::<i32>("log2", &[1000]), Ok(9));
    assert_eq!(call::<i32>("log2", &[0]), Ok(0));
    assert!(matches!(
        call::<i32>("log2", &[-8]),
        Err(EvalError::InvalidArgument { .. })
    ));
}

#[test]
fn rand_stays_in_range() {
    for _ in 0..200 {
        let Ok(value) = call::<i32>("rand", &[-3, 4]) else {
            panic!("rand(-3, 4) failed");
        };
        assert!((-3..4).contains(&value));
        let Ok(value) = call::<u64>("rand", &[5]) else {
            panic!("rand(5) failed");
        };
        assert!(value < 5);
    }
}

#[test]
fn rand_rejects_empty_ranges() {
    assert!(matches!(
        call::<i64>("rand", &[0]),
        Err(EvalError::InvalidArgument { .. })
    ));
    assert!(matches!(
        call::<i64>("rand", &[5, 5]),
        Err(EvalError::InvalidArgument { .. })
    ));
    assert!(EvaluationContext::<f64>::new().try_get_function("rand").is_none());
}

// === Properties ===

proptest! {
    #[test]
    fn min_and_max_bound_every_argument(args in prop::collection::vec(any::<i64>(), 2..12)) {
        let low = call("min", &args).unwrap();
        let high = call("max", &args).unwrap();
        prop_assert!(args.iter().all(|&x| low <= x && x <= high));
        prop_assert_eq!(call("range", &args), Ok(high.wrapping_sub(low)));
    }

    #[test]
    fn clamp_lands_inside_ordered_bounds(value in any::<i32>(), a in any::<i32>(), b in any::<i32>()) {
        let (low, high) = (a.min(b), a.max(b));
        let clamped = call("clamp", &[value, low, high]).unwrap();
        prop_assert!(low <= clamped && clamped <= high);
    }

    #[test]
    fn mode_returns_one_of_its_arguments(args in prop::collection::vec(0_u32..5, 3..10)) {
        let mode = call("mode", &args).unwrap();
        prop_assert!(args.contains(&mode));
    }
}
