//! Built-in variables and functions seeded into a [`DefaultRegistry`].
//!
//! Every type gets the arithmetic helpers (`mod`, `abs`, `min`, `max`,
//! `sum`, `mean`, `average`, `range`, `mode`, `clamp`, `lerp`,
//! `inverseLerp`). Float types add the usual constants and transcendental
//! functions, computed in `f64` and narrowed for `f32`. Integer types add
//! `log2` and `rand`.
//!
//! Variadic helpers accept any argument count: no arguments yield zero and
//! a single argument yields itself.

use numc_ir::{Name, Number};
use rand::Rng;

use crate::{Arity, DefaultRegistry, EvalError, EvalResult};

/// Seed `registry` with every built-in for `T`.
pub fn register<T: Number>(registry: &mut DefaultRegistry<T>) {
    register_common(registry);
    if T::is_floating_point() {
        register_float(registry);
    } else {
        register_integer(registry);
    }
}

fn register_common<T: Number>(registry: &mut DefaultRegistry<T>) {
    define1(registry, "abs", |x: T| Ok(x.absolute()));
    define2(registry, "mod", |a: T, b| Ok(a.remainder(b)?));
    define3(registry, "clamp", |value: T, low, high| Ok(value.greater(low).lesser(high)));
    define3(registry, "lerp", |t: T, a, b| Ok(b.minus(a).times(t).plus(a)));
    define3(registry, "inverseLerp", |value: T, a, b| {
        Ok(value.minus(a).divide(b.minus(a))?)
    });

    registry.set_function("min", Arity::ANY, |args| Ok(fold(args, T::lesser)));
    registry.set_function("max", Arity::ANY, |args| Ok(fold(args, T::greater)));
    registry.set_function("sum", Arity::ANY, |args| Ok(fold(args, T::plus)));
    registry.set_function("mean", Arity::ANY, mean::<T>);
    registry.set_function("average", Arity::ANY, mean::<T>);
    registry.set_function("range", Arity::ANY, |args| Ok(range(args)));
    registry.set_function("mode", Arity::ANY, |args| Ok(mode(args)));
}

fn register_float<T: Number>(registry: &mut DefaultRegistry<T>) {
    use std::f64::consts::{E, PI, TAU};

    let constants = [
        ("pi", PI),
        ("e", E),
        ("tau", TAU),
        ("phi", (1.0 + 5.0_f64.sqrt()) / 2.0),
        ("inf", f64::INFINITY),
        ("nan", f64::NAN),
        ("degToRad", PI / 180.0),
        ("radToDeg", 180.0 / PI),
    ];
    for (name, value) in constants {
        registry.set_variable(name, T::from_f64(value));
    }

    let unary: [(&'static str, fn(f64) -> f64); 18] = [
        ("sin", f64::sin),
        ("cos", f64::cos),
        ("tan", f64::tan),
        ("asin", f64::asin),
        ("acos", f64::acos),
        ("atan", f64::atan),
        ("sinh", f64::sinh),
        ("cosh", f64::cosh),
        ("tanh", f64::tanh),
        ("sqrt", f64::sqrt),
        ("cbrt", f64::cbrt),
        ("exp", f64::exp),
        ("log", f64::ln),
        ("log10", f64::log10),
        ("log2", f64::log2),
        ("floor", f64::floor),
        ("ceil", f64::ceil),
        ("round", f64::round_ties_even),
    ];
    for (name, function) in unary {
        define1(registry, name, move |x: T| Ok(T::from_f64(function(x.to_f64()))));
    }

    let binary: [(&'static str, fn(f64, f64) -> f64); 4] = [
        ("atan2", f64::atan2),
        ("pow", f64::powf),
        ("root", |x, n| x.powf(1.0 / n)),
        ("logn", f64::log),
    ];
    for (name, function) in binary {
        define2(registry, name, move |a: T, b: T| {
            Ok(T::from_f64(function(a.to_f64(), b.to_f64())))
        });
    }
}

fn register_integer<T: Number>(registry: &mut DefaultRegistry<T>) {
    define1(registry, "log2", |x: T| {
        let value = x.to_i128();
        if value < 0 {
            Err(EvalError::invalid_argument("log2", format!("{x} is negative")))
        } else if value == 0 {
            Ok(T::ZERO)
        } else {
            Ok(T::from_i128(i128::from(value.ilog2())))
        }
    });

    let rand_arity = Arity::between(1, 2);
    let rand_name = Name::new("rand");
    registry.set_function(rand_name.clone(), rand_arity, move |args| {
        let (low, high) = match *args {
            [max] => (T::ZERO, max),
            [min, max] => (min, max),
            _ => return Err(arity_mismatch(&rand_name, rand_arity, args.len())),
        };
        let (low, high) = (low.to_i128(), high.to_i128());
        if low >= high {
            return Err(EvalError::invalid_argument(
                "rand",
                format!("empty range {low}..{high}"),
            ));
        }
        Ok(T::from_i128(rand::rng().random_range(low..high)))
    });
}

// Registration helpers. The arity is checked by the context before the
// callable runs; the fallback arm only fires when a callable is invoked
// directly.

fn arity_mismatch(name: &Name, arity: Arity, got: usize) -> EvalError {
    EvalError::Arity {
        name: name.clone(),
        got,
        min: arity.min,
        max: arity.max,
    }
}

fn define1<T: Number>(
    registry: &mut DefaultRegistry<T>,
    name: &'static str,
    function: impl Fn(T) -> EvalResult<T> + Send + Sync + 'static,
) {
    let arity = Arity::exactly(1);
    let id = Name::new(name);
    registry.set_function(id.clone(), arity, move |args| match *args {
        [x] => function(x),
        _ => Err(arity_mismatch(&id, arity, args.len())),
    });
}

fn define2<T: Number>(
    registry: &mut DefaultRegistry<T>,
    name: &'static str,
    function: impl Fn(T, T) -> EvalResult<T> + Send + Sync + 'static,
) {
    let arity = Arity::exactly(2);
    let id = Name::new(name);
    registry.set_function(id.clone(), arity, move |args| match *args {
        [a, b] => function(a, b),
        _ => Err(arity_mismatch(&id, arity, args.len())),
    });
}

fn define3<T: Number>(
    registry: &mut DefaultRegistry<T>,
    name: &'static str,
    function: impl Fn(T, T, T) -> EvalResult<T> + Send + Sync + 'static,
) {
    let arity = Arity::exactly(3);
    let id = Name::new(name);
    registry.set_function(id.clone(), arity, move |args| match *args {
        [a, b, c] => function(a, b, c),
        _ => Err(arity_mismatch(&id, arity, args.len())),
    });
}

// Variadic helpers

fn fold<T: Number>(args: &[T], combine: fn(T, T) -> T) -> T {
    args.iter().copied().reduce(combine).unwrap_or(T::ZERO)
}

fn mean<T: Number>(args: &[T]) -> EvalResult<T> {
    if args.is_empty() {
        return Ok(T::ZERO);
    }
    Ok(fold(args, T::plus).divide(T::from_usize(args.len()))?)
}

/// `max - min`; a single value is returned as is.
fn range<T: Number>(args: &[T]) -> T {
    match args {
        [] => T::ZERO,
        [only] => *only,
        _ => fold(args, T::greater).minus(fold(args, T::lesser)),
    }
}

/// Most frequent value. Ties go to the value seen first; fewer than three
/// arguments return the first one.
fn mode<T: Number>(args: &[T]) -> T {
    match args {
        [] => T::ZERO,
        [first] | [first, _] => *first,
        _ => {
            let mut best = T::ZERO;
            let mut best_count = 0;
            for (i, &candidate) in args.iter().enumerate() {
                if args[..i].iter().any(|seen| seen.literal_eq(candidate)) {
                    continue;
                }
                let count = args[i..]
                    .iter()
                    .filter(|value| value.literal_eq(candidate))
                    .count();
                if count > best_count {
                    best = candidate;
                    best_count = count;
                }
            }
            best
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
