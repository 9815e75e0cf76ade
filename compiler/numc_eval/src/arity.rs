use std::fmt;

use numc_ir::Name;

use crate::{EvalError, EvalResult};

/// Accepted argument count of a function. `None` leaves that end open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Arity {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Arity {
    /// Any number of arguments, including none.
    pub const ANY: Arity = Arity::new(None, None);

    pub const fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Arity { min, max }
    }

    pub const fn exactly(count: usize) -> Self {
        Arity::new(Some(count), Some(count))
    }

    pub const fn at_least(min: usize) -> Self {
        Arity::new(Some(min), None)
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity::new(Some(min), Some(max))
    }

    /// Integer bounds where any negative value means unbounded.
    pub fn from_bounds(min: i32, max: i32) -> Self {
        Arity::new(usize::try_from(min).ok(), usize::try_from(max).ok())
    }

    pub fn accepts(self, count: usize) -> bool {
        self.min.map_or(true, |min| count >= min) && self.max.map_or(true, |max| count <= max)
    }

    /// `Err(EvalError::Arity)` naming `name` when `count` is out of range.
    pub fn check(self, name: &Name, count: usize) -> EvalResult<()> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(EvalError::Arity {
                name: name.clone(),
                got: count,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => f.write_str("any number of"),
            (Some(min), Some(max)) if min == max => write!(f, "exactly {min}"),
            (Some(min), Some(max)) => write!(f, "between {min} and {max}"),
            (Some(min), None) => write!(f, "at least {min}"),
            (None, Some(max)) => write!(f, "at most {max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exact_arity_rejects_neighbours() {
        let two = Arity::exactly(2);
        assert!(!two.accepts(1));
        assert!(two.accepts(2));
        assert!(!two.accepts(3));
    }

    #[test]
    fn open_ends() {
        assert!(Arity::ANY.accepts(0));
        assert!(Arity::ANY.accepts(1000));
        assert!(Arity::at_least(1).accepts(50));
        assert!(!Arity::at_least(1).accepts(0));
    }

    #[test]
    fn negative_bounds_are_unbounded() {
        assert_eq!(Arity::from_bounds(-1, -1), Arity::ANY);
        assert_eq!(Arity::from_bounds(2, -1), Arity::at_least(2));
        assert_eq!(Arity::from_bounds(-1, 3), Arity::new(None, Some(3)));
        assert_eq!(Arity::from_bounds(1, 2), Arity::between(1, 2));
    }

    #[test]
    fn check_reports_bounds() {
        let name = Name::new("clamp");
        assert_eq!(Arity::exactly(3).check(&name, 3), Ok(()));
        let err = Arity::exactly(3).check(&name, 1);
        assert_eq!(
            err,
            Err(EvalError::Arity {
                name: name.clone(),
                got: 1,
                min: Some(3),
                max: Some(3),
            })
        );
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err("function `clamp` takes exactly 3 argument(s) but 1 were supplied".to_owned())
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(Arity::ANY.to_string(), "any number of");
        assert_eq!(Arity::between(1, 2).to_string(), "between 1 and 2");
        assert_eq!(Arity::at_least(1).to_string(), "at least 1");
        assert_eq!(Arity::new(None, Some(4)).to_string(), "at most 4");
    }
}
