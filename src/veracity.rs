use std::fmt;
use std::ops::Not;

use crate::error::{FuzzyError, Result};
use crate::ops::{BooleanAlgorithm, Operator};

/// The fuzzy counterpart of a boolean: a truth value in `[0, 1]`, tagged with
/// the algorithm its connectives use.
///
/// Veracities are immutable; every operator returns a new one. Binary
/// operators refuse to mix algorithms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Veracity {
    value: f64,
    algorithm: BooleanAlgorithm,
}

impl Veracity {
    /// Clamps `value` into `[0, 1]`.
    pub fn new(value: f64, algorithm: BooleanAlgorithm) -> Self {
        debug_assert!(!value.is_nan(), "veracity cannot be NaN");

        Self {
            value: value.clamp(0., 1.),
            algorithm,
        }
    }

    pub fn linear(value: f64) -> Self {
        Self::new(value, BooleanAlgorithm::Linear)
    }

    pub fn hyperbolic(value: f64) -> Self {
        Self::new(value, BooleanAlgorithm::Hyperbolic)
    }

    pub fn value(self) -> f64 {
        self.value
    }

    pub fn algorithm(self) -> BooleanAlgorithm {
        self.algorithm
    }

    pub fn negate(self) -> Self {
        Self::new(1. - self.value, self.algorithm)
    }

    pub fn combine(self, operator: Operator, other: Veracity) -> Result<Self> {
        self.check(other)?;

        Ok(Self::new(
            operator.call(self.algorithm, self.value, other.value),
            self.algorithm,
        ))
    }

    /// `(1 - weight) * self + weight * other`
    pub fn weighted(self, other: Veracity, weight: f64) -> Result<Self> {
        self.check(other)?;

        Ok(Self::new(
            (1. - weight) * self.value + weight * other.value,
            self.algorithm,
        ))
    }

    fn check(self, other: Veracity) -> Result<()> {
        if self.algorithm == other.algorithm {
            Ok(())
        } else {
            Err(FuzzyError::AlgorithmMismatch {
                left: self.algorithm,
                right: other.algorithm,
            })
        }
    }
}

macro_rules! connectives {
    ($($(#[$doc:meta])* $name:ident => $op:ident;)*) => {
        impl Veracity {
            $(
                $(#[$doc])*
                pub fn $name(self, other: Veracity) -> Result<Self> {
                    self.combine(Operator::$op, other)
                }
            )*
        }
    };
}

connectives! {
    /// `self and other`
    and => And;
    /// `self or other`
    or => Or;
    /// `self != other`
    xor => Xor;
    /// Alias for [`Veracity::xor`]
    is_not => Xor;
    /// Alias for [`Veracity::xor`]
    different => Xor;
    /// `self == other`
    nxr => Nxr;
    /// Alias for [`Veracity::nxr`]
    is => Nxr;
    /// Alias for [`Veracity::nxr`]
    equals => Nxr;
    /// `!self or other`
    implies => Implies;
    /// Alias for [`Veracity::implies`]
    with => Implies;
    /// Alias for [`Veracity::implies`]
    has => Implies;
    /// `self and !other`
    does_not_imply => DoesNotImply;
    /// Alias for [`Veracity::does_not_imply`]
    without => DoesNotImply;
    /// Alias for [`Veracity::does_not_imply`]
    does_not_have => DoesNotImply;
    /// Alias for [`Veracity::does_not_imply`]
    and_not => DoesNotImply;
    /// `!(self and other)`
    nand => Nand;
    /// Alias for [`Veracity::nand`]
    not_both => Nand;
    /// `!(self or other)`
    nor => Nor;
    /// Alias for [`Veracity::nor`]
    none => Nor;
}

impl Not for Veracity {
    type Output = Veracity;

    fn not(self) -> Veracity {
        self.negate()
    }
}

impl fmt::Display for Veracity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.value)
    }
}

#[test]
fn test_clamped() {
    assert_eq!(Veracity::linear(1.5).value(), 1.);
    assert_eq!(Veracity::hyperbolic(-0.2).value(), 0.);
    assert_eq!(Veracity::linear(0.4).to_string(), "0.400");
}

#[test]
fn test_negate() {
    let v = Veracity::hyperbolic(0.25);

    assert_eq!(v.negate().value(), 0.75);
    assert_eq!(!!v, v);
    assert_eq!((!v).algorithm(), BooleanAlgorithm::Hyperbolic);
}

#[test]
fn test_idempotence_depends_on_algorithm() {
    let linear = Veracity::linear(0.5);
    let hyperbolic = Veracity::hyperbolic(0.5);

    assert_eq!(linear.and(linear), Ok(linear));
    assert_eq!(linear.or(linear), Ok(linear));
    assert_eq!(hyperbolic.and(hyperbolic).map(Veracity::value), Ok(0.25));
    assert_eq!(hyperbolic.or(hyperbolic).map(Veracity::value), Ok(0.75));
}

#[test]
fn test_aliases() {
    let x = Veracity::linear(0.2);
    let y = Veracity::linear(0.9);

    assert_eq!(x.is_not(y), x.xor(y));
    assert_eq!(x.different(y), x.xor(y));
    assert_eq!(x.is(y), x.nxr(y));
    assert_eq!(x.equals(y), x.nxr(y));
    assert_eq!(x.with(y), x.implies(y));
    assert_eq!(x.has(y), x.implies(y));
    assert_eq!(x.without(y), x.does_not_imply(y));
    assert_eq!(x.and_not(y), x.does_not_imply(y));
    assert_eq!(x.does_not_have(y), x.does_not_imply(y));
    assert_eq!(x.not_both(y), x.nand(y));
    assert_eq!(x.none(y), x.nor(y));
}

#[test]
fn test_weighted() {
    let x = Veracity::hyperbolic(0.2);
    let y = Veracity::hyperbolic(0.6);

    assert_eq!(x.weighted(y, 0.), Ok(x));
    assert_eq!(x.weighted(y, 1.), Ok(y));
    let mid = x.weighted(y, 0.5).unwrap();
    assert!((mid.value() - 0.4).abs() < 1e-12);
}

#[test]
fn test_algorithm_mismatch() {
    let x = Veracity::linear(0.2);
    let y = Veracity::hyperbolic(0.6);

    assert_eq!(
        x.and(y),
        Err(FuzzyError::AlgorithmMismatch {
            left: BooleanAlgorithm::Linear,
            right: BooleanAlgorithm::Hyperbolic,
        })
    );
    assert!(x.weighted(y, 0.5).is_err());
}
