use std::fmt;
use std::str::FromStr;

use crate::error::{FuzzyError, Result};
use crate::math::{
    gaussian, inverse_gaussian, inverse_logistic, inverse_reversed_gaussian, logistic,
    reversed_gaussian,
};
use crate::ops::normalize;

/// Interpolation used on the ramps leading into and out of a set's plateau.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Shape {
    /// No boundary on this side: every value is in the set.
    Constant,
    /// No transition: a value is either in or out, switching halfway along the ramp.
    Square,
    #[default]
    Linear,
    /// S-shaped logistic transition, also known as "smooth".
    Sigmoid,
    /// Bell transition, also known as "bell".
    Gaussian,
    /// Reversed bell transition, also known as "reversed bell".
    ReversedGaussian,
}

/// Which ramp of the set is evaluated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    /// From `min` up to `plateau_min`
    In,
    /// From `plateau_max` up to `max`
    Out,
}

/// One ramp of a set: the support bound and the plateau bound it joins.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ramp {
    pub(crate) side: Side,
    pub(crate) bound: f64,
    pub(crate) plateau: f64,
}

impl Ramp {
    fn width(&self) -> f64 {
        match self.side {
            Side::In => self.plateau - self.bound,
            Side::Out => self.bound - self.plateau,
        }
    }

    fn midpoint(&self) -> f64 {
        (self.plateau + self.bound) / 2.
    }

    fn rate(&self) -> Result<f64> {
        let width = self.width();

        if width <= 0. {
            return Err(FuzzyError::degenerate("sigmoid ramp has zero width"));
        }

        Ok(6. / width)
    }
}

impl Shape {
    /// Membership of `x`, a value on the ramp side of the plateau and within
    /// the set's support.
    pub(crate) fn membership(self, ramp: &Ramp, x: f64) -> f64 {
        match (self, ramp.side) {
            (Self::Constant, _) => 1.,
            (Self::Square, Side::In) => {
                if x >= ramp.midpoint() { 1. } else { 0. }
            },
            (Self::Square, Side::Out) => {
                if x <= ramp.midpoint() { 1. } else { 0. }
            },
            (Self::Linear, Side::In) => (x - ramp.bound) / ramp.width(),
            (Self::Linear, Side::Out) => 1. - (x - ramp.plateau) / ramp.width(),
            (Self::Sigmoid, side) => {
                // Non-empty ramp: x lies strictly between bound and plateau
                let rising = logistic(x, ramp.midpoint(), 0., 1., 6. / ramp.width());

                match side {
                    Side::In => rising,
                    Side::Out => 1. - rising,
                }
            },
            (Self::Gaussian, _) => gaussian(x, 0., 1., ramp.plateau, ramp.width()),
            (Self::ReversedGaussian, _) => {
                reversed_gaussian(x, 0., 1., ramp.plateau, ramp.width())
            },
        }
    }

    /// The crisp value on the ramp whose membership is `veracity`, if any.
    pub(crate) fn inverse(self, ramp: &Ramp, veracity: f64) -> Result<Option<f64>> {
        let candidate = match (self, ramp.side) {
            (Self::Constant, _) if veracity == 1. => ramp.bound,
            (Self::Constant, _) => return Ok(None),
            (Self::Square, _) if veracity >= 0.5 => ramp.plateau,
            (Self::Square, _) => ramp.bound,
            (Self::Linear, Side::In) => ramp.bound + ramp.width() * veracity,
            (Self::Linear, Side::Out) => ramp.bound - ramp.width() * veracity,
            (Self::Sigmoid, side) => {
                let rate = ramp.rate()?;

                if veracity >= 1. {
                    ramp.plateau
                } else if veracity <= 0. {
                    ramp.bound
                } else {
                    let rising = match side {
                        Side::In => veracity,
                        Side::Out => 1. - veracity,
                    };

                    inverse_logistic(rising, ramp.midpoint(), 0., 1., rate)?
                }
            },
            (Self::Gaussian, side) => {
                pick(side, inverse_gaussian(veracity, 0., 1., ramp.plateau, ramp.width())?)
            },
            (Self::ReversedGaussian, side) => pick(
                side,
                inverse_reversed_gaussian(veracity, 0., 1., ramp.plateau, ramp.width())?,
            ),
        };

        Ok(Some(candidate))
    }
}

fn pick(side: Side, (lower, upper): (f64, f64)) -> f64 {
    match side {
        Side::In => lower,
        Side::Out => upper,
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::Square => "square",
            Self::Linear => "linear",
            Self::Sigmoid => "sigmoid",
            Self::Gaussian => "gaussian",
            Self::ReversedGaussian => "reversed_gaussian",
        };

        f.write_str(name)
    }
}

impl FromStr for Shape {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "CONSTANT" => Ok(Self::Constant),
            "SQUARE" => Ok(Self::Square),
            "LINEAR" => Ok(Self::Linear),
            "SIGMOID" | "SMOOTH" => Ok(Self::Sigmoid),
            "GAUSSIAN" | "BELL" => Ok(Self::Gaussian),
            "REVERSED_GAUSSIAN" | "REVERSED_BELL" => Ok(Self::ReversedGaussian),
            _ => Err(FuzzyError::UnknownShape { name: s.to_owned() }),
        }
    }
}

#[cfg(test)]
const RISING: Ramp = Ramp {
    side: Side::In,
    bound: 15.,
    plateau: 20.,
};

#[cfg(test)]
const FALLING: Ramp = Ramp {
    side: Side::Out,
    bound: 25.,
    plateau: 20.,
};

#[test]
fn test_linear_ramps() {
    assert_eq!(Shape::Linear.membership(&RISING, 15.), 0.);
    assert_eq!(Shape::Linear.membership(&RISING, 17.5), 0.5);
    assert_eq!(Shape::Linear.membership(&FALLING, 22.5), 0.5);
    assert_eq!(Shape::Linear.membership(&FALLING, 25.), 0.);

    assert_eq!(Shape::Linear.inverse(&RISING, 0.5), Ok(Some(17.5)));
    assert_eq!(Shape::Linear.inverse(&FALLING, 0.5), Ok(Some(22.5)));
    assert_eq!(Shape::Linear.inverse(&FALLING, 1.), Ok(Some(20.)));
}

#[test]
fn test_square_ramps() {
    assert_eq!(Shape::Square.membership(&RISING, 17.), 0.);
    assert_eq!(Shape::Square.membership(&RISING, 17.5), 1.);
    assert_eq!(Shape::Square.membership(&FALLING, 23.), 0.);

    assert_eq!(Shape::Square.inverse(&RISING, 0.7), Ok(Some(20.)));
    assert_eq!(Shape::Square.inverse(&FALLING, 0.2), Ok(Some(25.)));
}

#[test]
fn test_constant_ramps() {
    assert_eq!(Shape::Constant.membership(&RISING, 16.), 1.);
    assert_eq!(Shape::Constant.inverse(&RISING, 1.), Ok(Some(15.)));
    assert_eq!(Shape::Constant.inverse(&FALLING, 0.6), Ok(None));
}

#[test]
fn test_sigmoid_ramps() {
    assert!((Shape::Sigmoid.membership(&RISING, 17.5) - 0.5).abs() < 1e-12);
    assert!(Shape::Sigmoid.membership(&RISING, 19.5) > 0.9);
    assert!(Shape::Sigmoid.membership(&FALLING, 24.5) < 0.1);

    let x = Shape::Sigmoid.inverse(&RISING, 0.8).unwrap().unwrap();
    assert!((Shape::Sigmoid.membership(&RISING, x) - 0.8).abs() < 1e-9);
    let x = Shape::Sigmoid.inverse(&FALLING, 0.8).unwrap().unwrap();
    assert!((Shape::Sigmoid.membership(&FALLING, x) - 0.8).abs() < 1e-9);

    assert_eq!(Shape::Sigmoid.inverse(&RISING, 1.), Ok(Some(20.)));
    assert_eq!(Shape::Sigmoid.inverse(&FALLING, 0.), Ok(Some(25.)));

    let flat = Ramp {
        side: Side::In,
        bound: 20.,
        plateau: 20.,
    };
    assert!(matches!(
        Shape::Sigmoid.inverse(&flat, 0.5),
        Err(FuzzyError::DegenerateMembership { .. })
    ));
}

#[test]
fn test_gaussian_ramps() {
    // Anchored at the plateau, half maximum at half the ramp width
    assert!((Shape::Gaussian.membership(&RISING, 17.5) - 0.5).abs() < 1e-12);
    assert!((Shape::Gaussian.membership(&FALLING, 22.5) - 0.5).abs() < 1e-12);

    let lower = Shape::Gaussian.inverse(&RISING, 0.5).unwrap().unwrap();
    let upper = Shape::Gaussian.inverse(&FALLING, 0.5).unwrap().unwrap();
    assert!((lower - 17.5).abs() < 1e-9);
    assert!((upper - 22.5).abs() < 1e-9);
}

#[test]
fn test_shape_names() {
    assert_eq!("smooth".parse::<Shape>(), Ok(Shape::Sigmoid));
    assert_eq!("BELL".parse::<Shape>(), Ok(Shape::Gaussian));
    assert_eq!("reversed bell".parse::<Shape>(), Ok(Shape::ReversedGaussian));
    assert_eq!(Shape::ReversedGaussian.to_string(), "reversed_gaussian");
    assert!(matches!("wobbly".parse::<Shape>(), Err(FuzzyError::UnknownShape { .. })));
}
