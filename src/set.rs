use std::fmt;

use crate::error::{FuzzyError, Result};
use crate::hedge::{quantify, Direction, Hedge};
use crate::linspace::Linspace;
use crate::math::mean;
use crate::ops::BooleanAlgorithm;
use crate::shape::{Ramp, Shape, Side};
use crate::value::FuzzyValue;
use crate::veracity::Veracity;

/// What a set is tested against: a plain number or a fuzzy value, which is
/// crispified (without clearing its assertions) first.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Crisp(f64),
    Value(&'a FuzzyValue),
}

impl Operand<'_> {
    fn resolve(self) -> Result<f64> {
        let x = match self {
            Operand::Crisp(x) => x,
            Operand::Value(value) => value.current(None)?,
        };

        if !x.is_finite() {
            return Err(FuzzyError::NonFiniteOperand { value: x });
        }

        Ok(x)
    }
}

impl From<f64> for Operand<'_> {
    fn from(x: f64) -> Self {
        Operand::Crisp(x)
    }
}

impl<'a> From<&'a FuzzyValue> for Operand<'a> {
    fn from(value: &'a FuzzyValue) -> Self {
        Operand::Value(value)
    }
}

/// Builds a [`FuzzySet`] from two anchors: `not_value`, one of the closest
/// values outside the set, and `is_value`, the value that fits it best.
///
/// The support is the reflection of `not_value` around `is_value`, and the
/// plateau defaults to the single point in the middle of the support.
#[derive(Clone, Debug)]
pub struct SetBuilder {
    name: String,
    not_value: f64,
    is_value: f64,
    shape_in: Shape,
    shape_out: Option<Shape>,
    plateau_min: Option<f64>,
    plateau_max: Option<f64>,
    algorithm: BooleanAlgorithm,
}

impl SetBuilder {
    pub fn new(name: impl Into<String>, not_value: f64, is_value: f64) -> Self {
        Self {
            name: name.into(),
            not_value,
            is_value,
            shape_in: Shape::Linear,
            shape_out: None,
            plateau_min: None,
            plateau_max: None,
            algorithm: BooleanAlgorithm::Linear,
        }
    }

    /// Uses `shape` on both ramps.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape_in = shape;
        self.shape_out = Some(shape);
        self
    }

    /// The ramp below the plateau. The ramp above follows it unless set explicitly.
    pub fn shape_in(mut self, shape: Shape) -> Self {
        self.shape_in = shape;
        self
    }

    pub fn shape_out(mut self, shape: Shape) -> Self {
        self.shape_out = Some(shape);
        self
    }

    pub fn plateau_min(mut self, plateau_min: f64) -> Self {
        self.plateau_min = Some(plateau_min);
        self
    }

    pub fn plateau_max(mut self, plateau_max: f64) -> Self {
        self.plateau_max = Some(plateau_max);
        self
    }

    pub fn plateau(self, plateau_min: f64, plateau_max: f64) -> Self {
        self.plateau_min(plateau_min).plateau_max(plateau_max)
    }

    pub fn algorithm(mut self, algorithm: BooleanAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn build(self) -> Result<FuzzySet> {
        let invalid = |reason: &str| FuzzyError::InvalidSet {
            name: self.name.clone(),
            reason: reason.to_owned(),
        };

        if !self.not_value.is_finite() || !self.is_value.is_finite() {
            return Err(invalid("anchor values must be finite"));
        }

        let (min, max) = if self.not_value > self.is_value {
            (self.not_value - 2. * (self.not_value - self.is_value), self.not_value)
        } else {
            (self.not_value, self.not_value + 2. * (self.is_value - self.not_value))
        };
        let middle = mean(&[min, max])?;
        let plateau_min = self.plateau_min.unwrap_or(middle);
        let plateau_max = self.plateau_max.unwrap_or(middle);

        if !(min <= plateau_min && plateau_min <= plateau_max && plateau_max <= max) {
            return Err(invalid("plateau must satisfy min <= plateau_min <= plateau_max <= max"));
        }

        let shape_out = self.shape_out.unwrap_or(self.shape_in);

        if (self.shape_in == Shape::Sigmoid && plateau_min == min)
            || (shape_out == Shape::Sigmoid && plateau_max == max)
        {
            return Err(invalid("a sigmoid ramp needs a non-zero width"));
        }

        Ok(FuzzySet {
            shape_out,
            name: self.name,
            min,
            max,
            plateau_min,
            plateau_max,
            shape_in: self.shape_in,
            algorithm: self.algorithm,
        })
    }
}

/// A fuzzy set over a continuous domain. Immutable once built, and shared by
/// reference between the values asserted against it.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    name: String,
    min: f64,
    max: f64,
    plateau_min: f64,
    plateau_max: f64,
    shape_in: Shape,
    shape_out: Shape,
    algorithm: BooleanAlgorithm,
}

impl FuzzySet {
    pub fn builder(name: impl Into<String>, not_value: f64, is_value: f64) -> SetBuilder {
        SetBuilder::new(name, not_value, is_value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn plateau_min(&self) -> f64 {
        self.plateau_min
    }

    pub fn plateau_max(&self) -> f64 {
        self.plateau_max
    }

    pub fn shape_in(&self) -> Shape {
        self.shape_in
    }

    pub fn shape_out(&self) -> Shape {
        self.shape_out
    }

    pub fn algorithm(&self) -> BooleanAlgorithm {
        self.algorithm
    }

    /// Raw membership degree of `x`, before any hedge.
    pub fn membership(&self, x: f64) -> f64 {
        if x >= self.plateau_min && x <= self.plateau_max {
            return 1.;
        }

        let (shape, side, outside) = if x < self.plateau_min {
            (self.shape_in, Side::In, x < self.min)
        } else {
            (self.shape_out, Side::Out, x > self.max)
        };

        match shape {
            Shape::Constant => 1.,
            _ if outside => 0.,
            shape => shape.membership(&self.ramp(side), x).clamp(0., 1.),
        }
    }

    /// Veracity of "operand IS (hedge) self".
    pub fn contains<'a>(
        &self,
        operand: impl Into<Operand<'a>>,
        hedge: impl Into<Option<Hedge>>,
    ) -> Result<Veracity> {
        let x = operand.into().resolve()?;
        let hedge = hedge.into().unwrap_or_default();

        Ok(quantify(hedge, Some(self.membership(x)), self.algorithm, Direction::Forward))
    }

    /// Crisp values whose membership is `veracity`, ascending and clamped
    /// into `[min, max]`.
    pub fn get_values(&self, veracity: f64) -> Result<Vec<f64>> {
        let middle = mean(&[self.plateau_min, self.plateau_max])?;

        if self.shape_in == Shape::Constant && self.shape_out == Shape::Constant {
            return Ok(vec![self.min, self.plateau_min, middle, self.plateau_max, self.max]);
        }

        let mut crisp = Vec::with_capacity(5);

        if veracity >= 1. {
            crisp.extend([self.plateau_min, middle, self.plateau_max]);
        }

        crisp.extend(self.shape_in.inverse(&self.ramp(Side::In), veracity)?);
        crisp.extend(self.shape_out.inverse(&self.ramp(Side::Out), veracity)?);

        for x in crisp.iter_mut() {
            *x = x.clamp(self.min, self.max);
        }
        crisp.sort_unstable_by(f64::total_cmp);

        Ok(crisp)
    }

    /// Crisp values that would justify asserting `hedge` with `veracity`.
    ///
    /// Without a veracity, the hedge's canonical veracity is used.
    pub fn crispify(&self, hedge: Hedge, veracity: Option<Veracity>) -> Result<Vec<f64>> {
        let v = veracity.map_or_else(|| hedge.default_veracity(), Veracity::value);

        self.get_values(hedge.scale(v, Direction::Inverse))
    }

    /// The hedge whose canonical veracity is closest to the membership of `operand`.
    pub fn quantify<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Hedge> {
        let x = operand.into().resolve()?;

        if self.shape_in == Shape::Constant && self.shape_out == Shape::Constant {
            return Ok(Hedge::Is);
        }
        if x < self.min {
            return Ok(self.saturated(self.shape_in));
        }
        if x > self.max {
            return Ok(self.saturated(self.shape_out));
        }
        if x >= self.plateau_min && x <= self.plateau_max {
            return Ok(Hedge::Is);
        }

        let veracity = self.membership(x);
        let mut nearest = Hedge::IsNot;
        let mut distance = 1.;

        for hedge in Hedge::ALL {
            let test = (hedge.default_veracity() - veracity).abs();

            if test < distance {
                distance = test;
                nearest = hedge;
            }
        }

        Ok(nearest)
    }

    /// Evenly samples the membership curve over the support.
    pub fn sample(&self, points: usize) -> Vec<(f64, f64)> {
        Linspace::new(self.min, self.max, points)
            .map(|x| (x, self.membership(x)))
            .collect()
    }

    fn saturated(&self, shape: Shape) -> Hedge {
        match shape {
            Shape::Constant => Hedge::Is,
            _ => Hedge::IsNot,
        }
    }

    fn ramp(&self, side: Side) -> Ramp {
        match side {
            Side::In => Ramp {
                side,
                bound: self.min,
                plateau: self.plateau_min,
            },
            Side::Out => Ramp {
                side,
                bound: self.max,
                plateau: self.plateau_max,
            },
        }
    }
}

impl fmt::Display for FuzzySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
fn warm() -> FuzzySet {
    FuzzySet::builder("Warm", 15., 20.).build().unwrap()
}

#[test]
fn test_reflected_support() {
    let warm = warm();

    assert_eq!((warm.min(), warm.max()), (15., 25.));
    assert_eq!((warm.plateau_min(), warm.plateau_max()), (20., 20.));
    assert_eq!(warm.shape_out(), Shape::Linear);
    assert_eq!(warm.to_string(), "Warm");

    let cold = FuzzySet::builder("Cold", 17., 0.)
        .shape_in(Shape::Constant)
        .shape_out(Shape::Gaussian)
        .build()
        .unwrap();

    assert_eq!((cold.min(), cold.max()), (-17., 17.));
    assert_eq!((cold.plateau_min(), cold.plateau_max()), (0., 0.));
}

#[test]
fn test_invalid_plateau() {
    let err = FuzzySet::builder("Warm", 15., 20.).plateau(22., 18.).build();
    assert!(matches!(err, Err(FuzzyError::InvalidSet { .. })));

    let err = FuzzySet::builder("Warm", 15., 20.).plateau_max(30.).build();
    assert!(matches!(err, Err(FuzzyError::InvalidSet { .. })));

    let err = FuzzySet::builder("Warm", f64::NAN, 20.).build();
    assert!(matches!(err, Err(FuzzyError::InvalidSet { .. })));
}

#[test]
fn test_zero_width_sigmoid() {
    let err = FuzzySet::builder("Flat", 0., 10.)
        .shape(Shape::Sigmoid)
        .plateau(0., 20.)
        .build();
    assert!(matches!(err, Err(FuzzyError::InvalidSet { .. })));

    let err = FuzzySet::builder("Flat", 0., 10.)
        .shape_out(Shape::Sigmoid)
        .plateau_max(20.)
        .build();
    assert!(matches!(err, Err(FuzzyError::InvalidSet { .. })));

    // Only the sigmoid side needs room to ramp
    let half = FuzzySet::builder("Half", 0., 10.)
        .shape_in(Shape::Linear)
        .shape_out(Shape::Sigmoid)
        .plateau_min(0.)
        .build()
        .unwrap();
    assert_eq!(half.crispify(Hedge::Is, None).map(|values| values.is_empty()), Ok(false));
}

#[test]
fn test_non_finite_operands() {
    let warm = warm();

    for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            warm.contains(x, None),
            Err(FuzzyError::NonFiniteOperand { .. })
        ));
        assert!(matches!(warm.quantify(x), Err(FuzzyError::NonFiniteOperand { .. })));
    }

    let value = FuzzyValue::new(f64::NAN, "");
    assert!(matches!(
        warm.contains(&value, None),
        Err(FuzzyError::NonFiniteOperand { .. })
    ));
}

#[test]
fn test_contains() {
    let warm = warm();

    assert_eq!(warm.contains(20., None).unwrap().value(), 1.);
    assert_eq!(warm.contains(15., None).unwrap().value(), 0.);
    assert_eq!(warm.contains(17.5, None).unwrap().value(), 0.5);
    assert_eq!(warm.contains(22.5, None).unwrap().value(), 0.5);
    assert_eq!(warm.contains(40., None).unwrap().value(), 0.);
    assert_eq!(warm.contains(17.5, Hedge::Minus).unwrap().value(), 0.25);
    assert_eq!(warm.contains(20., Hedge::IsNot).unwrap().value(), 0.);
}

#[test]
fn test_constant_sides_never_saturate() {
    let cold = FuzzySet::builder("Cold", 17., 0.)
        .shape_in(Shape::Constant)
        .shape_out(Shape::Gaussian)
        .build()
        .unwrap();

    assert_eq!(cold.membership(-100.), 1.);
    assert_eq!(cold.membership(100.), 0.);
    assert!((cold.membership(8.5) - 0.5).abs() < 1e-12);
}

#[test]
fn test_get_values() {
    let warm = warm();

    assert_eq!(warm.get_values(0.5), Ok(vec![17.5, 22.5]));
    assert_eq!(warm.get_values(1.), Ok(vec![20., 20., 20., 20., 20.]));
    assert_eq!(warm.get_values(0.), Ok(vec![15., 25.]));

    let everywhere = FuzzySet::builder("Always", 0., 10.)
        .shape(Shape::Constant)
        .plateau(5., 15.)
        .build()
        .unwrap();
    assert_eq!(everywhere.get_values(0.2), Ok(vec![0., 5., 10., 15., 20.]));
}

#[test]
fn test_get_values_clamps() {
    let bell = FuzzySet::builder("Bell", 0., 10.)
        .shape(Shape::ReversedGaussian)
        .plateau(2., 18.)
        .build()
        .unwrap();

    for veracity in [0., 0.3, 0.6, 0.9, 1.] {
        let values = bell.get_values(veracity).unwrap();

        assert!(!values.is_empty());
        assert!(values.iter().all(|x| (bell.min()..=bell.max()).contains(x)));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_crispify_applies_inverse_hedge() {
    let warm = warm();

    // "Somewhat" squares the membership, so 0.25 comes from a membership of 0.5
    assert_eq!(
        warm.crispify(Hedge::Minus, Some(Veracity::linear(0.25))),
        Ok(vec![17.5, 22.5])
    );
    // Without a veracity, the hedge's own: 0.5 for "Moderately"
    assert_eq!(warm.crispify(Hedge::Average, None), Ok(vec![17.5, 22.5]));
    assert_eq!(warm.crispify(Hedge::IsNot, Some(Veracity::linear(0.8))), Ok(vec![15., 25.]));
}

#[test]
fn test_quantify() {
    let warm = warm();

    assert_eq!(warm.quantify(20.), Ok(Hedge::Is));
    assert_eq!(warm.quantify(10.), Ok(Hedge::IsNot));
    assert_eq!(warm.quantify(30.), Ok(Hedge::IsNot));
    assert_eq!(warm.quantify(17.5), Ok(Hedge::Average));
    assert_eq!(warm.quantify(19.), Ok(Hedge::DoublePlus));
    assert_eq!(warm.quantify(15.5), Ok(Hedge::DoubleMinus));

    let hot = FuzzySet::builder("Hot", 23., 35.)
        .shape_in(Shape::Gaussian)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();
    assert_eq!(hot.quantify(100.), Ok(Hedge::Is));
}

#[test]
fn test_sample() {
    let samples = warm().sample(5);

    assert_eq!(
        samples,
        vec![(15., 0.), (17.5, 0.5), (20., 1.), (22.5, 0.5), (25., 0.)]
    );
}
