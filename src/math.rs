use num::traits::FloatConst;
use num::Float;

use crate::error::{FuzzyError, Result};

/// The logistic function (sigmoid), scaled into `[min, max]`.
///
/// `mid` is the value at which the curve crosses `(min + max) / 2` and `rate`
/// is its steepness.
pub fn logistic<F: Float>(value: F, mid: F, min: F, max: F, rate: F) -> F {
    let result = F::one() / (F::one() + (-rate * (value - mid)).exp());

    result * (max - min) + min
}

/// Analytic inverse of [`logistic`].
///
/// `value == min` is a degenerate edge and returns zero. Anything else outside
/// the open interval `(min, max)` has no preimage.
pub fn inverse_logistic<F: Float>(value: F, mid: F, min: F, max: F, rate: F) -> Result<F> {
    if value == min {
        return Ok(F::zero());
    }
    if !(value > min && value < max) {
        return Err(FuzzyError::degenerate(
            "inverse logistic is only defined inside (min, max)",
        ));
    }
    if rate == F::zero() || !rate.is_finite() {
        return Err(FuzzyError::degenerate("inverse logistic needs a finite, non-zero rate"));
    }

    Ok(mid - ((max - min) / (value - min) - F::one()).ln() / rate)
}

/// Bell curve parameterized by its full width at half maximum, scaled into `[min, max]`.
///
/// A zero `fwhm` collapses the bell to a spike: `max` exactly at `center`, `min` elsewhere.
pub fn gaussian<F: Float + FloatConst>(value: F, min: F, max: F, center: F, fwhm: F) -> F {
    if fwhm == F::zero() {
        return if value == center { max } else { min };
    }

    let exp = -four::<F>() * F::LN_2() * ((value - center) / fwhm).powi(2);

    exp.exp() * (max - min) + min
}

/// A "reversed" gaussian, growing faster near the low end.
///
/// The width fed to [`gaussian`] is `-value - fwhm + 1`, which depends on the
/// evaluated value itself.
pub fn reversed_gaussian<F: Float + FloatConst>(value: F, min: F, max: F, center: F, fwhm: F) -> F {
    gaussian(value, min, max, center, reversed_fwhm(value, fwhm))
}

/// The two roots `(lower, upper)` of `gaussian(x) == value`.
///
/// Degenerate inputs: `value == 1` and `fwhm == 0` give `(center, center)`;
/// `value == 0` gives the half width points around `center`.
pub fn inverse_gaussian<F: Float + FloatConst>(
    value: F,
    min: F,
    max: F,
    center: F,
    fwhm: F,
) -> Result<(F, F)> {
    if value == F::one() {
        return Ok((center, center));
    }
    if value == F::zero() {
        let half = fwhm / (F::one() + F::one());

        return Ok(ordered(center + half, center - half));
    }
    if fwhm == F::zero() {
        return Ok((center, center));
    }

    let normalized = (value - min) / (max - min);

    if !(normalized > F::zero() && normalized <= F::one()) {
        return Err(FuzzyError::degenerate(
            "inverse gaussian is only defined inside (min, max]",
        ));
    }

    let offset = (normalized.ln() * fwhm.powi(2) / (-four::<F>() * F::LN_2())).sqrt();

    Ok((center - offset, center + offset))
}

/// Inverse of [`reversed_gaussian`], using the same width transform on `value`.
pub fn inverse_reversed_gaussian<F: Float + FloatConst>(
    value: F,
    min: F,
    max: F,
    center: F,
    fwhm: F,
) -> Result<(F, F)> {
    inverse_gaussian(value, min, max, center, reversed_fwhm(value, fwhm))
}

/// Arithmetic mean. Fails on an empty slice.
pub fn mean<F: Float>(values: &[F]) -> Result<F> {
    if values.is_empty() {
        return Err(FuzzyError::EmptyAggregation);
    }

    let (sum, count) = values
        .iter()
        .fold((F::zero(), F::zero()), |(sum, count), v| (sum + *v, count + F::one()));

    Ok(sum / count)
}

fn reversed_fwhm<F: Float>(value: F, fwhm: F) -> F {
    -value - fwhm + F::one()
}

fn four<F: Float>() -> F {
    let two = F::one() + F::one();

    two + two
}

fn ordered<F: Float>(a: F, b: F) -> (F, F) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_logistic() {
    assert_eq!(logistic(0., 0., 0., 1., 1.), 0.5);
    assert_eq!(logistic(10., 10., 2., 4., 3.), 3.);
    assert!(logistic(100., 0., 0., 1., 1.) > 0.999);
    assert!(logistic(-100., 0., 0., 1., 1.) < 0.001);

    let y = logistic(1.3, 0.5, 0., 1., 2.);
    assert!(close(inverse_logistic(y, 0.5, 0., 1., 2.).unwrap(), 1.3));
}

#[test]
fn test_inverse_logistic_domain() {
    assert_eq!(inverse_logistic(0., 5., 0., 1., 1.), Ok(0.));
    assert!(matches!(
        inverse_logistic(1., 5., 0., 1., 1.),
        Err(FuzzyError::DegenerateMembership { .. })
    ));
    assert!(inverse_logistic(1.5, 5., 0., 1., 1.).is_err());
    assert!(inverse_logistic(0.5, 5., 0., 1., f64::INFINITY).is_err());
}

#[test]
fn test_gaussian() {
    assert_eq!(gaussian(3., 0., 1., 3., 2.), 1.);
    // Half maximum at half the width from the center
    assert!(close(gaussian(4., 0., 1., 3., 2.), 0.5));
    assert!(close(gaussian(2., 0., 1., 3., 2.), 0.5));
    assert!(close(gaussian(4., 10., 20., 3., 2.), 15.));

    assert_eq!(gaussian(3., 0.25, 1., 3., 0.), 1.);
    assert_eq!(gaussian(3.1, 0.25, 1., 3., 0.), 0.25);
}

#[test]
fn test_inverse_gaussian() {
    let (lower, upper) = inverse_gaussian(0.5, 0., 1., 3., 2.).unwrap();
    assert!(close(lower, 2.));
    assert!(close(upper, 4.));

    assert_eq!(inverse_gaussian(1., 0., 1., 3., 2.), Ok((3., 3.)));
    assert_eq!(inverse_gaussian(0., 0., 1., 3., 2.), Ok((2., 4.)));
    assert_eq!(inverse_gaussian(0.3, 0., 1., 3., 0.), Ok((3., 3.)));
    assert!(inverse_gaussian(0.5, 0.6, 1., 3., 2.).is_err());
}

#[test]
fn test_reversed_gaussian() {
    // width = -value - fwhm + 1
    assert_eq!(reversed_gaussian(2., 0., 1., 5., 3.), gaussian(2., 0., 1., 5., -4.));
    assert_eq!(
        inverse_reversed_gaussian(0.5, 0., 1., 5., 3.),
        inverse_gaussian(0.5, 0., 1., 5., -2.5)
    );
}

#[test]
fn test_mean() {
    assert_eq!(mean(&[1., 2., 3., 6.]), Ok(3.));
    assert_eq!(mean(&[7.5f32]), Ok(7.5));
    assert_eq!(mean::<f64>(&[]), Err(FuzzyError::EmptyAggregation));
}
