use std::fmt;
use std::str::FromStr;

use fixed_map::Key;
use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::math::mean;

/// Method used to combine veracities.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanAlgorithm {
    /// Zadeh's min/max logic
    #[default]
    Linear,
    /// Hyperbolic paraboloid (product) logic, a bit heavier but often more intuitive
    Hyperbolic,
}

impl fmt::Display for BooleanAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("LINEAR"),
            Self::Hyperbolic => f.write_str("HYPERBOLIC"),
        }
    }
}

impl FromStr for BooleanAlgorithm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "LINEAR" => Ok(Self::Linear),
            "HYPERBOLIC" => Ok(Self::Hyperbolic),
            _ => Err(FuzzyError::UnknownAlgorithm { name: s.to_owned() }),
        }
    }
}

/// Binary connectives between two veracities.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    And,
    Or,
    /// `x != y`
    Xor,
    /// `x == y`
    Nxr,
    /// `!x or y`
    Implies,
    /// `x and !y`
    DoesNotImply,
    /// `!(x and y)`
    Nand,
    /// `!(x or y)`
    Nor,
}

impl Operator {
    pub fn call<F: Float>(self, algorithm: BooleanAlgorithm, x: F, y: F) -> F {
        let one = F::one();
        let two = one + one;

        match algorithm {
            BooleanAlgorithm::Linear => match self {
                Self::And => F::min(x, y),
                Self::Or => F::max(x, y),
                Self::Xor => x + y - two * F::min(x, y),
                Self::Nxr => one - x - y + two * F::min(x, y),
                Self::Implies => one - F::min(x, one - y),
                Self::DoesNotImply => F::min(x, one - y),
                Self::Nand => one - F::min(x, y),
                Self::Nor => one - F::max(x, y),
            },
            BooleanAlgorithm::Hyperbolic => match self {
                Self::And => x * y,
                Self::Or => x + y - x * y,
                Self::Xor => x + y - two * x * y,
                Self::Nxr => one - x - y + two * x * y,
                Self::Implies => one - x + x * y,
                Self::DoesNotImply => x * (one - y),
                Self::Nand => one - x * y,
                Self::Nor => one - x - y + x * y,
            },
        }
    }
}

/// Method for reducing the assertions made on a value to a single crisp number.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Key, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrispAlgorithm {
    /// Veracity weighted mean of the mean candidate of every rule
    #[default]
    Centroid,
    /// Veracity weighted mean of the lowest candidate of every rule
    CentroidLower,
    /// Veracity weighted mean of the highest candidate of every rule
    CentroidHigher,
    /// Not implemented
    Random,
    /// Not implemented
    RandomTrue,
    /// Not implemented
    RandomCentroid,
    /// Unweighted mean of the mean candidate of every rule
    Mean,
    /// Unweighted mean of the highest candidate of every rule
    MeanHigher,
    /// Unweighted mean of the lowest candidate of every rule
    MeanLower,
}

impl CrispAlgorithm {
    pub fn is_implemented(self) -> bool {
        !matches!(self, Self::Random | Self::RandomTrue | Self::RandomCentroid)
    }

    pub fn ensure_implemented(self) -> Result<()> {
        if self.is_implemented() {
            Ok(())
        } else {
            Err(FuzzyError::UnimplementedCrispAlgorithm { algorithm: self })
        }
    }

    /// Picks the value standing for one rule among its candidates.
    pub fn representative(self, candidates: &[f64]) -> Result<f64> {
        match self {
            Self::Centroid | Self::Mean => mean(candidates),
            Self::CentroidLower | Self::MeanLower => candidates
                .iter()
                .copied()
                .reduce(f64::min)
                .ok_or(FuzzyError::EmptyAggregation),
            Self::CentroidHigher | Self::MeanHigher => candidates
                .iter()
                .copied()
                .reduce(f64::max)
                .ok_or(FuzzyError::EmptyAggregation),
            Self::Random | Self::RandomTrue | Self::RandomCentroid => {
                Err(FuzzyError::UnimplementedCrispAlgorithm { algorithm: self })
            },
        }
    }

    /// Weight of one rule's representative in the final combination.
    pub fn weight(self, veracity: f64) -> Result<f64> {
        match self {
            Self::Centroid | Self::CentroidLower | Self::CentroidHigher => Ok(veracity),
            Self::Mean | Self::MeanLower | Self::MeanHigher => Ok(1.),
            Self::Random | Self::RandomTrue | Self::RandomCentroid => {
                Err(FuzzyError::UnimplementedCrispAlgorithm { algorithm: self })
            },
        }
    }
}

impl fmt::Display for CrispAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Centroid => "CENTROID",
            Self::CentroidLower => "CENTROID_LOWER",
            Self::CentroidHigher => "CENTROID_HIGHER",
            Self::Random => "RANDOM",
            Self::RandomTrue => "RANDOM_TRUE",
            Self::RandomCentroid => "RANDOM_CENTROID",
            Self::Mean => "MEAN",
            Self::MeanHigher => "MEAN_HIGHER",
            Self::MeanLower => "MEAN_LOWER",
        };

        f.write_str(name)
    }
}

impl FromStr for CrispAlgorithm {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "CENTROID" => Ok(Self::Centroid),
            "CENTROID_LOWER" => Ok(Self::CentroidLower),
            "CENTROID_HIGHER" => Ok(Self::CentroidHigher),
            "RANDOM" => Ok(Self::Random),
            "RANDOM_TRUE" => Ok(Self::RandomTrue),
            "RANDOM_CENTROID" => Ok(Self::RandomCentroid),
            "MEAN" => Ok(Self::Mean),
            "MEAN_HIGHER" => Ok(Self::MeanHigher),
            "MEAN_LOWER" => Ok(Self::MeanLower),
            _ => Err(FuzzyError::UnknownAlgorithm { name: s.to_owned() }),
        }
    }
}

pub(crate) fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

#[test]
fn test_linear_operators() {
    let algo = BooleanAlgorithm::Linear;

    assert_eq!(Operator::And.call(algo, 0.25, 0.75), 0.25);
    assert_eq!(Operator::Or.call(algo, 0.25, 0.75), 0.75);
    assert_eq!(Operator::Xor.call(algo, 0.25, 0.75), 0.5);
    assert_eq!(Operator::Nxr.call(algo, 0.25, 0.75), 0.5);
    assert_eq!(Operator::Implies.call(algo, 0.25, 0.75), 0.75);
    assert_eq!(Operator::DoesNotImply.call(algo, 0.25, 0.75), 0.25);
    assert_eq!(Operator::Nand.call(algo, 0.25, 0.75), 0.75);
    assert_eq!(Operator::Nor.call(algo, 0.25, 0.75), 0.25);
}

#[test]
fn test_hyperbolic_operators() {
    let algo = BooleanAlgorithm::Hyperbolic;

    assert_eq!(Operator::And.call(algo, 0.5, 0.5), 0.25);
    assert_eq!(Operator::Or.call(algo, 0.5, 0.5), 0.75);
    assert_eq!(Operator::Xor.call(algo, 0.5, 0.5), 0.5);
    assert_eq!(Operator::Nxr.call(algo, 0.5, 0.5), 0.5);
    assert_eq!(Operator::Implies.call(algo, 0.5, 0.5), 0.75);
    assert_eq!(Operator::DoesNotImply.call(algo, 0.5, 0.5), 0.25);
    assert_eq!(Operator::Nand.call(algo, 0.5, 0.5), 0.75);
    assert_eq!(Operator::Nor.call(algo, 0.5, 0.5), 0.25);
    assert_eq!(Operator::And.call(algo, 1., 0.), 0.);
    assert_eq!(Operator::Or.call(algo, 1., 0.), 1.);
}

#[test]
fn test_crisp_reduction() {
    let candidates = [15., 20., 22.];

    assert_eq!(CrispAlgorithm::Centroid.representative(&candidates), Ok(19.));
    assert_eq!(CrispAlgorithm::MeanLower.representative(&candidates), Ok(15.));
    assert_eq!(CrispAlgorithm::CentroidHigher.representative(&candidates), Ok(22.));
    assert_eq!(
        CrispAlgorithm::CentroidLower.representative(&[]),
        Err(FuzzyError::EmptyAggregation)
    );

    assert_eq!(CrispAlgorithm::CentroidLower.weight(0.3), Ok(0.3));
    assert_eq!(CrispAlgorithm::MeanHigher.weight(0.3), Ok(1.));
    assert_eq!(
        CrispAlgorithm::RandomTrue.weight(0.3),
        Err(FuzzyError::UnimplementedCrispAlgorithm {
            algorithm: CrispAlgorithm::RandomTrue
        })
    );
    assert!(CrispAlgorithm::RandomCentroid.representative(&candidates).is_err());
}

#[test]
fn test_algorithm_names() {
    assert_eq!("hyperbolic".parse::<BooleanAlgorithm>(), Ok(BooleanAlgorithm::Hyperbolic));
    assert_eq!("centroid-lower".parse::<CrispAlgorithm>(), Ok(CrispAlgorithm::CentroidLower));
    assert_eq!(CrispAlgorithm::MeanHigher.to_string(), "MEAN_HIGHER");
    assert!(matches!(
        "fastest".parse::<CrispAlgorithm>(),
        Err(FuzzyError::UnknownAlgorithm { .. })
    ));
}
