use std::fmt;
use std::str::FromStr;

use crate::error::{FuzzyError, Result};
use crate::ops::{normalize, BooleanAlgorithm};
use crate::veracity::Veracity;

/// Linguistic modifiers ("very", "slightly"...) rescaling a veracity.
///
/// The exponent hedges raise a veracity to a power. The boundary hedges
/// (`IsNot`, `Less`, `Is`, `More`) pin it to zero or one and are meant for
/// asserting values rather than testing them.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Hedge {
    IsNot,
    Less,
    /// "Slightly"
    DoubleMinus,
    /// "Somewhat"
    Minus,
    /// "Moderately"
    Average,
    /// No modifier at all
    #[default]
    Plain,
    /// "Very"
    Plus,
    /// "Extremely"
    DoublePlus,
    /// "Completely"
    Is,
    More,
}

/// Which way a hedge is applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Membership test: `v^p`
    Forward,
    /// Back from a hedged veracity to the raw membership: `v^(1/p)`
    Inverse,
}

impl Hedge {
    /// Every hedge, in the order nearest-hedge searches visit them.
    pub const ALL: [Hedge; 10] = [
        Hedge::IsNot,
        Hedge::Less,
        Hedge::DoubleMinus,
        Hedge::Minus,
        Hedge::Average,
        Hedge::Plain,
        Hedge::Plus,
        Hedge::DoublePlus,
        Hedge::Is,
        Hedge::More,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::IsNot => "Not",
            Self::Less => "Less",
            Self::DoubleMinus => "Slightly",
            Self::Minus => "Somewhat",
            Self::Average => "Moderately",
            Self::Plain => "",
            Self::Plus => "Very",
            Self::DoublePlus => "Extremely",
            Self::Is => "Completely",
            Self::More => "More",
        }
    }

    /// The power applied by forward scaling, `None` for the boundary hedges.
    pub fn exponent(self) -> Option<f64> {
        match self {
            Self::DoubleMinus => Some(3.),
            Self::Minus => Some(2.),
            Self::Average | Self::Plain => Some(1.),
            Self::Plus => Some(0.5),
            Self::DoublePlus => Some(1. / 3.),
            Self::IsNot | Self::Less | Self::Is | Self::More => None,
        }
    }

    pub fn is_boundary(self) -> bool {
        self.exponent().is_none()
    }

    /// Canonical veracity of the hedge when no veracity is given.
    pub fn default_veracity(self) -> f64 {
        match self {
            Self::IsNot | Self::Less => 0.,
            Self::Is | Self::More => 1.,
            hedge => 0.5f64.powf(hedge.exponent().unwrap_or(1.)),
        }
    }

    pub fn scale(self, veracity: f64, direction: Direction) -> f64 {
        match (self.exponent(), direction) {
            (None, _) => self.default_veracity(),
            (Some(p), Direction::Forward) => veracity.powf(p),
            (Some(p), Direction::Inverse) => veracity.powf(1. / p),
        }
    }
}

/// Applies `hedge` to `veracity`, or returns the hedge's canonical veracity
/// when there is none.
pub fn quantify(
    hedge: Hedge,
    veracity: Option<f64>,
    algorithm: BooleanAlgorithm,
    direction: Direction,
) -> Veracity {
    let value = match veracity {
        Some(v) => hedge.scale(v, direction),
        None => hedge.default_veracity(),
    };

    Veracity::new(value, algorithm)
}

impl fmt::Display for Hedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Hedge {
    type Err = FuzzyError;

    /// Accepts labels ("Very") and constant names ("DOUBLE_PLUS"), ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let hedge = match normalize(s).as_str() {
            "NOT" | "IS_NOT" => Self::IsNot,
            "LESS" => Self::Less,
            "SLIGHTLY" | "DOUBLE_MINUS" => Self::DoubleMinus,
            "SOMEWHAT" | "MINUS" => Self::Minus,
            "MODERATELY" | "AVERAGE" => Self::Average,
            "" | "NONE" => Self::Plain,
            "VERY" | "PLUS" => Self::Plus,
            "EXTREMELY" | "DOUBLE_PLUS" => Self::DoublePlus,
            "COMPLETELY" | "IS" => Self::Is,
            "MORE" => Self::More,
            _ => return Err(FuzzyError::UnknownQuantifier { name: s.to_owned() }),
        };

        Ok(hedge)
    }
}

#[test]
fn test_default_veracities() {
    let defaults: Vec<f64> = Hedge::ALL.iter().map(|h| h.default_veracity()).collect();

    assert_eq!(defaults[0..6], [0., 0., 0.125, 0.25, 0.5, 0.5]);
    assert!((defaults[6] - 0.7071).abs() < 1e-4);
    assert!((defaults[7] - 0.7937).abs() < 1e-4);
    assert_eq!(defaults[8..], [1., 1.]);
}

#[test]
fn test_scaling() {
    assert_eq!(Hedge::Minus.scale(0.5, Direction::Forward), 0.25);
    assert_eq!(Hedge::Minus.scale(0.25, Direction::Inverse), 0.5);
    assert_eq!(Hedge::Plus.scale(0.25, Direction::Forward), 0.5);
    assert_eq!(Hedge::Average.scale(0.3, Direction::Inverse), 0.3);
    assert_eq!(Hedge::Plain.scale(0.3, Direction::Forward), 0.3);

    assert_eq!(Hedge::IsNot.scale(0.3, Direction::Forward), 0.);
    assert_eq!(Hedge::Less.scale(0.3, Direction::Inverse), 0.);
    assert_eq!(Hedge::Is.scale(0.3, Direction::Forward), 1.);
    assert_eq!(Hedge::More.scale(0.3, Direction::Inverse), 1.);
}

#[test]
fn test_quantify() {
    let v = quantify(Hedge::DoubleMinus, None, BooleanAlgorithm::Hyperbolic, Direction::Forward);
    assert_eq!(v, Veracity::hyperbolic(0.125));

    let v = quantify(Hedge::DoubleMinus, Some(0.5), BooleanAlgorithm::Linear, Direction::Forward);
    assert_eq!(v.value(), 0.125);
    assert_eq!(v.algorithm(), BooleanAlgorithm::Linear);
}

#[test]
fn test_parse() {
    assert_eq!("very".parse::<Hedge>(), Ok(Hedge::Plus));
    assert_eq!("Extremely".parse::<Hedge>(), Ok(Hedge::DoublePlus));
    assert_eq!("double_minus".parse::<Hedge>(), Ok(Hedge::DoubleMinus));
    assert_eq!("not".parse::<Hedge>(), Ok(Hedge::IsNot));
    assert_eq!("".parse::<Hedge>(), Ok(Hedge::Plain));
    assert_eq!(
        "hot".parse::<Hedge>(),
        Err(FuzzyError::UnknownQuantifier { name: "hot".to_owned() })
    );

    for hedge in Hedge::ALL {
        assert_eq!(hedge.label().parse::<Hedge>().map(Hedge::label), Ok(hedge.label()));
    }
}
