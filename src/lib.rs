//! Fuzzy sets, hedged veracities and rule based crispification.
//!
//! An [`Engine`] creates [`FuzzySet`]s, [`FuzzyValue`]s and [`Veracity`]s
//! sharing one [`BooleanAlgorithm`] and one [`CrispAlgorithm`]. Rules test
//! values against sets, assert other values into sets, and the asserted
//! values are finally crispified back to plain numbers.
//!
//! ```
//! use fuzzy_veracity::{Engine, FuzzyError, Shape};
//!
//! # fn main() -> Result<(), FuzzyError> {
//! let mut engine = Engine::default();
//! let warm = engine.new_set("Warm", 15., 20.).build()?;
//! let heat = engine.new_set("Heat", 0., 100.).shape_out(Shape::Constant).build()?;
//!
//! let temperature = engine.new_value(17.5, "°C");
//! let mut power = engine.new_value(0., "%");
//!
//! engine
//!     .when(temperature.is_not(&warm, None)?)
//!     .then(&mut power, &heat, None);
//!
//! assert_eq!(power.crispify(true, None)?, 50.);
//! assert_eq!(temperature.describe(None, Some(&warm))?, "17.5°C is Moderately Warm");
//! # Ok(())
//! # }
//! ```

mod linspace;
mod math;

pub mod config;
pub mod engine;
pub mod error;
pub mod hedge;
pub mod ops;
pub mod set;
pub mod shape;
pub mod value;
pub mod veracity;

pub use config::EngineConfig;
pub use engine::{Engine, NewSet, Rule, SetKey};
pub use error::{FuzzyError, Result};
pub use hedge::{Direction, Hedge};
pub use ops::{BooleanAlgorithm, CrispAlgorithm, Operator};
pub use set::{FuzzySet, Operand, SetBuilder};
pub use shape::Shape;
pub use value::{Assertion, Consequent, FuzzyValue, ReportEntry};
pub use veracity::Veracity;

#[test]
fn test_hvac() {
    let mut engine = Engine::with_config(EngineConfig {
        algorithm: BooleanAlgorithm::Hyperbolic,
        report: true,
        ..EngineConfig::default()
    })
    .unwrap();

    // Humidity, in %
    let wet = engine
        .new_set("Wet", 60., 100.)
        .shape_in(Shape::Gaussian)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();
    let comfortable = engine
        .new_set("Comfortable", 40., 55.)
        .shape(Shape::Sigmoid)
        .build()
        .unwrap();
    let dry = engine
        .new_set("Dry", 50., 0.)
        .shape_in(Shape::Constant)
        .shape_out(Shape::Gaussian)
        .build()
        .unwrap();

    // Temperature, in °C
    let hot = engine
        .new_set("Hot", 21., 35.)
        .shape_in(Shape::Gaussian)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();
    let warm = engine
        .new_set("Comfortably warm", 17., 20.)
        .shape(Shape::Gaussian)
        .build()
        .unwrap();
    let cold = engine
        .new_set("Cold", 17., 10.)
        .shape_in(Shape::Constant)
        .shape_out(Shape::Gaussian)
        .build()
        .unwrap();

    // A positive power heats the room, a negative one cools it
    let heat = engine
        .new_set("Heat", 0., 100.)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();
    let refresh = engine
        .new_set("Refresh", 0., -100.)
        .shape_in(Shape::Constant)
        .shape_out(Shape::Linear)
        .build()
        .unwrap();

    let temperature = engine.new_value(22., "°C");
    let humidity = engine.new_value(10., "%");
    let mut power = engine.new_value(0., "%");

    let is_hot = temperature.is(&hot, None).unwrap();
    let is_cold = temperature.is(&cold, None).unwrap();
    let is_wet = humidity.is(&wet, None).unwrap();
    let is_dry = humidity.is(&dry, None).unwrap();

    engine.when(is_hot).then(&mut power, &refresh, None);
    engine.when(is_cold).then(&mut power, &heat, None);
    engine
        .when(is_hot.and(is_wet).unwrap())
        .then(&mut power, &refresh, Hedge::More);
    engine
        .when(is_cold.and(is_wet).unwrap())
        .then(&mut power, &heat, Hedge::More);

    let not_extremely_cold = temperature.is_not(&cold, Hedge::DoublePlus).unwrap();
    engine
        .when(is_cold.and(not_extremely_cold).unwrap().and(is_dry).unwrap())
        .then(&mut power, &heat, Hedge::Less);

    let not_extremely_hot = temperature.is_not(&hot, Hedge::DoublePlus).unwrap();
    engine
        .when(is_hot.and(not_extremely_hot).unwrap().and(is_dry).unwrap())
        .then(&mut power, &refresh, Hedge::Less);

    let very_warm = temperature.is(&warm, Hedge::Plus).unwrap();
    engine
        .when(very_warm.or(is_cold).unwrap().and(is_wet).unwrap())
        .then(&mut power, &heat, Hedge::Minus);

    engine
        .when(temperature.is(&warm, None).unwrap())
        .then(&mut power, &refresh, Hedge::IsNot)
        .then(&mut power, &heat, Hedge::IsNot);

    assert_eq!(power.assertions().len(), 2);
    assert_eq!(power.rule_count(), 9);

    assert_eq!(
        temperature.describe(None, Some(&hot)),
        Ok("22°C is Slightly Hot".to_owned())
    );
    assert_eq!(
        temperature.describe(None, Some(&cold)),
        Ok("22°C is Not Cold".to_owned())
    );
    assert_eq!(
        temperature.describe(None, Some(&warm)),
        Ok("22°C is Somewhat Comfortably warm".to_owned())
    );
    assert_eq!(humidity.describe(None, Some(&wet)), Ok("10% is Not Wet".to_owned()));
    assert_eq!(humidity.quantify(&comfortable), Ok(Hedge::IsNot));

    // Slightly hot and rather dry, so the room is cooled a little
    let mean = power.crispify(false, Some(CrispAlgorithm::Mean)).unwrap();
    let crisp = power.crispify(true, None).unwrap();

    assert!(crisp < 0. && crisp > -10., "{crisp}");
    assert!(mean < 0. && mean > -10., "{mean}");
    assert!(power.assertions().is_empty());
    assert_eq!(power.stored_value(), crisp);

    let report = power.report();
    let rules: Vec<usize> = report.iter().map(|entry| entry.rule).collect();

    assert_eq!(rules, (1..=9).collect::<Vec<_>>());
    assert_eq!(report[0].set, "Refresh");
    assert_eq!(report[1].set, "Heat");
    assert_eq!(report[1].weight, 0.);
    assert_eq!(report[8].hedge, Hedge::IsNot);
    assert_eq!(report[8].candidates, vec![0.]);
}
