use std::collections::HashMap;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{FuzzyError, Result};
use crate::hedge::Hedge;
use crate::ops::{BooleanAlgorithm, CrispAlgorithm};
use crate::set::{FuzzySet, SetBuilder};
use crate::shape::Shape;
use crate::value::FuzzyValue;
use crate::veracity::Veracity;

new_key_type! {
    /// A set key
    pub struct SetKey;
}

/// Creates sets, values and veracities sharing one configuration, and keeps
/// every set it created.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    sets: SlotMap<SetKey, Arc<FuzzySet>>,
    names: HashMap<String, SetKey>,
}

impl Engine {
    pub fn new(algorithm: BooleanAlgorithm, crisp_algorithm: CrispAlgorithm) -> Self {
        Self {
            config: EngineConfig {
                algorithm,
                crisp_algorithm,
                report: false,
            },
            ..Self::default()
        }
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn algorithm(&self) -> BooleanAlgorithm {
        self.config.algorithm
    }

    pub fn crisp_algorithm(&self) -> CrispAlgorithm {
        self.config.crisp_algorithm
    }

    /// Starts a set bound to this engine's boolean algorithm. It is registered
    /// once built.
    pub fn new_set(&mut self, name: impl Into<String>, not_value: f64, is_value: f64) -> NewSet<'_> {
        let builder = SetBuilder::new(name, not_value, is_value).algorithm(self.config.algorithm);

        NewSet { engine: self, builder }
    }

    /// Registers a set built elsewhere. Names are unique within an engine, and
    /// the set must use the engine's boolean algorithm.
    pub fn add_set(&mut self, set: FuzzySet) -> Result<SetKey> {
        if set.algorithm() != self.config.algorithm {
            return Err(FuzzyError::AlgorithmMismatch {
                left: self.config.algorithm,
                right: set.algorithm(),
            });
        }

        self.register(set).map(|(key, _)| key)
    }

    pub fn set(&self, key: SetKey) -> Option<&Arc<FuzzySet>> {
        self.sets.get(key)
    }

    pub fn set_key(&self, name: &str) -> Option<SetKey> {
        self.names.get(name).copied()
    }

    pub fn find_set(&self, name: &str) -> Option<&Arc<FuzzySet>> {
        self.set_key(name).and_then(|key| self.set(key))
    }

    pub fn sets(&self) -> impl Iterator<Item = (SetKey, &Arc<FuzzySet>)> {
        self.sets.iter()
    }

    pub fn new_value(&self, crisp: f64, unit: impl Into<String>) -> FuzzyValue {
        let mut value = FuzzyValue::with_algorithms(
            crisp,
            unit,
            self.config.algorithm,
            self.config.crisp_algorithm,
        );

        value.set_report_enabled(self.config.report);
        value
    }

    pub fn new_veracity(&self, veracity: f64) -> Veracity {
        Veracity::new(veracity, self.config.algorithm)
    }

    /// Opens a rule on `premise`; its consequents are asserted with [`Rule::then`].
    pub fn when(&self, premise: Veracity) -> Rule {
        Rule { premise }
    }

    fn register(&mut self, set: FuzzySet) -> Result<(SetKey, Arc<FuzzySet>)> {
        if self.names.contains_key(set.name()) {
            return Err(FuzzyError::DuplicateSet {
                name: set.name().to_owned(),
            });
        }

        debug!(
            name = set.name(),
            min = set.min(),
            max = set.max(),
            plateau_min = set.plateau_min(),
            plateau_max = set.plateau_max(),
            shape_in = %set.shape_in(),
            shape_out = %set.shape_out(),
            "registered set"
        );

        let set = Arc::new(set);
        let key = self.sets.insert(Arc::clone(&set));

        self.names.insert(set.name().to_owned(), key);

        Ok((key, set))
    }
}

/// A set being configured through [`Engine::new_set`].
pub struct NewSet<'e> {
    engine: &'e mut Engine,
    builder: SetBuilder,
}

impl NewSet<'_> {
    pub fn shape(mut self, shape: Shape) -> Self {
        self.builder = self.builder.shape(shape);
        self
    }

    pub fn shape_in(mut self, shape: Shape) -> Self {
        self.builder = self.builder.shape_in(shape);
        self
    }

    pub fn shape_out(mut self, shape: Shape) -> Self {
        self.builder = self.builder.shape_out(shape);
        self
    }

    pub fn plateau_min(mut self, plateau_min: f64) -> Self {
        self.builder = self.builder.plateau_min(plateau_min);
        self
    }

    pub fn plateau_max(mut self, plateau_max: f64) -> Self {
        self.builder = self.builder.plateau_max(plateau_max);
        self
    }

    pub fn plateau(mut self, plateau_min: f64, plateau_max: f64) -> Self {
        self.builder = self.builder.plateau(plateau_min, plateau_max);
        self
    }

    pub fn build(self) -> Result<Arc<FuzzySet>> {
        let set = self.builder.build()?;

        self.engine.register(set).map(|(_, set)| set)
    }
}

/// A premise and the consequents asserted from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    premise: Veracity,
}

impl Rule {
    pub fn premise(&self) -> Veracity {
        self.premise
    }

    /// Asserts that `value` is (hedge) in `set` as much as the premise is true.
    pub fn then(
        &self,
        value: &mut FuzzyValue,
        set: &Arc<FuzzySet>,
        hedge: impl Into<Option<Hedge>>,
    ) -> &Self {
        value.set(set, hedge, self.premise);
        self
    }
}

#[test]
fn test_new_set() {
    let mut engine = Engine::new(BooleanAlgorithm::Hyperbolic, CrispAlgorithm::Centroid);
    let hot = engine
        .new_set("Hot", 23., 35.)
        .shape_in(Shape::Gaussian)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();

    assert_eq!((hot.min(), hot.max()), (23., 47.));
    assert_eq!(hot.algorithm(), BooleanAlgorithm::Hyperbolic);
    assert_eq!(hot.contains(35., None).unwrap(), Veracity::hyperbolic(1.));

    let mild = engine.new_set("Mild", 10., 20.).plateau(18., 22.).build().unwrap();
    assert_eq!((mild.plateau_min(), mild.plateau_max()), (18., 22.));
    assert_eq!(mild.contains(21., None).unwrap().value(), 1.);
}

#[test]
fn test_add_set_checks_algorithm() {
    let mut engine = Engine::new(BooleanAlgorithm::Hyperbolic, CrispAlgorithm::Centroid);
    let warm = engine.new_set("Warm", 15., 20.).build().unwrap();

    assert_eq!(
        engine.add_set(FuzzySet::builder("Cold", 17., 0.).build().unwrap()),
        Err(FuzzyError::AlgorithmMismatch {
            left: BooleanAlgorithm::Hyperbolic,
            right: BooleanAlgorithm::Linear,
        })
    );
    assert_eq!(engine.find_set("Cold"), None);

    let cold = FuzzySet::builder("Cold", 17., 0.)
        .algorithm(BooleanAlgorithm::Hyperbolic)
        .build()
        .unwrap();
    let key = engine.add_set(cold).unwrap();
    let cold = engine.set(key).unwrap();

    let temperature = engine.new_value(16., "°C");
    let both = temperature
        .is(&warm, None)
        .unwrap()
        .and(temperature.is(cold, None).unwrap())
        .unwrap();
    assert_eq!(both.algorithm(), BooleanAlgorithm::Hyperbolic);
}

#[test]
fn test_set_registry() {
    let mut engine = Engine::default();
    let warm = engine.new_set("Warm", 15., 20.).build().unwrap();
    let cold = FuzzySet::builder("Cold", 17., 0.).build().unwrap();
    let cold_key = engine.add_set(cold).unwrap();

    assert_eq!(engine.sets().count(), 2);
    assert_eq!(engine.find_set("Warm"), Some(&warm));
    assert_eq!(engine.set_key("Cold"), Some(cold_key));
    assert_eq!(engine.set(cold_key).map(|set| set.name()), Some("Cold"));
    assert_eq!(engine.find_set("Hot"), None);

    let err = engine.new_set("Warm", 0., 5.).plateau_max(8.).build();
    assert_eq!(err, Err(FuzzyError::DuplicateSet { name: "Warm".to_owned() }));
    assert_eq!(engine.sets().count(), 2);
}

#[test]
fn test_with_config() {
    let config = EngineConfig {
        algorithm: BooleanAlgorithm::Hyperbolic,
        crisp_algorithm: CrispAlgorithm::Mean,
        report: true,
    };
    let engine = Engine::with_config(config).unwrap();
    let value = engine.new_value(3., "kg");

    assert_eq!(engine.config(), &config);
    assert_eq!(value.algorithm(), BooleanAlgorithm::Hyperbolic);
    assert_eq!(value.crisp_algorithm(), CrispAlgorithm::Mean);
    assert!(value.report_enabled());
    assert_eq!(value.unit(), "kg");
    assert_eq!(engine.new_veracity(1.4), Veracity::hyperbolic(1.));

    let config = EngineConfig {
        crisp_algorithm: CrispAlgorithm::Random,
        ..EngineConfig::default()
    };
    assert!(Engine::with_config(config).is_err());
}

#[test]
fn test_rules() {
    let mut engine = Engine::default();
    let warm = engine.new_set("Warm", 15., 20.).build().unwrap();
    let heat = engine
        .new_set("Heat", 0., 100.)
        .shape_out(Shape::Constant)
        .build()
        .unwrap();
    let temperature = engine.new_value(17.5, "°C");
    let mut power = engine.new_value(0., "%");
    let mut fan = engine.new_value(0., "%");

    let rule = engine.when(temperature.is_not(&warm, None).unwrap());
    rule.then(&mut power, &heat, None).then(&mut fan, &heat, Hedge::Plus);

    assert_eq!(rule.premise(), Veracity::linear(0.5));
    assert_eq!(power.assertions()[0].consequents()[0].veracity, rule.premise());
    assert_eq!(fan.assertions()[0].consequents()[0].hedge, Hedge::Plus);
    assert_eq!(power.crispify(true, None), Ok(50.));
}
