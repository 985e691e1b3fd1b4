use std::sync::Arc;

use fuzzy_veracity::{
    BooleanAlgorithm, CrispAlgorithm, Engine, EngineConfig, FuzzyError, FuzzySet, FuzzyValue,
    Hedge, Shape, Veracity,
};

fn warm() -> Arc<FuzzySet> {
    Arc::new(FuzzySet::builder("Warm", 15., 20.).build().unwrap())
}

#[test]
fn warm_set_is_reflected_around_its_best_value() {
    let warm = warm();

    assert_eq!((warm.min(), warm.max()), (15., 25.));
    assert_eq!((warm.plateau_min(), warm.plateau_max()), (20., 20.));
    assert_eq!(warm.contains(20., None).unwrap().value(), 1.);
    assert_eq!(warm.contains(15., None).unwrap().value(), 0.);
    assert_eq!(warm.contains(17.5, None).unwrap().value(), 0.5);
}

#[test]
fn asserted_value_moves_into_the_set() {
    let warm = warm();
    let mut temperature = FuzzyValue::new(18., "°C");

    temperature.set(&warm, None, Veracity::linear(1.));

    let crisp = temperature.crispify(true, Some(CrispAlgorithm::Centroid)).unwrap();
    assert!((15.0..=25.0).contains(&crisp));
    assert_ne!(crisp, 18.);
}

#[test]
fn assertions_on_one_set_merge() {
    let warm = warm();
    let mut temperature = FuzzyValue::new(18., "°C");

    temperature.set(&warm, None, None);
    temperature.set(&warm, Hedge::Plus, Veracity::linear(0.3));

    assert_eq!(temperature.assertions().len(), 1);
    assert_eq!(temperature.assertions()[0].consequents().len(), 2);
}

#[test]
fn crispify_without_assertions_is_a_no_op() {
    let mut temperature = FuzzyValue::new(18., "°C");

    assert_eq!(temperature.crispify(true, None), Ok(18.));
    assert_eq!(temperature.stored_value(), 18.);
    assert!(temperature.assertions().is_empty());
    assert!(temperature.report().is_empty());
}

#[test]
fn hedges_rescale_membership() {
    let warm = warm();
    let temperature = FuzzyValue::new(17.5, "°C");
    let is = |hedge| temperature.is(&warm, hedge).unwrap().value();

    assert_eq!(is(Hedge::IsNot), 0.);
    assert_eq!(is(Hedge::DoubleMinus), 0.125);
    assert_eq!(is(Hedge::Minus), 0.25);
    assert_eq!(is(Hedge::Average), 0.5);
    assert_eq!(is(Hedge::Plain), 0.5);
    assert!((is(Hedge::Plus) - 0.5f64.sqrt()).abs() < 1e-12);
    assert!((is(Hedge::DoublePlus) - 0.5f64.cbrt()).abs() < 1e-12);
    assert_eq!(is(Hedge::Is), 1.);
}

#[test]
fn redness_of_a_color() {
    let mut engine = Engine::new(BooleanAlgorithm::Hyperbolic, CrispAlgorithm::Centroid);
    let intense = engine.new_set("Intense", 0., 255.).build().unwrap();

    let red = engine.new_value(128., "");
    let green = engine.new_value(200., "");
    let blue = engine.new_value(10., "");
    let mut redness = engine.new_value(0., "");

    let premise = red
        .is(&intense, None)
        .unwrap()
        .and(green.is(&intense, None).unwrap().nor(blue.is(&intense, None).unwrap()).unwrap())
        .unwrap();

    assert!(premise.value() > 0. && premise.value() < 0.2);

    engine.when(premise).then(&mut redness, &intense, None);

    // Both ramps are linear, so the two candidates balance around the plateau
    let crisp = redness.crispify(false, None).unwrap();
    assert!((crisp - 255.).abs() < 1e-9);
    assert_eq!(redness.quantify(&intense), Ok(Hedge::Is));
}

#[test]
fn engine_from_toml() {
    let config = EngineConfig::from_toml(
        r#"
        algorithm = "HYPERBOLIC"
        crisp_algorithm = "MEAN"
        report = true
        "#,
    )
    .unwrap();
    let mut engine = Engine::with_config(config).unwrap();
    let warm = engine.new_set("Warm", 15., 20.).build().unwrap();
    let hot = engine.new_set("Hot", 20., 25.).build().unwrap();
    let mut temperature = engine.new_value(0., "°C");

    engine.when(engine.new_veracity(1.)).then(&mut temperature, &warm, None);
    engine.when(engine.new_veracity(0.1)).then(&mut temperature, &hot, None);

    // Unweighted: the barely true rule counts as much as the true one
    assert_eq!(temperature.crispify(true, None), Ok(22.5));
    assert_eq!(temperature.report().len(), 2);
    assert_eq!(
        temperature.report()[1].to_string(),
        "Rule #2: Set Hot ()\nGives value: 25 from these values: [ 20.5, 29.5 ]\nWith a veracity of: 1"
    );
}

#[test]
fn mixing_algorithms_is_rejected() {
    let linear = Veracity::linear(0.5);
    let hyperbolic = Veracity::hyperbolic(0.5);

    assert_eq!(
        linear.and(hyperbolic),
        Err(FuzzyError::AlgorithmMismatch {
            left: BooleanAlgorithm::Linear,
            right: BooleanAlgorithm::Hyperbolic,
        })
    );
}

#[test]
fn random_crispification_is_unimplemented() {
    let warm = warm();
    let mut temperature = FuzzyValue::new(18., "°C");

    temperature.set(&warm, None, None);

    for algorithm in [CrispAlgorithm::Random, CrispAlgorithm::RandomTrue, CrispAlgorithm::RandomCentroid] {
        assert_eq!(
            temperature.crispify(true, Some(algorithm)),
            Err(FuzzyError::UnimplementedCrispAlgorithm { algorithm })
        );
    }
    assert_eq!(temperature.assertions().len(), 1);
}

#[test]
fn shapes_and_hedges_parse_from_text() {
    assert_eq!("smooth".parse::<Shape>(), Ok(Shape::Sigmoid));
    assert_eq!("reversed bell".parse::<Shape>(), Ok(Shape::ReversedGaussian));
    assert_eq!("Somewhat".parse::<Hedge>(), Ok(Hedge::Minus));
    assert!(matches!("cubic".parse::<Shape>(), Err(FuzzyError::UnknownShape { .. })));
}
