use fuzzy_veracity::hedge::quantify;
use fuzzy_veracity::{BooleanAlgorithm, Direction, FuzzySet, FuzzyValue, Hedge, Veracity};
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = BooleanAlgorithm> {
    prop_oneof![Just(BooleanAlgorithm::Linear), Just(BooleanAlgorithm::Hyperbolic)]
}

fn hedge() -> impl Strategy<Value = Hedge> {
    prop::sample::select(Hedge::ALL.to_vec())
}

/// A linear set with a sane support.
fn linear_set() -> impl Strategy<Value = FuzzySet> {
    (-1000.0..1000.0f64, 1.0..500.0f64, any::<bool>()).prop_map(|(not_value, width, rising)| {
        let is_value = if rising { not_value + width } else { not_value - width };

        FuzzySet::builder("Set", not_value, is_value).build().unwrap()
    })
}

proptest! {
    #[test]
    fn negate_is_involutive(v in 0.0..=1.0f64, algorithm in algorithm()) {
        let x = Veracity::new(v, algorithm);

        prop_assert!((x.negate().negate().value() - v).abs() < 1e-12);
        prop_assert_eq!(!x, x.negate());
    }

    #[test]
    fn and_or_commute(a in 0.0..=1.0f64, b in 0.0..=1.0f64, algorithm in algorithm()) {
        let x = Veracity::new(a, algorithm);
        let y = Veracity::new(b, algorithm);

        prop_assert_eq!(x.and(y).unwrap(), y.and(x).unwrap());
        prop_assert_eq!(x.or(y).unwrap(), y.or(x).unwrap());
    }

    #[test]
    fn de_morgan(a in 0.0..=1.0f64, b in 0.0..=1.0f64, algorithm in algorithm()) {
        let x = Veracity::new(a, algorithm);
        let y = Veracity::new(b, algorithm);

        let nand = x.nand(y).unwrap().value();
        let nor = x.nor(y).unwrap().value();

        prop_assert!((nand - x.and(y).unwrap().negate().value()).abs() < 1e-12);
        prop_assert!((nor - x.or(y).unwrap().negate().value()).abs() < 1e-12);
    }

    #[test]
    fn and_idempotence_depends_on_algorithm(a in 0.0..=1.0f64) {
        let linear = Veracity::linear(a);
        let hyperbolic = Veracity::hyperbolic(a);

        prop_assert_eq!(linear.and(linear).unwrap(), linear);
        prop_assert_eq!(linear.or(linear).unwrap(), linear);
        prop_assert!((hyperbolic.and(hyperbolic).unwrap().value() - a * a).abs() < 1e-12);
    }

    #[test]
    fn veracities_stay_in_unit_interval(
        a in -10.0..10.0f64,
        b in -10.0..10.0f64,
        algorithm in algorithm(),
    ) {
        let x = Veracity::new(a, algorithm);
        let y = Veracity::new(b, algorithm);

        for v in [x, y, x.and(y).unwrap(), x.xor(y).unwrap(), x.implies(y).unwrap(), x.nor(y).unwrap()] {
            prop_assert!((0.0..=1.0).contains(&v.value()));
        }
    }

    #[test]
    fn hedge_inverse_undoes_forward(v in 0.01..0.99f64, hedge in hedge(), algorithm in algorithm()) {
        prop_assume!(!hedge.is_boundary());

        let forward = quantify(hedge, Some(v), algorithm, Direction::Forward);
        let back = quantify(hedge, Some(forward.value()), algorithm, Direction::Inverse);

        prop_assert!((back.value() - v).abs() < 1e-9, "{:?}: {} -> {}", hedge, v, back.value());
    }

    #[test]
    fn linear_ramp_is_monotone(set in linear_set(), t in 0.0..0.9f64, gap in 0.01..0.5f64) {
        prop_assume!(t + gap < 1.);

        let ramp = set.plateau_min() - set.min();
        let lower = set.min() + ramp * t;
        let upper = set.min() + ramp * (t + gap);

        prop_assert_eq!(set.contains(set.min(), None).unwrap().value(), 0.);
        prop_assert_eq!(set.contains(set.plateau_min(), None).unwrap().value(), 1.);
        prop_assert!(
            set.contains(lower, None).unwrap().value() < set.contains(upper, None).unwrap().value()
        );
    }

    #[test]
    fn get_values_match_membership(set in linear_set(), v in 0.0..=1.0f64) {
        for x in set.get_values(v).unwrap() {
            prop_assert!((set.membership(x) - v).abs() < 1e-9, "membership of {} is not {}", x, v);
        }
    }

    #[test]
    fn crispification_stays_in_support(
        set in linear_set(),
        hedge in hedge(),
        v in 0.0..=1.0f64,
        start in -5000.0..5000.0f64,
    ) {
        let set = std::sync::Arc::new(set);
        let mut value = FuzzyValue::new(start, "");

        value.set(&set, hedge, Veracity::linear(v.max(0.01)));

        let crisp = value.crispify(true, None).unwrap();
        prop_assert!(crisp >= set.min() && crisp <= set.max());
    }
}
