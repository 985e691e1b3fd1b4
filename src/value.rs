use std::fmt;
use std::sync::Arc;

use fixed_map::Map;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::hedge::Hedge;
use crate::ops::{BooleanAlgorithm, CrispAlgorithm};
use crate::set::FuzzySet;
use crate::veracity::Veracity;

/// One `(hedge, veracity)` pair asserted on a set, tagged with the rule that asserted it.
#[derive(Clone, Debug, PartialEq)]
pub struct Consequent {
    pub hedge: Hedge,
    pub veracity: Veracity,
    pub rule: usize,
}

/// Everything asserted about a value for one set.
#[derive(Clone, Debug)]
pub struct Assertion {
    set: Arc<FuzzySet>,
    rule: usize,
    consequents: Vec<Consequent>,
}

impl Assertion {
    pub fn set(&self) -> &Arc<FuzzySet> {
        &self.set
    }

    /// Number of the rule which created this assertion.
    pub fn rule(&self) -> usize {
        self.rule
    }

    pub fn consequents(&self) -> &[Consequent] {
        &self.consequents
    }
}

/// Explanation of one rule's contribution to the latest crispification.
/// Numbers are rounded to three decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub rule: usize,
    pub set: String,
    pub hedge: Hedge,
    pub value: f64,
    pub candidates: Vec<f64>,
    pub weight: f64,
}

impl ReportEntry {
    pub fn lines(&self) -> [String; 3] {
        let candidates = self
            .candidates
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        [
            format!("Rule #{}: Set {} ({})", self.rule, self.set, self.hedge),
            format!("Gives value: {} from these values: [ {} ]", self.value, candidates),
            format!("With a veracity of: {}", self.weight),
        ]
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// A crisp number which rules can push into fuzzy sets.
///
/// Membership is tested with [`FuzzyValue::is`] and [`FuzzyValue::is_not`].
/// [`FuzzyValue::set`] records an assertion, and [`FuzzyValue::crispify`]
/// reduces every assertion back to a single number.
#[derive(Clone, Debug)]
pub struct FuzzyValue {
    value: f64,
    unit: String,
    algorithm: BooleanAlgorithm,
    crisp_algorithm: CrispAlgorithm,
    assertions: Vec<Assertion>,
    rules: usize,
    report_enabled: bool,
    report: Vec<ReportEntry>,
    // Only holds results computed from the current assertions
    cache: Map<CrispAlgorithm, f64>,
}

impl FuzzyValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self::with_algorithms(value, unit, BooleanAlgorithm::default(), CrispAlgorithm::default())
    }

    pub fn with_algorithms(
        value: f64,
        unit: impl Into<String>,
        algorithm: BooleanAlgorithm,
        crisp_algorithm: CrispAlgorithm,
    ) -> Self {
        Self {
            value,
            unit: unit.into(),
            algorithm,
            crisp_algorithm,
            assertions: Vec::new(),
            rules: 0,
            report_enabled: false,
            report: Vec::new(),
            cache: Map::new(),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn algorithm(&self) -> BooleanAlgorithm {
        self.algorithm
    }

    pub fn crisp_algorithm(&self) -> CrispAlgorithm {
        self.crisp_algorithm
    }

    /// The crisp value as of the last clearing crispification.
    pub fn stored_value(&self) -> f64 {
        self.value
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Number of consequents asserted on this value so far.
    pub fn rule_count(&self) -> usize {
        self.rules
    }

    /// Report generation is off by default.
    pub fn set_report_enabled(&mut self, enabled: bool) {
        self.report_enabled = enabled;
    }

    pub fn report_enabled(&self) -> bool {
        self.report_enabled
    }

    /// The report of the latest crispification, ordered by rule number.
    pub fn report(&self) -> &[ReportEntry] {
        &self.report
    }

    pub fn is(&self, set: &FuzzySet, hedge: impl Into<Option<Hedge>>) -> Result<Veracity> {
        set.contains(self, hedge)
    }

    pub fn is_not(&self, set: &FuzzySet, hedge: impl Into<Option<Hedge>>) -> Result<Veracity> {
        Ok(self.is(set, hedge)?.negate())
    }

    /// Asserts that this value is (hedge) in `set`, with the given veracity
    /// (completely true by default).
    ///
    /// Assertions on sets sharing a name are merged.
    pub fn set(
        &mut self,
        set: &Arc<FuzzySet>,
        hedge: impl Into<Option<Hedge>>,
        veracity: impl Into<Option<Veracity>>,
    ) {
        self.rules += 1;
        self.cache.clear();

        let consequent = Consequent {
            hedge: hedge.into().unwrap_or_default(),
            veracity: veracity
                .into()
                .unwrap_or_else(|| Veracity::new(1., self.algorithm)),
            rule: self.rules,
        };

        match self.assertions.iter_mut().find(|a| a.set.name() == set.name()) {
            Some(assertion) => assertion.consequents.push(consequent),
            None => self.assertions.push(Assertion {
                set: Arc::clone(set),
                rule: self.rules,
                consequents: vec![consequent],
            }),
        }
    }

    /// Computes the crisp value from the assertions recorded with [`FuzzyValue::set`].
    ///
    /// With `clear`, the result becomes the stored value and the assertions
    /// are dropped. Otherwise they are kept for later calls. A value without
    /// assertions returns its stored value untouched.
    pub fn crispify(&mut self, clear: bool, algorithm: Option<CrispAlgorithm>) -> Result<f64> {
        if self.assertions.is_empty() {
            return Ok(self.value);
        }

        let algorithm = algorithm.unwrap_or(self.crisp_algorithm);

        if !clear && !self.report_enabled {
            if let Some(crisp) = self.cache.get(algorithm) {
                return Ok(*crisp);
            }
        }

        let (crisp, report) = self.evaluate(algorithm, self.report_enabled)?;

        debug!(
            %algorithm,
            assertions = self.assertions.len(),
            rules = self.rules,
            crisp,
            clear,
            "crispified value"
        );

        self.report = report;

        if clear {
            self.value = crisp;
            self.assertions.clear();
            self.cache.clear();
        } else {
            self.cache.insert(algorithm, crisp);
        }

        Ok(crisp)
    }

    /// Alias for [`FuzzyValue::crispify`]
    pub fn to_number(&mut self, clear: bool, algorithm: Option<CrispAlgorithm>) -> Result<f64> {
        self.crispify(clear, algorithm)
    }

    /// Alias for [`FuzzyValue::crispify`]
    pub fn defuzzify(&mut self, clear: bool, algorithm: Option<CrispAlgorithm>) -> Result<f64> {
        self.crispify(clear, algorithm)
    }

    /// The crisp value the current assertions lead to, without touching them.
    pub fn current(&self, algorithm: Option<CrispAlgorithm>) -> Result<f64> {
        if self.assertions.is_empty() {
            return Ok(self.value);
        }

        let algorithm = algorithm.unwrap_or(self.crisp_algorithm);

        match self.cache.get(algorithm) {
            Some(crisp) => Ok(*crisp),
            None => self.evaluate(algorithm, false).map(|(crisp, _)| crisp),
        }
    }

    /// The hedge closest to this value in `set`.
    pub fn quantify(&self, set: &FuzzySet) -> Result<Hedge> {
        set.quantify(self)
    }

    /// The current crisp value rounded to two decimals with its unit, e.g.
    /// `"21.5°C"`, optionally followed by its nearest hedge in `set`:
    /// `"21.5°C is Very Warm"`.
    pub fn describe(&self, algorithm: Option<CrispAlgorithm>, set: Option<&FuzzySet>) -> Result<String> {
        let mut description = format!("{}{}", round_to(self.current(algorithm)?, 100.), self.unit);

        if let Some(set) = set {
            description.push_str(&format!(" is {} {}", set.quantify(self)?, set.name()));
        }

        Ok(description)
    }

    fn evaluate(&self, algorithm: CrispAlgorithm, report: bool) -> Result<(f64, Vec<ReportEntry>)> {
        algorithm.ensure_implemented()?;

        let mut crisp = 0.;
        let mut sum_weights = 0.;
        let mut entries = Vec::new();

        for assertion in &self.assertions {
            let set = &assertion.set;

            for consequent in &assertion.consequents {
                let candidates = set.crispify(consequent.hedge, Some(consequent.veracity))?;
                let representative = algorithm.representative(&candidates)?;
                let weight = algorithm.weight(consequent.veracity.value())?;

                trace!(
                    rule = consequent.rule,
                    set = set.name(),
                    hedge = %consequent.hedge,
                    representative,
                    weight,
                    "rule contribution"
                );

                crisp += representative * weight;
                sum_weights += weight;

                if report {
                    entries.push(ReportEntry {
                        rule: consequent.rule,
                        set: set.name().to_owned(),
                        hedge: consequent.hedge,
                        value: round_to(representative, 1000.),
                        candidates: candidates.iter().map(|x| round_to(*x, 1000.)).collect(),
                        weight: round_to(weight, 1000.),
                    });
                }
            }
        }

        if sum_weights != 0. {
            crisp /= sum_weights;
        } else {
            warn!(%algorithm, "every rule has a zero weight, crisp value falls back to zero");
        }

        entries.sort_by_key(|entry| entry.rule);

        Ok((crisp, entries))
    }
}

/// Shows the stored value; pending assertions are not crispified.
impl fmt::Display for FuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", round_to(self.value, 100.), self.unit)
    }
}

fn round_to(x: f64, scale: f64) -> f64 {
    (x * scale).round() / scale
}

#[cfg(test)]
fn sets() -> (Arc<FuzzySet>, Arc<FuzzySet>) {
    let warm = FuzzySet::builder("Warm", 15., 20.).build().unwrap();
    let hot = FuzzySet::builder("Hot", 20., 25.).build().unwrap();

    (Arc::new(warm), Arc::new(hot))
}

#[cfg(test)]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_membership_tests() {
    let (warm, _) = sets();
    let temperature = FuzzyValue::new(17.5, "°C");

    assert_eq!(temperature.is(&warm, None).unwrap().value(), 0.5);
    assert_eq!(temperature.is_not(&warm, None).unwrap().value(), 0.5);
    assert_eq!(temperature.is(&warm, Hedge::Minus).unwrap().value(), 0.25);
    assert_eq!(temperature.is_not(&warm, Hedge::Minus).unwrap().value(), 0.75);
}

#[test]
fn test_crispify_without_assertions() {
    let mut temperature = FuzzyValue::new(18., "°C");

    assert_eq!(temperature.crispify(true, None), Ok(18.));
    assert_eq!(temperature.crispify(true, Some(CrispAlgorithm::Random)), Ok(18.));
    assert_eq!(temperature.stored_value(), 18.);
    assert_eq!(temperature.rule_count(), 0);
    assert!(temperature.assertions().is_empty());
}

#[test]
fn test_set_merges_by_name() {
    let (warm, _) = sets();
    let twin = Arc::new(FuzzySet::builder("Warm", 15., 20.).build().unwrap());
    let mut temperature = FuzzyValue::new(18., "°C");

    temperature.set(&warm, Hedge::Plain, Veracity::linear(1.));
    temperature.set(&twin, Hedge::Plus, Veracity::linear(0.4));

    assert_eq!(temperature.assertions().len(), 1);

    let assertion = &temperature.assertions()[0];
    assert!(Arc::ptr_eq(assertion.set(), &warm));
    assert_eq!(assertion.rule(), 1);
    assert_eq!(assertion.consequents().len(), 2);
    assert_eq!(assertion.consequents()[1].rule, 2);
    assert_eq!(assertion.consequents()[1].hedge, Hedge::Plus);
    assert_eq!(temperature.rule_count(), 2);
}

#[test]
fn test_crispify_clears() {
    let (warm, _) = sets();
    let mut temperature = FuzzyValue::new(18., "°C");

    temperature.set(&warm, None, None);

    let crisp = temperature.crispify(true, None).unwrap();
    assert_eq!(crisp, 20.);
    assert_eq!(temperature.stored_value(), 20.);
    assert!(temperature.assertions().is_empty());
}

#[test]
fn test_crispify_keeps_assertions() {
    let (warm, hot) = sets();
    let mut temperature = FuzzyValue::new(0., "°C");

    temperature.set(&warm, None, Veracity::linear(1.));
    assert_eq!(temperature.crispify(false, None), Ok(20.));
    assert_eq!(temperature.stored_value(), 0.);
    assert_eq!(temperature.assertions().len(), 1);

    temperature.set(&hot, None, Veracity::linear(0.5));
    let crisp = temperature.crispify(false, None).unwrap();
    assert!(close(crisp, 32.5 / 1.5));
    assert_eq!(temperature.current(None), Ok(crisp));
}

#[test]
fn test_crisp_algorithms() {
    let (warm, hot) = sets();
    let mut power = FuzzyValue::new(0., "%");

    // Warm yields [20] five times, Hot at 0.5 yields [22.5, 27.5]
    power.set(&warm, None, Veracity::linear(1.));
    power.set(&hot, None, Veracity::linear(0.5));

    let crisp = |power: &mut FuzzyValue, algorithm| power.crispify(false, Some(algorithm)).unwrap();

    assert!(close(crisp(&mut power, CrispAlgorithm::Centroid), (20. + 25. * 0.5) / 1.5));
    assert!(close(crisp(&mut power, CrispAlgorithm::CentroidLower), (20. + 22.5 * 0.5) / 1.5));
    assert!(close(crisp(&mut power, CrispAlgorithm::CentroidHigher), (20. + 27.5 * 0.5) / 1.5));
    assert!(close(crisp(&mut power, CrispAlgorithm::Mean), 22.5));
    assert!(close(crisp(&mut power, CrispAlgorithm::MeanLower), 21.25));
    assert!(close(crisp(&mut power, CrispAlgorithm::MeanHigher), 23.75));

    assert!(matches!(
        power.crispify(true, Some(CrispAlgorithm::RandomCentroid)),
        Err(crate::error::FuzzyError::UnimplementedCrispAlgorithm { .. })
    ));
    // A failed crispification leaves the assertions in place
    assert_eq!(power.assertions().len(), 2);
}

#[test]
fn test_zero_weights() {
    let (warm, _) = sets();
    let mut power = FuzzyValue::new(42., "%");

    power.set(&warm, None, Veracity::linear(0.));

    assert_eq!(power.crispify(true, None), Ok(0.));
}

#[test]
fn test_report() {
    let (warm, hot) = sets();
    let mut power = FuzzyValue::new(0., "%");

    power.set_report_enabled(true);
    power.set(&hot, Hedge::Minus, Veracity::linear(0.25));
    power.set(&warm, None, Veracity::linear(1.));
    power.set(&hot, None, Veracity::linear(1. / 3.));
    power.crispify(true, None).unwrap();

    let rules: Vec<usize> = power.report().iter().map(|entry| entry.rule).collect();
    assert_eq!(rules, vec![1, 2, 3]);

    let first = &power.report()[0];
    assert_eq!(first.set, "Hot");
    assert_eq!(first.candidates, vec![22.5, 27.5]);
    assert_eq!(first.value, 25.);
    assert_eq!(first.weight, 0.25);
    assert_eq!(power.report()[2].weight, 0.333);
    assert_eq!(
        first.lines(),
        [
            "Rule #1: Set Hot (Somewhat)".to_owned(),
            "Gives value: 25 from these values: [ 22.5, 27.5 ]".to_owned(),
            "With a veracity of: 0.25".to_owned(),
        ]
    );
}

#[test]
fn test_describe() {
    let (warm, _) = sets();
    let mut temperature = FuzzyValue::new(19.004, "°C");

    assert_eq!(temperature.describe(None, None), Ok("19°C".to_owned()));
    assert_eq!(
        temperature.describe(None, Some(&warm)),
        Ok("19°C is Extremely Warm".to_owned())
    );

    temperature.set(&warm, Hedge::Is, None);
    assert_eq!(temperature.describe(None, Some(&warm)), Ok("20°C is Completely Warm".to_owned()));
    assert_eq!(temperature.to_string(), "19°C");
    assert_eq!(temperature.assertions().len(), 1);
}
