use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::ops::{BooleanAlgorithm, CrispAlgorithm};

/// Settings an [`Engine`](crate::Engine) hands to every set, value and
/// veracity it creates.
///
/// ```toml
/// algorithm = "HYPERBOLIC"
/// crisp_algorithm = "MEAN_LOWER"
/// report = true
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub algorithm: BooleanAlgorithm,
    pub crisp_algorithm: CrispAlgorithm,
    /// Whether values record a report of every crispification
    pub report: bool,
}

impl EngineConfig {
    /// Parses then validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| FuzzyError::Config {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.crisp_algorithm.ensure_implemented()
    }
}

#[test]
fn test_defaults() {
    let config = EngineConfig::from_toml("").unwrap();

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.algorithm, BooleanAlgorithm::Linear);
    assert_eq!(config.crisp_algorithm, CrispAlgorithm::Centroid);
    assert!(!config.report);
}

#[test]
fn test_from_toml() {
    let config = EngineConfig::from_toml(
        r#"
        algorithm = "HYPERBOLIC"
        crisp_algorithm = "MEAN_LOWER"
        report = true
        "#,
    )
    .unwrap();

    assert_eq!(config.algorithm, BooleanAlgorithm::Hyperbolic);
    assert_eq!(config.crisp_algorithm, CrispAlgorithm::MeanLower);
    assert!(config.report);

    let written = toml::to_string(&config).unwrap();
    assert_eq!(EngineConfig::from_toml(&written), Ok(config));
}

#[test]
fn test_rejects_bad_config() {
    assert!(matches!(
        EngineConfig::from_toml(r#"algorithm = "FUZZY""#),
        Err(FuzzyError::Config { .. })
    ));
    assert!(matches!(
        EngineConfig::from_toml("report = 3"),
        Err(FuzzyError::Config { .. })
    ));
    assert_eq!(
        EngineConfig::from_toml(r#"crisp_algorithm = "RANDOM_TRUE""#),
        Err(FuzzyError::UnimplementedCrispAlgorithm {
            algorithm: CrispAlgorithm::RandomTrue
        })
    );
}
