use crate::ops::{BooleanAlgorithm, CrispAlgorithm};

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    #[error("quantifier \"{name}\" is unknown")]
    UnknownQuantifier { name: String },

    #[error("shape \"{name}\" is unknown")]
    UnknownShape { name: String },

    #[error("algorithm \"{name}\" is unknown")]
    UnknownAlgorithm { name: String },

    #[error("crisp algorithm {algorithm} is not implemented")]
    UnimplementedCrispAlgorithm { algorithm: CrispAlgorithm },

    #[error("degenerate membership: {reason}")]
    DegenerateMembership { reason: String },

    #[error("cannot evaluate the non-finite value {value}")]
    NonFiniteOperand { value: f64 },

    #[error("cannot aggregate an empty list of values")]
    EmptyAggregation,

    #[error("cannot combine a {left} veracity with a {right} veracity")]
    AlgorithmMismatch {
        left: BooleanAlgorithm,
        right: BooleanAlgorithm,
    },

    #[error("invalid set \"{name}\": {reason}")]
    InvalidSet { name: String, reason: String },

    #[error("a set named \"{name}\" already exists")]
    DuplicateSet { name: String },

    #[error("invalid engine configuration: {message}")]
    Config { message: String },
}

impl FuzzyError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateMembership { reason: reason.into() }
    }
}
