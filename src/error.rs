#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Error taxonomy for the preference reasoner.
//!
//! Every failure mode is fatal to the calling operation: no error is
//! swallowed and no default is substituted for missing data.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, PreferenceError>;

/// The error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Literal 0 was supplied where a DIMACS literal was expected.
    #[error("literal 0 is not a valid DIMACS literal")]
    ZeroLiteral,

    /// A literal falls outside the domain table.
    #[error("unknown literal {0}")]
    UnknownLiteral(i32),

    /// A domain value is absent from the domain table.
    #[error("unknown domain value '{0}'")]
    UnknownDomainValue(String),

    /// Every disambiguation suffix produced a colliding external identifier.
    #[error("unable to generate a unique identifier for domain value '{0}'")]
    IdentifierExhausted(String),

    /// A preference variable was declared with no domain values.
    #[error("empty domain for preference variable '{0}'")]
    EmptyDomain(String),

    /// The same domain value appears under more than one variable.
    #[error("duplicate domain value '{0}'")]
    DuplicateDomainValue(String),

    /// The same preference variable was declared twice.
    #[error("duplicate preference variable '{0}'")]
    DuplicateVariable(String),

    /// A required engine parameter was never supplied.
    #[error("required parameter '{0}' not set")]
    MissingParameter(&'static str),

    /// An engine parameter was supplied more than once.
    #[error("parameter '{0}' already set")]
    DuplicateParameter(&'static str),

    /// The base knowledge base is inconsistent.
    #[error("inconsistent base knowledge base")]
    InconsistentBase,

    /// The constrained knowledge base is inconsistent.
    #[error("inconsistent set of preferences")]
    InconsistentPreferences,

    /// A satisfying model does not assign exactly one value per variable.
    #[error("incorrect model size: expected {expected}, got {actual}")]
    ModelShape {
        /// Number of preference variables.
        expected: usize,
        /// Number of domain values found in the model.
        actual: usize,
    },

    /// A model assigns both polarities of the same literal.
    #[error("model assigns both polarities of literal {0}")]
    ContradictoryModel(i32),

    /// A model leaves a preference variable without a domain value.
    #[error("no domain value for variable '{0}' in model")]
    UnassignedVariable(String),

    /// An outcome could not be constructed from an assignment.
    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),

    /// An external oracle (entailment, consistency, SAT or dominance) failed.
    #[error("oracle failure")]
    Oracle(#[source] Box<dyn core::error::Error + Send + Sync>),
}
