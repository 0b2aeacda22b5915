use thiserror::Error;

pub type FilmResult<T> = Result<T, FilmError>;

/// Errors surfaced by the solver.
///
/// Configuration and dimension errors are detected eagerly at construction;
/// numerical divergence is detected once per time step, after the moment
/// recovery, and aborts the run with the offending step and field.
#[derive(Debug, Error)]
pub enum FilmError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: String,
        found: String,
    },

    #[error("non-finite value in field `{field}` at time step {time_step}")]
    NumericalDivergence {
        time_step: usize,
        field: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
