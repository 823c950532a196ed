use thiserror::Error;

/// Errors returned by normalization, distance and clustering routines in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// A point sequence handed to a distance routine has no points.
    #[error("empty trajectory")]
    EmptyTrajectory,

    /// A raw trace has fewer than two usable samples after filtering.
    #[error("insufficient trajectory data: need at least 2 points, found {found}")]
    InsufficientData {
        /// Number of points that survived filtering.
        found: usize,
    },

    /// Fewer than two trajectories are available for comparison.
    #[error("insufficient trajectories: need at least 2, found {found}")]
    InsufficientTrajectories {
        /// Number of valid trajectories.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Validity is undefined for this assignment (one cluster, or every item alone).
    #[error("undefined validity: {clusters} non-empty clusters over {n_items} items")]
    DegenerateClustering {
        /// Number of non-empty clusters in the assignment.
        clusters: usize,
        /// Number of items in the assignment.
        n_items: usize,
    },

    /// Two inputs that must agree in size do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected size.
        expected: usize,
        /// Found size.
        found: usize,
    },

    /// A distance came out NaN, infinite or negative.
    #[error("numeric anomaly: {context}")]
    NumericAnomaly {
        /// Where the value was produced.
        context: String,
    },

    /// A caller-supplied matrix violates the distance-matrix invariants.
    #[error("malformed distance matrix: {0}")]
    MalformedMatrix(String),

    /// CSV decoding failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O failure while reading records.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn numeric_anomaly(context: impl Into<String>) -> Self {
        Self::NumericAnomaly {
            context: context.into(),
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
