use thiserror::Error;

/// Result type for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Walker asked to step back with nothing committed
    #[error("Cannot {operation}: no committed edges")]
    EmptyPath { operation: &'static str },

    /// Walker asked to discard with no remaining path at the current vertex
    #[error("Nothing to discard at vertex {vertex}")]
    NothingToDiscard { vertex: usize },

    /// Vertex outside the lattice
    #[error("Invalid vertex {vertex} (final vertex is {final_vertex})")]
    InvalidVertex { vertex: usize, final_vertex: usize },

    /// Vertex lists that do not end in an empty final list
    #[error("Malformed lattice: {0}")]
    MalformedLattice(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scorer error: {0}")]
    Fuzzy(#[from] tokenizer_fuzzy::FuzzyError),
}

impl LatticeError {
    pub fn empty_path(operation: &'static str) -> Self {
        Self::EmptyPath { operation }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedLattice(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
