//! Error types for XEFA operations.

use thiserror::Error;

/// Result type alias using XEFA Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during XEFA operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An index into a fixed-size local array (parametric axis, shape
    /// function node) is out of range.
    #[error("{what}: index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// What was being indexed.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Valid length.
        len: usize,
    },

    /// A cut was constructed with a reversed time extent.
    #[error("invalid cut extent: t_start {t_start} > t_end {t_end}")]
    InvalidCutExtent {
        /// Start of the growth interval.
        t_start: f64,
        /// End of the growth interval.
        t_end: f64,
    },

    /// The fragment/face graph is in an inconsistent state.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A node id was not found in the arena.
    #[error("node {id} not found in arena")]
    NodeNotFound {
        /// The missing node id.
        id: usize,
    },
}
