//! Crate-wide error type.

use crate::policy::PathMode;
use thiserror::Error;

/// All errors that can occur during cost synthesis.
///
/// Validation errors (malformed requirements, inconsistent inputs) are
/// detected before any solver interaction and carry the name of the
/// offending requirement. [`Error::Unsatisfiable`] is distinct from all of
/// them: the inputs were well-formed, but jointly unsolvable under the
/// configured cost bound.
#[derive(Debug, Error)]
pub enum Error {
    /// A requirement declared no paths at all.
    #[error("requirement {0}: path list is empty")]
    EmptyPathList(String),

    /// An `ecmp` or `order` requirement declared fewer than two paths.
    #[error("requirement {name}: mode {mode} needs at least two paths, found {found}")]
    TooFewPaths {
        /// Name of the offending requirement.
        name: String,
        /// Mode of the offending requirement.
        mode: PathMode,
        /// Number of paths it declared.
        found: usize,
    },

    /// A declared path has fewer than two hops.
    #[error("requirement {0}: every path needs at least two hops")]
    PathTooShort(String),

    /// The paths of one requirement do not share a common source and
    /// destination.
    #[error("requirement {0}: paths do not share a common source and destination")]
    EndpointMismatch(String),

    /// A router name could not be resolved in the requirement graph.
    #[error("router {0} does not appear in the requirement graph")]
    UnknownRouter(String),

    /// A path hop pair has no corresponding requirement-graph edge.
    #[error("link ({0}, {1}) does not appear in the requirement graph")]
    UnknownEdge(String, String),

    /// A declared required path was not found by alternate-path
    /// enumeration, usually because an exclusion removed one of its own
    /// routers or edges from the search graph.
    #[error("requirement {name}: required path {path:?} is absent from the pruned search graph")]
    RequiredPathMissing {
        /// Name of the offending requirement.
        name: String,
        /// The missing path, as router names.
        path: Vec<String>,
    },

    /// A solved requirement-graph edge has no inter-router link in the
    /// topology.
    #[error("no inter-router link between {0} and {1} in the topology")]
    MissingInterfaceLink(String, String),

    /// An interface node is not attached to any router.
    #[error("interface {0} is not attached to any router")]
    DanglingInterface(String),

    /// Shortest-path recomputation over the solved costs did not
    /// reproduce a declared path.
    #[error("requirement {0}: solved costs do not reproduce the declared path")]
    VerificationFailed(String),

    /// The constraint system is contradictory under the configured cost
    /// bound. No output artifact is produced.
    #[error("the requirement set is unsatisfiable under the configured cost bound")]
    Unsatisfiable,

    /// The solver backend failed for a reason other than infeasibility.
    #[error("solver failure: {0}")]
    Solver(String),

    /// An enumeration worker thread panicked or dropped its result.
    #[error("alternate-path enumeration worker failed")]
    WorkerFailed,

    /// Writing the cost report failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the cost report failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
