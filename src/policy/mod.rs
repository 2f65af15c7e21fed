//! Path requirements.
//!
//! A policy is an ordered list of [`Requirement`]s. Each requirement
//! declares one or more router-level paths, a mode describing the intended
//! forwarding behavior, and optionally an exclusion set pruning the
//! alternate-path search space.

use crate::Error;
use std::fmt;

/// The intended forwarding behavior of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// The single declared path must be the unique shortest path.
    Simple,
    /// All declared paths carry traffic simultaneously at equal cost.
    Ecmp,
    /// The declared paths form a strict fallback preference ranking.
    Order,
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMode::Simple => write!(f, "simple"),
            PathMode::Ecmp => write!(f, "ecmp"),
            PathMode::Order => write!(f, "order"),
        }
    }
}

/// An ordered sequence of router names, forward orientation only.
///
/// The reverse path is never implied; a bidirectional intent needs two
/// requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// The routers traversed, in order. Source first, destination last.
    pub hops: Vec<String>,
}

impl Path {
    /// Create a path from its hop sequence.
    pub fn new(hops: Vec<String>) -> Self {
        Self { hops }
    }

    /// First hop of the path.
    pub fn source(&self) -> Option<&str> {
        self.hops.first().map(|h| h.as_str())
    }

    /// Last hop of the path.
    pub fn destination(&self) -> Option<&str> {
        self.hops.last().map(|h| h.as_str())
    }
}

/// Routers and edges removed from the search space before alternate-path
/// enumeration.
#[derive(Debug, Clone, Default)]
pub struct Exclusion {
    /// Routers to remove, together with all their incident edges.
    pub routers: Vec<String>,
    /// Directed edges to remove.
    pub edges: Vec<(String, String)>,
}

/// One entry of the routing policy.
#[derive(Debug, Clone)]
pub struct Requirement {
    /// The forwarding behavior to enforce.
    pub mode: PathMode,
    /// The declared paths. All share one source and one destination.
    pub paths: Vec<Path>,
    /// Optional pruning of the alternate-path search space.
    pub exclusion: Option<Exclusion>,
    /// Name identifying this entry in the policy file, used in errors.
    pub name: String,
}

impl Requirement {
    /// Create a requirement.
    pub fn new(
        mode: PathMode,
        paths: Vec<Path>,
        exclusion: Option<Exclusion>,
        name: &str,
    ) -> Self {
        Self { mode, paths, exclusion, name: name.to_string() }
    }

    /// Check the structural invariants of this requirement.
    ///
    /// Runs before any solver interaction: a malformed requirement must
    /// never silently proceed to constraint generation.
    pub fn validate(&self) -> Result<(), Error> {
        if self.paths.is_empty() {
            return Err(Error::EmptyPathList(self.name.clone()));
        }
        if matches!(self.mode, PathMode::Ecmp | PathMode::Order) && self.paths.len() < 2 {
            return Err(Error::TooFewPaths {
                name: self.name.clone(),
                mode: self.mode,
                found: self.paths.len(),
            });
        }
        if self.paths.iter().any(|p| p.hops.len() < 2) {
            return Err(Error::PathTooShort(self.name.clone()));
        }
        let src = self.paths[0].source();
        let dst = self.paths[0].destination();
        if self.paths.iter().any(|p| p.source() != src || p.destination() != dst) {
            return Err(Error::EndpointMismatch(self.name.clone()));
        }
        Ok(())
    }
}
