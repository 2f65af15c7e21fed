//! # isis-synth
//!
//! This library computes per-link integer cost values for an ISIS-style
//! link-state routing protocol, such that a set of declared routing-path
//! requirements is guaranteed to hold under standard shortest-path
//! computation on the deployed topology.
//!
//! A policy declares requirements in one of three modes:
//!
//! - `Simple`: the declared path must be the unique shortest path between
//!   its endpoints.
//! - `Ecmp`: all declared paths must have equal aggregate cost, and that
//!   common cost must strictly dominate every non-declared alternative.
//! - `Order`: the declared paths form a strict preference ranking, and even
//!   the least-preferred declared path must beat every alternative.
//!
//! The pipeline builds the requirement graph (the union of all declared
//! path edges), enumerates every simple alternate path per requirement,
//! compiles the mode-specific relations into a system of linear integer
//! constraints over symbolic per-edge cost variables, submits the whole
//! conjunction to a solver behind the [`CostSolver`] capability, and maps
//! a satisfying assignment back onto physical interface pairs.
//!
//! Alternate-path enumeration is the combinatorial heart of the problem
//! and is parallelized over independent requirements; everything else is
//! sequential. See [`Synthesizer`] for the entry point.

mod error;
pub use error::Error;

pub mod parallelism;
pub mod policy;
pub mod progress;
pub mod solver;
pub mod synthesis;
pub mod topology;

pub use policy::{Exclusion, Path, PathMode, Requirement};
pub use progress::{ChannelSink, ConsoleSink, ProgressSink};
pub use solver::lp::LpSolver;
pub use solver::{CostConstraint, CostModel, CostSolver, SatResult, VarId};
pub use synthesis::report::CostReport;
pub use synthesis::reqgraph::{RequirementGraph, RouterId};
pub use synthesis::{ProcessMode, SynthesisConfig, Synthesizer};
pub use topology::{DeviceId, DeviceKind, LinkKind, Topology};

#[cfg(test)]
mod test;
