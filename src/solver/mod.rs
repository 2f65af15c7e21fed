//! Arithmetic solver capability.
//!
//! Constraint compilation produces plain data ([`CostConstraint`]); the
//! solving backend is hidden behind the narrow [`CostSolver`] trait so any
//! linear-integer-arithmetic engine can be substituted without touching
//! the compiler logic. The default backend lives in [`lp`].

pub mod lp;

use crate::Error;

/// Index of one symbolic per-edge cost variable, allocated in
/// requirement-graph edge creation order.
pub type VarId = usize;

/// One linear constraint over the symbolic cost variables.
///
/// Path costs are the sum of the variables of the path's consecutive
/// edges, so both relational variants carry the edge-variable vectors of
/// two paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostConstraint {
    /// `0 < var < limit`.
    Domain {
        /// The bounded variable.
        var: VarId,
        /// Exclusive upper bound of the cost domain.
        limit: i64,
    },
    /// `sum(lhs) < sum(rhs)`: the left path is strictly cheaper.
    Cheaper {
        /// Edge variables of the dominating path.
        lhs: Vec<VarId>,
        /// Edge variables of the dominated path.
        rhs: Vec<VarId>,
    },
    /// `sum(lhs) == sum(rhs)`: both paths cost the same.
    Tied {
        /// Edge variables of the first path.
        lhs: Vec<VarId>,
        /// Edge variables of the second path.
        rhs: Vec<VarId>,
    },
}

impl CostConstraint {
    /// The largest variable index mentioned by this constraint, if any.
    pub(crate) fn max_var(&self) -> Option<VarId> {
        match self {
            CostConstraint::Domain { var, .. } => Some(*var),
            CostConstraint::Cheaper { lhs, rhs } | CostConstraint::Tied { lhs, rhs } => {
                lhs.iter().chain(rhs.iter()).max().copied()
            }
        }
    }
}

/// A satisfying assignment, one integer per symbolic cost variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    values: Vec<i64>,
}

impl CostModel {
    /// Wrap the assignment vector, indexed by [`VarId`].
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// The solved value of one variable.
    pub fn value_of(&self, var: VarId) -> i64 {
        self.values[var]
    }

    /// Aggregate cost of a path given its edge variables.
    pub fn path_cost(&self, vars: &[VarId]) -> i64 {
        vars.iter().map(|v| self.values[*v]).sum()
    }
}

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// A satisfying assignment exists.
    Sat(CostModel),
    /// The constraint system is provably contradictory.
    Unsat,
}

/// A solving backend for the compiled constraint system.
///
/// The orchestrator adds the full conjunction once and checks once; there
/// is no incremental or partial solving.
pub trait CostSolver {
    /// Append constraints to the pending system.
    fn add(&mut self, constraints: Vec<CostConstraint>);

    /// Check satisfiability of everything added so far.
    fn check(&mut self) -> Result<SatResult, Error>;
}
