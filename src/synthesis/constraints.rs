//! Symbolic cost variables and the per-requirement constraint compiler.

use super::reqgraph::{RequirementGraph, RouterId};
use crate::policy::PathMode;
use crate::solver::{CostConstraint, VarId};
use crate::Error;
use itertools::Itertools;
use std::collections::HashMap;

/// Allocation of one integer cost variable per distinct directed
/// requirement-graph edge, in edge creation order.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    edges: Vec<(RouterId, RouterId)>,
    index: HashMap<(RouterId, RouterId), VarId>,
}

impl SymbolTable {
    /// Allocate variables for every edge of the requirement graph.
    pub fn new(req_graph: &RequirementGraph) -> Self {
        let edges = req_graph.edges().to_vec();
        let index = edges.iter().enumerate().map(|(i, e)| (*e, i)).collect();
        Self { edges, index }
    }

    /// Number of allocated variables.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no variables were allocated (empty policy).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edge of each variable, in allocation order.
    pub fn edges(&self) -> &[(RouterId, RouterId)] {
        &self.edges
    }

    /// Domain constraint `0 < cost < limit` for every variable.
    pub fn domain_constraints(&self, limit: i64) -> Vec<CostConstraint> {
        (0..self.edges.len()).map(|var| CostConstraint::Domain { var, limit }).collect()
    }

    /// The edge-variable vector of a path, whose sum is the path's
    /// aggregate cost.
    ///
    /// Alternates are enumerated inside the requirement graph, so every
    /// hop pair must resolve; a miss indicates inconsistent inputs.
    pub fn path_cost(
        &self,
        hops: &[RouterId],
        req_graph: &RequirementGraph,
    ) -> Result<Vec<VarId>, Error> {
        hops.iter()
            .tuple_windows()
            .map(|(a, b)| {
                self.index.get(&(*a, *b)).copied().ok_or_else(|| {
                    Error::UnknownEdge(
                        req_graph.name_of(*a).to_string(),
                        req_graph.name_of(*b).to_string(),
                    )
                })
            })
            .collect()
    }
}

/// Compile one requirement's mode-specific constraints.
///
/// `paths` and `alternates` are already expressed as edge-variable
/// vectors. The emitted relations are:
///
/// - `Simple`: the declared path is strictly cheaper than every
///   alternate. Nothing is emitted without alternates, since the declared
///   path is then trivially the only candidate.
/// - `Ecmp`: all declared paths are tied, and the tie strictly dominates
///   every alternate.
/// - `Order`: consecutive declared paths are strictly ordered, and even
///   the least-preferred one beats every alternate.
///
/// Shape errors (`Ecmp`/`Order` with fewer than two paths) are rejected
/// by requirement validation before this point.
pub fn compile_requirement(
    mode: PathMode,
    paths: &[Vec<VarId>],
    alternates: &[Vec<VarId>],
) -> Vec<CostConstraint> {
    let mut cons = Vec::new();
    match mode {
        PathMode::Simple => {
            for alt in alternates {
                cons.push(CostConstraint::Cheaper { lhs: paths[0].clone(), rhs: alt.clone() });
            }
        }
        PathMode::Ecmp => {
            debug_assert!(paths.len() >= 2);
            for path in &paths[1..] {
                cons.push(CostConstraint::Tied { lhs: paths[0].clone(), rhs: path.clone() });
            }
            for alt in alternates {
                cons.push(CostConstraint::Cheaper { lhs: paths[0].clone(), rhs: alt.clone() });
            }
        }
        PathMode::Order => {
            debug_assert!(paths.len() >= 2);
            for (cheaper, dearer) in paths.iter().tuple_windows() {
                cons.push(CostConstraint::Cheaper { lhs: cheaper.clone(), rhs: dearer.clone() });
            }
            let last = &paths[paths.len() - 1];
            for alt in alternates {
                cons.push(CostConstraint::Cheaper { lhs: last.clone(), rhs: alt.clone() });
            }
        }
    }
    cons
}
