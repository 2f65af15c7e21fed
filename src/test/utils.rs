//! Shared fixtures for the end-to-end tests.

use crate::solver::{CostConstraint, CostSolver, SatResult};
use crate::{CostReport, Error, Path, PathMode, Requirement, Topology};
use std::collections::HashMap;

pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

/// Build a topology from undirected router adjacencies. Each link gets a
/// pair of interfaces named `{a}_to_{b}` and `{b}_to_{a}`.
pub fn topo(links: &[(&str, &str)]) -> Topology {
    let mut topo = Topology::new();
    let mut routers = HashMap::new();
    for (a, b) in links {
        let ra = *routers.entry(a.to_string()).or_insert_with(|| topo.add_router(a));
        let rb = *routers.entry(b.to_string()).or_insert_with(|| topo.add_router(b));
        let ia = topo.add_interface(&format!("{}_to_{}", a, b));
        let ib = topo.add_interface(&format!("{}_to_{}", b, a));
        topo.connect(ra, ia, rb, ib);
    }
    topo
}

pub fn path(hops: &[&str]) -> Path {
    Path::new(hops.iter().map(|h| h.to_string()).collect())
}

pub fn simple(hops: &[&str], name: &str) -> Requirement {
    Requirement::new(PathMode::Simple, vec![path(hops)], None, name)
}

/// The solved cost of a directed router-level edge.
pub fn edge_cost(report: &CostReport, a: &str, b: &str) -> i64 {
    report
        .edge_costs()
        .iter()
        .find(|(src, dst, _)| src == a && dst == b)
        .map(|(_, _, cost)| *cost)
        .unwrap_or_else(|| panic!("no solved cost for edge ({}, {})", a, b))
}

/// The solved aggregate cost of a router-level path.
pub fn route_cost(report: &CostReport, hops: &[&str]) -> i64 {
    hops.windows(2).map(|w| edge_cost(report, w[0], w[1])).sum()
}

/// A solver stand-in that records what it is given without solving.
#[derive(Debug, Default)]
pub struct ProbeSolver {
    pub constraints: Vec<CostConstraint>,
    pub checks: usize,
}

impl CostSolver for ProbeSolver {
    fn add(&mut self, mut constraints: Vec<CostConstraint>) {
        self.constraints.append(&mut constraints);
    }

    fn check(&mut self) -> Result<SatResult, Error> {
        self.checks += 1;
        Ok(SatResult::Unsat)
    }
}
