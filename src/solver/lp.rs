//! Default solving backend over `good_lp` with the pure-Rust `microlp`
//! engine.
//!
//! Cost variables are integral, which makes the strict inequality
//! `sum(lhs) < sum(rhs)` exact as `sum(lhs) - sum(rhs) <= -1`. The model
//! has a constant objective: only feasibility matters.

use super::{CostConstraint, CostModel, CostSolver, SatResult, VarId};
use crate::Error;
use good_lp::solvers::microlp::microlp;
use good_lp::{variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable};
use log::debug;

/// Linear-programming implementation of [`CostSolver`].
#[derive(Debug, Default)]
pub struct LpSolver {
    constraints: Vec<CostConstraint>,
}

impl LpSolver {
    /// Create an empty solver.
    pub fn new() -> Self {
        Self::default()
    }

    fn difference(vars: &[Variable], lhs: &[VarId], rhs: &[VarId]) -> Expression {
        let mut expr: Expression = 0.into();
        for v in lhs {
            expr += vars[*v];
        }
        for v in rhs {
            expr -= vars[*v];
        }
        expr
    }
}

impl CostSolver for LpSolver {
    fn add(&mut self, mut constraints: Vec<CostConstraint>) {
        self.constraints.append(&mut constraints);
    }

    fn check(&mut self) -> Result<SatResult, Error> {
        let num_vars = self
            .constraints
            .iter()
            .filter_map(CostConstraint::max_var)
            .max()
            .map(|v| v + 1)
            .unwrap_or(0);
        if num_vars == 0 {
            // Degenerate system: satisfiable by the empty assignment.
            return Ok(SatResult::Sat(CostModel::new(Vec::new())));
        }

        let mut limits: Vec<Option<i64>> = vec![None; num_vars];
        for c in &self.constraints {
            if let CostConstraint::Domain { var, limit } = c {
                limits[*var] = Some(*limit);
            }
        }

        let mut problem = variables!();
        let vars: Vec<Variable> = limits
            .iter()
            .map(|limit| {
                let def = variable().integer().min(1.0);
                let def = match limit {
                    Some(limit) => def.max((limit - 1) as f64),
                    None => def,
                };
                problem.add(def)
            })
            .collect();

        let objective: Expression = 0.into();
        let mut model = problem.minimise(objective).using(microlp);
        let mut rows = 0usize;
        for c in &self.constraints {
            match c {
                CostConstraint::Domain { .. } => {}
                CostConstraint::Cheaper { lhs, rhs } => {
                    model = model.with(Self::difference(&vars, lhs, rhs).leq(-1.0));
                    rows += 1;
                }
                CostConstraint::Tied { lhs, rhs } => {
                    model = model.with(Self::difference(&vars, lhs, rhs).eq(0.0));
                    rows += 1;
                }
            }
        }
        debug!("checking satisfiability: {} variables, {} relational rows", num_vars, rows);

        match model.solve() {
            Ok(solution) => {
                let values =
                    vars.iter().map(|v| solution.value(*v).round() as i64).collect();
                Ok(SatResult::Sat(CostModel::new(values)))
            }
            Err(ResolutionError::Infeasible) => Ok(SatResult::Unsat),
            Err(other) => Err(Error::Solver(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_system_is_sat() {
        let mut solver = LpSolver::new();
        match solver.check().unwrap() {
            SatResult::Sat(model) => assert_eq!(model, CostModel::new(vec![])),
            SatResult::Unsat => panic!("empty system must be satisfiable"),
        }
    }

    #[test]
    fn test_domain_bounds_respected() {
        let mut solver = LpSolver::new();
        solver.add(vec![
            CostConstraint::Domain { var: 0, limit: 17 },
            CostConstraint::Domain { var: 1, limit: 17 },
            CostConstraint::Cheaper { lhs: vec![0], rhs: vec![1] },
        ]);
        match solver.check().unwrap() {
            SatResult::Sat(model) => {
                for v in 0..2 {
                    assert!(model.value_of(v) > 0 && model.value_of(v) < 17);
                }
                assert!(model.value_of(0) < model.value_of(1));
            }
            SatResult::Unsat => panic!("system is satisfiable"),
        }
    }

    #[test]
    fn test_tied_paths() {
        let mut solver = LpSolver::new();
        solver.add(vec![
            CostConstraint::Domain { var: 0, limit: 17 },
            CostConstraint::Domain { var: 1, limit: 17 },
            CostConstraint::Domain { var: 2, limit: 17 },
            // var0 == var1 + var2
            CostConstraint::Tied { lhs: vec![0], rhs: vec![1, 2] },
        ]);
        match solver.check().unwrap() {
            SatResult::Sat(model) => {
                assert_eq!(model.value_of(0), model.value_of(1) + model.value_of(2));
            }
            SatResult::Unsat => panic!("system is satisfiable"),
        }
    }

    #[test]
    fn test_contradiction_is_unsat() {
        let mut solver = LpSolver::new();
        solver.add(vec![
            CostConstraint::Domain { var: 0, limit: 17 },
            CostConstraint::Domain { var: 1, limit: 17 },
            CostConstraint::Cheaper { lhs: vec![0], rhs: vec![1] },
            CostConstraint::Cheaper { lhs: vec![1], rhs: vec![0] },
        ]);
        assert_eq!(solver.check().unwrap(), SatResult::Unsat);
    }

    #[test]
    fn test_tight_domain_is_unsat() {
        // Two variables below an exclusive bound of 2 can only both be 1,
        // which contradicts the strict ordering.
        let mut solver = LpSolver::new();
        solver.add(vec![
            CostConstraint::Domain { var: 0, limit: 2 },
            CostConstraint::Domain { var: 1, limit: 2 },
            CostConstraint::Cheaper { lhs: vec![0], rhs: vec![1] },
        ]);
        assert_eq!(solver.check().unwrap(), SatResult::Unsat);
    }
}
