//! The synthesis pipeline.
//!
//! [`Synthesizer`] wires the stages together: policy validation, the
//! requirement graph, alternate-path enumeration (parallel or
//! sequential), constraint compilation, the single global solve, and
//! result materialization. Every stage returns newly constructed values;
//! nothing is accumulated in shared mutable state.

pub mod alternates;
pub mod constraints;
pub mod report;
pub mod reqgraph;

use crate::parallelism;
use crate::policy::Requirement;
use crate::progress::{ConsoleSink, ProgressSink};
use crate::solver::lp::LpSolver;
use crate::solver::{CostSolver, SatResult};
use crate::topology::Topology;
use crate::Error;
use self::alternates::{enumerate_alternates, EnumerationJob, EnumerationOutcome};
use self::constraints::{compile_requirement, SymbolTable};
use self::report::{materialize, CostReport};
use self::reqgraph::RequirementGraph;
use log::{info, warn};
use std::path::PathBuf;

/// Default exclusive upper bound of the cost domain: valid costs are
/// `1..=16`. Deliberately far below real protocol ranges; configurable
/// through [`SynthesisConfig::cost_upper_bound`].
pub const DEFAULT_MAX_COST: i64 = 17;

/// Strategy for running alternate-path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMode {
    /// A bounded worker pool, one pruned graph copy per requirement.
    Parallel,
    /// One requirement at a time in the calling thread, on the shared
    /// search graph. This mode does not apply per-requirement exclusions;
    /// the parallel mode is the canonical behavior.
    Sequential,
}

/// Tunable parameters of one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Enumeration strategy.
    pub process_mode: ProcessMode,
    /// Exclusive upper bound of the cost domain.
    pub cost_upper_bound: i64,
    /// Where to write `isis_costs.json`; `None` skips the artifact.
    pub output_dir: Option<PathBuf>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            process_mode: ProcessMode::Parallel,
            cost_upper_bound: DEFAULT_MAX_COST,
            output_dir: None,
        }
    }
}

/// Computes per-link costs realizing a routing policy on a topology.
pub struct Synthesizer<'a> {
    topology: &'a Topology,
    policy: &'a [Requirement],
    config: SynthesisConfig,
    sink: Box<dyn ProgressSink>,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer reporting progress to the console.
    pub fn new(topology: &'a Topology, policy: &'a [Requirement], config: SynthesisConfig) -> Self {
        Self::with_sink(topology, policy, config, Box::new(ConsoleSink))
    }

    /// Create a synthesizer with an injected progress sink.
    pub fn with_sink(
        topology: &'a Topology,
        policy: &'a [Requirement],
        config: SynthesisConfig,
        sink: Box<dyn ProgressSink>,
    ) -> Self {
        Self { topology, policy, config, sink }
    }

    /// Run the full pipeline with the default solving backend.
    pub fn synthesize_default(&self) -> Result<CostReport, Error> {
        let mut solver = LpSolver::new();
        self.synthesize(&mut solver)
    }

    /// Run the full pipeline against the given solver.
    ///
    /// On SAT the cost report is returned and, if an output directory is
    /// configured, written as `isis_costs.json`. On UNSAT the run fails
    /// with [`Error::Unsatisfiable`] and no artifact is produced.
    pub fn synthesize(&self, solver: &mut dyn CostSolver) -> Result<CostReport, Error> {
        self.sink.emit("Synthesizing ISIS costs ...");

        // All shape validation happens before any solver interaction.
        for req in self.policy {
            req.validate()?;
        }

        let req_graph = RequirementGraph::build(self.policy);
        let symbols = SymbolTable::new(&req_graph);
        info!(
            "requirement graph: {} routers, {} edges",
            req_graph.graph().node_count(),
            symbols.len()
        );

        let mut system = symbols.domain_constraints(self.config.cost_upper_bound);
        for outcome in self.enumerate(&req_graph)? {
            let paths = outcome
                .paths
                .iter()
                .map(|p| symbols.path_cost(p, &req_graph))
                .collect::<Result<Vec<_>, _>>()?;
            let alternates = outcome
                .alternates
                .iter()
                .map(|p| symbols.path_cost(p, &req_graph))
                .collect::<Result<Vec<_>, _>>()?;
            system.extend(compile_requirement(outcome.mode, &paths, &alternates));
        }

        solver.add(system);
        match solver.check()? {
            SatResult::Sat(model) => {
                self.sink.emit("ISIS cost synthesis succeeded");
                let report = materialize(&req_graph, &symbols, &model, self.topology)?;
                for (router, interface, cost) in report.entries() {
                    self.sink.emit(&format!("( {} , {} , {} )", router, interface, cost));
                }
                if let Some(dir) = &self.config.output_dir {
                    report.write(dir)?;
                }
                Ok(report)
            }
            SatResult::Unsat => {
                self.sink.emit("ISIS cost synthesis failed: requirements are unsatisfiable");
                Err(Error::Unsatisfiable)
            }
        }
    }

    /// Enumerate alternates for every requirement, in policy order.
    fn enumerate(&self, req_graph: &RequirementGraph) -> Result<Vec<EnumerationOutcome>, Error> {
        match self.config.process_mode {
            ProcessMode::Parallel => {
                let jobs = self
                    .policy
                    .iter()
                    .enumerate()
                    .map(|(index, req)| {
                        Ok(EnumerationJob {
                            index,
                            name: req.name.clone(),
                            mode: req.mode,
                            paths: req
                                .paths
                                .iter()
                                .map(|p| req_graph.resolve_path(p))
                                .collect::<Result<_, _>>()?,
                            labels: req.paths.iter().map(|p| p.hops.clone()).collect(),
                            graph: req_graph.pruned(req.exclusion.as_ref()),
                        })
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                parallelism::run_jobs(jobs)
            }
            ProcessMode::Sequential => {
                let mut outcomes = Vec::with_capacity(self.policy.len());
                for (index, req) in self.policy.iter().enumerate() {
                    if req.exclusion.is_some() {
                        warn!(
                            "requirement {}: exclusions are ignored in sequential mode",
                            req.name
                        );
                    }
                    let paths = req
                        .paths
                        .iter()
                        .map(|p| req_graph.resolve_path(p))
                        .collect::<Result<Vec<_>, _>>()?;
                    let labels: Vec<Vec<String>> =
                        req.paths.iter().map(|p| p.hops.clone()).collect();
                    let alternates =
                        enumerate_alternates(req_graph.graph(), &paths, &labels, &req.name)?;
                    outcomes.push(EnumerationOutcome {
                        index,
                        mode: req.mode,
                        paths,
                        alternates,
                    });
                }
                Ok(outcomes)
            }
        }
    }
}
