//! Exhaustive alternate-path enumeration.
//!
//! For a requirement with endpoints `(src, dst)`, every simple directed
//! path between them in the (possibly pruned) requirement graph that is
//! not itself declared must end up strictly dominated by the declared
//! paths, so the enumeration has to be exhaustive rather than top-k. Path
//! counts grow combinatorially with graph density; this is the dominant
//! cost of the whole synthesis and the unit of parallelization.

use super::reqgraph::RouterId;
use crate::policy::PathMode;
use crate::Error;
use log::debug;
use petgraph::algo::all_simple_paths;
use petgraph::stable_graph::StableDiGraph;

/// One requirement's enumeration work, self-contained for a worker
/// thread: the job owns its pruned copy of the search graph.
#[derive(Debug)]
pub struct EnumerationJob {
    /// Position of the requirement in the policy, used to restore
    /// submission order when collecting results.
    pub index: usize,
    /// Requirement name, for error context.
    pub name: String,
    /// Requirement mode, passed through to constraint compilation.
    pub mode: PathMode,
    /// The declared paths, resolved against the shared requirement graph.
    pub paths: Vec<Vec<RouterId>>,
    /// The declared paths as router names, kept for error reporting.
    pub labels: Vec<Vec<String>>,
    /// Private pruned copy of the requirement graph.
    pub graph: StableDiGraph<String, ()>,
}

/// The enumeration result for one requirement, in submission order.
#[derive(Debug)]
pub struct EnumerationOutcome {
    /// Position of the requirement in the policy.
    pub index: usize,
    /// Requirement mode.
    pub mode: PathMode,
    /// The declared paths.
    pub paths: Vec<Vec<RouterId>>,
    /// Every non-declared simple path between the endpoints.
    pub alternates: Vec<Vec<RouterId>>,
}

impl EnumerationJob {
    /// Run the enumeration on this job's private graph.
    pub fn run(self) -> Result<EnumerationOutcome, Error> {
        let alternates =
            enumerate_alternates(&self.graph, &self.paths, &self.labels, &self.name)?;
        Ok(EnumerationOutcome {
            index: self.index,
            mode: self.mode,
            paths: self.paths,
            alternates,
        })
    }
}

/// Enumerate all simple paths between the requirement's endpoints, minus
/// the declared paths themselves.
///
/// Every declared path must literally appear in the enumerated set. A
/// missing one means the search graph no longer contains it, e.g. because
/// an exclusion removed one of its own routers or edges; that is an input
/// inconsistency, not a solver matter.
pub fn enumerate_alternates(
    graph: &StableDiGraph<String, ()>,
    paths: &[Vec<RouterId>],
    labels: &[Vec<String>],
    name: &str,
) -> Result<Vec<Vec<RouterId>>, Error> {
    let src = paths[0][0];
    let dst = paths[0][paths[0].len() - 1];

    let mut found: Vec<Vec<RouterId>> =
        if graph.contains_node(src) && graph.contains_node(dst) {
            all_simple_paths::<Vec<_>, _>(graph, src, dst, 0, None).collect()
        } else {
            // An exclusion removed an endpoint; the declared paths cannot
            // exist in this graph and the check below reports it.
            Vec::new()
        };
    debug!("requirement {}: {} simple paths between endpoints", name, found.len());

    for (required, label) in paths.iter().zip(labels) {
        match found.iter().position(|p| p == required) {
            Some(at) => {
                found.remove(at);
            }
            None => {
                return Err(Error::RequiredPathMissing {
                    name: name.to_string(),
                    path: label.clone(),
                })
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::{Path, PathMode, Requirement};
    use crate::synthesis::reqgraph::RequirementGraph;
    use crate::Exclusion;

    fn path(hops: &[&str]) -> Path {
        Path::new(hops.iter().map(|h| h.to_string()).collect())
    }

    /// A -> {B, C, E} -> D, all three edges in the requirement graph.
    fn three_way_graph() -> (RequirementGraph, Vec<Vec<RouterId>>, Vec<Vec<String>>) {
        let policy = vec![
            Requirement::new(PathMode::Simple, vec![path(&["A", "B", "D"])], None, "r1"),
            Requirement::new(PathMode::Simple, vec![path(&["A", "C", "D"])], None, "r2"),
            Requirement::new(PathMode::Simple, vec![path(&["A", "E", "D"])], None, "r3"),
        ];
        let rg = RequirementGraph::build(&policy);
        let declared = vec![rg.resolve_path(&path(&["A", "B", "D"])).unwrap()];
        let labels = vec![vec!["A".to_string(), "B".to_string(), "D".to_string()]];
        (rg, declared, labels)
    }

    #[test]
    fn test_enumerates_all_alternates() {
        let (rg, declared, labels) = three_way_graph();
        let alternates =
            enumerate_alternates(rg.graph(), &declared, &labels, "r1").unwrap();
        assert_eq!(alternates.len(), 2);
        assert!(!alternates.contains(&declared[0]));
    }

    #[test]
    fn test_no_alternates_in_chain() {
        let policy =
            vec![Requirement::new(PathMode::Simple, vec![path(&["A", "B", "C"])], None, "r1")];
        let rg = RequirementGraph::build(&policy);
        let declared = vec![rg.resolve_path(&path(&["A", "B", "C"])).unwrap()];
        let labels = vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]];
        let alternates =
            enumerate_alternates(rg.graph(), &declared, &labels, "r1").unwrap();
        assert!(alternates.is_empty());
    }

    #[test]
    fn test_exclusion_prunes_search_space() {
        let (rg, declared, labels) = three_way_graph();
        let exc = Exclusion { routers: vec!["E".to_string()], edges: vec![] };
        let pruned = rg.pruned(Some(&exc));
        let alternates = enumerate_alternates(&pruned, &declared, &labels, "r1").unwrap();
        assert_eq!(alternates.len(), 1);
    }

    #[test]
    fn test_exclusion_cutting_required_path_is_an_error() {
        let (rg, declared, labels) = three_way_graph();
        let exc = Exclusion { routers: vec!["B".to_string()], edges: vec![] };
        let pruned = rg.pruned(Some(&exc));
        match enumerate_alternates(&pruned, &declared, &labels, "r1") {
            Err(Error::RequiredPathMissing { name, path }) => {
                assert_eq!(name, "r1");
                assert_eq!(path, vec!["A", "B", "D"]);
            }
            other => panic!("expected RequiredPathMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_excluded_endpoint_is_an_error() {
        let (rg, declared, labels) = three_way_graph();
        let exc = Exclusion { routers: vec!["A".to_string()], edges: vec![] };
        let pruned = rg.pruned(Some(&exc));
        assert!(matches!(
            enumerate_alternates(&pruned, &declared, &labels, "r1"),
            Err(Error::RequiredPathMissing { .. })
        ));
    }
}
