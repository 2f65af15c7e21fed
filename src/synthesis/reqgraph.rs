//! Requirement graph construction and pruning.

use crate::policy::{Exclusion, Path, Requirement};
use crate::Error;
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::HashMap;

/// Identifier of a router in the requirement graph.
pub type RouterId = NodeIndex;

/// The union of all edges appearing in any declared required path.
///
/// This graph is the universal alternate-path search space. It is built
/// once per synthesis run and never mutated afterwards; per-requirement
/// exclusions operate on private [`pruned`](RequirementGraph::pruned)
/// copies. Node and edge indices stay stable across pruning, so paths
/// resolved against the shared graph remain valid in every copy.
#[derive(Debug, Clone)]
pub struct RequirementGraph {
    graph: StableDiGraph<String, ()>,
    names: HashMap<String, RouterId>,
    /// Distinct directed edges in first-insertion order. This order
    /// defines symbolic variable allocation and the report order.
    edges: Vec<(RouterId, RouterId)>,
}

impl RequirementGraph {
    /// Build the requirement graph from every path of every requirement.
    ///
    /// Edges are deduplicated; an empty policy yields an empty graph.
    pub fn build(policy: &[Requirement]) -> Self {
        let mut rg = Self {
            graph: StableDiGraph::default(),
            names: HashMap::new(),
            edges: Vec::new(),
        };
        for req in policy {
            for path in &req.paths {
                for (a, b) in path.hops.iter().tuple_windows() {
                    let a = rg.intern(a);
                    let b = rg.intern(b);
                    if rg.graph.find_edge(a, b).is_none() {
                        rg.graph.add_edge(a, b, ());
                        rg.edges.push((a, b));
                    }
                }
            }
        }
        rg
    }

    fn intern(&mut self, name: &str) -> RouterId {
        match self.names.get(name) {
            Some(id) => *id,
            None => {
                let id = self.graph.add_node(name.to_string());
                self.names.insert(name.to_string(), id);
                id
            }
        }
    }

    /// Resolve a router name.
    pub fn resolve(&self, name: &str) -> Result<RouterId, Error> {
        self.names.get(name).copied().ok_or_else(|| Error::UnknownRouter(name.to_string()))
    }

    /// Resolve a declared path to router identifiers.
    pub fn resolve_path(&self, path: &Path) -> Result<Vec<RouterId>, Error> {
        path.hops.iter().map(|h| self.resolve(h)).collect()
    }

    /// Name of a router.
    pub fn name_of(&self, id: RouterId) -> &str {
        &self.graph[id]
    }

    /// All distinct directed edges, in creation order.
    pub fn edges(&self) -> &[(RouterId, RouterId)] {
        &self.edges
    }

    /// The underlying search graph.
    pub fn graph(&self) -> &StableDiGraph<String, ()> {
        &self.graph
    }

    /// A private copy of the search graph with the exclusion applied.
    ///
    /// Excluded names that never appear in the requirement graph are
    /// ignored; there is nothing to remove for them. Edges are removed
    /// before routers, matching the declared exclusion semantics.
    pub fn pruned(&self, exclusion: Option<&Exclusion>) -> StableDiGraph<String, ()> {
        let mut graph = self.graph.clone();
        if let Some(exc) = exclusion {
            for (a, b) in &exc.edges {
                if let (Some(a), Some(b)) = (self.names.get(a), self.names.get(b)) {
                    if let Some(e) = graph.find_edge(*a, *b) {
                        graph.remove_edge(e);
                    }
                }
            }
            for router in &exc.routers {
                if let Some(r) = self.names.get(router) {
                    graph.remove_node(*r);
                }
            }
        }
        graph
    }
}
