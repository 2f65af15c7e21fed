//! Typed topology model.
//!
//! The topology is a directed graph whose nodes are either routers or
//! interfaces, and whose edges are either intra-router links (a router to
//! one of its own interfaces) or inter-router links (an interface of one
//! router to an interface of another). Costs are always attached to
//! inter-router links, so synthesis needs the derived mapping from a
//! directed router pair to the interface pair carrying that link.

use crate::Error;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Identifier of a device (router or interface) in the topology graph.
pub type DeviceId = NodeIndex;

/// The kind of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// A router.
    Router,
    /// A physical interface belonging to exactly one router.
    Interface,
}

/// The kind of a topology edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Intra-router link between a router and one of its own interfaces.
    Internal,
    /// Inter-router link between interfaces of two different routers.
    Link,
}

/// One node of the topology graph.
#[derive(Debug, Clone)]
pub struct Device {
    /// Unique device name.
    pub name: String,
    /// Router or interface.
    pub kind: DeviceKind,
}

/// The typed topology graph.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: DiGraph<Device, LinkKind>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self { graph: DiGraph::new() }
    }

    /// Add a router node.
    pub fn add_router(&mut self, name: &str) -> DeviceId {
        self.graph.add_node(Device { name: name.to_string(), kind: DeviceKind::Router })
    }

    /// Add an interface node.
    pub fn add_interface(&mut self, name: &str) -> DeviceId {
        self.graph.add_node(Device { name: name.to_string(), kind: DeviceKind::Interface })
    }

    /// Attach an interface to its owning router (both directions).
    pub fn add_internal_link(&mut self, router: DeviceId, interface: DeviceId) {
        self.graph.add_edge(router, interface, LinkKind::Internal);
        self.graph.add_edge(interface, router, LinkKind::Internal);
    }

    /// Add a directed inter-router link between two interfaces.
    pub fn add_link(&mut self, from: DeviceId, to: DeviceId) {
        self.graph.add_edge(from, to, LinkKind::Link);
    }

    /// Wire up a full bidirectional adjacency: both interfaces are
    /// attached to their routers and linked to each other in both
    /// directions.
    pub fn connect(
        &mut self,
        router_a: DeviceId,
        interface_a: DeviceId,
        router_b: DeviceId,
        interface_b: DeviceId,
    ) {
        self.add_internal_link(router_a, interface_a);
        self.add_internal_link(router_b, interface_b);
        self.add_link(interface_a, interface_b);
        self.add_link(interface_b, interface_a);
    }

    /// Look up a device by name.
    pub fn find(&self, name: &str) -> Option<DeviceId> {
        self.graph.node_indices().find(|n| self.graph[*n].name == name)
    }

    /// Name of a device.
    pub fn name_of(&self, id: DeviceId) -> &str {
        &self.graph[id].name
    }

    /// Names of all routers.
    pub fn router_names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|n| self.graph[*n].kind == DeviceKind::Router)
            .map(|n| self.graph[n].name.as_str())
            .collect()
    }

    /// Derive the mapping from each directed router pair to the interface
    /// pair carrying their inter-router link.
    ///
    /// The owning router of a link endpoint is its unique router neighbor.
    /// An interface without one violates the topology invariant and is
    /// reported as [`Error::DanglingInterface`].
    pub fn interface_map(&self) -> Result<HashMap<(String, String), (String, String)>, Error> {
        let mut map = HashMap::new();
        for edge in self.graph.edge_references() {
            if *edge.weight() != LinkKind::Link {
                continue;
            }
            let src_iface = edge.source();
            let dst_iface = edge.target();
            let src_router = self.owning_router(src_iface)?;
            let dst_router = self.owning_router(dst_iface)?;
            map.insert(
                (self.graph[src_router].name.clone(), self.graph[dst_router].name.clone()),
                (self.graph[src_iface].name.clone(), self.graph[dst_iface].name.clone()),
            );
        }
        Ok(map)
    }

    fn owning_router(&self, interface: DeviceId) -> Result<DeviceId, Error> {
        self.graph
            .neighbors_undirected(interface)
            .find(|n| self.graph[*n].kind == DeviceKind::Router)
            .ok_or_else(|| Error::DanglingInterface(self.graph[interface].name.clone()))
    }
}
