//! # Reaction Graph Module
//!
//! ## Purpose
//! Bipartite graph of species and reactions. Species→reaction links mean "is a reactant of",
//! reaction→species links mean "is a product of". The graph is built either from a parsed
//! Chemkin mechanism (`ReactionGraph::from_chemkin`) or from a serialized node/edge list
//! (`Pathways::graph_deserializer`).
//!
//! ## Main Data Structures
//! - `GraphNode`: node payload (label, kind, optional weight and content hash)
//! - `ReactionGraph`: a petgraph `DiGraph` of `GraphNode`s plus a label→`NodeIndex` map.
//!   A link between the same pair of nodes is stored once.
//!
//! ## Notes
//! - adding a node with a label that already exists updates its payload and keeps its id
//! - the weight of a reaction is its barrier; absent, zero or NaN weights count as 1
//! - neighbors are returned in the order their links were added
use crate::Mechanism::chemkin_parser::ChemkinFile;
use crate::Mechanism::equation::reactants_and_products;
use crate::errors::{MechGraphError, MechGraphResult};
use log::{info, warn};
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type NodeId = NodeIndex;
/// label of the generic third-body species
pub const THIRD_BODY_LABEL: &str = "M";
pub const DEFAULT_BARRIER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Species,
    Reaction,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Species => "species",
            NodeKind::Reaction => "reaction",
        }
    }
    /// parses the `type` tag of a serialized node
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "species" => Some(NodeKind::Species),
            "reaction" => Some(NodeKind::Reaction),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// species label or reaction equation
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub weight: Option<f64>,
    pub hash: Option<String>,
}

impl GraphNode {
    /// barrier of the node: the weight, or 1 if it is absent, zero or NaN
    pub fn barrier(&self) -> f64 {
        match self.weight {
            Some(w) if w != 0.0 && !w.is_nan() => w,
            _ => DEFAULT_BARRIER,
        }
    }

    pub fn is_reaction(&self) -> bool {
        self.kind == NodeKind::Reaction
    }

    pub fn is_species(&self) -> bool {
        self.kind == NodeKind::Species
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReactionGraph {
    graph: DiGraph<GraphNode, ()>,
    ids: HashMap<String, NodeId>,
}

impl ReactionGraph {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a node or, if the label is taken, replaces the payload of the existing node.
    pub fn add_node(
        &mut self,
        name: &str,
        kind: NodeKind,
        weight: Option<f64>,
        hash: Option<String>,
    ) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            let node = &mut self.graph[id];
            node.kind = kind;
            node.weight = weight;
            node.hash = hash;
            return id;
        }
        let id = self.graph.add_node(GraphNode {
            name: name.to_string(),
            kind,
            weight,
            hash,
        });
        self.ids.insert(name.to_string(), id);
        id
    }
    /// returns the id of a species node, creating it if it doesn't exist
    pub fn add_species(&mut self, name: &str) -> NodeId {
        match self.ids.get(name) {
            Some(&id) => id,
            None => self.add_node(name, NodeKind::Species, None, None),
        }
    }

    pub fn add_reaction(&mut self, equation: &str, weight: Option<f64>) -> NodeId {
        self.add_node(equation, NodeKind::Reaction, weight, None)
    }
    /// Adds a directed link. Returns false if the link already existed.
    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> bool {
        let existed = self.graph.contains_edge(from, to);
        self.graph.update_edge(from, to, ());
        !existed
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }
    /// like `node_id`, but an absent label is an error
    pub fn require_node(&self, name: &str) -> MechGraphResult<NodeId> {
        self.node_id(name)
            .ok_or_else(|| MechGraphError::UnknownNode(name.to_string()))
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.graph[id]
    }

    pub fn node_by_name(&self, name: &str) -> Option<&GraphNode> {
        self.node_id(name).map(|id| &self.graph[id])
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.graph[id].name
    }
    /// the underlying petgraph graph
    pub fn digraph(&self) -> &DiGraph<GraphNode, ()> {
        &self.graph
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }
    /// nodes this node links to: products of a reaction, reactions consuming a species
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        let mut links: Vec<_> = self
            .graph
            .edges_directed(id, Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        links.sort_by_key(|(edge, _)| *edge);
        links.into_iter().map(|(_, target)| target).collect()
    }
    /// nodes linking to this node: reactants of a reaction, reactions producing a species
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        let mut links: Vec<_> = self
            .graph
            .edges_directed(id, Incoming)
            .map(|edge| (edge.id(), edge.source()))
            .collect();
        links.sort_by_key(|(edge, _)| *edge);
        links.into_iter().map(|(_, source)| source).collect()
    }

    pub fn has_link(&self, from: NodeId, to: NodeId) -> bool {
        self.graph.contains_edge(from, to)
    }

    pub fn reactions(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes().filter(|(_, node)| node.is_reaction())
    }

    pub fn species(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes().filter(|(_, node)| node.is_species())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }
    /// Builds the bipartite graph of a parsed mechanism.
    ///
    /// A species node `M` always exists for third-body occurrences that were not expanded.
    /// Species that appear in equations but not in the SPECIES block are created on the fly.
    pub fn from_chemkin(mechanism: &ChemkinFile) -> Self {
        let mut graph = ReactionGraph::new();
        graph.add_species(THIRD_BODY_LABEL);
        for species in &mechanism.species {
            graph.add_species(species);
        }
        for reaction in &mechanism.reactions {
            graph.add_reaction(&reaction.equation, None);
        }
        for reaction in &mechanism.reactions {
            graph.link_reaction(&reaction.equation);
        }
        info!(
            "reaction graph built: {} nodes, {} links",
            graph.node_count(),
            graph.link_count()
        );
        graph
    }
    /// links a reaction node to its reactant and product species
    fn link_reaction(&mut self, equation: &str) {
        let Some(reaction_id) = self.node_id(equation) else {
            return;
        };
        let Some((reactants, products)) = reactants_and_products(equation) else {
            warn!("reaction without arrow left unlinked: {}", equation);
            return;
        };
        for reactant in &reactants {
            let species_id = self.species_id_for_link(reactant, equation);
            self.add_link(species_id, reaction_id);
        }
        for product in &products {
            let species_id = self.species_id_for_link(product, equation);
            self.add_link(reaction_id, species_id);
        }
    }

    fn species_id_for_link(&mut self, name: &str, equation: &str) -> NodeId {
        if self.node_id(name).is_none() {
            warn!(
                "species '{}' of reaction '{}' is not declared, node created",
                name, equation
            );
        }
        self.add_species(name)
    }
}

/// part of a species label before the `{charge,multiplicity}` annotation
pub fn species_base_name(label: &str) -> &str {
    label.split('{').next().unwrap_or(label)
}
