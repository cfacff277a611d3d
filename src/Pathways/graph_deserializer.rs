//! Loading of precomputed reaction graphs from a graphology-style JSON export.
//!
//! ```json
//! {
//!   "nodes": [{"key": "A", "attributes": {"type": "species", "hash": "..."}},
//!             {"key": "A => B", "attributes": {"type": "reaction", "hash": "...", "weight": 2.0}}],
//!   "edges": [{"source": "A", "target": "A => B"}]
//! }
//! ```
//! The edge list may also be called `links`. Node keys become node labels, edges become
//! directed links. Beyond the shape of the document nothing is validated: the input is
//! trusted to already be a bipartite species/reaction graph.
use crate::Pathways::reaction_graph::{NodeKind, ReactionGraph};
use crate::errors::{MechGraphError, MechGraphResult};
use log::info;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct SerializedNodeAttributes {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerializedNode {
    pub key: String,
    pub attributes: SerializedNodeAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerializedEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerializedGraph {
    pub nodes: Vec<SerializedNode>,
    #[serde(rename = "links", alias = "edges", default)]
    pub links: Vec<SerializedEdge>,
}

impl SerializedGraph {
    /// Turns the node/edge lists into a `ReactionGraph`.
    ///
    /// # Returns
    /// * `Err(MechGraphError::MalformedSerializedGraph)` - a node has an unknown `type`
    ///   or an edge names a node that is not in the node list
    pub fn into_graph(self) -> MechGraphResult<ReactionGraph> {
        let mut graph = ReactionGraph::new();
        for node in self.nodes {
            let kind = NodeKind::from_tag(&node.attributes.node_type).ok_or_else(|| {
                MechGraphError::MalformedSerializedGraph(format!(
                    "node '{}' has unknown type '{}'",
                    node.key, node.attributes.node_type
                ))
            })?;
            graph.add_node(
                &node.key,
                kind,
                node.attributes.weight,
                node.attributes.hash,
            );
        }
        for edge in &self.links {
            let endpoint = |key: &str| {
                graph.node_id(key).ok_or_else(|| {
                    MechGraphError::MalformedSerializedGraph(format!(
                        "edge {} -> {} refers to unknown node '{}'",
                        edge.source, edge.target, key
                    ))
                })
            };
            let from = endpoint(&edge.source)?;
            let to = endpoint(&edge.target)?;
            graph.add_link(from, to);
        }
        info!(
            "reaction graph deserialized: {} nodes, {} links",
            graph.node_count(),
            graph.link_count()
        );
        Ok(graph)
    }
}

pub fn graph_from_value(value: Value) -> MechGraphResult<ReactionGraph> {
    let serialized: SerializedGraph = serde_json::from_value(value)
        .map_err(|e| MechGraphError::MalformedSerializedGraph(e.to_string()))?;
    serialized.into_graph()
}

pub fn graph_from_json_str(json: &str) -> MechGraphResult<ReactionGraph> {
    let serialized: SerializedGraph = serde_json::from_str(json)
        .map_err(|e| MechGraphError::MalformedSerializedGraph(e.to_string()))?;
    serialized.into_graph()
}
