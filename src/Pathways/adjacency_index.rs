//! Reaction-to-reaction adjacency derived from the bipartite graph.
//!
//! An edge `R -> S` exists when S consumes one of R's products. It carries the barrier of S
//! and the dependency set of S: the reactants of S that R does not produce and that therefore
//! must already be available from earlier steps of a pathway. The index is built once and is
//! read-only afterwards.
use crate::Pathways::reaction_graph::{NodeId, ReactionGraph};
use log::{info, warn};
use prettytable::{Cell, Row, Table, row};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    /// successor reaction
    pub target: NodeId,
    /// barrier of the successor reaction
    pub weight: f64,
    /// reactants of the successor not produced by the predecessor
    pub dependency: Vec<NodeId>,
}

impl DependencyEdge {
    /// true if every species of the dependency set is in the pool
    pub fn is_admissible(&self, pool: &HashSet<NodeId>) -> bool {
        self.dependency.iter().all(|species| pool.contains(species))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    edges: HashMap<NodeId, Vec<DependencyEdge>>,
}

/// ids in first-seen order without repeats
fn distinct(ids: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

impl AdjacencyIndex {
    pub fn build(graph: &ReactionGraph) -> Self {
        let mut edges: HashMap<NodeId, Vec<DependencyEdge>> = HashMap::new();
        let mut negative_barriers = 0;
        for (reaction, _) in graph.reactions() {
            let products = distinct(graph.successors(reaction));
            let connected_reactions = distinct(
                products
                    .iter()
                    .flat_map(|&product| graph.successors(product))
                    .filter(|&next| graph.node(next).is_reaction()),
            );
            for next in connected_reactions {
                let dependency: Vec<NodeId> = distinct(
                    graph
                        .predecessors(next)
                        .into_iter()
                        .filter(|reactant| !products.contains(reactant)),
                );
                let weight = graph.node(next).barrier();
                if weight < 0.0 {
                    negative_barriers += 1;
                }
                edges.entry(reaction).or_default().push(DependencyEdge {
                    target: next,
                    weight,
                    dependency,
                });
            }
        }
        if negative_barriers > 0 {
            warn!(
                "{} edges lead to reactions with negative barriers, shortest paths may be wrong",
                negative_barriers
            );
        }
        let index = Self { edges };
        info!(
            "adjacency index built: {} reactions with successors, {} edges",
            index.len(),
            index.edge_count()
        );
        index
    }
    /// outgoing edges of a reaction, empty if it has no successors
    pub fn edges_from(&self, reaction: NodeId) -> &[DependencyEdge] {
        self.edges
            .get(&reaction)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }
    /// number of reactions that have at least one successor
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|edges| edges.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Vec<DependencyEdge>)> {
        self.edges.iter()
    }

    pub fn pretty_print(&self, graph: &ReactionGraph) {
        let mut table = Table::new();
        table.add_row(row!["Reaction", "Next reaction", "Barrier", "Needs"]);
        let mut sources: Vec<&NodeId> = self.edges.keys().collect();
        sources.sort_by_key(|&&id| graph.name(id));
        for &source in sources {
            for edge in self.edges_from(source) {
                let needs: Vec<&str> = edge.dependency.iter().map(|&id| graph.name(id)).collect();
                table.add_row(Row::new(vec![
                    Cell::new(graph.name(source)),
                    Cell::new(graph.name(edge.target)),
                    Cell::new(&edge.weight.to_string()),
                    Cell::new(&needs.join(", ")),
                ]));
            }
        }
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mechanism::chemkin_parser::parse_chemkin;
    use crate::Pathways::reaction_graph::NodeKind;

    fn graph_from_equations(equations: &[&str]) -> ReactionGraph {
        let reactions: String = equations
            .iter()
            .map(|eq| format!("{} 1.0 0.0 0.0\n", eq))
            .collect();
        let text = format!("ELEMENTS\nC\nEND\nSPECIES\nA X Y Z\nEND\nREACTIONS\n{}END", reactions);
        ReactionGraph::from_chemkin(&parse_chemkin(&text).unwrap())
    }

    fn names(graph: &ReactionGraph, ids: &[NodeId]) -> Vec<String> {
        let mut v: Vec<String> = ids.iter().map(|&id| graph.name(id).to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_dependency_edge() {
        let graph = graph_from_equations(&["A=>X", "X+Y=>Z"]);
        let index = AdjacencyIndex::build(&graph);
        let first = graph.node_id("A => X").unwrap();
        let second = graph.node_id("X + Y => Z").unwrap();
        let edges = index.edges_from(first);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, second);
        assert_eq!(edges[0].weight, 1.0);
        assert_eq!(names(&graph, &edges[0].dependency), vec!["Y"]);
        assert!(index.edges_from(second).is_empty());
        assert_eq!(index.len(), 1);
        assert_eq!(index.edge_count(), 1);
    }

    #[test]
    fn test_dependency_soundness() {
        let graph = graph_from_equations(&[
            "A=>X",
            "A=>X+Y",
            "X+Y=>Z",
            "X=>Y",
            "Y+Z=>A",
            "Z=>X+A",
            "X+Z<=>A+Y",
        ]);
        let index = AdjacencyIndex::build(&graph);
        assert!(!index.is_empty());
        for (&source, edges) in index.iter() {
            let products = graph.successors(source);
            for edge in edges {
                let reactants = graph.predecessors(edge.target);
                for species in &edge.dependency {
                    assert!(reactants.contains(species));
                    assert!(!products.contains(species));
                }
            }
        }
    }

    #[test]
    fn test_weight_of_target() {
        let mut graph = ReactionGraph::new();
        let a = graph.add_species("A");
        let b = graph.add_species("B");
        let c = graph.add_species("C");
        let r1 = graph.add_node("A => B", NodeKind::Reaction, Some(4.0), None);
        let r2 = graph.add_node("B => C", NodeKind::Reaction, Some(7.5), None);
        graph.add_link(a, r1);
        graph.add_link(r1, b);
        graph.add_link(b, r2);
        graph.add_link(r2, c);
        let index = AdjacencyIndex::build(&graph);
        let edges = index.edges_from(r1);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].weight, 7.5);
        assert!(edges[0].dependency.is_empty());
    }

    #[test]
    fn test_admissibility() {
        let edge = DependencyEdge {
            target: NodeId::new(0),
            weight: 1.0,
            dependency: vec![NodeId::new(1), NodeId::new(2)],
        };
        let mut pool: HashSet<NodeId> = [NodeId::new(1)].into_iter().collect();
        assert!(!edge.is_admissible(&pool));
        pool.insert(NodeId::new(2));
        assert!(edge.is_admissible(&pool));
    }
}
