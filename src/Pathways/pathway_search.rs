//! # Pathway Search Module
//!
//! ## Aim
//! Finds the cheapest chain of reactions that turns a set of starting species into a target
//! species. Costs are reaction barriers (node weights, 1 by default).
//!
//! ## Main Data Structures and Logic
//! - `PathSearchGraph`: owns the bipartite `ReactionGraph` and the `AdjacencyIndex` derived
//!   from it; both are immutable after construction, so one instance can serve many
//!   concurrent queries
//! - `StartSpecies`: one or several starting species, merged into a single search
//! - `PathResult`: labels of the reactions on the path and its total cost
//!
//! ## Adapted Dijkstra
//! Search states are `(cost, reaction, path, pool)`, where the pool is the set of species
//! touched by the reactions on the path. A successor reaction is only expanded when its
//! dependency set (reactants the current reaction does not produce) is contained in the pool.
//! The first time a reaction is popped it is final; the first final end reaction is the answer.
//!
//! ## Usage
//! ```rust, ignore
//! let search = PathSearchGraph::from_chemkin(&mechanism);
//! let result = search.shortest_path(["H2", "O2"], "H2O");
//! result.pretty_print();
//! ```
use crate::Mechanism::chemkin_parser::ChemkinFile;
use crate::Pathways::adjacency_index::AdjacencyIndex;
use crate::Pathways::priority_queue::StablePriorityQueue;
use crate::Pathways::reaction_graph::{NodeId, ReactionGraph};
use log::{debug, info};
use prettytable::{Cell, Row, Table, row};
use serde::Serialize;
use std::collections::HashSet;

/// starting species of a search: a single label or a set of labels
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartSpecies(pub Vec<String>);

impl From<&str> for StartSpecies {
    fn from(species: &str) -> Self {
        StartSpecies(vec![species.to_string()])
    }
}

impl From<String> for StartSpecies {
    fn from(species: String) -> Self {
        StartSpecies(vec![species])
    }
}

impl From<Vec<String>> for StartSpecies {
    fn from(species: Vec<String>) -> Self {
        StartSpecies(species)
    }
}

impl From<Vec<&str>> for StartSpecies {
    fn from(species: Vec<&str>) -> Self {
        StartSpecies(species.into_iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[&str]> for StartSpecies {
    fn from(species: &[&str]) -> Self {
        StartSpecies(species.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StartSpecies {
    fn from(species: [&str; N]) -> Self {
        StartSpecies(species.iter().map(|s| s.to_string()).collect())
    }
}

/// result of a search: `path` is `None` and `cost` is infinite if the target can't be reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Option<Vec<String>>,
    pub cost: f64,
}

impl PathResult {
    pub fn found(path: Vec<String>, cost: f64) -> Self {
        Self {
            path: Some(path),
            cost,
        }
    }

    pub fn no_path() -> Self {
        Self {
            path: None,
            cost: f64::INFINITY,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    pub fn pretty_print(&self) {
        match &self.path {
            Some(path) => {
                let mut table = Table::new();
                table.add_row(row!["Step", "Reaction"]);
                for (i, reaction) in path.iter().enumerate() {
                    table.add_row(Row::new(vec![
                        Cell::new(&(i + 1).to_string()),
                        Cell::new(reaction),
                    ]));
                }
                table.add_row(row!["Total cost", self.cost.to_string()]);
                table.printstd();
            }
            None => println!("no path found, cost = {}", self.cost),
        }
    }
}

/// one entry of the search queue
#[derive(Debug, Clone)]
struct SearchState {
    cost: f64,
    reaction: NodeId,
    path: Vec<NodeId>,
    pool: HashSet<NodeId>,
}

#[derive(Debug, Clone)]
pub struct PathSearchGraph {
    graph: ReactionGraph,
    adj: AdjacencyIndex,
}

impl PathSearchGraph {
    /// takes ownership of the graph and builds its adjacency index
    pub fn new(graph: ReactionGraph) -> Self {
        let adj = AdjacencyIndex::build(&graph);
        Self { graph, adj }
    }

    pub fn from_chemkin(mechanism: &ChemkinFile) -> Self {
        Self::new(ReactionGraph::from_chemkin(mechanism))
    }

    pub fn graph(&self) -> &ReactionGraph {
        &self.graph
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adj
    }
    /// Reactions that can fire with the starting species alone: every reactant link of the
    /// reaction comes from a starting species. Unknown labels are ignored.
    pub fn starting_nodes(&self, starting_species: &[String]) -> Vec<NodeId> {
        let start_ids: HashSet<NodeId> = starting_species
            .iter()
            .filter_map(|label| self.graph.node_id(label))
            .collect();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for label in starting_species {
            let Some(species) = self.graph.node_id(label) else {
                continue;
            };
            for reaction in self.graph.successors(species) {
                if seen.insert(reaction) {
                    candidates.push(reaction);
                }
            }
        }
        candidates
            .into_iter()
            .filter(|&reaction| {
                self.graph
                    .predecessors(reaction)
                    .iter()
                    .all(|reactant| start_ids.contains(reactant))
            })
            .collect()
    }
    /// reactions producing the target species, empty if the label is unknown
    pub fn end_nodes(&self, product: &str) -> Vec<NodeId> {
        match self.graph.node_id(product) {
            Some(target) => self.graph.predecessors(target),
            None => Vec::new(),
        }
    }
    /// Cheapest admissible path from any of the start species to the target.
    pub fn shortest_path<S: Into<StartSpecies>>(&self, from: S, to: &str) -> PathResult {
        let StartSpecies(from_keys) = from.into();
        let start_nodes = self.starting_nodes(&from_keys);
        let end_nodes = self.end_nodes(to);
        let starting_barriers: Vec<f64> = start_nodes
            .iter()
            .map(|&reaction| self.graph.node(reaction).barrier())
            .collect();
        info!(
            "searching {:?} -> {}: {} start reactions, {} end reactions",
            from_keys,
            to,
            start_nodes.len(),
            end_nodes.len()
        );
        self.adapted_dijkstra(&start_nodes, &end_nodes, &starting_barriers)
    }
    /// Runs independent queries against the same index.
    pub fn shortest_paths(&self, queries: &[(StartSpecies, String)]) -> Vec<PathResult> {
        queries
            .iter()
            .map(|(from, to)| self.shortest_path(from.clone(), to))
            .collect()
    }
    /// Dependency-gated Dijkstra over the adjacency index.
    ///
    /// # Arguments
    /// * `start_nodes` - reactions the search starts from
    /// * `end_nodes` - reactions that finish the search
    /// * `starting_barriers` - initial cost of each start reaction; missing entries take
    ///   the barrier of the reaction
    pub fn adapted_dijkstra(
        &self,
        start_nodes: &[NodeId],
        end_nodes: &[NodeId],
        starting_barriers: &[f64],
    ) -> PathResult {
        let end: HashSet<NodeId> = end_nodes.iter().copied().collect();
        let mut queue = StablePriorityQueue::new();
        for (i, &start) in start_nodes.iter().enumerate() {
            let barrier = starting_barriers
                .get(i)
                .copied()
                .unwrap_or_else(|| self.graph.node(start).barrier());
            let pool: HashSet<NodeId> = self
                .graph
                .predecessors(start)
                .into_iter()
                .chain(self.graph.successors(start))
                .collect();
            queue.enqueue(
                SearchState {
                    cost: barrier,
                    reaction: start,
                    path: Vec::new(),
                    pool,
                },
                barrier,
            );
        }

        let mut finalized: HashSet<NodeId> = HashSet::new();
        while let Some(state) = queue.dequeue() {
            if !finalized.insert(state.reaction) {
                continue;
            }
            let SearchState {
                cost,
                reaction,
                mut path,
                mut pool,
            } = state;
            path.push(reaction);
            pool.extend(self.graph.successors(reaction));
            debug!("finalized {} at cost {}", self.graph.name(reaction), cost);

            if end.contains(&reaction) {
                let labels = path
                    .iter()
                    .map(|&id| self.graph.name(id).to_string())
                    .collect();
                return PathResult::found(labels, cost);
            }

            for edge in self.adj.edges_from(reaction) {
                if finalized.contains(&edge.target) || !edge.is_admissible(&pool) {
                    continue;
                }
                let new_cost = cost + edge.weight;
                queue.enqueue(
                    SearchState {
                        cost: new_cost,
                        reaction: edge.target,
                        path: path.clone(),
                        pool: pool.clone(),
                    },
                    new_cost,
                );
            }
        }
        PathResult::no_path()
    }
}
