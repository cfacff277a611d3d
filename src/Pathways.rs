/// Bipartite species/reaction graph and its construction from a parsed mechanism.
pub mod reaction_graph;
/// Reading of precomputed graphs exported as node/edge JSON.
pub mod graph_deserializer;
/// Reaction-to-reaction edges with their dependency sets.
pub mod adjacency_index;
/// Min-priority queue with first-in-first-out order among equal priorities.
pub mod priority_queue;
/// Lowest-barrier pathway search from starting species to a target species.
///
/// # Examples
/// ```
/// use MechGraph::Mechanism::chemkin_parser::parse_chemkin;
/// use MechGraph::Pathways::pathway_search::PathSearchGraph;
/// let text = "ELEMENTS\nH O\nEND\nSPECIES\nH2 O2 H2O\nEND\nREACTIONS\nH2+O2=>H2O 1.0 0.0 0.0\nEND";
/// let search = PathSearchGraph::from_chemkin(&parse_chemkin(text).unwrap());
/// let result = search.shortest_path(["H2", "O2"], "H2O");
/// assert_eq!(result.path, Some(vec!["H2 + O2 => H2O".to_string()]));
/// assert_eq!(result.cost, 1.0);
/// ```
pub mod pathway_search;
/// Predicates for hiding species and reactions of a graph.
pub mod node_filter;
