//! # Node Filters
//!
//! ## Aim
//! Predicates over graph nodes used to hide part of a large mechanism before it is displayed
//! or exported: species by charge or multiplicity, reactions by number of partners, reactions
//! that leave their partners unchanged, a single excluded species. Filters can be combined
//! with `and` / `or`.
//!
//! Species labels may carry an annotation `name{charge,multiplicity}`, e.g. `[CH3]{0,2}`.
//! Count filters on charge or multiplicity never match labels without it.
//!
//! ## Usage
//! ```rust, ignore
//! let radicals = NodeFilter::from(MultiplicityCount::new(2, CountOperator::Equal));
//! let neutral = NodeFilter::from(ChargeCount::new(0, CountOperator::Equal));
//! let filter = combine_filters(radicals, neutral, LogicalOperator::And);
//! let kept = filter_nodes(&graph, &filter);
//! ```
use crate::Mechanism::equation::{split_equation, split_side};
use crate::Pathways::reaction_graph::{NodeId, ReactionGraph, species_base_name};
use enum_dispatch::enum_dispatch;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOperator {
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl CountOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "==" => Some(CountOperator::Equal),
            "!=" => Some(CountOperator::NotEqual),
            ">" => Some(CountOperator::Greater),
            "<" => Some(CountOperator::Less),
            ">=" => Some(CountOperator::GreaterOrEqual),
            "<=" => Some(CountOperator::LessOrEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CountOperator::Equal => "==",
            CountOperator::NotEqual => "!=",
            CountOperator::Greater => ">",
            CountOperator::Less => "<",
            CountOperator::GreaterOrEqual => ">=",
            CountOperator::LessOrEqual => "<=",
        }
    }
    /// human wording of the operator, used in filter descriptions
    pub fn words(&self) -> &'static str {
        match self {
            CountOperator::Equal => "equal to",
            CountOperator::NotEqual => "not equal to",
            CountOperator::Greater => "greater than",
            CountOperator::Less => "less than",
            CountOperator::GreaterOrEqual => "greater than or equal to",
            CountOperator::LessOrEqual => "less than or equal to",
        }
    }

    pub fn compare(&self, value: i64, count: i64) -> bool {
        match self {
            CountOperator::Equal => value == count,
            CountOperator::NotEqual => value != count,
            CountOperator::Greater => value > count,
            CountOperator::Less => value < count,
            CountOperator::GreaterOrEqual => value >= count,
            CountOperator::LessOrEqual => value <= count,
        }
    }
}

impl fmt::Display for CountOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "and" => Some(LogicalOperator::And),
            "or" => Some(LogicalOperator::Or),
            _ => None,
        }
    }

    pub fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            LogicalOperator::And => a && b,
            LogicalOperator::Or => a || b,
        }
    }
}

/// `(charge, multiplicity)` text of the trailing `{charge,multiplicity}` annotation
fn annotation(label: &str) -> Option<(&str, &str)> {
    let (_, suffix) = label.rsplit_once('{')?;
    let (charge, multiplicity) = suffix.strip_suffix('}')?.split_once(',')?;
    Some((charge.trim(), multiplicity.trim()))
}

fn annotated_charge(label: &str) -> Option<i64> {
    annotation(label)?.0.parse().ok()
}

fn annotated_multiplicity(label: &str) -> Option<i64> {
    annotation(label)?.1.parse().ok()
}

#[enum_dispatch]
pub trait NodeFilterTrait {
    /// true if the node passes the filter
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool;
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeCount {
    pub count: i64,
    pub operator: CountOperator,
}

impl ChargeCount {
    pub fn new(count: i64, operator: CountOperator) -> Self {
        Self { count, operator }
    }
}

impl NodeFilterTrait for ChargeCount {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        let node = graph.node(id);
        node.is_species()
            && annotated_charge(&node.name)
                .is_some_and(|charge| self.operator.compare(charge, self.count))
    }

    fn describe(&self) -> String {
        format!("charge {} {}", self.operator.words(), self.count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplicityCount {
    pub count: i64,
    pub operator: CountOperator,
}

impl MultiplicityCount {
    pub fn new(count: i64, operator: CountOperator) -> Self {
        Self { count, operator }
    }
}

impl NodeFilterTrait for MultiplicityCount {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        let node = graph.node(id);
        node.is_species()
            && annotated_multiplicity(&node.name)
                .is_some_and(|multiplicity| self.operator.compare(multiplicity, self.count))
    }

    fn describe(&self) -> String {
        format!("multiplicity {} {}", self.operator.words(), self.count)
    }
}

/// reactions whose two sides are written identically
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReactionEqualReactantProduct;

impl NodeFilterTrait for ReactionEqualReactantProduct {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        let node = graph.node(id);
        if !node.is_reaction() {
            return false;
        }
        match split_equation(&node.name) {
            Some((lhs, _, rhs)) => lhs.trim() == rhs.trim(),
            None => false,
        }
    }

    fn describe(&self) -> String {
        "reactants equal to products".to_string()
    }
}

/// reactions where the number of reactants or the number of products satisfies the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionMaxPartners {
    pub count: i64,
    pub operator: CountOperator,
}

impl ReactionMaxPartners {
    pub fn new(count: i64, operator: CountOperator) -> Self {
        Self { count, operator }
    }
}

impl NodeFilterTrait for ReactionMaxPartners {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        let node = graph.node(id);
        if !node.is_reaction() {
            return false;
        }
        let Some((lhs, _, rhs)) = split_equation(&node.name) else {
            return false;
        };
        let reactants = split_side(lhs).len() as i64;
        let products = split_side(rhs).len() as i64;
        self.operator.compare(reactants, self.count) || self.operator.compare(products, self.count)
    }

    fn describe(&self) -> String {
        format!("reaction partners {} {}", self.operator.words(), self.count)
    }
}

/// rejects one species, compared by base name so annotations are ignored
#[derive(Debug, Clone, PartialEq)]
pub struct Exception {
    pub label: String,
}

impl Exception {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

impl NodeFilterTrait for Exception {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        let node = graph.node(id);
        !(node.is_species() && species_base_name(&node.name) == species_base_name(&self.label))
    }

    fn describe(&self) -> String {
        format!("not {}", self.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combined {
    pub a: Box<NodeFilter>,
    pub b: Box<NodeFilter>,
    pub operator: LogicalOperator,
}

impl NodeFilterTrait for Combined {
    fn matches(&self, graph: &ReactionGraph, id: NodeId) -> bool {
        self.operator
            .apply(self.a.matches(graph, id), self.b.matches(graph, id))
    }

    fn describe(&self) -> String {
        let word = match self.operator {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        };
        format!("({} {} {})", self.a.describe(), word, self.b.describe())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(NodeFilterTrait)]
pub enum NodeFilter {
    ChargeCount(ChargeCount),
    MultiplicityCount(MultiplicityCount),
    ReactionEqualReactantProduct(ReactionEqualReactantProduct),
    ReactionMaxPartners(ReactionMaxPartners),
    Exception(Exception),
    Combined(Combined),
}

pub fn combine_filters(a: NodeFilter, b: NodeFilter, operator: LogicalOperator) -> NodeFilter {
    NodeFilter::Combined(Combined {
        a: Box::new(a),
        b: Box::new(b),
        operator,
    })
}
/// labels of the nodes that pass the filter, in node order
pub fn filter_nodes(graph: &ReactionGraph, filter: &NodeFilter) -> Vec<String> {
    graph
        .nodes()
        .filter(|(id, _)| filter.matches(graph, *id))
        .map(|(_, node)| node.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated_graph() -> ReactionGraph {
        let mut graph = ReactionGraph::new();
        let ch3 = graph.add_species("[CH3]{0,2}");
        let ch4 = graph.add_species("C{0,1}");
        let oh = graph.add_species("[OH-]{-1,1}");
        graph.add_species("H2O");
        let r1 = graph.add_reaction("[CH3]{0,2} => C{0,1}", None);
        let r2 = graph.add_reaction("[OH-]{-1,1} => [OH-]{-1,1}", None);
        let r3 = graph.add_reaction("C{0,1} + [OH-]{-1,1} => [CH3]{0,2} + [CH3]{0,2} + C{0,1}", None);
        graph.add_link(ch3, r1);
        graph.add_link(r1, ch4);
        graph.add_link(oh, r2);
        graph.add_link(r2, oh);
        graph.add_link(ch4, r3);
        graph.add_link(oh, r3);
        graph.add_link(r3, ch3);
        graph
    }

    #[test]
    fn test_count_operator() {
        assert_eq!(CountOperator::from_symbol(">="), Some(CountOperator::GreaterOrEqual));
        assert_eq!(CountOperator::from_symbol("=<"), None);
        assert!(CountOperator::LessOrEqual.compare(2, 2));
        assert!(!CountOperator::Less.compare(2, 2));
        assert_eq!(CountOperator::NotEqual.words(), "not equal to");
        assert_eq!(CountOperator::Greater.to_string(), ">");
        assert_eq!(LogicalOperator::from_word("OR"), Some(LogicalOperator::Or));
        assert!(!LogicalOperator::And.apply(true, false));
    }

    #[test]
    fn test_charge_and_multiplicity() {
        let graph = annotated_graph();
        let anions = NodeFilter::from(ChargeCount::new(0, CountOperator::Less));
        assert_eq!(filter_nodes(&graph, &anions), vec!["[OH-]{-1,1}"]);
        let radicals = NodeFilter::from(MultiplicityCount::new(2, CountOperator::Equal));
        assert_eq!(filter_nodes(&graph, &radicals), vec!["[CH3]{0,2}"]);
        // labels without annotation never match
        let any_charge = NodeFilter::from(ChargeCount::new(-100, CountOperator::Greater));
        assert!(!filter_nodes(&graph, &any_charge).contains(&"H2O".to_string()));
    }

    #[test]
    fn test_annotation_after_last_brace() {
        assert_eq!(annotated_charge("[C,C]{0,2}"), Some(0));
        assert_eq!(annotated_multiplicity("[C,C]{0,2}"), Some(2));
        assert_eq!(annotated_charge("[NH4+]{ 1, 1}"), Some(1));
        assert_eq!(annotated_multiplicity("C{0,1"), None);
        assert_eq!(annotated_charge("H2O"), None);

        let mut graph = ReactionGraph::new();
        graph.add_species("[C,C]{0,2}");
        graph.add_species("[C,C]{0,1}");
        let radicals = NodeFilter::from(MultiplicityCount::new(2, CountOperator::Equal));
        assert_eq!(filter_nodes(&graph, &radicals), vec!["[C,C]{0,2}"]);
    }

    #[test]
    fn test_reaction_filters() {
        let graph = annotated_graph();
        let unchanged = NodeFilter::from(ReactionEqualReactantProduct);
        assert_eq!(
            filter_nodes(&graph, &unchanged),
            vec!["[OH-]{-1,1} => [OH-]{-1,1}"]
        );
        let many = NodeFilter::from(ReactionMaxPartners::new(3, CountOperator::GreaterOrEqual));
        assert_eq!(
            filter_nodes(&graph, &many),
            vec!["C{0,1} + [OH-]{-1,1} => [CH3]{0,2} + [CH3]{0,2} + C{0,1}"]
        );
    }

    #[test]
    fn test_exception_and_combination() {
        let graph = annotated_graph();
        let not_methyl = NodeFilter::from(Exception::new("[CH3]"));
        let kept = filter_nodes(&graph, &not_methyl);
        assert_eq!(kept.len(), graph.node_count() - 1);
        assert!(!kept.contains(&"[CH3]{0,2}".to_string()));

        let neutral = NodeFilter::from(ChargeCount::new(0, CountOperator::Equal));
        let both = combine_filters(neutral.clone(), not_methyl.clone(), LogicalOperator::And);
        assert_eq!(filter_nodes(&graph, &both), vec!["C{0,1}"]);
        let either = combine_filters(neutral, not_methyl, LogicalOperator::Or);
        assert_eq!(filter_nodes(&graph, &either).len(), graph.node_count());
        assert_eq!(
            both.describe(),
            "(charge equal to 0 and not [CH3])"
        );
    }
}
