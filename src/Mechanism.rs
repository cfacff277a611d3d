/// Reading of Chemkin mechanism files.
///
/// The parser takes the text of a mechanism (ELEMENTS, SPECIES and REACTIONS blocks) and returns
/// sorted elements, sorted species and the list of elementary reactions. Reactions with a generic
/// third body `M` are expanded into one reaction per collision partner listed after them.
/// PLOG and Chebyshev reactions are recognized and dropped.
///
/// # Examples
/// ```
/// use MechGraph::Mechanism::chemkin_parser::ChemkinParser;
/// let text = "ELEMENTS\nH O\nEND\nSPECIES\nH2 O2 H2O\nEND\nREACTIONS\nH2+O2=>H2O 1.0 0.0 0.0\nEND";
/// let mechanism = ChemkinParser::new().parse(text).unwrap();
/// assert_eq!(mechanism.elements, vec!["H", "O"]);
/// assert_eq!(mechanism.species, vec!["H2", "H2O", "O2"]);
/// assert_eq!(mechanism.reactions[0].equation, "H2 + O2 => H2O");
/// ```
pub mod chemkin_parser;
/// Splitting of equations into reactant and product species, canonical equation labels.
pub mod equation;
