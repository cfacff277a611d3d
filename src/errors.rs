//! Error types shared by the mechanism parser, the graph deserializer and the file loaders.
//!
//! The path search itself never fails: a missing path is a normal result
//! (`PathResult { path: None, cost: f64::INFINITY }`), so nothing in
//! `Pathways::pathway_search` returns these errors.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MechGraphError {
    /// a mandatory ELEMENTS/SPECIES/REACTIONS block or its END terminator is missing
    #[error("malformed mechanism: block '{block}' {reason}")]
    MalformedMechanism { block: String, reason: String },
    /// one of the three rate tokens of a reaction line is not a number
    #[error("unparsable rate constant '{token}' in reaction line: {line}")]
    UnparsableRateConstant { line: String, token: String },
    #[error("unknown node: {0}")]
    UnknownNode(String),
    #[error("malformed serialized graph: {0}")]
    MalformedSerializedGraph(String),
    /// the settings file is not valid JSON or has fields of the wrong type
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MechGraphResult<T> = Result<T, MechGraphError>;
