//! # Chemkin Mechanism Parser
//!
//! ## Aim
//! Turns the text of a Chemkin mechanism file into a normalized list of elements,
//! species and elementary reactions. Rate expressions are read as three opaque
//! numbers and never evaluated.
//!
//! ## Main Data Structures and Logic
//! - `ChemkinFile`: parsed mechanism (sorted elements, sorted species, ordered reactions)
//! - `ChemkinReaction`: canonical equation plus the rate triple
//! - `ChemkinParser`: the parser, configured by `MechGraphSettings`
//! - `LineCursor`: reaction-block cursor with `advance`/`peek`/`rewind`, needed because
//!   third-body reactions own the lines that follow them
//!
//! ## Third-body reactions
//! An equation containing `M` may be followed by `LOW`/`TROE` lines and then by a line of
//! collision partners with efficiencies (`N2/1.0/ AR/0.5/`). Each partner gives a separate
//! reaction with `M` replaced by the partner name. If no partner line follows, the equation
//! is kept with its `M`.
//!
//! ## Usage
//! ```rust, ignore
//! let parser = ChemkinParser::new();
//! let mechanism = parser.parse(&text)?;
//! mechanism.pretty_print();
//! ```
use crate::Mechanism::equation::canonical_equation;
use crate::errors::{MechGraphError, MechGraphResult};
use crate::settings::{MechGraphSettings, RateErrorPolicy};
use log::{debug, error, info, warn};
use prettytable::{Cell, Row, Table, row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ELEMENTS_KEYWORD: &str = "ELEMENTS";
const SPECIES_KEYWORD: &str = "SPECIES";
const REACTIONS_KEYWORD: &str = "REACTIONS";
const END_KEYWORD: &str = "END";
/// auxiliary rate-modifier lines that may follow a third-body reaction
const THIRD_BODY_AUX_LINES: [&str; 2] = ["LOW", "TROE"];
const THIRD_BODY: char = 'M';

/// one elementary reaction of a mechanism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemkinReaction {
    pub equation: String,
    pub rate: f64,
    pub rate2: f64,
    pub rate3: f64,
}

impl ChemkinReaction {
    /// creates a reaction, the equation is brought to its canonical form
    pub fn new(equation: &str, rate: f64, rate2: f64, rate3: f64) -> Self {
        Self {
            equation: canonical_equation(equation),
            rate,
            rate2,
            rate3,
        }
    }
}

/// parsed mechanism
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChemkinFile {
    pub elements: Vec<String>,
    pub species: Vec<String>,
    pub reactions: Vec<ChemkinReaction>,
}

impl ChemkinFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Elements", self.elements.join(" ")]);
        table.add_row(row!["Species", self.species.join(" ")]);
        table.printstd();

        let mut table = Table::new();
        table.add_row(row!["#", "Equation", "rate", "rate2", "rate3"]);
        for (i, reaction) in self.reactions.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&i.to_string()),
                Cell::new(&reaction.equation),
                Cell::new(&format!("{:e}", reaction.rate)),
                Cell::new(&reaction.rate2.to_string()),
                Cell::new(&reaction.rate3.to_string()),
            ]));
        }
        table.printstd();
    }
}

/// Cursor over the lines of the REACTIONS block.
pub struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, pos: 0 }
    }
    /// returns the current line and moves past it
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }
    /// returns the current line without moving
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }
    /// steps back one line so that the last line returned by `advance` is read again
    pub fn rewind(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('!') && !line.trim().is_empty()
}

/// Finds the block opened by `keyword` and closed by the next `END` line.
/// Returns the lines inside the block and the lines after its `END`.
fn take_block<'a, 'b>(
    lines: &'b [&'a str],
    keyword: &str,
) -> MechGraphResult<(&'b [&'a str], &'b [&'a str])> {
    let start = lines
        .iter()
        .position(|line| line.starts_with(keyword))
        .ok_or_else(|| MechGraphError::MalformedMechanism {
            block: keyword.to_string(),
            reason: "keyword not found".to_string(),
        })?;
    let end = lines[start + 1..]
        .iter()
        .position(|line| line.starts_with(END_KEYWORD))
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| MechGraphError::MalformedMechanism {
            block: keyword.to_string(),
            reason: "has no END terminator".to_string(),
        })?;
    Ok((&lines[start + 1..end], &lines[end + 1..]))
}

/// whitespace tokens of all lines, deduplicated and sorted
fn collect_tokens(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .map(|token| token.to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Parses one rate token. Fortran-style `D` exponents are accepted;
/// anything that is not a finite number is an error.
fn parse_rate(token: &str, line: &str) -> MechGraphResult<f64> {
    let unparsable = || MechGraphError::UnparsableRateConstant {
        line: line.trim().to_string(),
        token: token.to_string(),
    };
    let value: f64 = token
        .replace(['D', 'd'], "E")
        .parse()
        .map_err(|_| unparsable())?;
    if !value.is_finite() {
        return Err(unparsable());
    }
    Ok(value)
}

pub struct ChemkinParser {
    pub settings: MechGraphSettings,
}

impl ChemkinParser {
    pub fn new() -> Self {
        Self {
            settings: MechGraphSettings::default(),
        }
    }

    pub fn with_settings(settings: &MechGraphSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }
    /// Parses the full text of a mechanism file.
    ///
    /// # Returns
    /// * `Ok(ChemkinFile)` - elements and species sorted, reactions in file order
    /// * `Err(MechGraphError::MalformedMechanism)` - a block keyword or its END is missing
    /// * `Err(MechGraphError::UnparsableRateConstant)` - a rate token is not a number
    ///   (only with `RateErrorPolicy::Fail`)
    pub fn parse(&self, text: &str) -> MechGraphResult<ChemkinFile> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !is_comment(line))
            .collect();

        let (element_lines, rest) = take_block(&lines, ELEMENTS_KEYWORD)?;
        let elements = collect_tokens(element_lines);
        let (species_lines, rest) = take_block(rest, SPECIES_KEYWORD)?;
        let species = collect_tokens(species_lines);
        let (reaction_lines, _) = take_block(rest, REACTIONS_KEYWORD)?;
        let reactions = self.parse_reactions(reaction_lines)?;

        info!(
            "parsed mechanism: {} elements, {} species, {} reactions",
            elements.len(),
            species.len(),
            reactions.len()
        );
        Ok(ChemkinFile {
            elements,
            species,
            reactions,
        })
    }

    fn parse_reactions(&self, lines: &[&str]) -> MechGraphResult<Vec<ChemkinReaction>> {
        let mut reactions = Vec::new();
        let mut cursor = LineCursor::new(lines);
        while let Some(line) = cursor.advance() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            // auxiliary data or incomplete line
            if tokens.len() <= 3 {
                continue;
            }
            let equation = tokens[0];
            if THIRD_BODY_AUX_LINES
                .iter()
                .any(|aux| equation.starts_with(aux))
            {
                // fall-off data of a reaction with an explicit bath gas
                debug!("skipping auxiliary line: {}", line.trim());
                continue;
            }
            if self.settings.is_unsupported_form(equation) {
                debug!("skipping unsupported rate form: {}", line.trim());
                continue;
            }
            let rates = parse_rate(tokens[1], line).and_then(|rate| {
                Ok((rate, parse_rate(tokens[2], line)?, parse_rate(tokens[3], line)?))
            });
            let rates = match (rates, self.settings.rate_error_policy) {
                (Ok(rates), _) => rates,
                (Err(e), RateErrorPolicy::Fail) => {
                    error!("{}", e);
                    return Err(e);
                }
                (Err(e), RateErrorPolicy::Skip) => {
                    warn!("{}, reaction skipped", e);
                    if equation.contains(THIRD_BODY) {
                        self.third_body_equations(equation, &mut cursor);
                    }
                    continue;
                }
            };
            let (rate, rate2, rate3) = rates;
            let equations = if equation.contains(THIRD_BODY) {
                self.third_body_equations(equation, &mut cursor)
            } else {
                vec![equation.to_string()]
            };
            for eq in equations {
                let reaction = ChemkinReaction::new(&eq, rate, rate2, rate3);
                debug!("reaction: {}", reaction.equation);
                reactions.push(reaction);
            }
        }
        Ok(reactions)
    }

    fn looks_like_reaction(&self, line: &str) -> bool {
        line.contains('=')
            || self
                .settings
                .unsupported_rate_forms
                .iter()
                .any(|form| line.contains(form.as_str()))
    }
    /// Expands a third-body equation into one equation per collision partner,
    /// consuming the LOW/TROE lines and the partner line that follow it.
    fn third_body_equations(&self, equation: &str, cursor: &mut LineCursor) -> Vec<String> {
        let mut next_line = None;
        while let Some(line) = cursor.advance() {
            let trimmed = line.trim();
            if THIRD_BODY_AUX_LINES
                .iter()
                .any(|aux| trimmed.starts_with(aux))
            {
                continue;
            }
            next_line = Some(trimmed);
            break;
        }
        let Some(line) = next_line else {
            // block ended right after the reaction
            return vec![equation.to_string()];
        };
        if line.is_empty() || self.looks_like_reaction(line) {
            // no explicit partner list, the next line is read again as a reaction
            cursor.rewind();
            return vec![equation.to_string()];
        }
        let partners: Vec<&str> = line
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .step_by(2)
            .take_while(|token| !token.starts_with('!'))
            .collect();
        if partners.is_empty() {
            warn!("third-body line without species after '{}': {}", equation, line);
            return vec![equation.to_string()];
        }
        debug!("{} expanded over {:?}", equation, partners);
        partners
            .iter()
            .map(|partner| equation.replace(THIRD_BODY, partner))
            .collect()
    }
}

impl Default for ChemkinParser {
    fn default() -> Self {
        Self::new()
    }
}

/// parses mechanism text with default settings
pub fn parse_chemkin(text: &str) -> MechGraphResult<ChemkinFile> {
    ChemkinParser::new().parse(text)
}
