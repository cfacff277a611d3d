//! Splitting of reaction equations into reactant and product species.
//!
//! Equations arrive from Chemkin files written without spaces (`H2+O2=>H2O`),
//! from serialized graphs and from third-body expansion. Everything that needs
//! the two sides of an equation goes through this module so that the parser's
//! canonical labels and the graph builder's species links agree.
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// reaction arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// `=>`
    Forward,
    /// `<=>`
    Reversible,
    /// `=`
    Equal,
}

impl Arrow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arrow::Forward => "=>",
            Arrow::Reversible => "<=>",
            Arrow::Equal => "=",
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Splits an equation at its first arrow.
/// Returns `None` if the equation has no `=` at all.
pub fn split_equation(equation: &str) -> Option<(&str, Arrow, &str)> {
    let idx = equation.find('=')?;
    let before = &equation[..idx];
    let after = &equation[idx + 1..];
    if before.ends_with('<') && after.starts_with('>') {
        Some((&before[..before.len() - 1], Arrow::Reversible, &after[1..]))
    } else if after.starts_with('>') {
        Some((before, Arrow::Forward, &after[1..]))
    } else {
        Some((before, Arrow::Equal, after))
    }
}

/// Splits one side of an equation into species tokens.
///
/// `+` only separates species outside parentheses, so a fall-off marker like
/// `CH3(+M)` stays one token. A `+` that leaves an empty piece behind is the
/// charge of the preceding ion: `H3O++E` gives `["H3O+", "E"]`.
pub fn split_side(side: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    for c in side.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            '+' if depth <= 0 => {
                pieces.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    pieces.push(current);

    let mut species: Vec<String> = Vec::new();
    for piece in pieces {
        let piece = piece.trim();
        if piece.is_empty() {
            if let Some(last) = species.last_mut() {
                last.push('+');
            }
            continue;
        }
        species.push(piece.to_string());
    }
    species
}

/// Canonical form of an equation: species joined by `" + "`, arrow padded with single spaces.
/// An equation without an arrow is returned trimmed but otherwise untouched.
pub fn canonical_equation(equation: &str) -> String {
    match split_equation(equation.trim()) {
        Some((lhs, arrow, rhs)) => format!(
            "{} {} {}",
            split_side(lhs).join(" + "),
            arrow,
            split_side(rhs).join(" + ")
        ),
        None => equation.trim().to_string(),
    }
}

fn pressure_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\+([^\)]+)\)").expect("valid pressure marker regex"))
}

fn coefficient_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+(\.\d+)?([A-Za-z\[\(].*)$").expect("valid coefficient regex")
    })
}

/// rewrites fall-off markers `(+X)` to a plain `+X`
pub fn strip_pressure_parentheses(equation: &str) -> String {
    pressure_marker_regex()
        .replace_all(equation, "+$1")
        .into_owned()
}

/// Removes a leading stoichiometric coefficient: `2OH` -> `OH`, `0.5O2` -> `O2`.
/// Names that merely begin with a digit, like `1-C4H8`, are kept.
pub fn strip_coefficient(token: &str) -> &str {
    match coefficient_regex().captures(token) {
        Some(caps) => caps.get(2).map_or(token, |m| m.as_str()),
        None => token,
    }
}

/// Reactant and product species of an equation as they are linked in the reaction graph.
pub fn reactants_and_products(equation: &str) -> Option<(Vec<String>, Vec<String>)> {
    let normalized = strip_pressure_parentheses(equation);
    let (lhs, _arrow, rhs) = split_equation(&normalized)?;
    let side = |s: &str| -> Vec<String> {
        split_side(s)
            .iter()
            .map(|token| strip_coefficient(token).to_string())
            .filter(|token| !token.is_empty())
            .collect()
    };
    Some((side(lhs), side(rhs)))
}
