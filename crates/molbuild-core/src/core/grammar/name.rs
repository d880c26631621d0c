use super::end_name::parse_end_name;
use super::{GrammarError, SideToken};
use std::collections::BTreeSet;

/// The single-letter prefixes reserved for expansion-factor tokens.
const VARIABLE_PREFIXES: [char; 5] = ['n', 'm', 'x', 'y', 'z'];

/// The names a fragment store makes available to the grammar.
///
/// The parser needs to know which 3-character core names exist (for core
/// recognition) and which single-character fragment names exist (for the
/// middle-linker disambiguation), but nothing else about the store — this
/// catalog keeps it decoupled from file I/O.
#[derive(Debug, Clone, Default)]
pub struct FragmentCatalog {
    cores: BTreeSet<String>,
    singles: BTreeSet<char>,
}

impl FragmentCatalog {
    pub fn new(
        cores: impl IntoIterator<Item = String>,
        singles: impl IntoIterator<Item = char>,
    ) -> Self {
        Self {
            cores: cores.into_iter().collect(),
            singles: singles.into_iter().collect(),
        }
    }

    /// Case-insensitively resolves a token to a stored core name.
    pub fn resolve_core(&self, token: &str) -> Option<&str> {
        self.cores
            .iter()
            .find(|core| core.eq_ignore_ascii_case(token))
            .map(String::as_str)
    }

    /// Returns `true` if a single-character fragment with this exact name
    /// exists in the store.
    pub fn has_single(&self, name: char) -> bool {
        self.singles.contains(&name)
    }
}

/// The structured result of parsing a molecule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDescriptor {
    /// The canonical (as-stored) core name.
    pub core: String,
    pub left: Option<Vec<SideToken>>,
    pub middle: Option<Vec<SideToken>>,
    pub right: Option<Vec<SideToken>>,
    /// Chain multiplicity along the left/right axis.
    pub n: u32,
    /// Chain multiplicity along the middle axis; exclusive with `n`.
    pub m: u32,
    /// Lattice replication counts along the three spatial axes.
    pub stacks: (u32, u32, u32),
}

/// Parses a molecule name into a [`NameDescriptor`].
///
/// The name is split on `_`. Tokens formed from a reserved prefix (`n`,
/// `m`, `x`, `y`, `z`) followed by digits are expansion factors and are
/// removed before structural interpretation; all default to 1. Exactly one
/// remaining token must match a core name case-insensitively. Tokens before
/// the core form the left side (only the first is used); tokens after it
/// form the middle and right sides. A single trailing token whose leading
/// character is a lowercase single-character fragment name is split into a
/// middle linker plus an optional right side.
///
/// # Errors
///
/// `InvalidExpansion` when both `n` and `m` exceed 1; `UnknownCore` when no
/// token matches a core; any [`parse_end_name`] error from the sides.
pub fn parse_name(name: &str, catalog: &FragmentCatalog) -> Result<NameDescriptor, GrammarError> {
    let mut tokens: Vec<&str> = name.split('_').collect();

    let mut variables = [1u32; 5];
    tokens.retain(|token| match parse_variable(token) {
        Some((prefix, value)) => {
            let slot = VARIABLE_PREFIXES
                .iter()
                .position(|&p| p == prefix)
                .expect("parse_variable only yields reserved prefixes");
            variables[slot] = value;
            false
        }
        None => true,
    });
    let [n, m, x, y, z] = variables;
    if n > 1 && m > 1 {
        return Err(GrammarError::InvalidExpansion);
    }

    let (core_index, core) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, token)| catalog.resolve_core(token).map(|c| (i, c.to_string())))
        .ok_or_else(|| GrammarError::UnknownCore(name.to_string()))?;

    let left = tokens[..core_index].first().copied();
    let trailing = &tokens[core_index + 1..];
    let (middle, right) = match trailing {
        [] => (None, None),
        [only] => split_middle(only, catalog),
        [first, second, ..] => (Some(first.to_string()), Some(second.to_string())),
    };

    Ok(NameDescriptor {
        core,
        left: left.map(|s| parse_side(s, catalog)).transpose()?,
        middle: middle.map(|s| parse_side(&s, catalog)).transpose()?,
        right: right.map(|s| parse_side(&s, catalog)).transpose()?,
        n,
        m,
        stacks: (x, y, z),
    })
}

/// Recognizes an expansion-factor token: a reserved prefix followed by at
/// least one digit.
fn parse_variable(token: &str) -> Option<(char, u32)> {
    let mut chars = token.chars();
    let prefix = chars.next()?;
    if !VARIABLE_PREFIXES.contains(&prefix) {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }
    rest.parse().ok().map(|value| (prefix, value))
}

/// Splits a lone trailing token into middle and right sides.
///
/// A leading lowercase character naming a single-character fragment marks a
/// middle linker; the remainder, if any, is the right-side chain. Anything
/// else is a plain right side.
fn split_middle(token: &str, catalog: &FragmentCatalog) -> (Option<String>, Option<String>) {
    match token.chars().next() {
        Some(first) if first.is_ascii_lowercase() && catalog.has_single(first) => {
            let rest = &token[first.len_utf8()..];
            let right = (!rest.is_empty()).then(|| rest.to_string());
            (Some(first.to_string()), right)
        }
        _ => (None, Some(token.to_string())),
    }
}

/// Parses one side descriptor into its attachment token list.
///
/// A side that is exactly one lowercase recognized fragment character plays
/// a linker role and bypasses the end-name grammar (which would reject it
/// as a leading R-group); everything else goes through [`parse_end_name`].
fn parse_side(side: &str, catalog: &FragmentCatalog) -> Result<Vec<SideToken>, GrammarError> {
    let mut chars = side.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_lowercase() && catalog.has_single(c) {
            return Ok(vec![SideToken::new(c, -1)]);
        }
    }
    parse_end_name(side)
}
