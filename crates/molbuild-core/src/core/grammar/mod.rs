mod end_name;
mod name;

pub use end_name::parse_end_name;
pub use name::{parse_name, FragmentCatalog, NameDescriptor};

use thiserror::Error;

/// A single substituent token on one side of the core.
///
/// `parent` is the position of the token's attachment predecessor within the
/// same side, or `-1` when the token attaches directly to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideToken {
    pub name: char,
    pub parent: i32,
}

impl SideToken {
    pub fn new(name: char, parent: i32) -> Self {
        Self { name, parent }
    }
}

/// Errors raised while parsing a molecule name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// No token of the name case-insensitively matches a known core.
    #[error("no recognized core name in '{0}'")]
    UnknownCore(String),

    /// Both chain multiplicities were requested; linear growth applies to
    /// exactly one axis pair.
    #[error("n and m expansion are mutually exclusive")]
    InvalidExpansion,

    /// A character outside the substituent alphabets appeared in a side
    /// descriptor.
    #[error("invalid character '{0}' in substituent name")]
    InvalidCharacter(char),

    /// An R-group letter appeared where only ring or terminal characters
    /// are grammatical.
    #[error("R-group character '{0}' is not allowed at this position")]
    MisplacedRGroup(char),
}
