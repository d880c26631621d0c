use nalgebra::Point3;

/// The placeholder characters that mark an unresolved bonding site.
///
/// An atom whose element symbol begins with one of these characters is a
/// sentinel: it stands in for a future connection rather than a real atom.
/// Element symbols may combine two markers (e.g. `~*`) when a site can be
/// claimed under more than one connection type.
pub const SENTINELS: &str = "~*+";

/// Represents an atom in a molecular structure.
///
/// An atom is an element symbol plus a 3-D coordinate. It carries no stored
/// identifier: its id is derived from its 1-based position in the owning
/// [`Molecule`](super::molecule::Molecule)'s atom sequence, and is therefore
/// not stable across structural edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g. "C", "N"), or a sentinel marker such as
    /// `~`, `*`, `+`, or a two-character combination of them.
    pub element: String,
    /// The 3-D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new atom with the given element symbol and position.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }

    /// Returns `true` if this atom is a sentinel placeholder for an
    /// unresolved bonding site.
    pub fn is_sentinel(&self) -> bool {
        self.element
            .chars()
            .next()
            .is_some_and(|c| SENTINELS.contains(c))
    }

    /// Returns the sentinel characters of this atom's element symbol.
    ///
    /// Only the first two characters of the symbol are considered; any
    /// non-sentinel characters among them are dropped. Returns an empty
    /// string for a regular atom.
    pub fn sentinel_chars(&self) -> String {
        self.element
            .chars()
            .take(2)
            .filter(|c| SENTINELS.contains(*c))
            .collect()
    }
}
