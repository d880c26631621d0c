use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The order or kind of a chemical bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
    /// Distance-only placeholder used by fragment files to record spatial
    /// proximity without a real covalent bond.
    Distance,
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "ar" | "aromatic" => Ok(Self::Aromatic),
            "du" | "distance" => Ok(Self::Distance),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "1",
                Self::Double => "2",
                Self::Triple => "3",
                Self::Aromatic => "Ar",
                Self::Distance => "Du",
            }
        )
    }
}

impl BondOrder {
    /// Returns the numeric order used by the job-input connectivity block.
    ///
    /// Aromatic bonds serialize as `1.5`; everything else is its integer
    /// order followed by `.0`. The distance placeholder counts as single.
    pub fn gjf_order(&self) -> &'static str {
        match self {
            Self::Single | Self::Distance => "1.0",
            Self::Double => "2.0",
            Self::Triple => "3.0",
            Self::Aromatic => "1.5",
        }
    }
}

/// An ordered pair of atom indices plus a bond order.
///
/// Indices point into the owning molecule's atom sequence. Both endpoints
/// of a bond always belong to the same molecule as the bond itself; the
/// merge engine preserves this across every split and splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// Returns the other endpoint of the bond, if `atom` is one of them.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }
}
