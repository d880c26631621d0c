use super::atom::Atom;
use super::topology::{Bond, BondOrder};
use crate::core::utils::geometry;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::Range;

/// The default scan order for open-bond connection types.
pub const DEFAULT_PRIORITY: &str = "~*+";

/// An in-memory molecular graph: an ordered arena of atoms and an ordered
/// arena of bonds referencing those atoms by index.
///
/// Order is semantically meaningful: an atom's or bond's id is its 1-based
/// position in its sequence, recomputed on demand, and the sequences define
/// serialization order. Ids are not stable across removals — a removal
/// compacts the arena and rewrites every dependent index — so callers must
/// not cache ids across mutation. `Clone` deep-copies the whole graph; no
/// atom or bond is ever shared between two molecules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    /// Creates an empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a molecule from raw atom and bond sequences.
    ///
    /// # Return
    ///
    /// Returns `None` if any bond references an out-of-range atom index.
    pub fn from_parts(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Option<Self> {
        if bonds
            .iter()
            .any(|b| b.atom1 >= atoms.len() || b.atom2 >= atoms.len())
        {
            return None;
        }
        Some(Self { atoms, bonds })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Mutable access to the bond arena, for the merge engine's rewiring.
    pub(crate) fn bonds_mut(&mut self) -> &mut [Bond] {
        &mut self.bonds
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Appends a bond between two existing atoms and returns its index.
    ///
    /// # Return
    ///
    /// Returns `None` if either atom index is out of range.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize, order: BondOrder) -> Option<usize> {
        if atom1 >= self.atoms.len() || atom2 >= self.atoms.len() {
            return None;
        }
        self.bonds.push(Bond::new(atom1, atom2, order));
        Some(self.bonds.len() - 1)
    }

    /// Removes an atom, cascading to every bond that references it.
    ///
    /// All atom indices greater than `index` shift down by one; the
    /// surviving bonds are rewritten accordingly. Bond order within the
    /// sequence is preserved.
    pub fn remove_atom(&mut self, index: usize) -> Option<Atom> {
        if index >= self.atoms.len() {
            return None;
        }
        self.bonds.retain(|b| !b.contains(index));
        for bond in &mut self.bonds {
            if bond.atom1 > index {
                bond.atom1 -= 1;
            }
            if bond.atom2 > index {
                bond.atom2 -= 1;
            }
        }
        Some(self.atoms.remove(index))
    }

    /// Removes a bond from the bond sequence. Atoms are untouched.
    pub fn remove_bond(&mut self, index: usize) -> Option<Bond> {
        if index >= self.bonds.len() {
            return None;
        }
        Some(self.bonds.remove(index))
    }

    /// Absorbs another molecule's atoms and bonds, appending them after this
    /// molecule's own sequences with indices offset. No bonds are created
    /// between the two parts.
    pub fn extend(&mut self, other: Molecule) {
        let offset = self.atoms.len();
        self.atoms.extend(other.atoms);
        self.bonds.extend(other.bonds.into_iter().map(|mut b| {
            b.atom1 += offset;
            b.atom2 += offset;
            b
        }));
    }

    /// Applies a rigid-body Euler rotation about `pivot`, then translates
    /// every atom by `offset`. Pure coordinate mutation; topology is
    /// untouched.
    pub fn rotate(
        &mut self,
        theta: f64,
        phi: f64,
        psi: f64,
        pivot: Point3<f64>,
        offset: Vector3<f64>,
    ) {
        let rotation = geometry::euler_rotation(theta, phi, psi);
        for atom in &mut self.atoms {
            atom.position = Point3::from(rotation * (atom.position - pivot) + offset);
        }
    }

    /// Uniformly translates every atom.
    pub fn displace(&mut self, delta: Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += delta;
        }
    }

    /// Returns the component-wise (min, max) corners over all atoms, or
    /// `None` for an empty molecule.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.atoms.first()?.position;
        let (mut min, mut max) = (first, first);
        for atom in &self.atoms[1..] {
            let p = atom.position;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }

    /// Returns `true` if at least one endpoint of the bond is a sentinel
    /// atom awaiting resolution.
    pub fn is_open_bond(&self, index: usize) -> bool {
        self.bonds.get(index).is_some_and(|b| {
            self.atoms[b.atom1].is_sentinel() || self.atoms[b.atom2].is_sentinel()
        })
    }

    /// Returns the indices of every open bond, in bond-sequence order.
    pub fn open_ends(&self) -> Vec<usize> {
        (0..self.bonds.len())
            .filter(|&i| self.is_open_bond(i))
            .collect()
    }

    /// Returns the first open bond matching the given connection-type
    /// priority, scanning the whole bond sequence.
    pub fn next_open(&self, priority: &str) -> Option<usize> {
        self.next_open_in(0..self.bonds.len(), priority)
    }

    /// Returns the first open bond within `range` matching the priority.
    ///
    /// Each priority character is tried in turn against the first character
    /// of the sentinel elements on the open bonds; if nothing matches, a
    /// second pass retries against the second character of two-character
    /// combined sentinel markers.
    pub fn next_open_in(&self, range: Range<usize>, priority: &str) -> Option<usize> {
        let open: Vec<usize> = range.filter(|&i| self.is_open_bond(i)).collect();

        for want in priority.chars() {
            for &i in &open {
                if self
                    .bond_elements(i)
                    .any(|e| e.chars().next() == Some(want))
                {
                    return Some(i);
                }
            }
        }
        for want in priority.chars() {
            for &i in &open {
                if self.bond_elements(i).any(|e| e.chars().nth(1) == Some(want)) {
                    return Some(i);
                }
            }
        }
        None
    }

    fn bond_elements(&self, index: usize) -> impl Iterator<Item = &str> {
        let bond = &self.bonds[index];
        [
            self.atoms[bond.atom1].element.as_str(),
            self.atoms[bond.atom2].element.as_str(),
        ]
        .into_iter()
    }

    /// Returns the sentinel characters describing a bond's connection type.
    ///
    /// Picks whichever endpoint is a sentinel (falling back to the second
    /// endpoint) and filters the first two characters of its element symbol
    /// down to the sentinel markers. Empty for a fully resolved bond.
    pub fn connection(&self, index: usize) -> String {
        let bond = &self.bonds[index];
        let a1 = &self.atoms[bond.atom1];
        let a2 = &self.atoms[bond.atom2];
        if a1.is_sentinel() {
            a1.sentinel_chars()
        } else {
            a2.sentinel_chars()
        }
    }

    /// Rewrites every sentinel atom's element to hydrogen. Idempotent; no
    /// atoms or bonds are removed.
    pub fn close_ends(&mut self) {
        for atom in &mut self.atoms {
            if atom.is_sentinel() {
                atom.element = "H".to_string();
            }
        }
    }

    /// Returns the molecular formula with elements in alphabetical order,
    /// each followed by its count.
    pub fn formula(&self) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }
        counts
            .iter()
            .map(|(element, count)| format!("{element}{count}"))
            .collect()
    }

    /// Jitters every coordinate by a uniform random offset in
    /// `[-delta, delta]`.
    pub fn perturb<R: Rng>(&mut self, delta: f64, rng: &mut R) {
        for atom in &mut self.atoms {
            for i in 0..3 {
                atom.position[i] += rng.gen_range(-delta..=delta);
            }
        }
    }
}
