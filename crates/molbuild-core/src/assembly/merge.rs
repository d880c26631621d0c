use super::AssemblyError;
use crate::core::models::molecule::Molecule;
use crate::core::utils::geometry;
use nalgebra::Vector3;

/// The resolved orientation of a mergeable bond: the index of the removable
/// sentinel placeholder (R), the index of the real connection point (C),
/// and whether the sentinel occupies the bond's first slot.
struct ResolvedBond {
    placeholder: usize,
    connection: usize,
    placeholder_first: bool,
}

fn resolve(molecule: &Molecule, bond: usize) -> Result<ResolvedBond, AssemblyError> {
    let b = molecule.bond(bond).ok_or(AssemblyError::BadBond)?;
    let first = molecule.atom(b.atom1).ok_or(AssemblyError::BadBond)?;
    let second = molecule.atom(b.atom2).ok_or(AssemblyError::BadBond)?;
    match (first.is_sentinel(), second.is_sentinel()) {
        (true, false) => Ok(ResolvedBond {
            placeholder: b.atom1,
            connection: b.atom2,
            placeholder_first: true,
        }),
        (false, true) => Ok(ResolvedBond {
            placeholder: b.atom2,
            connection: b.atom1,
            placeholder_first: false,
        }),
        _ => Err(AssemblyError::BadBond),
    }
}

impl Molecule {
    /// Aligns `source` onto this molecule's open bond and splices it in.
    ///
    /// `target` must have exactly one sentinel endpoint (the removable
    /// placeholder R1) and `source_bond` likewise (R2); the source fragment
    /// is rigidly rotated so its C2→R2 direction inverts onto R1→C1, pivoted
    /// at R2 and translated onto C1. The target bond is then rewired to
    /// connect C1 and C2 directly — C2 takes over the slot the sentinel
    /// occupied — and `source_bond`, R1, and R2 are removed.
    ///
    /// Two index-stability guarantees hold afterwards, and the builder and
    /// [`Molecule::chain`] depend on both: no pre-existing bond index in
    /// `self` moves, and the absorbed source bonds occupy a contiguous tail
    /// block (one bond shorter than the source's sequence).
    ///
    /// # Errors
    ///
    /// [`AssemblyError::BadBond`] if either bond has zero or two sentinel
    /// endpoints; neither molecule is mutated in that case.
    pub fn merge(
        &mut self,
        target: usize,
        mut source: Molecule,
        source_bond: usize,
    ) -> Result<(), AssemblyError> {
        let t = resolve(self, target)?;
        let s = resolve(&source, source_bond)?;

        let r1 = self.atoms()[t.placeholder].position;
        let c1 = self.atoms()[t.connection].position;
        let r2 = source.atoms()[s.placeholder].position;
        let c2 = source.atoms()[s.connection].position;

        let (theta, psi) = geometry::alignment_angles(&r1, &c1, &r2, &c2);
        source.rotate(theta, 0.0, psi, r2, Vector3::new(c1.x, c1.y, c1.z));

        // Drop the source's half of the junction before splicing so the
        // absorbed block is already fully resolved.
        source.remove_bond(source_bond);
        let mut c2_index = s.connection;
        source.remove_atom(s.placeholder);
        if c2_index > s.placeholder {
            c2_index -= 1;
        }

        let offset = self.atoms().len();
        self.extend(source);
        let c2_index = offset + c2_index;

        let bond = &mut self.bonds_mut()[target];
        if t.placeholder_first {
            bond.atom1 = c2_index;
            bond.atom2 = t.connection;
        } else {
            bond.atom1 = t.connection;
            bond.atom2 = c2_index;
        }

        // R1 no longer participates in any bond, so this cascade only
        // compacts atom indices.
        self.remove_atom(t.placeholder);
        Ok(())
    }

    /// Returns an n-length chain of this molecule.
    ///
    /// Each of the n−1 additional deep copies is merged by its `left` open
    /// bond onto the `right` open bond of the previous copy. Because a copy
    /// loses one bond when its left junction is consumed, the stored right
    /// index shifts down by one inside every appended block after the first
    /// merge (when the left bond precedes it in the sequence).
    pub fn chain(&self, left: usize, right: usize, n: u32) -> Result<Molecule, AssemblyError> {
        let mut result = self.clone();
        if n <= 1 {
            return Ok(result);
        }
        if left >= self.bonds().len() || right >= self.bonds().len() {
            return Err(AssemblyError::BadBond);
        }

        let shifted_right = if left < right { right - 1 } else { right };
        let mut target = right;
        for _ in 1..n {
            let block_start = result.bonds().len();
            result.merge(target, self.clone(), left)?;
            target = block_start + shifted_right;
        }
        Ok(result)
    }

    /// Returns this molecule replicated into an x·y·z lattice.
    ///
    /// Axes are processed in x, y, z order; each axis with a count above 1
    /// replicates every fragment accumulated so far, displacing generation
    /// `i` by `i * (2 + extent)` along that axis, where the extent is this
    /// molecule's own bounding-box size. Counts of 1 or less are no-ops.
    pub fn stack(&self, x: u32, y: u32, z: u32) -> Result<Molecule, AssemblyError> {
        let (min, max) = self.bounding_box().ok_or(AssemblyError::EmptyMolecule)?;
        let size = max - min;

        let mut result = self.clone();
        for (axis, count) in [x, y, z].into_iter().enumerate() {
            if count <= 1 {
                continue;
            }
            let snapshot = result.clone();
            for index in 1..count {
                let mut generation = snapshot.clone();
                let mut delta = Vector3::zeros();
                delta[axis] = f64::from(index) * (2.0 + size[axis]);
                generation.displace(delta);
                result.extend(generation);
            }
        }
        Ok(result)
    }
}
