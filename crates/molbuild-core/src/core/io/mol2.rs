use crate::core::io::traits::MolecularWriter;
use crate::core::models::molecule::Molecule;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Mol2Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Tripos MOL2 interchange output.
///
/// Atom names are element symbol plus 1-based id; no substructure or
/// charge records are emitted, so the molecule record declares
/// `NO_CHARGES`. Bond-type tags reuse the fragment-file vocabulary
/// (`1`/`2`/`3`/`Ar`/`Du`), which is valid MOL2.
pub struct Mol2File;

impl MolecularWriter for Mol2File {
    /// The molecule name for the `@<TRIPOS>MOLECULE` record.
    type Metadata = String;
    type Error = Mol2Error;

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "@<TRIPOS>MOLECULE")?;
        writeln!(writer, "{metadata}")?;
        writeln!(
            writer,
            "{} {}",
            molecule.atoms().len(),
            molecule.bonds().len()
        )?;
        writeln!(writer, "SMALL")?;
        writeln!(writer, "NO_CHARGES")?;
        writeln!(writer)?;

        writeln!(writer, "@<TRIPOS>ATOM")?;
        for (index, atom) in molecule.atoms().iter().enumerate() {
            let id = index + 1;
            let p = &atom.position;
            writeln!(
                writer,
                "{id} {}{id} {:.4} {:.4} {:.4} {}",
                atom.element, p.x, p.y, p.z, atom.element
            )?;
        }

        writeln!(writer, "@<TRIPOS>BOND")?;
        for (index, bond) in molecule.bonds().iter().enumerate() {
            writeln!(
                writer,
                "{} {} {} {}",
                index + 1,
                bond.atom1 + 1,
                bond.atom2 + 1,
                bond.order
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;

    #[test]
    fn writes_molecule_atom_and_bond_records() {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("O", Point3::new(1.2, 0.0, 0.0)));
        mol.add_bond(0, 1, BondOrder::Double).unwrap();

        let output = Mol2File::to_string(&mol, &"carbonyl".to_string()).unwrap();
        let expected = "\
@<TRIPOS>MOLECULE
carbonyl
2 1
SMALL
NO_CHARGES

@<TRIPOS>ATOM
1 C1 0.0000 0.0000 0.0000 C
2 O2 1.2000 0.0000 0.0000 O
@<TRIPOS>BOND
1 1 2 2
";
        assert_eq!(output, expected);
    }

    #[test]
    fn aromatic_bond_keeps_its_tag() {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("C", Point3::new(1.4, 0.0, 0.0)));
        mol.add_bond(0, 1, BondOrder::Aromatic).unwrap();
        let output = Mol2File::to_string(&mol, &"ring".to_string()).unwrap();
        assert!(output.ends_with("@<TRIPOS>BOND\n1 1 2 Ar\n"));
    }

    #[test]
    fn empty_molecule_still_produces_valid_records() {
        let mol = Molecule::new();
        let output = Mol2File::to_string(&mol, &"empty".to_string()).unwrap();
        assert!(output.contains("\n0 0\n"));
        assert!(output.contains("@<TRIPOS>ATOM"));
        assert!(output.contains("@<TRIPOS>BOND"));
    }
}
