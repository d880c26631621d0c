use crate::assembly::builder::{BuildError, assemble};
use crate::core::grammar::parse_name;
use crate::core::library::FragmentLibrary;
use crate::core::models::molecule::Molecule;

/// Builds one finished molecule from its textual name.
///
/// The name is parsed against the library's catalog, the descriptor is
/// assembled fragment by fragment, replication is applied, and every
/// remaining open bond is capped. The result is ready for serialization.
///
/// # Errors
///
/// Returns a [`BuildError`] wrapping the grammar, fragment-store, or
/// assembly failure. A failed build never returns a partial molecule.
pub fn build_molecule(name: &str, library: &FragmentLibrary) -> Result<Molecule, BuildError> {
    let descriptor = parse_name(name, library.catalog())?;
    assemble(&descriptor, library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CORE: &str = "\
C 0.0 0.0 0.0
C 1.4 0.0 0.0
~* 0.0 1.0 0.0
~* 1.4 -1.0 0.0
~* 2.4 0.0 0.0
~* -1.0 0.0 0.0

1 2 Ar
1 3 1
2 4 1
2 5 1
1 6 1
";

    const CAP: &str = "\
~ 0.0 0.0 1.1
C 0.0 0.0 0.0
H 0.8 0.0 -0.5
H -0.8 0.0 -0.5

1 2 1
2 3 1
2 4 1
";

    const RING: &str = "\
~* -0.7 0.0 0.0
C 0.0 0.0 0.0
C 1.4 0.0 0.0
~* 2.1 0.0 0.0
+ 0.0 1.0 0.0
+ 1.4 1.0 0.0

1 2 1
2 3 Ar
3 4 1
2 5 1
3 6 1
";

    fn test_library() -> (TempDir, FragmentLibrary) {
        let dir = TempDir::new().unwrap();
        for (name, content) in [("TON", CORE), ("a", CAP), ("4", RING)] {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let library = FragmentLibrary::open(dir.path()).unwrap();
        (dir, library)
    }

    #[test]
    fn name_to_molecule_end_to_end() {
        let (_dir, library) = test_library();
        let mol = build_molecule("4_TON_4a", &library).unwrap();
        assert!(!mol.atoms().is_empty());
        assert!(mol.atoms().iter().all(|a| !a.is_sentinel()));
    }

    #[test]
    fn chained_build_matches_the_replication_formula() {
        let (_dir, library) = test_library();
        let monomer = build_molecule("4_TON_4", &library).unwrap();
        let k = monomer.atoms().len() as u32;
        for n in 2..=4u32 {
            let polymer = build_molecule(&format!("4_TON_4_n{n}"), &library).unwrap();
            assert_eq!(polymer.atoms().len() as u32, n * k - 2 * (n - 1));
        }
    }

    #[test]
    fn stacked_build_multiplies_the_unit() {
        let (_dir, library) = test_library();
        let unit = build_molecule("TON_a_a", &library).unwrap();
        let lattice = build_molecule("TON_a_a_x2_y2_z2", &library).unwrap();
        assert_eq!(lattice.atoms().len(), 8 * unit.atoms().len());
    }

    #[test]
    fn grammar_failure_surfaces_as_a_build_error() {
        let (_dir, library) = test_library();
        assert!(matches!(
            build_molecule("NOPE_4", &library),
            Err(BuildError::Grammar(_))
        ));
    }

    #[test]
    fn missing_fragment_surfaces_as_a_build_error() {
        let (_dir, library) = test_library();
        // 'b' is absent from this store; the grammar accepts it as a valid
        // R-group letter, so the failure comes from the fragment load.
        assert!(matches!(
            build_molecule("TON_4b", &library),
            Err(BuildError::Fragment(_))
        ));
    }
}
