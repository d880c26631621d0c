use crate::core::grammar::FragmentCatalog;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use nalgebra::Point3;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading fragment definitions.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The named fragment is missing from the store, or its file is
    /// malformed. A malformed file is deliberately indistinguishable from a
    /// missing one: no partial fragment is ever returned.
    #[error("bad fragment name: {name}")]
    NotFound { name: String },

    /// The store directory itself could not be read.
    #[error("cannot read fragment store '{path}': {source}")]
    Store {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A flat directory of named fragment definition files.
///
/// Each file holds one fragment: a coordinate block (one atom per line —
/// element, x, y, z), a blank-line separator, then a bond block (one bond
/// per line — 1-based atom index pair plus a bond-type tag). File names are
/// the fragment names: 3-character names are cores, 1-character names are
/// substituents and linkers.
///
/// Loaded fragments are immutable templates; [`FragmentLibrary::load`]
/// returns a fresh deep copy on every call so independent builds can never
/// corrupt each other's geometry.
#[derive(Debug, Clone)]
pub struct FragmentLibrary {
    root: PathBuf,
    catalog: FragmentCatalog,
}

impl FragmentLibrary {
    /// Opens a fragment store directory and indexes its entries.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Store`] if the directory cannot be listed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, FragmentError> {
        let root = root.as_ref().to_path_buf();
        let entries = fs::read_dir(&root).map_err(|source| FragmentError::Store {
            path: root.clone(),
            source,
        })?;

        let mut cores = Vec::new();
        let mut singles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| FragmentError::Store {
                path: root.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let mut chars = name.chars();
            match (chars.next(), chars.next(), chars.next(), chars.next()) {
                (Some(c), None, _, _) => singles.push(c),
                (Some(_), Some(_), Some(_), None) => cores.push(name),
                _ => {} // anything else in the directory is not a fragment
            }
        }

        Ok(Self {
            root,
            catalog: FragmentCatalog::new(cores, singles),
        })
    }

    /// The core and single-character names available to the grammar.
    pub fn catalog(&self) -> &FragmentCatalog {
        &self.catalog
    }

    /// Loads a fragment by name as a fresh [`Molecule`].
    ///
    /// Lookup tries the exact name first, then the all-lowercase name (an
    /// uppercase X-group letter shares its geometry with the matching
    /// lowercase R-group file).
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::NotFound`] when neither case variant exists
    /// or the file content is malformed.
    pub fn load(&self, name: &str) -> Result<Molecule, FragmentError> {
        let not_found = || FragmentError::NotFound {
            name: name.to_string(),
        };

        let exact = self.root.join(name);
        let content = match fs::read_to_string(&exact) {
            Ok(content) => content,
            Err(_) => {
                let lower = self.root.join(name.to_lowercase());
                fs::read_to_string(&lower).map_err(|_| not_found())?
            }
        };

        parse_fragment(&content).ok_or_else(not_found)
    }

    /// Convenience for single-character fragment names.
    pub fn load_char(&self, name: char) -> Result<Molecule, FragmentError> {
        self.load(&name.to_string())
    }
}

/// Parses fragment file content; `None` on any malformed line.
fn parse_fragment(content: &str) -> Option<Molecule> {
    let mut molecule = Molecule::new();
    let mut in_bond_block = false;

    for line in content.lines() {
        if line.trim().is_empty() {
            in_bond_block = true;
            continue;
        }
        if !in_bond_block {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // Element and coordinates are the last four fields; leading
            // fields (serials, labels) are ignored.
            if fields.len() < 4 {
                return None;
            }
            let coords = &fields[fields.len() - 3..];
            let element = fields[fields.len() - 4];
            let x: f64 = coords[0].parse().ok()?;
            let y: f64 = coords[1].parse().ok()?;
            let z: f64 = coords[2].parse().ok()?;
            molecule.add_atom(Atom::new(element, Point3::new(x, y, z)));
        } else {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [a1, a2, tag] = fields.as_slice() else {
                return None;
            };
            let a1: usize = a1.parse().ok()?;
            let a2: usize = a2.parse().ok()?;
            let order: BondOrder = tag.parse().ok()?;
            // Indices in the file are 1-based.
            if a1 == 0 || a2 == 0 {
                return None;
            }
            molecule.add_bond(a1 - 1, a2 - 1, order)?;
        }
    }

    if molecule.atoms().is_empty() {
        return None;
    }
    Some(molecule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const METHYL: &str = "\
~ 0.0 0.0 1.1
C 0.0 0.0 0.0
H 1.0 0.0 -0.4
H -0.5 0.9 -0.4
H -0.5 -0.9 -0.4

1 2 1
2 3 1
2 4 1
2 5 1
";

    fn store_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn open_indexes_cores_and_singles() {
        let dir = store_with(&[("TON", METHYL), ("a", METHYL), ("2", METHYL)]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert_eq!(library.catalog().resolve_core("ton"), Some("TON"));
        assert!(library.catalog().has_single('a'));
        assert!(library.catalog().has_single('2'));
        assert!(!library.catalog().has_single('b'));
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            FragmentLibrary::open(&missing),
            Err(FragmentError::Store { .. })
        ));
    }

    #[test]
    fn load_parses_atoms_and_bonds() {
        let dir = store_with(&[("a", METHYL)]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        let mol = library.load_char('a').unwrap();
        assert_eq!(mol.atoms().len(), 5);
        assert_eq!(mol.bonds().len(), 4);
        assert_eq!(mol.atoms()[0].element, "~");
        assert_eq!(mol.bonds()[0].atom1, 0);
        assert_eq!(mol.bonds()[0].atom2, 1);
    }

    #[test]
    fn load_falls_back_to_lowercase_name() {
        let dir = store_with(&[("a", METHYL)]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert!(library.load("A").is_ok());
    }

    #[test]
    fn load_missing_fragment_fails() {
        let dir = store_with(&[("a", METHYL)]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert!(matches!(
            library.load("q"),
            Err(FragmentError::NotFound { name }) if name == "q"
        ));
    }

    #[test]
    fn malformed_coordinate_line_fails_with_not_found() {
        let dir = store_with(&[("a", "C 0.0 zero 0.0\n\n")]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert!(matches!(
            library.load("a"),
            Err(FragmentError::NotFound { .. })
        ));
    }

    #[test]
    fn malformed_bond_line_fails_with_not_found() {
        let dir = store_with(&[("a", "C 0.0 0.0 0.0\nC 1.0 0.0 0.0\n\n1 2\n")]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert!(matches!(
            library.load("a"),
            Err(FragmentError::NotFound { .. })
        ));
    }

    #[test]
    fn out_of_range_bond_index_fails_with_not_found() {
        let dir = store_with(&[("a", "C 0.0 0.0 0.0\nC 1.0 0.0 0.0\n\n1 9 1\n")]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        assert!(matches!(
            library.load("a"),
            Err(FragmentError::NotFound { .. })
        ));
    }

    #[test]
    fn loads_are_independent_deep_copies() {
        let dir = store_with(&[("a", METHYL)]);
        let library = FragmentLibrary::open(dir.path()).unwrap();
        let mut first = library.load_char('a').unwrap();
        first.close_ends();
        let second = library.load_char('a').unwrap();
        assert!(second.atoms()[0].is_sentinel());
    }
}
