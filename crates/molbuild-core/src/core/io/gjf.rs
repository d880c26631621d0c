use crate::core::io::traits::MolecularWriter;
use crate::core::models::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GjfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid job settings: {0}")]
    Settings(#[from] toml::de::Error),
}

/// Calculation parameters for the job-input preamble.
///
/// All fields are optional in a settings file; anything omitted keeps the
/// defaults below, so an empty file is a valid settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobSettings {
    /// The route-section keywords; `geom=connectivity` is appended
    /// automatically since the connectivity block is always written.
    pub keywords: String,
    /// Processor count for the `%nprocshared` directive; `None` omits the
    /// directive entirely.
    pub nprocshared: Option<u32>,
    /// Memory ceiling in gigabytes for the `%mem` directive.
    pub memory_gb: u32,
    pub charge: i32,
    pub multiplicity: u32,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            keywords: "opt b3lyp/6-31g(d)".to_string(),
            nprocshared: Some(16),
            memory_gb: 59,
            charge: 0,
            multiplicity: 1,
        }
    }
}

impl JobSettings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GjfError::Io`] if the file cannot be read and
    /// [`GjfError::Settings`] if it is not valid TOML or names an unknown
    /// field.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, GjfError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Job name and calculation settings carried into the output preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GjfMetadata {
    /// The job name; also names the checkpoint file.
    pub name: String,
    pub settings: JobSettings,
}

impl GjfMetadata {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            settings: JobSettings::default(),
        }
    }
}

pub struct GjfFile;

impl MolecularWriter for GjfFile {
    type Metadata = GjfMetadata;
    type Error = GjfError;

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let settings = &metadata.settings;

        if let Some(nproc) = settings.nprocshared {
            writeln!(writer, "%nprocshared={nproc}")?;
        }
        writeln!(writer, "%mem={}GB", settings.memory_gb)?;
        writeln!(writer, "%chk={}.chk", metadata.name)?;
        writeln!(writer, "# {} geom=connectivity", settings.keywords)?;
        writeln!(writer)?;
        writeln!(writer, "{}", metadata.name)?;
        writeln!(writer)?;
        writeln!(writer, "{} {}", settings.charge, settings.multiplicity)?;

        for atom in molecule.atoms() {
            let p = &atom.position;
            writeln!(
                writer,
                " {} {:.6} {:.6} {:.6}",
                atom.element, p.x, p.y, p.z
            )?;
        }
        writeln!(writer)?;

        // Connectivity: one line per atom, listing each bond once from its
        // first endpoint. Atom ids are 1-based positions.
        for index in 0..molecule.atoms().len() {
            write!(writer, " {}", index + 1)?;
            for bond in molecule.bonds() {
                if bond.atom1 == index {
                    write!(writer, " {} {}", bond.atom2 + 1, bond.order.gjf_order())?;
                }
            }
            writeln!(writer)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::TempDir;

    fn ethylene_like() -> Molecule {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("C", Point3::new(1.33, 0.0, 0.0)));
        mol.add_atom(Atom::new("H", Point3::new(-0.9, 0.6, 0.0)));
        mol.add_bond(0, 1, BondOrder::Double).unwrap();
        mol.add_bond(0, 2, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn writes_preamble_coordinates_and_connectivity() {
        let mol = ethylene_like();
        let output = GjfFile::to_string(&mol, &GjfMetadata::new("test_job")).unwrap();
        let expected = "\
%nprocshared=16
%mem=59GB
%chk=test_job.chk
# opt b3lyp/6-31g(d) geom=connectivity

test_job

0 1
 C 0.000000 0.000000 0.000000
 C 1.330000 0.000000 0.000000
 H -0.900000 0.600000 0.000000

 1 2 2.0 3 1.0
 2
 3

";
        assert_eq!(output, expected);
    }

    #[test]
    fn omits_nprocshared_when_unset() {
        let mut metadata = GjfMetadata::new("job");
        metadata.settings.nprocshared = None;
        let output = GjfFile::to_string(&ethylene_like(), &metadata).unwrap();
        assert!(!output.contains("%nprocshared"));
        assert!(output.starts_with("%mem=59GB\n"));
    }

    #[test]
    fn aromatic_bonds_serialize_with_fractional_order() {
        let mut mol = Molecule::new();
        mol.add_atom(Atom::new("C", Point3::new(0.0, 0.0, 0.0)));
        mol.add_atom(Atom::new("C", Point3::new(1.4, 0.0, 0.0)));
        mol.add_bond(0, 1, BondOrder::Aromatic).unwrap();
        let output = GjfFile::to_string(&mol, &GjfMetadata::new("ring")).unwrap();
        assert!(output.contains(" 1 2 1.5\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let mol = ethylene_like();
        let metadata = GjfMetadata::new("job");
        let first = GjfFile::to_string(&mol, &metadata).unwrap();
        let second = GjfFile::to_string(&mol, &metadata).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn write_to_path_creates_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.gjf");
        GjfFile::write_to_path(&ethylene_like(), &GjfMetadata::new("job"), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("%chk=job.chk"));
    }

    #[test]
    fn settings_load_from_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "keywords = \"opt m062x/6-31g(d,p)\"\ncharge = -1\n").unwrap();
        let settings = JobSettings::from_toml_path(&path).unwrap();
        assert_eq!(settings.keywords, "opt m062x/6-31g(d,p)");
        assert_eq!(settings.charge, -1);
        assert_eq!(settings.multiplicity, 1);
        assert_eq!(settings.nprocshared, Some(16));
    }

    #[test]
    fn settings_reject_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cores = 8\n").unwrap();
        assert!(matches!(
            JobSettings::from_toml_path(&path),
            Err(GjfError::Settings(_))
        ));
    }
}
