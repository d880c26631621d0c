use crate::core::models::molecule::Molecule;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing molecules to chemistry file
/// formats.
///
/// This trait provides a common API for molecular output, with
/// format-specific details carried by the metadata type. Assembled
/// molecules are write-only artifacts; input parsing is the fragment
/// store's concern, so no read half exists here.
pub trait MolecularWriter {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes a molecule and metadata to a writer.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule to write.
    /// * `metadata` - The metadata to include in the output.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a molecule and metadata to a file path.
    ///
    /// # Arguments
    ///
    /// * `molecule` - The molecule to write.
    /// * `metadata` - The metadata to include in the output.
    /// * `path` - The path to the file to write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(molecule, metadata, &mut writer)
    }

    /// Renders a molecule and metadata to an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails.
    fn to_string(molecule: &Molecule, metadata: &Self::Metadata) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(molecule, metadata, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
