mod build;

pub use build::build_molecule;
pub use crate::assembly::builder::BuildError;
