pub mod atom;
pub mod molecule;
pub mod topology;
