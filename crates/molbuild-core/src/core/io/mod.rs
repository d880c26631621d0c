pub mod gjf;
pub mod mol2;
pub mod traits;
