pub mod build;
pub mod explain;
