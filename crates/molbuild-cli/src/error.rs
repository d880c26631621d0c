use molbuild::core::io::gjf::GjfError;
use molbuild::core::io::mol2::Mol2Error;
use molbuild::core::library::FragmentError;
use molbuild::workflows::BuildError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Store(#[from] FragmentError),

    #[error("Failed to write job input: {0}")]
    Gjf(#[from] GjfError),

    #[error("Failed to write interchange file: {0}")]
    Mol2(#[from] Mol2Error),

    #[error("{failed} of {total} builds failed")]
    Batch { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
