pub mod builder;
mod merge;

use thiserror::Error;

/// Errors raised by the fragment assembly and merge engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    /// A merge was invoked on a bond with zero or two sentinel atoms;
    /// either a fragment file is malformed or an internal invariant broke.
    #[error("bond cannot be resolved to a placeholder/connection pair")]
    BadBond,

    /// A requested attachment position has no open bond matching the
    /// requested connection-type priority.
    #[error("no open bond for substituent '{fragment}' (connection priority '{priority}')")]
    UnresolvedAttachment { fragment: char, priority: String },

    /// The core fragment exposes fewer open bonding sites than the name
    /// requires.
    #[error("core has {available} open sites but side {side} is requested")]
    MissingCoreSite { side: usize, available: usize },

    /// Replication was requested on a molecule with no atoms.
    #[error("cannot replicate an empty molecule")]
    EmptyMolecule,
}
