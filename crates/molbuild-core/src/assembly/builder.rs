use super::AssemblyError;
use crate::core::grammar::{GrammarError, NameDescriptor, SideToken};
use crate::core::library::{FragmentError, FragmentLibrary};
use crate::core::models::molecule::{DEFAULT_PRIORITY, Molecule};
use std::ops::Range;
use thiserror::Error;

/// Any failure of a single-name build. Every variant aborts only the build
/// for the one name in question; batch drivers catch per-name failures and
/// continue.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Fragment(#[from] FragmentError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Assembles one fully bonded molecule from a parsed name descriptor.
///
/// The middle side descriptor is applied twice (the core has two equivalent
/// middle positions), then the right and left sides, each against the
/// core's open bonding sites in that order. Substituents within a side are
/// merged onto their attachment parents; then chain replication runs along
/// whichever axis pair (`n`: left/right, `m`: middle) was requested and has
/// both ends open, lattice stacking replicates along any axis with a count
/// above one, and every remaining sentinel is capped with hydrogen.
pub fn assemble(
    descriptor: &NameDescriptor,
    library: &FragmentLibrary,
) -> Result<Molecule, BuildError> {
    let mut molecule = library.load(&descriptor.core)?;
    let core_region = 0..molecule.bonds().len();
    let core_ends = molecule.open_ends();

    let sides: [Option<&[SideToken]>; 4] = [
        descriptor.middle.as_deref(),
        descriptor.middle.as_deref(),
        descriptor.right.as_deref(),
        descriptor.left.as_deref(),
    ];

    // One growth end per side: the furthest substituent's next open `~`
    // bond, or the core's own untouched site for an absent side. Bond
    // indices recorded here stay valid because a merge never moves an
    // existing bond index.
    let mut ends: [Option<usize>; 4] = [None; 4];

    for (j, side) in sides.iter().enumerate() {
        match side {
            Some(tokens) if !tokens.is_empty() => {
                let mut regions: Vec<Range<usize>> = vec![core_region.clone()];
                for token in *tokens {
                    let parent = (token.parent + 1) as usize;
                    let part = library.load_char(token.name)?;
                    let part_bond = part.next_open(DEFAULT_PRIORITY).ok_or_else(|| {
                        AssemblyError::UnresolvedAttachment {
                            fragment: token.name,
                            priority: DEFAULT_PRIORITY.to_string(),
                        }
                    })?;

                    let target = if parent == 0 {
                        *core_ends
                            .get(j)
                            .ok_or(AssemblyError::MissingCoreSite {
                                side: j,
                                available: core_ends.len(),
                            })?
                    } else {
                        let priority =
                            connection_priority(token.name, part.connection(part_bond));
                        let region = regions
                            .get(parent)
                            .cloned()
                            .ok_or(AssemblyError::BadBond)?;
                        molecule.next_open_in(region, &priority).ok_or(
                            AssemblyError::UnresolvedAttachment {
                                fragment: token.name,
                                priority,
                            },
                        )?
                    };

                    let block_start = molecule.bonds().len();
                    molecule.merge(target, part, part_bond)?;
                    regions.push(block_start..molecule.bonds().len());
                }

                let furthest = tokens
                    .iter()
                    .map(|t| (t.parent + 1) as usize)
                    .max()
                    .expect("side is non-empty");
                ends[j] = molecule.next_open_in(regions[furthest].clone(), "~");
            }
            _ => ends[j] = core_ends.get(j).copied(),
        }
    }

    let mut molecule = match (descriptor.n, descriptor.m, ends) {
        (n, _, [_, _, Some(right), Some(left)]) if n > 1 => molecule.chain(right, left, n)?,
        (_, m, [Some(first), Some(second), _, _]) if m > 1 => molecule.chain(first, second, m)?,
        _ => molecule,
    };

    let (x, y, z) = descriptor.stacks;
    if x > 1 || y > 1 || z > 1 {
        molecule = molecule.stack(x, y, z)?;
    }

    molecule.close_ends();
    Ok(molecule)
}

/// The connection-type scan order for attaching a substituent to its
/// parent: lowercase R-groups claim `+` sites, uppercase X-groups add `~`
/// behind their own connection type, ring units keep theirs as-is.
fn connection_priority(name: char, connection: String) -> String {
    if name.is_ascii_lowercase() {
        "+".to_string()
    } else if name.is_ascii_uppercase() {
        connection + "~"
    } else {
        connection
    }
}
