//! # molbuild Core Library
//!
//! A library for generating three-dimensional molecular structures of the
//! benzobisazole family from compact textual names, and for emitting those
//! structures in computational-chemistry input and interchange formats.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Atom`,
//!   `Bond`), the name grammar parser, the fragment library loader, geometry
//!   helpers, and the output serializers.
//!
//! - **[`assembly`]: The Logic Core.** The fragment merge engine: rigid-body
//!   alignment of fragments at open bonds, linear chain replication, lattice
//!   stacking, and the builder that walks a parsed name descriptor to produce
//!   one fully bonded molecule.
//!
//! - **[`workflows`]: The Public API.** The highest-level entry point that
//!   ties the grammar, library, and assembly engine together: one call turns
//!   a name string into a finished `Molecule`, or fails with a single
//!   per-build error.

pub mod assembly;
pub mod core;
pub mod workflows;
