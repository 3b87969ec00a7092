//! Finite-group computation engine.
//!
//! Groups are given by raw multiplication tables (`table[a][b] = a*b`,
//! element 0 the identity). From the table the engine derives algebraic
//! invariants (element orders, conjugacy classes, abelian/cyclic/solvable/
//! simple flags), enumerates the complete subgroup lattice via layered
//! cyclic extension, and searches for isomorphisms between groups —
//! including embeddings and quotient identifications relative to a library
//! of known groups.
//!
//! The two exponential searches (subgroup enumeration, isomorphism
//! backtracking) accept a [`CancelToken`] so callers can bound them with a
//! deadline or a shared stop flag.

pub mod bitset;
pub mod cancel;
pub mod error;
pub mod group;
pub mod isomorphism;
pub mod library;
pub mod numtheory;
pub mod subgroup;

pub use bitset::BitSet;
pub use cancel::CancelToken;
pub use error::GroupError;
pub use group::{Group, QuotientGroup, RestrictedGroup};
pub use library::{GroupDefinition, GroupLibrary, LibraryEntry};
pub use subgroup::Subgroup;
