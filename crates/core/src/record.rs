//! Behaviour shared by every persisted record kind.

use core::fmt;

use crate::validation::Violation;

/// A record stored in its own table and served under its own route prefix.
///
/// Patients and users are structurally identical; this trait is the seam that
/// lets stores and request handlers be written once for both.
pub trait Record: Clone + Send + Sync + 'static {
    /// Typed identifier for this kind.
    type Id: Copy + Eq + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Lowercase kind name used in routes and messages (e.g. `patient`).
    const KIND: &'static str;

    /// Capitalized kind name used in success messages (e.g. `Patient`).
    const LABEL: &'static str;

    /// Identifier, or `None` if the record has never been saved.
    fn id(&self) -> Option<Self::Id>;

    /// Set the identifier. Stores call this exactly once, on insert.
    fn assign_id(&mut self, id: Self::Id);

    /// Forget the identifier so the next save inserts a new row.
    fn clear_id(&mut self);

    /// Allocate a fresh identifier.
    fn new_id() -> Self::Id;

    /// Last name half of the lookup key.
    fn last_name(&self) -> &str;

    /// First name half of the lookup key.
    fn first_name(&self) -> &str;

    /// Every rule this record breaks, in field declaration order.
    fn violations(&self) -> Vec<Violation>;

    /// Replace every field except the identifier with the values from `other`.
    fn overwrite_with(&mut self, other: Self);

    /// Whether this record matches the `(last_name, first_name)` lookup key exactly.
    fn matches_name(&self, last_name: &str, first_name: &str) -> bool {
        self.last_name() == last_name && self.first_name() == first_name
    }
}
