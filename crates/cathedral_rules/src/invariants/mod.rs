//! Consistency properties of a [`Game`](crate::Game).
//!
//! The game keeps the same facts in several places (tiles, standing
//! pieces, claimed sets, inventories). These invariants state how they must
//! agree. They are checked in debug builds after every placement and
//! enforced whenever a snapshot is restored.

pub mod claimed_territory;
pub mod inventory;
pub mod tile_pieces;

pub use claimed_territory::ClaimedTerritoryInvariant;
pub use inventory::InventoryInvariant;
pub use tile_pieces::TilePiecesInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together; implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every rules invariant.
pub type RulesInvariants = (
    TilePiecesInvariant,
    ClaimedTerritoryInvariant,
    InventoryInvariant,
);
