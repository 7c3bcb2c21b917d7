//! Balance engine
//!
//! Pure, stateless computations over a household's members and expenses:
//!
//! - [`compute_balances`] nets every pending split into at most one directed
//!   [`Balance`](crate::models::Balance) per pair of members.
//! - [`simplify_settlements`] turns those balances into a short list of
//!   suggested payments that brings every member's net position to zero.
//!
//! All arithmetic is in whole cents. Nothing here touches storage, so the
//! functions can be called concurrently on independent inputs.

pub mod balances;
pub mod settle;

pub use balances::{
    compute_balances, compute_balances_with_settlements, net_positions, validate_batch,
};
pub use settle::{simplify_settlements, simplify_settlements_on};
