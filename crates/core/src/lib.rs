//! `aroma-core` — ledger foundation building blocks.
//!
//! Identifiers, the error model, time and the filter helpers shared by the
//! product and sales crates. Nothing here performs IO.

pub mod clock;
pub mod entity;
pub mod error;
pub mod filter;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{Entity, position_of};
pub use error::{LedgerError, LedgerResult};
pub use filter::{DEFAULT_SENTINELS, SearchTerm, active_filter};
pub use id::{IdSequence, ProductId, SaleId};
