//! Sales domain module.
//!
//! Immutable sale records, the request used to record one (with the shop's
//! defaults for optional fields) and the aggregate statistics over them.

pub mod request;
pub mod sale;
pub mod stats;

pub use request::{SaleDefaults, SaleRequest};
pub use sale::Sale;
pub use stats::SalesStatistics;
