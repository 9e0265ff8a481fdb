//! Domain records, billing aggregation, and selection state.
//!
//! This module provides the foundational types of the repair shop —
//! clients, partner stores, interventions, invoices — plus the pure
//! billing logic that drives batch invoice generation.

mod billing;
mod drafts;
mod error;
mod selection;
mod types;

pub use billing::*;
pub use drafts::*;
pub use error::*;
pub use selection::*;
pub use types::*;
